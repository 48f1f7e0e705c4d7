use crate::listing::first_present;
use crate::{JobListing, SessionOutcome, SessionPhase};

pub const SUBMIT_LABEL_IDLE: &str = "Search Jobs";
pub const SUBMIT_LABEL_BUSY: &str = "Searching...";
pub const INITIAL_STEP_TEXT: &str = "Initializing...";
pub const NO_MATCHES_TITLE: &str = "No matching jobs found";
pub const NO_MATCHES_HINT: &str = "Try adjusting your search criteria";

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_COMPANY: &str = "Unknown Company";
const NOT_SPECIFIED: &str = "Not specified";
const NO_DESCRIPTION: &str = "No description available";
const NO_APPLY_LINK: &str = "#";

/// Everything a UI binding needs to draw the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: SessionPhase,
    pub last_outcome: Option<SessionOutcome>,
    /// Error alert; hidden when `None`.
    pub error: Option<String>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub progress_visible: bool,
    /// Bar width in percent, possibly mid-animation.
    pub progress_width: f64,
    pub progress_text: String,
    pub current_step: String,
    pub status_message: String,
    /// "Scraped N of M jobs" once the server reports counters.
    pub scrape_counter: Option<String>,
    pub results: ResultsView,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn results_visible(&self) -> bool {
        !matches!(self.results, ResultsView::Hidden)
    }

    pub fn job_count_text(&self) -> String {
        match &self.results {
            ResultsView::Hidden => String::new(),
            ResultsView::NoMatches => "0 jobs".to_string(),
            ResultsView::Cards(cards) => format!("{} jobs", cards.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Hidden,
    NoMatches,
    Cards(Vec<JobCard>),
}

impl ResultsView {
    pub fn from_listings(listings: Option<&[JobListing]>) -> Self {
        match listings {
            Some(listings) if !listings.is_empty() => {
                ResultsView::Cards(listings.iter().map(JobCard::from_listing).collect())
            }
            _ => ResultsView::NoMatches,
        }
    }
}

/// A job listing with every placeholder already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub company_initial: char,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub description: String,
    pub apply_link: String,
}

impl JobCard {
    pub fn from_listing(listing: &JobListing) -> Self {
        let company = listing.resolved_company();
        Self {
            company_initial: company.and_then(|c| c.chars().next()).unwrap_or('?'),
            title: listing.resolved_title().unwrap_or(UNKNOWN_TITLE).to_string(),
            company: company.unwrap_or(UNKNOWN_COMPANY).to_string(),
            location: or_placeholder(&listing.location, NOT_SPECIFIED),
            salary: or_placeholder(&listing.salary, NOT_SPECIFIED),
            job_type: or_placeholder(&listing.job_type, NOT_SPECIFIED),
            description: listing
                .resolved_description()
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            apply_link: or_placeholder(&listing.apply_link, NO_APPLY_LINK),
        }
    }

    pub fn has_apply_link(&self) -> bool {
        self.apply_link != NO_APPLY_LINK
    }
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    first_present(&[value]).unwrap_or(placeholder).to_string()
}
