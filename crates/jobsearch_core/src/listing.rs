/// Search criteria entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchForm {
    pub position: String,
    pub location: String,
    pub experience: String,
    pub salary: String,
    pub job_nature: String,
    pub skills: String,
}

impl SearchForm {
    pub fn new(position: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Position and location are the only fields the server insists on.
    pub fn is_missing_required(&self) -> bool {
        self.position.trim().is_empty() || self.location.trim().is_empty()
    }
}

/// One reading of the server's scraping status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSnapshot {
    pub is_scraping: bool,
    pub current_step: String,
    pub progress: f64,
    pub message: Option<String>,
    pub error: Option<String>,
    pub total_jobs: Option<u64>,
    pub scraped_jobs: Option<u64>,
}

/// A job as returned by the results endpoint.
///
/// The server is inconsistent about field names, so every alias is kept and
/// resolved when the card is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListing {
    pub job_title: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub job_description: Option<String>,
    pub apply_link: Option<String>,
}

impl JobListing {
    pub fn resolved_title(&self) -> Option<&str> {
        first_present(&[&self.job_title, &self.title])
    }

    pub fn resolved_company(&self) -> Option<&str> {
        first_present(&[&self.company_name, &self.company])
    }

    pub fn resolved_description(&self) -> Option<&str> {
        first_present(&[&self.description, &self.job_description])
    }
}

/// First candidate that is present and non-empty.
pub(crate) fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|value| value.as_deref())
        .find(|value| !value.is_empty())
}
