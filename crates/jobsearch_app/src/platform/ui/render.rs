use jobsearch_core::{AppViewModel, JobCard, ResultsView, NO_MATCHES_HINT, NO_MATCHES_TITLE};

const BAR_WIDTH: usize = 30;

/// Single-line progress readout, redrawn in place.
pub fn progress_line(view: &AppViewModel) -> String {
    let fraction = view.progress_width.clamp(0.0, 100.0) / 100.0;
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    let mut line = format!("[{bar}] {:>4} {}", view.progress_text, view.current_step);
    if let Some(counter) = &view.scrape_counter {
        line.push_str(&format!(" ({counter})"));
    }
    line
}

pub fn results_lines(view: &AppViewModel) -> Vec<String> {
    if !view.results_visible() {
        return Vec::new();
    }
    let mut lines = vec![format!("{} found", view.job_count_text())];
    match &view.results {
        ResultsView::Hidden => {}
        ResultsView::NoMatches => {
            lines.push(NO_MATCHES_TITLE.to_string());
            lines.push(NO_MATCHES_HINT.to_string());
        }
        ResultsView::Cards(cards) => {
            for card in cards {
                lines.push(String::new());
                lines.extend(card_lines(card));
            }
        }
    }
    lines
}

fn card_lines(card: &JobCard) -> Vec<String> {
    let apply = if card.has_apply_link() {
        format!("    Apply: {}", card.apply_link)
    } else {
        "    Apply: no link provided".to_string()
    };
    vec![
        format!("[{}] {}", card.company_initial, card.title),
        format!("    {}", card.company),
        format!("    {} | {} | {}", card.job_type, card.location, card.salary),
        format!("    {}", card.description),
        apply,
    ]
}
