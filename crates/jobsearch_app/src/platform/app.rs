use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use jobsearch_core::SessionOutcome;
use jobsearch_engine::EngineHandle;
use jobsearch_logging::{search_info, search_warn};

use super::controller::SearchSessionController;
use super::effects::EffectRunner;
use super::ui::TerminalView;
use crate::cli::CliArgs;

/// Display refresh interval; also bounds how long engine events wait.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub fn run_app(args: &CliArgs) -> anyhow::Result<ExitCode> {
    let engine = EngineHandle::new(args.api_settings())
        .with_context(|| format!("failed to set up client for {}", args.server))?;
    let mut controller =
        SearchSessionController::new(EffectRunner::new(engine), TerminalView::new(io::stdout()));

    let deadline = Instant::now() + Duration::from_secs(args.max_wait_secs);
    controller.submit_search(args.search_form());
    while controller.is_searching() {
        if Instant::now() >= deadline {
            search_warn!("Giving up after {} s", args.max_wait_secs);
            controller.cancel();
            eprintln!("Search abandoned after {} seconds", args.max_wait_secs);
            return Ok(ExitCode::FAILURE);
        }
        controller.pump(FRAME_INTERVAL);
    }

    // Let the progress bar finish its last transition before exiting.
    while controller.is_animating() {
        controller.pump(FRAME_INTERVAL);
    }

    let view = controller.view();
    search_info!("Search finished with {:?}", view.last_outcome);
    Ok(match view.last_outcome {
        Some(SessionOutcome::Completed) => ExitCode::SUCCESS,
        Some(SessionOutcome::Failed) | None => ExitCode::FAILURE,
    })
}
