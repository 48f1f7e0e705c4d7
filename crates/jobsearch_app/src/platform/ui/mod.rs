pub mod render;

use std::io::{self, Write};

use jobsearch_core::AppViewModel;
use jobsearch_logging::search_warn;

/// Anything that can draw the page for a view model.
pub trait ViewSink {
    fn render(&mut self, view: &AppViewModel);
}

/// Draws the page as text: one progress line updated in place, followed by
/// errors, status messages and result cards as they appear.
pub struct TerminalView<W: Write> {
    out: W,
    last: Option<AppViewModel>,
    progress_line_open: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: None,
            progress_line_open: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, previous: Option<&AppViewModel>, view: &AppViewModel) -> io::Result<()> {
        if view.progress_visible {
            let line = render::progress_line(view);
            if previous.map(render::progress_line).as_ref() != Some(&line) {
                write!(self.out, "\r\x1b[2K{line}")?;
                self.progress_line_open = true;
            }
        }

        if previous.map(|p| &p.error) != Some(&view.error) {
            if let Some(error) = &view.error {
                self.close_progress_line()?;
                writeln!(self.out, "Error: {error}")?;
            }
        }

        if previous.map(|p| &p.status_message) != Some(&view.status_message)
            && !view.status_message.is_empty()
        {
            self.close_progress_line()?;
            writeln!(self.out, "{}", view.status_message)?;
        }

        if previous.map(|p| &p.results) != Some(&view.results) && view.results_visible() {
            self.close_progress_line()?;
            for line in render::results_lines(view) {
                writeln!(self.out, "{line}")?;
            }
        }

        self.out.flush()
    }

    fn close_progress_line(&mut self) -> io::Result<()> {
        if self.progress_line_open {
            writeln!(self.out)?;
            self.progress_line_open = false;
        }
        Ok(())
    }
}

impl<W: Write> ViewSink for TerminalView<W> {
    fn render(&mut self, view: &AppViewModel) {
        let previous = self.last.take();
        if let Err(err) = self.draw(previous.as_ref(), view) {
            search_warn!("Failed to draw to terminal: {}", err);
        }
        self.last = Some(view.clone());
    }
}
