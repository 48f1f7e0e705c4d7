#![deny(missing_docs)]
//! Shared logging utilities for the job search workspace.
//!
//! Every crate logs through the `search_*` macros below so that lines emitted
//! while a search session is active carry that session's id.
//!
//! The dispatcher thread records its session with [`set_session`]. Async work
//! for a session runs inside [`in_session`], which follows the task across
//! worker threads.

use std::cell::Cell;
use std::future::Future;

thread_local! {
    /// Session id of the search currently being dispatched on this thread.
    static SESSION: Cell<u64> = const { Cell::new(0) };
}

tokio::task_local! {
    static TASK_SESSION: u64;
}

/// Records the session id that subsequent log lines on this thread belong to.
/// The dispatcher calls this whenever it applies a message.
pub fn set_session(session: u64) {
    SESSION.with(|v| v.set(session));
}

/// Returns the session of the enclosing [`in_session`] scope, else the one
/// recorded for the current thread, or 0 before the first search.
pub fn current_session() -> u64 {
    TASK_SESSION
        .try_with(|session| *session)
        .unwrap_or_else(|_| SESSION.with(|v| v.get()))
}

/// Runs `future` with every log line inside it tagged with `session`.
pub async fn in_session<F: Future>(session: u64, future: F) -> F::Output {
    TASK_SESSION.scope(session, future).await
}

/// Logs a trace-level message tagged with the current session.
#[macro_export]
macro_rules! search_trace {
    ($($arg:tt)*) => {{
        log::trace!("[s{}] {}", $crate::current_session(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current session.
#[macro_export]
macro_rules! search_debug {
    ($($arg:tt)*) => {{
        log::debug!("[s{}] {}", $crate::current_session(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current session.
#[macro_export]
macro_rules! search_info {
    ($($arg:tt)*) => {{
        log::info!("[s{}] {}", $crate::current_session(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current session.
#[macro_export]
macro_rules! search_warn {
    ($($arg:tt)*) => {{
        log::warn!("[s{}] {}", $crate::current_session(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current session.
#[macro_export]
macro_rules! search_error {
    ($($arg:tt)*) => {{
        log::error!("[s{}] {}", $crate::current_session(), format_args!($($arg)*));
    }};
}

/// Initializes a terminal logger for use in tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
