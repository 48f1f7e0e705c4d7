mod app;
mod controller;
mod effects;
pub mod logging;
pub mod ui;

pub use app::run_app;
