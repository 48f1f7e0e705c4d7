use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use jobsearch_core::SearchForm;
use jobsearch_engine::ApiSettings;
use log::LevelFilter;

use crate::platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "jobsearch",
    version,
    about = "Run a job search against a job finder service and print the matches"
)]
/// Command-line arguments accepted by the `jobsearch` binary.
pub(crate) struct CliArgs {
    #[arg(short, long, value_name = "TITLE", help = "Position to search for")]
    pub(crate) position: String,
    #[arg(short, long, value_name = "PLACE", help = "Where the job should be")]
    pub(crate) location: String,
    #[arg(long, value_name = "YEARS", default_value = "", help = "Years of experience")]
    pub(crate) experience: String,
    #[arg(long, value_name = "RANGE", default_value = "", help = "Expected salary")]
    pub(crate) salary: String,
    #[arg(
        long = "job-nature",
        value_name = "KIND",
        default_value = "",
        help = "Job nature, e.g. remote or onsite"
    )]
    pub(crate) job_nature: String,
    #[arg(long, value_name = "LIST", default_value = "", help = "Comma-separated skills")]
    pub(crate) skills: String,
    #[arg(
        short,
        long,
        value_name = "URL",
        env = "JOBSEARCH_SERVER",
        default_value = "http://127.0.0.1:8000/",
        help = "Base URL of the job finder service"
    )]
    pub(crate) server: String,
    #[arg(
        long = "connect-timeout",
        value_name = "SECS",
        default_value_t = 10,
        help = "Seconds to wait for a connection"
    )]
    pub(crate) connect_timeout_secs: u64,
    #[arg(
        long = "request-timeout",
        value_name = "SECS",
        default_value_t = 30,
        help = "Seconds to wait for each request"
    )]
    pub(crate) request_timeout_secs: u64,
    #[arg(
        long = "max-wait",
        value_name = "SECS",
        default_value_t = 600,
        help = "Abandon the search if it has not finished after this long"
    )]
    pub(crate) max_wait_secs: u64,
    #[arg(
        long = "log",
        value_enum,
        default_value_t = LogArg::File,
        help = "Where to write logs; the terminal is shared with the progress line"
    )]
    pub(crate) log: LogArg,
    #[arg(short, long, action = ArgAction::Count, help = "Log more detail (repeatable)")]
    pub(crate) verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogArg {
    File,
    Terminal,
    Both,
    Off,
}

impl CliArgs {
    pub(crate) fn search_form(&self) -> SearchForm {
        SearchForm {
            position: self.position.clone(),
            location: self.location.clone(),
            experience: self.experience.clone(),
            salary: self.salary.clone(),
            job_nature: self.job_nature.clone(),
            skills: self.skills.clone(),
        }
    }

    pub(crate) fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.server.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ApiSettings::default()
        }
    }

    pub(crate) fn log_destination(&self) -> Option<LogDestination> {
        match self.log {
            LogArg::File => Some(LogDestination::File),
            LogArg::Terminal => Some(LogDestination::Terminal),
            LogArg::Both => Some(LogDestination::Both),
            LogArg::Off => None,
        }
    }

    pub(crate) fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
