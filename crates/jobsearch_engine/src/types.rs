use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type SessionId = u64;
pub type PollGeneration = u64;

/// Form fields posted to `/api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchCriteria {
    pub position: String,
    pub location: String,
    pub experience: String,
    pub salary: String,
    #[serde(rename = "jobNature")]
    pub job_nature: String,
    pub skills: String,
}

/// Body of `/api/status`.
///
/// A `null` or oddly typed field reads as if it were missing rather than
/// failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    #[serde(deserialize_with = "lenient_flag")]
    pub is_scraping: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub current_step: String,
    #[serde(deserialize_with = "lenient_number")]
    pub progress: f64,
    #[serde(deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub total_jobs: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub scraped_jobs: Option<u64>,
}

/// One element of the `/api/results` array.
///
/// Results may come straight from the scraper or from a language model, so
/// field names vary and values are not always strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct JobListing {
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub apply_link: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or_default(),
        Value::String(text) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Error payload the server sends with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("response larger than {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchSubmitted {
        session: SessionId,
        result: Result<(), ApiError>,
    },
    PollDue {
        session: SessionId,
        generation: PollGeneration,
    },
    StatusFetched {
        session: SessionId,
        generation: PollGeneration,
        result: Result<StatusSnapshot, ApiError>,
    },
    /// `Ok(None)` when the body was JSON but not an array.
    ResultsFetched {
        session: SessionId,
        result: Result<Option<Vec<JobListing>>, ApiError>,
    },
}
