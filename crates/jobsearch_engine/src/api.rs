use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use jobsearch_logging::{search_debug, search_warn};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::types::ErrorBody;
use crate::{ApiError, JobListing, SearchCriteria, StatusSnapshot};

const SEARCH_PATH: &str = "api/search";
const STATUS_PATH: &str = "api/status";
const RESULTS_PATH: &str = "api/results";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The three endpoints of the job search service.
#[async_trait::async_trait]
pub trait SearchApi: Send + Sync {
    async fn submit_search(&self, criteria: &SearchCriteria) -> Result<(), ApiError>;

    async fn fetch_status(&self) -> Result<StatusSnapshot, ApiError>;

    async fn fetch_results(&self) -> Result<Option<Vec<JobListing>>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchApi {
    client: reqwest::Client,
    base_url: Url,
    max_body_bytes: u64,
}

impl ReqwestSearchApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url));
        }
        // Endpoints are joined relative to the base, so it must look like a directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    async fn read_body(&self, response: Response) -> Result<Bytes, ApiError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(ApiError::TooLarge {
                    max_bytes: self.max_body_bytes,
                });
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.max_body_bytes {
                return Err(ApiError::TooLarge {
                    max_bytes: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    /// Turns a non-success response into `Rejected`, keeping the server's
    /// `error` text when the body carries one.
    async fn rejection(&self, status: StatusCode, response: Response) -> ApiError {
        let message = match self.read_body(response).await {
            Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|payload| payload.error),
            Err(err) => {
                search_warn!("Could not read error body for status {}: {}", status, err);
                None
            }
        };
        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait::async_trait]
impl SearchApi for ReqwestSearchApi {
    async fn submit_search(&self, criteria: &SearchCriteria) -> Result<(), ApiError> {
        let url = self.endpoint(SEARCH_PATH)?;
        let response = self
            .client
            .post(url)
            .form(criteria)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.rejection(status, response).await);
        }
        search_debug!("Search accepted with status {}", status);
        Ok(())
    }

    async fn fetch_status(&self) -> Result<StatusSnapshot, ApiError> {
        let url = self.endpoint(STATUS_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.rejection(status, response).await);
        }
        let body = self.read_body(response).await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn fetch_results(&self) -> Result<Option<Vec<JobListing>>, ApiError> {
        let url = self.endpoint(RESULTS_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.rejection(status, response).await);
        }
        let body = self.read_body(response).await?;
        let value: Value =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(decode_listings(value))
    }
}

/// Anything but an array means "no results"; a malformed entry still gets a
/// card, filled with placeholders.
fn decode_listings(value: Value) -> Option<Vec<JobListing>> {
    let Value::Array(items) = value else {
        search_warn!("Results body is not an array; treating as empty");
        return None;
    };
    let listings = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|err| {
                search_warn!("Result #{} could not be decoded: {}", index, err);
                JobListing::default()
            })
        })
        .collect();
    Some(listings)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
