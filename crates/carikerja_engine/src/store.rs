use std::time::Duration;

use carikerja_core::{Article, Category, CategoryId, Job};
use carikerja_logging::ck_debug;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::query::{articles_query, categories_query, job_by_slug_query, jobs_query, Query};
use crate::{FailureKind, FetchError};

/// Error bodies are only kept as a diagnostic message; longer ones are cut.
pub const ERROR_BODY_LIMIT: usize = 1024;

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Project URL; `/rest/v1/...` is appended to it.
    pub base_url: String,
    /// Public (anon) API key, sent as `apikey` and as bearer token.
    pub anon_key: String,
    pub connect_timeout: Duration,
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl StoreSettings {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 8 * 1024 * 1024,
            allowed_content_types: vec![
                "application/json".to_string(),
                "application/vnd.pgrst.object+json".to_string(),
            ],
        }
    }
}

/// Read access to the remote listing tables.
#[async_trait::async_trait]
pub trait ListingStore: Send + Sync {
    /// All categories, by name.
    async fn categories(&self) -> Result<Vec<Category>, FetchError>;
    /// Jobs, newest first, optionally restricted to one category.
    async fn jobs(&self, category: Option<&CategoryId>) -> Result<Vec<Job>, FetchError>;
    /// Articles, newest first.
    async fn articles(&self) -> Result<Vec<Article>, FetchError>;
    /// The job with `slug`, if any.
    async fn job_by_slug(&self, slug: &str) -> Result<Option<Job>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct RestStore {
    settings: StoreSettings,
    base: Url,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(settings: StoreSettings) -> Result<Self, FetchError> {
        let base = Url::parse(settings.base_url.trim())
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be a base"),
            ));
        }
        let client = build_client(&settings)?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    /// Runs `query` and decodes the JSON array it returns.
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, FetchError> {
        let url = query.url(&self.base)?;
        ck_debug!("GET {} ({})", query.table(), url);

        let response = self
            .client
            .get(url)
            .header("apikey", &self.settings.anon_key)
            .bearer_auth(&self.settings.anon_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

/// Reads at most `ERROR_BODY_LIMIT` bytes of a failed response.
async fn read_error_body(response: reqwest::Response) -> String {
    let mut body = Vec::new();
    let mut truncated = false;
    let mut stream = response.bytes_stream();
    while let Some(Ok(chunk)) = stream.next().await {
        let room = ERROR_BODY_LIMIT - body.len();
        if chunk.len() > room {
            body.extend_from_slice(&chunk[..room]);
            truncated = true;
            break;
        }
        body.extend_from_slice(&chunk);
    }
    let mut text = String::from_utf8_lossy(&body).trim().to_string();
    if truncated {
        text.push('…');
    }
    text
}

#[async_trait::async_trait]
impl ListingStore for RestStore {
    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.select(&categories_query()).await
    }

    async fn jobs(&self, category: Option<&CategoryId>) -> Result<Vec<Job>, FetchError> {
        self.select(&jobs_query(category)).await
    }

    async fn articles(&self) -> Result<Vec<Article>, FetchError> {
        self.select(&articles_query()).await
    }

    async fn job_by_slug(&self, slug: &str) -> Result<Option<Job>, FetchError> {
        let rows: Vec<Job> = self.select(&job_by_slug_query(slug)).await?;
        Ok(rows.into_iter().next())
    }
}

fn build_client(settings: &StoreSettings) -> Result<reqwest::Client, FetchError> {
    let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
