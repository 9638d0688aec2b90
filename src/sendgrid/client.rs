use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{ApiErrorEnvelope, ApiErrorItem, DesignPage, DesignRecord, PageQuery, UpsertRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

#[derive(Clone, Debug)]
pub struct SendGridConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// `None` keeps reqwest's default (no overall timeout).
    pub timeout: Option<Duration>,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("SENDGRID_API_KEY").ok(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl SendGridConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(base) = std::env::var("SENDGRID_BASE_URL") {
            cfg.base_url = base;
        }
        if let Ok(timeout) = std::env::var("SENDGRID_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Some(Duration::from_secs(parsed));
            }
        }
        cfg
    }

    /// CLI flags win over the environment.
    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if let Some(base) = base_url {
            self.base_url = base;
        }
        self
    }
}

/// The provider's design-management surface, as far as publishing needs it.
#[async_trait]
pub trait DesignClient: Send + Sync {
    async fn list_designs(&self, query: &PageQuery) -> Result<DesignPage, ApiError>;

    async fn create_design(&self, body: &UpsertRequest) -> Result<DesignRecord, ApiError>;

    async fn update_design(&self, id: &str, body: &UpsertRequest) -> Result<DesignRecord, ApiError>;
}

#[derive(Clone)]
pub struct SendGridClient {
    http: HttpClient,
    cfg: SendGridConfig,
}

impl SendGridClient {
    pub fn new(cfg: SendGridConfig) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::from_reqwest)?;
        Ok(Self { http, cfg })
    }

    fn designs_url(&self) -> String {
        format!("{}/v3/designs", self.cfg.base_url.trim_end_matches('/'))
    }

    fn design_url(&self, id: &str) -> String {
        format!("{}/{}", self.designs_url(), id)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let api_key = self.cfg.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;

        let response = req
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;

        if !status.is_success() {
            let errors = serde_json::from_slice::<ApiErrorEnvelope>(&bytes)
                .map(|env| env.errors)
                .unwrap_or_default();
            return Err(ApiError::Api { status, errors });
        }

        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }
}

#[async_trait]
impl DesignClient for SendGridClient {
    async fn list_designs(&self, query: &PageQuery) -> Result<DesignPage, ApiError> {
        let req = self.http.get(self.designs_url()).query(&query.to_pairs());
        self.send(req).await
    }

    async fn create_design(&self, body: &UpsertRequest) -> Result<DesignRecord, ApiError> {
        let req = self.http.post(self.designs_url()).json(body);
        self.send(req).await
    }

    async fn update_design(&self, id: &str, body: &UpsertRequest) -> Result<DesignRecord, ApiError> {
        let req = self.http.patch(self.design_url(id)).json(body);
        self.send(req).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("SENDGRID_API_KEY is not set")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("api error {status}: {}", summarize(.errors))]
    Api {
        status: StatusCode,
        errors: Vec<ApiErrorItem>,
    },
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Http(err)
        }
    }
}

fn summarize(errors: &[ApiErrorItem]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) => format!("{field}: {}", e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
