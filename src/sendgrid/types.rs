use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// The two fields of a design this tool cares about; the rest of the listing payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl PageQuery {
    pub fn first(page_size: u32) -> Self {
        Self { page_size, page_token: None }
    }

    pub fn next(page_size: u32, token: String) -> Self {
        Self { page_size, page_token: Some(token) }
    }

    /// Query pairs in the order the listing endpoint documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page_size", self.page_size.to_string())];
        if let Some(token) = &self.page_token {
            pairs.push(("page_token", token.clone()));
        }
        pairs.push(("summary", "true".to_string()));
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of `GET /v3/designs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignPage {
    #[serde(default)]
    pub result: Vec<DesignSummary>,
    #[serde(rename = "_metadata", default)]
    pub metadata: PageMetadata,
}

impl DesignPage {
    /// The `page_token` embedded in `_metadata.next`, if the provider sent one.
    pub fn next_page_token(&self) -> Option<String> {
        let next = self.metadata.next.as_deref()?.trim();
        if next.is_empty() {
            return None;
        }
        // `next` is normally absolute, but accept a bare path or query too.
        let url = Url::parse(next)
            .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(next)))
            .ok()?;
        url.query_pairs()
            .find(|(k, _)| k == "page_token")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }
}

/// Body of both `POST /v3/designs` and `PATCH /v3/designs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertRequest {
    pub name: String,
    pub html_content: String,
    pub subject: String,
    pub generate_plain_content: bool,
}

impl UpsertRequest {
    pub fn new(name: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html_content: html.into(),
            subject: subject.into(),
            generate_plain_content: true,
        }
    }
}

/// A design as returned by create/update. Fields other than the ones named
/// here are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// SendGrid error body: `{"errors": [{"field": ..., "message": ...}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}
