use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Map;

use super::types::{DesignPage, PageMetadata};
use super::{ApiError, DesignClient, DesignRecord, DesignSummary, PageQuery, UpsertRequest};

pub const MOCK_UPDATED_AT: &str = "2026-10-19 12:00:00";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(PageQuery),
    Create(UpsertRequest),
    Update(String, UpsertRequest),
}

/// In-memory stand-in for the provider. Pages are served in push order; an
/// exhausted page queue serves an empty final page. Upserts without a queued
/// response echo the request back as a record.
#[derive(Debug, Default)]
pub struct MockDesignClient {
    pages: Mutex<VecDeque<Result<DesignPage, ApiError>>>,
    upserts: Mutex<VecDeque<Result<DesignRecord, ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockDesignClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `designs` one per page, chained by continuation tokens.
    pub fn with_directory(designs: &[(&str, &str)]) -> Self {
        let mock = Self::new();
        let n = designs.len();
        for (i, &(id, name)) in designs.iter().enumerate() {
            let next = (i + 1 < n).then(|| format!("t{}", i + 1));
            mock.push_page(page(&[(id, name)], next.as_deref()));
        }
        mock
    }

    pub fn push_page(&self, page: DesignPage) {
        self.pages.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_page_error(&self, err: ApiError) {
        self.pages.lock().unwrap().push_back(Err(err));
    }

    pub fn push_upsert_error(&self, err: ApiError) {
        self.upserts.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::List(_))).count()
    }

    pub fn upsert_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| !matches!(c, Call::List(_))).collect()
    }

    fn next_upsert(&self, id: String, body: &UpsertRequest) -> Result<DesignRecord, ApiError> {
        self.upserts.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(DesignRecord {
                id,
                name: body.name.clone(),
                updated_at: Some(MOCK_UPDATED_AT.to_string()),
                extra: Map::new(),
            })
        })
    }
}

/// Build a page whose `_metadata.next` carries `token`, the way the provider does.
pub fn page(items: &[(&str, &str)], token: Option<&str>) -> DesignPage {
    DesignPage {
        result: items
            .iter()
            .map(|(id, name)| DesignSummary { id: id.to_string(), name: name.to_string() })
            .collect(),
        metadata: PageMetadata {
            next: token.map(|t| format!("https://api.sendgrid.com/v3/designs?page_size=1&page_token={t}&summary=true")),
        },
    }
}

#[async_trait]
impl DesignClient for MockDesignClient {
    async fn list_designs(&self, query: &PageQuery) -> Result<DesignPage, ApiError> {
        self.calls.lock().unwrap().push(Call::List(query.clone()));
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(DesignPage::default()))
    }

    async fn create_design(&self, body: &UpsertRequest) -> Result<DesignRecord, ApiError> {
        self.calls.lock().unwrap().push(Call::Create(body.clone()));
        self.next_upsert("mock-created".to_string(), body)
    }

    async fn update_design(&self, id: &str, body: &UpsertRequest) -> Result<DesignRecord, ApiError> {
        self.calls.lock().unwrap().push(Call::Update(id.to_string(), body.clone()));
        self.next_upsert(id.to_string(), body)
    }
}
