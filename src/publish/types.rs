use serde::Serialize;

use super::upsert::Action;
use crate::sendgrid::DesignRecord;

#[derive(Debug, Serialize)]
pub struct PublishPlan {
    pub name: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_id: Option<String>,
    pub subject: String,
    pub html_bytes: usize,
    pub designs_fetched: usize,
}

#[derive(Debug, Serialize)]
pub struct PublishResult {
    pub name: String,
    pub action: Action,
    pub design_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub designs_fetched: usize,
    pub design: DesignRecord,
}
