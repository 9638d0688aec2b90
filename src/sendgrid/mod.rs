mod client;
mod types;
#[cfg(test)]
pub mod mock;

pub use client::{ApiError, DesignClient, SendGridClient, SendGridConfig};
pub use types::{DesignRecord, DesignSummary, PageQuery, UpsertRequest};
