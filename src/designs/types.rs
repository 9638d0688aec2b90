use serde::Serialize;

use crate::sendgrid::DesignSummary;

#[derive(Debug, Serialize)]
pub struct DesignList {
    pub count: usize,
    pub designs: Vec<DesignSummary>,
}
