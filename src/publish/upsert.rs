use serde::Serialize;

use crate::error::PublishError;
use crate::sendgrid::{DesignClient, DesignRecord, UpsertRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
}

impl Action {
    pub fn for_target(existing_id: Option<&str>) -> Self {
        if existing_id.is_some() { Action::Update } else { Action::Create }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
        }
    }
}

/// PATCH the design addressed by `existing_id`, or POST a new one. The
/// provider's record comes back untouched. One attempt only.
pub async fn upsert(
    client: &dyn DesignClient,
    existing_id: Option<&str>,
    name: &str,
    subject: &str,
    html: &str,
) -> Result<DesignRecord, PublishError> {
    let body = UpsertRequest::new(name, subject, html);
    let record = match existing_id {
        Some(id) => client.update_design(id, &body).await?,
        None => client.create_design(&body).await?,
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sendgrid::mock::{Call, MockDesignClient, MOCK_UPDATED_AT};
    use crate::sendgrid::ApiError;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn no_id_creates() {
        let mock = MockDesignClient::new();
        let rec = upsert(&mock, None, "receipt", "Your receipt", "<p>r</p>").await.unwrap();
        assert_eq!(rec.updated_at.as_deref(), Some(MOCK_UPDATED_AT));
        assert_eq!(mock.calls(), vec![Call::Create(UpsertRequest::new("receipt", "Your receipt", "<p>r</p>"))]);
    }

    #[tokio::test]
    async fn id_updates_with_same_body() {
        let mock = MockDesignClient::new();
        upsert(&mock, Some("d-9"), "receipt", "Your receipt", "<p>r</p>").await.unwrap();
        assert_eq!(
            mock.calls(),
            vec![Call::Update("d-9".into(), UpsertRequest::new("receipt", "Your receipt", "<p>r</p>"))]
        );
    }

    #[tokio::test]
    async fn rejected_upsert_is_not_retried() {
        let mock = MockDesignClient::new();
        mock.push_upsert_error(ApiError::Api { status: StatusCode::INTERNAL_SERVER_ERROR, errors: vec![] });
        let err = upsert(&mock, Some("d-9"), "receipt", "s", "h").await.unwrap_err();
        assert!(matches!(err, PublishError::Transport(ApiError::Api { .. })));
        assert_eq!(mock.upsert_calls().len(), 1);
    }

    #[test]
    fn action_follows_target() {
        assert_eq!(Action::for_target(None), Action::Create);
        assert_eq!(Action::for_target(Some("x")).as_str(), "update");
    }
}
