use std::fmt;

use crate::error::PublishError;

/// Template identifier taken from a git ref: `refs/tags/welcome-email@1.2.0` -> `welcome-email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName(String);

impl TemplateName {
    /// Uses the segment after `refs/<kind>/` and drops anything from the first `@`.
    /// Deeper segments (`refs/heads/feature/x`) are ignored.
    pub fn from_ref(git_ref: &str) -> Result<Self, PublishError> {
        let segment = git_ref
            .split('/')
            .nth(2)
            .ok_or_else(|| PublishError::InvalidRef(git_ref.to_string()))?;
        let name = segment.split('@').next().unwrap_or_default();
        if name.is_empty() || name == "." || name == ".." {
            return Err(PublishError::InvalidRef(git_ref.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
