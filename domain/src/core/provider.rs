//! Provider identity value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stable display name of a configured backend (Value Object)
///
/// Used as the correlation key between a provider call and its [`Answer`].
/// Uniqueness across a provider set is checked where the set is assembled.
///
/// [`Answer`]: crate::consult::answer::Answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidProvider(
                "provider name must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProviderId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ProviderId::new(s)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

/// Returns the first identity that appears more than once, if any.
pub fn find_duplicate<'a>(ids: impl IntoIterator<Item = &'a ProviderId>) -> Option<&'a ProviderId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_trims() {
        let id = ProviderId::new("  GPT-4 Turbo ").unwrap();
        assert_eq!(id.as_str(), "GPT-4 Turbo");
        assert_eq!(id.to_string(), "GPT-4 Turbo");
    }

    #[test]
    fn test_empty_provider_id_rejected() {
        assert!(ProviderId::new("").is_err());
        assert!(ProviderId::new("  ").is_err());
    }

    #[test]
    fn test_find_duplicate() {
        let ids = vec![
            ProviderId::new("GPT-4 Turbo").unwrap(),
            ProviderId::new("Claude 3").unwrap(),
            ProviderId::new("GPT-4 Turbo").unwrap(),
        ];
        assert_eq!(find_duplicate(&ids).map(|id| id.as_str()), Some("GPT-4 Turbo"));
        assert!(find_duplicate(&ids[..2]).is_none());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProviderId::new("Claude 3").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Claude 3\"");
    }
}
