use serde::{Deserialize, Serialize};

/// Stable identifier of a stored entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create from string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Build a sequential id such as `c1` or `s12`
    pub fn sequential(prefix: &str, n: u64) -> Self {
        Self(format!("{}{}", prefix, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        assert_eq!(EntityId::sequential("c", 1).as_str(), "c1");
        assert_eq!(EntityId::sequential("s", 42).to_string(), "s42");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::from("c7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c7\"");
    }
}
