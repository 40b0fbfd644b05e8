//! Stored records and save requests

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::ids::EntityId;

/// Anything a repository can key by id
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &EntityId;
}

/// Concrete shape of a stored character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Biological,
    Droid,
}

/// The stored discriminator is missing or names no known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeResolutionError {
    #[error("Character {id} has no type discriminator")]
    Missing { id: EntityId },

    #[error("Character {id} has unknown type discriminator '{tag}'")]
    Unrecognized { id: EntityId, tag: String },
}

impl CharacterKind {
    /// Schema type name of the variant
    pub fn type_name(self) -> &'static str {
        match self {
            CharacterKind::Biological => "Biological",
            CharacterKind::Droid => "Droid",
        }
    }

    /// Resolve a stored discriminator to its variant.
    ///
    /// This is the only input to type resolution for the `Character`
    /// abstraction; it never looks at any other field of the record.
    pub fn resolve(id: &EntityId, tag: Option<&str>) -> Result<Self, TypeResolutionError> {
        let tag = tag.ok_or_else(|| TypeResolutionError::Missing { id: id.clone() })?;
        tag.parse().map_err(|_| TypeResolutionError::Unrecognized {
            id: id.clone(),
            tag: tag.to_string(),
        })
    }
}

impl FromStr for CharacterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Biological" => Ok(CharacterKind::Biological),
            "Droid" => Ok(CharacterKind::Droid),
            _ => Err(format!("Invalid character kind: {}", s)),
        }
    }
}

impl std::fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A character as kept by the character repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: EntityId,
    pub name: String,
    /// Discriminator naming the concrete variant
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Insertion ordered, no duplicates
    #[serde(default)]
    pub friend_ids: Vec<EntityId>,
    /// Only ever set on biological characters
    #[serde(default)]
    pub starship_id: Option<EntityId>,
}

impl CharacterRecord {
    pub fn biological(
        id: EntityId,
        name: impl Into<String>,
        friend_ids: Vec<EntityId>,
        starship_id: Option<EntityId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: Some(CharacterKind::Biological.type_name().to_string()),
            friend_ids,
            starship_id,
        }
    }

    pub fn droid(id: EntityId, name: impl Into<String>, friend_ids: Vec<EntityId>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: Some(CharacterKind::Droid.type_name().to_string()),
            friend_ids,
            starship_id: None,
        }
    }

    pub fn kind(&self) -> Result<CharacterKind, TypeResolutionError> {
        CharacterKind::resolve(&self.id, self.kind.as_deref())
    }

    /// Starship this character pilots, if it is a biological character
    pub fn piloted_starship(&self) -> Option<&EntityId> {
        match self.kind() {
            Ok(CharacterKind::Biological) => self.starship_id.as_ref(),
            _ => None,
        }
    }
}

impl Entity for CharacterRecord {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A starship as kept by the starship repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarshipRecord {
    pub id: EntityId,
    pub name: String,
}

impl StarshipRecord {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for StarshipRecord {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Request to insert or replace a droid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDroid {
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub friend_ids: Vec<EntityId>,
}

/// Request to insert or replace a biological character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBiological {
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub friend_ids: Vec<EntityId>,
    pub starship_id: Option<EntityId>,
}

/// Request to insert or replace a starship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveStarship {
    pub id: Option<EntityId>,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_discriminator() {
        let luke = CharacterRecord::biological("c1".into(), "Luke", vec![], Some("s1".into()));
        let r2 = CharacterRecord::droid("c2".into(), "R2-D2", vec!["c1".into()]);

        assert_eq!(luke.kind().unwrap(), CharacterKind::Biological);
        assert_eq!(r2.kind().unwrap(), CharacterKind::Droid);
        assert_eq!(r2.starship_id, None);
    }

    #[test]
    fn test_missing_discriminator() {
        let record = CharacterRecord {
            id: "c9".into(),
            name: "Nobody".to_string(),
            kind: None,
            friend_ids: vec![],
            starship_id: None,
        };

        assert_eq!(
            record.kind(),
            Err(TypeResolutionError::Missing { id: "c9".into() })
        );
    }

    #[test]
    fn test_unrecognized_discriminator() {
        let err = CharacterKind::resolve(&"c3".into(), Some("Wookiee")).unwrap_err();
        assert!(matches!(
            err,
            TypeResolutionError::Unrecognized { ref tag, .. } if tag == "Wookiee"
        ));
        assert!(err.to_string().contains("Wookiee"));
    }

    #[test]
    fn test_droid_never_pilots() {
        let mut r2 = CharacterRecord::droid("c2".into(), "R2-D2", vec![]);
        r2.starship_id = Some("s1".into());
        assert_eq!(r2.piloted_starship(), None);
    }

    #[test]
    fn test_record_json_uses_type_discriminator() {
        let record = CharacterRecord::droid("c2".into(), "R2-D2", vec![]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Droid");
        assert_eq!(json["friendIds"], serde_json::json!([]));
    }
}
