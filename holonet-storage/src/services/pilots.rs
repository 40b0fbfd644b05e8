//! Starship to pilot back-reference index
//!
//! Only `Biological.starshipId` is persisted. The inverse direction lives
//! here and is kept in step by the services on every save and delete.

use holonet_api_types::EntityId;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct PilotIndex {
    by_starship: RwLock<HashMap<EntityId, Vec<EntityId>>>,
}

impl PilotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `character` at `starship`, or at nothing, dropping any previous link
    pub async fn link(&self, character: &EntityId, starship: Option<&EntityId>) {
        let mut index = self.by_starship.write().await;
        Self::remove_character(&mut index, character);
        if let Some(starship) = starship {
            index
                .entry(starship.clone())
                .or_default()
                .push(character.clone());
        }
    }

    pub async fn unlink(&self, character: &EntityId) {
        let mut index = self.by_starship.write().await;
        Self::remove_character(&mut index, character);
    }

    /// Forget a starship, returning the pilots whose reference now dangles
    pub async fn drop_starship(&self, starship: &EntityId) -> Vec<EntityId> {
        self.by_starship
            .write()
            .await
            .remove(starship)
            .unwrap_or_default()
    }

    pub async fn clear(&self) {
        self.by_starship.write().await.clear();
    }

    /// Pilots of `starship` in link order
    #[cfg(test)]
    pub async fn pilots(&self, starship: &EntityId) -> Vec<EntityId> {
        self.by_starship
            .read()
            .await
            .get(starship)
            .cloned()
            .unwrap_or_default()
    }

    fn remove_character(index: &mut HashMap<EntityId, Vec<EntityId>>, character: &EntityId) {
        index.retain(|_, pilots| {
            pilots.retain(|pilot| pilot != character);
            !pilots.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relink_moves_pilot() {
        let index = PilotIndex::new();
        let luke: EntityId = "c1".into();

        index.link(&luke, Some(&"s1".into())).await;
        index.link(&luke, Some(&"s2".into())).await;

        assert!(index.pilots(&"s1".into()).await.is_empty());
        assert_eq!(index.pilots(&"s2".into()).await, vec![luke]);
    }

    #[tokio::test]
    async fn test_pilots_keep_link_order() {
        let index = PilotIndex::new();
        index.link(&"c2".into(), Some(&"s1".into())).await;
        index.link(&"c1".into(), Some(&"s1".into())).await;

        let pilots = index.pilots(&"s1".into()).await;
        assert_eq!(pilots, vec![EntityId::from("c2"), EntityId::from("c1")]);
    }

    #[tokio::test]
    async fn test_drop_starship_returns_dangling_pilots() {
        let index = PilotIndex::new();
        index.link(&"c1".into(), Some(&"s1".into())).await;

        assert_eq!(
            index.drop_starship(&"s1".into()).await,
            vec![EntityId::from("c1")]
        );
        assert!(index.drop_starship(&"s1".into()).await.is_empty());
    }
}
