//! The `Character` interface and its two variants

use async_graphql::{Context, Interface, Object, Result, ID};
use holonet_api_types::{CharacterKind, CharacterRecord, TypeResolutionError};

use super::{graphql_id, Starship};
use crate::resolvers::relations;

/// Closed union over the stored character shapes
#[derive(Interface)]
#[graphql(
    field(name = "id", ty = "ID"),
    field(name = "name", ty = "String"),
    field(name = "friends", ty = "Option<Vec<Option<Character>>>")
)]
pub enum Character {
    Biological(Biological),
    Droid(Droid),
}

impl TryFrom<CharacterRecord> for Character {
    type Error = TypeResolutionError;

    /// Pick the variant from the stored discriminator alone
    fn try_from(record: CharacterRecord) -> Result<Self, Self::Error> {
        Ok(match record.kind()? {
            CharacterKind::Biological => Character::Biological(Biological { record }),
            CharacterKind::Droid => Character::Droid(Droid { record }),
        })
    }
}

pub struct Biological {
    record: CharacterRecord,
}

impl Biological {
    /// Wrap a record known to be biological, e.g. the result of saving one
    pub fn from_record(record: CharacterRecord) -> Self {
        Self { record }
    }
}

#[Object]
impl Biological {
    async fn id(&self) -> ID {
        graphql_id(&self.record.id)
    }

    async fn name(&self) -> String {
        self.record.name.clone()
    }

    async fn friends(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Character>>>> {
        relations::friends(ctx, &self.record).await
    }

    async fn starship(&self, ctx: &Context<'_>) -> Result<Option<Starship>> {
        relations::starship(ctx, &self.record).await
    }
}

pub struct Droid {
    record: CharacterRecord,
}

impl Droid {
    pub fn from_record(record: CharacterRecord) -> Self {
        Self { record }
    }
}

#[Object]
impl Droid {
    async fn id(&self) -> ID {
        graphql_id(&self.record.id)
    }

    async fn name(&self) -> String {
        self.record.name.clone()
    }

    async fn friends(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Character>>>> {
        relations::friends(ctx, &self.record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_follows_discriminator() {
        let droid = CharacterRecord::droid("c2".into(), "R2-D2", vec![]);
        let human = CharacterRecord::biological("c1".into(), "Luke", vec![], None);

        assert!(matches!(
            Character::try_from(droid),
            Ok(Character::Droid(_))
        ));
        assert!(matches!(
            Character::try_from(human),
            Ok(Character::Biological(_))
        ));
    }

    #[test]
    fn test_starship_does_not_make_a_droid_biological() {
        let mut droid = CharacterRecord::droid("c2".into(), "R2-D2", vec![]);
        droid.starship_id = Some("s1".into());
        assert!(matches!(
            Character::try_from(droid),
            Ok(Character::Droid(_))
        ));
    }

    #[test]
    fn test_unknown_discriminator_fails() {
        let mut record = CharacterRecord::droid("c3".into(), "Chewbacca", vec![]);
        record.kind = Some("Wookiee".to_string());
        assert!(matches!(
            Character::try_from(record),
            Err(TypeResolutionError::Unrecognized { .. })
        ));
    }
}
