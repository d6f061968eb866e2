//! Wire format for extracted entities
//!
//! At the service boundary entities use `start_char`/`end_char`; inside the
//! workspace they use `start`/`end`. These conversions are the adapter.

use drugner_domain::Entity;
use serde::{Deserialize, Serialize};

/// Entity as exchanged over JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// The matched substring
    pub text: String,

    /// Character offset of the first character
    pub start_char: usize,

    /// Character offset one past the last character
    pub end_char: usize,

    /// Entity label
    pub label: String,
}

/// Response body listing extracted entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Extracted entities
    pub entities: Vec<ExtractedEntity>,
}

impl From<&Entity> for ExtractedEntity {
    fn from(entity: &Entity) -> Self {
        Self {
            text: entity.text.clone(),
            start_char: entity.start,
            end_char: entity.end,
            label: entity.label.clone(),
        }
    }
}

impl From<ExtractedEntity> for Entity {
    fn from(entity: ExtractedEntity) -> Self {
        Entity::new(entity.text, entity.start_char, entity.end_char, entity.label)
    }
}

impl From<&[Entity]> for ExtractionResponse {
    fn from(entities: &[Entity]) -> Self {
        Self {
            entities: entities.iter().map(ExtractedEntity::from).collect(),
        }
    }
}

impl ExtractionResponse {
    /// Convert into domain entities
    pub fn into_entities(self) -> Vec<Entity> {
        self.entities.into_iter().map(Entity::from).collect()
    }
}
