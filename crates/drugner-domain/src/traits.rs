//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::Entity;

/// Trait for extracting entities from text
///
/// Implemented by the infrastructure layer (drugner-model).
///
/// Implementations must be deterministic for identical text, free of side
/// effects, and return an empty list for text without entities. Heavy
/// resources are initialized on first use, never before.
pub trait EntityExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract entities from unstructured text
    ///
    /// Entities may come back in any order.
    fn extract(&self, text: &str) -> Result<Vec<Entity>, Self::Error>;

    /// Whether heavy resources are already initialized
    ///
    /// Extractors without deferred initialization are always loaded.
    fn is_loaded(&self) -> bool {
        true
    }
}
