//! DrugNER Model Layer
//!
//! Pluggable entity extractor implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `EntityExtractor` trait from
//! `drugner-domain`. Every implementation reports errors as [`ModelError`],
//! so callers can hold any of them behind one trait object.
//!
//! # Extractors
//!
//! - `MockExtractor`: Deterministic stub for testing
//! - `LexiconModel`: Term lexicon loaded from a model directory
//! - `LazyModel`: Constructs an inner model on first use, exactly once
//!
//! # Examples
//!
//! ```
//! use drugner_model::MockExtractor;
//! use drugner_domain::{Entity, EntityExtractor};
//!
//! let extractor = MockExtractor::new(vec![Entity::new("may", 0, 3, "Factor")]);
//! let entities = extractor.extract("may cause dizziness").unwrap();
//! assert_eq!(entities.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod lazy;
pub mod lexicon;
pub mod wire;

use drugner_domain::{Entity, EntityExtractor};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use lazy::LazyModel;
pub use lexicon::{Lexicon, LexiconModel, LexiconTerm, LEXICON_FILE};
pub use wire::{ExtractedEntity, ExtractionResponse};

/// Errors that can occur while loading or running a model
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// Model directory or file does not exist
    #[error("Model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Model files exist but could not be loaded
    #[error("Failed to load model: {0}")]
    Load(String),

    /// Lexicon contents are malformed
    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// Running the model failed
    #[error("Inference error: {0}")]
    Inference(String),
}

impl ModelError {
    /// Whether the model itself is unavailable (as opposed to failing on input)
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ModelError::ModelNotFound(_) | ModelError::Load(_) | ModelError::InvalidLexicon(_)
        )
    }
}

/// Mock extractor for deterministic testing
///
/// Returns pre-configured entities without loading any model.
///
/// # Examples
///
/// ```
/// use drugner_model::MockExtractor;
/// use drugner_domain::{Entity, EntityExtractor};
///
/// let mut extractor = MockExtractor::default();
/// extractor.add_response("nausea", vec![Entity::new("nausea", 0, 6, "AdverseReaction")]);
///
/// assert_eq!(extractor.extract("nausea").unwrap().len(), 1);
/// assert!(extractor.extract("anything else").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    default_entities: Vec<Entity>,
    responses: Arc<Mutex<HashMap<String, Option<Vec<Entity>>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockExtractor {
    /// Create a MockExtractor returning the same entities for all text
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            default_entities: entities,
            ..Self::default()
        }
    }

    /// Add specific entities for a given text
    pub fn add_response(&mut self, text: impl Into<String>, entities: Vec<Entity>) {
        self.lock_responses().insert(text.into(), Some(entities));
    }

    /// Configure to fail for a specific text
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.lock_responses().insert(text.into(), None);
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self
            .call_count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = 0;
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, HashMap<String, Option<Vec<Entity>>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EntityExtractor for MockExtractor {
    type Error = ModelError;

    fn extract(&self, text: &str) -> Result<Vec<Entity>, Self::Error> {
        *self
            .call_count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;

        match self.lock_responses().get(text) {
            Some(Some(entities)) => Ok(entities.clone()),
            Some(None) => Err(ModelError::Inference("Mock error".to_string())),
            None => Ok(self.default_entities.clone()),
        }
    }
}
