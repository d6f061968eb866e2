//! Lazily-initialized shared model
//!
//! Loading a model is expensive, so it is deferred until the first
//! extraction and then reused for the rest of the process lifetime.
//! Initialization sits behind a `OnceCell`: when several requests arrive
//! before the model exists, one of them runs the loader and the others
//! block until it finishes. A failed load is not cached; the next call
//! tries again.

use crate::lexicon::LexiconModel;
use crate::ModelError;
use drugner_domain::{Entity, EntityExtractor};
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

type Loader<M> = Box<dyn Fn() -> Result<M, ModelError> + Send + Sync>;

/// Extractor that builds its inner model on first use
pub struct LazyModel<M> {
    name: String,
    loader: Loader<M>,
    model: OnceCell<M>,
}

impl<M> LazyModel<M>
where
    M: EntityExtractor<Error = ModelError>,
{
    /// Create a lazy model from a loader closure
    ///
    /// The loader is not called until the first extraction.
    pub fn new<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<M, ModelError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            loader: Box::new(loader),
            model: OnceCell::new(),
        }
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the inner model has been constructed
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Get the inner model, constructing it if needed
    pub fn get(&self) -> Result<&M, ModelError> {
        self.model.get_or_try_init(|| {
            info!("Loading model '{}'", self.name);
            (self.loader)().map_err(|e| {
                error!("Failed to load model '{}': {}", self.name, e);
                e
            })
        })
    }
}

impl LazyModel<LexiconModel> {
    /// Lazily load the lexicon model stored in `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use drugner_model::LazyModel;
    ///
    /// let model = LazyModel::lexicon("drug", "./models/drug/");
    /// assert!(!model.is_loaded());
    /// ```
    pub fn lexicon(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(name, move || LexiconModel::load(&path))
    }
}

impl<M> EntityExtractor for LazyModel<M>
where
    M: EntityExtractor<Error = ModelError>,
{
    type Error = ModelError;

    fn extract(&self, text: &str) -> Result<Vec<Entity>, Self::Error> {
        self.get()?.extract(text)
    }

    fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }
}

impl<M> fmt::Debug for LazyModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyModel")
            .field("name", &self.name)
            .field("loaded", &self.model.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockExtractor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_not_loaded_before_first_use() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let model = LazyModel::new("drug", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(MockExtractor::default())
        });

        assert!(!model.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        model.extract("text").unwrap();
        model.extract("more text").unwrap();

        assert!(model.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delegates_to_inner_model() {
        let model = LazyModel::new("drug", || {
            Ok(MockExtractor::new(vec![Entity::new("may", 0, 3, "Factor")]))
        });

        let entities = model.extract("may").unwrap();
        assert_eq!(entities, vec![Entity::new("may", 0, 3, "Factor")]);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let model = LazyModel::new("drug", move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ModelError::Load("first attempt fails".to_string()))
            } else {
                Ok(MockExtractor::default())
            }
        });

        assert!(matches!(model.extract("text"), Err(ModelError::Load(_))));
        assert!(!model.is_loaded());

        assert!(model.extract("text").is_ok());
        assert!(model.is_loaded());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_lexicon_missing_path() {
        let model = LazyModel::lexicon("drug", "./no/such/model");
        assert!(matches!(
            model.extract("text"),
            Err(ModelError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_debug_output() {
        let model = LazyModel::new("drug", || Ok(MockExtractor::default()));
        assert_eq!(
            format!("{:?}", model),
            "LazyModel { name: \"drug\", loaded: false }"
        );
    }
}
