// ============================================================
// Layer 6 — Model Cell
// ============================================================
// Holds the process-wide model handle. The loader runs on first
// use and its result is kept for the rest of the process; every
// caller after that gets a clone of the same Arc. Concurrent first
// callers block on the cell until the single load finishes.
//
// A failed load is not cached: the error goes straight back to
// the caller, and nothing retries on its own.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::domain::error::ModelLoadError;
use crate::domain::traits::AttritionScorer;
use crate::infra::model_store::ModelStore;

type Loader = Box<dyn Fn() -> Result<Arc<dyn AttritionScorer>, ModelLoadError> + Send + Sync>;

pub struct ModelCell {
    cell:   OnceCell<Arc<dyn AttritionScorer>>,
    loader: Loader,
}

impl ModelCell {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn AttritionScorer>, ModelLoadError> + Send + Sync + 'static,
    {
        Self { cell: OnceCell::new(), loader: Box::new(loader) }
    }

    /// A cell that loads the classifier from a model directory.
    pub fn from_store(store: ModelStore) -> Self {
        Self::new(move || {
            tracing::info!("⏳ Loading model from '{}'...", store.dir().display());
            let classifier = store.load()?;
            Ok(Arc::new(classifier) as Arc<dyn AttritionScorer>)
        })
    }

    /// A cell that already holds a scorer.
    pub fn preloaded(scorer: Arc<dyn AttritionScorer>) -> Self {
        let cell = Self::new(|| {
            Err(ModelLoadError::InvalidSchema("preloaded cell has no loader".into()))
        });
        // A freshly built cell is always empty, so this cannot fail.
        let _ = cell.cell.set(scorer);
        cell
    }

    pub fn get_or_load(&self) -> Result<Arc<dyn AttritionScorer>, ModelLoadError> {
        self.cell.get_or_try_init(|| (self.loader)()).cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::domain::error::InferenceError;
    use crate::domain::feature_record::FeatureRecord;
    use crate::domain::prediction::ClassProbabilities;

    struct Fixed;

    impl AttritionScorer for Fixed {
        fn predict_proba(&self, _: &FeatureRecord) -> Result<ClassProbabilities, InferenceError> {
            Ok(ClassProbabilities { stay: 0.5, resign: 0.5 })
        }
    }

    #[test]
    fn test_loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cell = Arc::new(ModelCell::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Fixed) as Arc<dyn AttritionScorer>)
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = cell.clone();
                thread::spawn(move || cell.get_or_load().is_ok())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }

        let a = cell.get_or_load().unwrap();
        let b = cell.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_reported_and_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cell = ModelCell::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ModelLoadError::Missing { path: PathBuf::from("models/model_schema.json") })
        });

        assert!(matches!(cell.get_or_load(), Err(ModelLoadError::Missing { .. })));
        assert!(!cell.is_loaded());
        assert!(cell.get_or_load().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_preloaded_never_calls_loader() {
        let cell = ModelCell::preloaded(Arc::new(Fixed));
        assert!(cell.is_loaded());
        assert!(cell.get_or_load().is_ok());
    }

    #[test]
    fn test_from_store_surfaces_missing_artifact() {
        let tmp  = tempfile::tempdir().unwrap();
        let cell = ModelCell::from_store(ModelStore::new(tmp.path()));
        assert!(matches!(cell.get_or_load(), Err(ModelLoadError::Missing { .. })));
    }
}
