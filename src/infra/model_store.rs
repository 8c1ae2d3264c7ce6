// ============================================================
// Layer 6 — Model Store
// ============================================================
// Reads (and, for tooling and tests, writes) a model directory:
//
//   models/
//     model_schema.json  ← feature schema, hidden size, threshold
//     model.mpk          ← weights, burn CompactRecorder format
//
// The schema is read and validated first, because the model
// architecture has to be rebuilt from it before the weights can
// be loaded into it. After loading, the weight shapes are checked
// against the schema so a stale artifact is refused here rather
// than failing on the first prediction.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, FileRecorder, Recorder},
};

use crate::domain::error::ModelLoadError;
use crate::domain::schema::ModelSchema;
use crate::ml::classifier::{Classifier, InferBackend, InferDevice};
use crate::ml::model::{AttritionModel, AttritionModelConfig};

pub const SCHEMA_FILE: &str = "model_schema.json";

/// Recorder path without extension; the recorder appends its own.
pub const WEIGHTS_STEM: &str = "model";

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where CompactRecorder reads and writes the weights.
    pub fn weights_path(&self) -> PathBuf {
        let ext = <CompactRecorder as FileRecorder<InferBackend>>::file_extension();
        self.dir.join(WEIGHTS_STEM).with_extension(ext)
    }

    /// Read and validate `model_schema.json`.
    pub fn load_schema(&self) -> Result<ModelSchema, ModelLoadError> {
        let path = self.dir.join(SCHEMA_FILE);
        let json = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ModelLoadError::Missing { path: path.clone() }
            } else {
                ModelLoadError::Corrupt { path: path.clone(), reason: e.to_string() }
            }
        })?;

        let schema: ModelSchema = serde_json::from_str(&json)
            .map_err(|e| ModelLoadError::Corrupt { path: path.clone(), reason: e.to_string() })?;
        schema.validate()?;

        tracing::debug!(
            "Schema v{} with {} features ({} inputs)",
            schema.schema_version,
            schema.features.len(),
            schema.input_width()
        );
        Ok(schema)
    }

    /// Load schema + weights into a ready-to-use classifier.
    pub fn load(&self) -> Result<Classifier, ModelLoadError> {
        let schema = self.load_schema()?;

        let weights = self.weights_path();
        if !weights.is_file() {
            return Err(ModelLoadError::Missing { path: weights });
        }

        let device = InferDevice::default();
        let config = AttritionModelConfig::new(schema.input_width(), schema.hidden_size);
        let model: AttritionModel<InferBackend> = config.init(&device);

        let record = CompactRecorder::new()
            .load(self.dir.join(WEIGHTS_STEM), &device)
            .map_err(|e| ModelLoadError::Corrupt {
                path:   weights.clone(),
                reason: format!("{e:?}"),
            })?;
        let model = model.load_record(record);

        let expected = (config.d_input, config.d_hidden, 2);
        if model.dims() != expected {
            return Err(ModelLoadError::Corrupt {
                path:   weights,
                reason: format!(
                    "weights have shape {:?} but the schema needs {:?}",
                    model.dims(),
                    expected
                ),
            });
        }

        tracing::info!("Model loaded from '{}'", self.dir.display());
        Ok(Classifier::new(model, schema, device))
    }

    /// Write a schema and matching weights into the store directory.
    /// This is the artifact writer for whatever produces the weights.
    pub fn save<B: Backend>(&self, model: &AttritionModel<B>, schema: &ModelSchema) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let schema_path = self.dir.join(SCHEMA_FILE);
        fs::write(&schema_path, serde_json::to_string_pretty(schema)?)
            .with_context(|| format!("Cannot write schema to '{}'", schema_path.display()))?;

        let path = self.dir.join(WEIGHTS_STEM);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;

        tracing::debug!("Saved model to '{}'", self.dir.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::fixtures::sample_schema;

    fn save_sample(store: &ModelStore, schema: &ModelSchema, d_input: usize) {
        let device = InferDevice::default();
        let model  = AttritionModelConfig::new(d_input, schema.hidden_size).init::<InferBackend>(&device);
        store.save(&model, schema).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(tmp.path().join("nope"));
        match store.load() {
            Err(ModelLoadError::Missing { path }) => assert!(path.ends_with(SCHEMA_FILE)),
            other => panic!("expected Missing, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_missing_weights() {
        let tmp    = tempfile::tempdir().unwrap();
        let schema = sample_schema();
        fs::write(tmp.path().join(SCHEMA_FILE), serde_json::to_string(&schema).unwrap()).unwrap();

        match ModelStore::new(tmp.path()).load() {
            Err(ModelLoadError::Missing { path }) => {
                assert_eq!(path, ModelStore::new(tmp.path()).weights_path())
            }
            other => panic!("expected Missing, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_corrupt_schema() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SCHEMA_FILE), "{ not json").unwrap();
        assert!(matches!(
            ModelStore::new(tmp.path()).load_schema(),
            Err(ModelLoadError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_corrupt_weights() {
        let tmp    = tempfile::tempdir().unwrap();
        let schema = sample_schema();
        fs::write(tmp.path().join(SCHEMA_FILE), serde_json::to_string(&schema).unwrap()).unwrap();
        let store = ModelStore::new(tmp.path());
        fs::write(store.weights_path(), b"definitely not messagepack").unwrap();

        assert!(matches!(
            store.load(),
            Err(ModelLoadError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_schema_mismatch_is_fatal() {
        let tmp        = tempfile::tempdir().unwrap();
        let mut schema = sample_schema();
        schema.features.pop();
        fs::write(tmp.path().join(SCHEMA_FILE), serde_json::to_string(&schema).unwrap()).unwrap();

        assert!(matches!(
            ModelStore::new(tmp.path()).load(),
            Err(ModelLoadError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let tmp    = tempfile::tempdir().unwrap();
        let store  = ModelStore::new(tmp.path());
        let schema = sample_schema();
        save_sample(&store, &schema, schema.input_width());

        assert!(store.weights_path().is_file());
        assert!(store.weights_path().to_string_lossy().ends_with(".mpk"));

        let clf = store.load().unwrap();
        assert_eq!(clf.schema(), &schema);
    }

    #[test]
    fn test_stale_weights_are_refused() {
        let tmp    = tempfile::tempdir().unwrap();
        let store  = ModelStore::new(tmp.path());
        let schema = sample_schema();
        save_sample(&store, &schema, schema.input_width() + 3);

        match store.load() {
            Err(ModelLoadError::Corrupt { path, reason }) => {
                assert_eq!(path, store.weights_path());
                assert!(reason.contains("shape"), "{reason}");
            }
            other => panic!("expected Corrupt, got {:?}", other.err()),
        }
    }
}
