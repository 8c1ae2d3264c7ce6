// ============================================================
// Layer 5 — Classifier
// ============================================================
// Scores one FeatureRecord with a loaded AttritionModel:
//   1. encode the record with the model's schema
//   2. run the forward pass on a [1, d_input] tensor
//   3. softmax → [p_stay, p_resign]
use std::sync::Mutex;

use burn::prelude::*;

use crate::data::encoder::FeatureEncoder;
use crate::domain::error::InferenceError;
use crate::domain::feature_record::FeatureRecord;
use crate::domain::prediction::ClassProbabilities;
use crate::domain::schema::ModelSchema;
use crate::domain::traits::AttritionScorer;
use crate::ml::model::AttritionModel;

pub type InferBackend = burn::backend::NdArray;
pub type InferDevice  = burn::backend::ndarray::NdArrayDevice;

pub struct Classifier {
    // burn parameters are Send but not Sync; the lock makes the
    // classifier shareable across server workers.
    model:  Mutex<AttritionModel<InferBackend>>,
    schema: ModelSchema,
    device: InferDevice,
}

impl Classifier {
    pub fn new(model: AttritionModel<InferBackend>, schema: ModelSchema, device: InferDevice) -> Self {
        Self { model: Mutex::new(model), schema, device }
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }
}

impl AttritionScorer for Classifier {
    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, InferenceError> {
        let features = FeatureEncoder::new(&self.schema).encode(record)?;
        let expected = self.schema.input_width();
        if features.len() != expected {
            return Err(InferenceError::InputWidth { found: features.len(), expected });
        }

        let input = Tensor::<InferBackend, 1>::from_floats(features.as_slice(), &self.device)
            .unsqueeze::<2>();

        let output = {
            let model = self
                .model
                .lock()
                .map_err(|_| InferenceError::Backend("model lock poisoned".into()))?;
            model.predict_proba(input)
        };

        let probs: Vec<f64> = output
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| InferenceError::Backend(format!("{e:?}")))?
            .into_iter()
            .map(f64::from)
            .collect();

        let probs = ClassProbabilities::from_slice(&probs)?;
        tracing::debug!("P(stay)={:.4} P(resign)={:.4}", probs.stay, probs.resign);
        Ok(probs)
    }

    fn decision_threshold(&self) -> f64 {
        self.schema.decision_threshold
    }
}
