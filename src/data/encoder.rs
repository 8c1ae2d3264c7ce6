// ============================================================
// Layer 4 — Feature Encoder
// ============================================================
// Turns a FeatureRecord into the flat f32 vector the model eats,
// following the feature order of the model schema:
//
//   numeric      → (x - mean) / std
//   categorical  → one-hot over the declared categories
//
// A categorical column may also hold a number (Performance_Score
// is commonly one-hot encoded); the number is matched against the
// category labels in its integer form, e.g. 4.0 → "4".

use crate::domain::error::InferenceError;
use crate::domain::feature_record::{FeatureRecord, FeatureValue};
use crate::domain::schema::{FeatureEncoding, ModelSchema};

pub struct FeatureEncoder<'a> {
    schema: &'a ModelSchema,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(schema: &'a ModelSchema) -> Self {
        Self { schema }
    }

    pub fn encode(&self, record: &FeatureRecord) -> Result<Vec<f32>, InferenceError> {
        let mut out = Vec::with_capacity(self.schema.input_width());

        for spec in &self.schema.features {
            let value = record
                .value(&spec.name)
                .ok_or_else(|| InferenceError::MissingFeature(spec.name.clone()))?;

            match (&spec.encoding, value) {
                (FeatureEncoding::Numeric { mean, std }, FeatureValue::Number(x)) => {
                    out.push(((x - mean) / std) as f32);
                }
                (FeatureEncoding::Numeric { .. }, FeatureValue::Category(_)) => {
                    return Err(InferenceError::TypeMismatch {
                        name:     spec.name.clone(),
                        expected: "numeric",
                    });
                }
                (FeatureEncoding::Categorical { categories }, value) => {
                    let label = match value {
                        FeatureValue::Category(s) => s.to_string(),
                        FeatureValue::Number(n)   => category_label(n),
                    };
                    let before = out.len();
                    out.extend(categories.iter().map(|c| if *c == label { 1.0 } else { 0.0 }));
                    if out[before..].iter().all(|v| *v == 0.0) {
                        tracing::debug!("Unseen category '{}' for '{}'", label, spec.name);
                    }
                }
            }
        }

        Ok(out)
    }
}

fn category_label(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
