// ============================================================
// Layer 3 — Model Schema
// ============================================================
// The versioned mapping between FeatureRecord columns and the
// numeric input vector the model was trained on. It ships with
// the weights as `model_schema.json`:
//
//   {
//     "schema_version": 1,
//     "hidden_size": 16,
//     "decision_threshold": 0.027,
//     "features": [
//       { "name": "Age", "kind": "numeric", "mean": 41.0, "std": 11.2 },
//       { "name": "Gender", "kind": "categorical",
//         "categories": ["Female", "Male", "Other"] },
//       ...
//     ]
//   }
//
// Feature order in the file is the order of the encoded vector.
// `validate` rejects a schema whose feature names differ from
// FeatureRecord::FIELD_NAMES, so a mismatch fails at load time
// instead of on the first prediction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::ModelLoadError;
use crate::domain::feature_record::FeatureRecord;
use crate::domain::prediction::DEFAULT_THRESHOLD;

pub const SCHEMA_VERSION: u32 = 1;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureEncoding {
    /// Standardised as `(x - mean) / std`.
    Numeric { mean: f64, std: f64 },
    /// One-hot over `categories`; an unseen value encodes as all zeros.
    Categorical { categories: Vec<String> },
}

impl FeatureEncoding {
    /// Number of model inputs this feature occupies.
    pub fn width(&self) -> usize {
        match self {
            FeatureEncoding::Numeric { .. } => 1,
            FeatureEncoding::Categorical { categories } => categories.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    #[serde(flatten)]
    pub encoding: FeatureEncoding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub schema_version: u32,
    pub hidden_size: usize,
    #[serde(default = "default_threshold")]
    pub decision_threshold: f64,
    pub features: Vec<FeatureSpec>,
}

impl ModelSchema {
    /// Total width of the encoded input vector.
    pub fn input_width(&self) -> usize {
        self.features.iter().map(|f| f.encoding.width()).sum()
    }

    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                found:    self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }

        let mut declared = BTreeSet::new();
        for spec in &self.features {
            if !declared.insert(spec.name.as_str()) {
                return Err(ModelLoadError::InvalidSchema(format!(
                    "feature '{}' is declared twice",
                    spec.name
                )));
            }
        }

        let expected: BTreeSet<&str> = FeatureRecord::FIELD_NAMES.into_iter().collect();
        if declared != expected {
            return Err(ModelLoadError::SchemaMismatch {
                missing:    expected.difference(&declared).map(|s| s.to_string()).collect(),
                unexpected: declared.difference(&expected).map(|s| s.to_string()).collect(),
            });
        }

        for spec in &self.features {
            match &spec.encoding {
                FeatureEncoding::Numeric { mean, std } => {
                    if FeatureRecord::is_categorical(&spec.name) {
                        return Err(ModelLoadError::InvalidSchema(format!(
                            "feature '{}' holds text and cannot be numeric",
                            spec.name
                        )));
                    }
                    if !mean.is_finite() || !std.is_finite() || *std <= 0.0 {
                        return Err(ModelLoadError::InvalidSchema(format!(
                            "feature '{}' needs a finite mean and a positive std",
                            spec.name
                        )));
                    }
                }
                FeatureEncoding::Categorical { categories } => {
                    if categories.is_empty() {
                        return Err(ModelLoadError::InvalidSchema(format!(
                            "feature '{}' has no categories",
                            spec.name
                        )));
                    }
                }
            }
        }

        if self.hidden_size == 0 {
            return Err(ModelLoadError::InvalidSchema("hidden_size must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(ModelLoadError::InvalidSchema(format!(
                "decision_threshold {} is outside [0, 1]",
                self.decision_threshold
            )));
        }

        Ok(())
    }
}


// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::fixtures::sample_schema;
    use super::*;

    #[test]
    fn test_sample_schema_is_valid() {
        let schema = sample_schema();
        schema.validate().unwrap();
        // 12 numeric + 3 genders + 4 levels + 9 departments + 7 titles + 5 scores
        assert_eq!(schema.input_width(), 12 + 3 + 4 + 9 + 7 + 5);
    }

    #[test]
    fn test_missing_and_unexpected_features_are_reported() {
        let mut schema = sample_schema();
        schema.features.retain(|f| f.name != "Sick_Days");
        schema.features.push(FeatureSpec {
            name:     "Sick_Days_Total".to_string(),
            encoding: FeatureEncoding::Numeric { mean: 0.0, std: 1.0 },
        });

        match schema.validate() {
            Err(ModelLoadError::SchemaMismatch { missing, unexpected }) => {
                assert_eq!(missing, vec!["Sick_Days".to_string()]);
                assert_eq!(unexpected, vec!["Sick_Days_Total".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut schema = sample_schema();
        schema.schema_version = 2;
        assert!(matches!(
            schema.validate(),
            Err(ModelLoadError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_numeric_text_column_is_rejected() {
        let mut schema = sample_schema();
        for f in &mut schema.features {
            if f.name == "Gender" {
                f.encoding = FeatureEncoding::Numeric { mean: 0.0, std: 1.0 };
            }
        }
        assert!(matches!(schema.validate(), Err(ModelLoadError::InvalidSchema(_))));
    }

    #[test]
    fn test_duplicate_and_degenerate_specs_are_rejected() {
        let mut dup = sample_schema();
        let first = dup.features[0].clone();
        dup.features.push(first);
        assert!(matches!(dup.validate(), Err(ModelLoadError::InvalidSchema(_))));

        let mut zero_std = sample_schema();
        zero_std.features[0].encoding = FeatureEncoding::Numeric { mean: 1.0, std: 0.0 };
        assert!(matches!(zero_std.validate(), Err(ModelLoadError::InvalidSchema(_))));

        let mut threshold = sample_schema();
        threshold.decision_threshold = 1.5;
        assert!(matches!(threshold.validate(), Err(ModelLoadError::InvalidSchema(_))));
    }

    #[test]
    fn test_threshold_defaults_when_absent() {
        let json = serde_json::json!({
            "schema_version": 1,
            "hidden_size": 4,
            "features": [
                { "name": "Age", "kind": "numeric", "mean": 40.0, "std": 10.0 },
                { "name": "Gender", "kind": "categorical", "categories": ["Male"] }
            ]
        });
        let schema: ModelSchema = serde_json::from_value(json).unwrap();
        assert_eq!(schema.decision_threshold, DEFAULT_THRESHOLD);
        assert_eq!(schema.input_width(), 2);
    }
}
