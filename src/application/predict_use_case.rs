// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// One submission, start to finish:
//
//   Step 1: Validate the form           (Layer 4 - data)
//   Step 2: Build the FeatureRecord     (Layer 3 - domain)
//   Step 3: Score it                    (Layer 5 - ml, via trait)
//   Step 4: Apply the threshold         (Layer 3 - domain)
//
// An incomplete form is a normal outcome, not an error: the model
// is never called and the caller shows the warning. A scoring
// failure is returned untouched for the caller to surface.

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use anyhow::{bail, Context, Result};

use crate::data::validator::validate;
use crate::domain::error::{InferenceError, ValidationError};
use crate::domain::feature_record::FeatureRecord;
use crate::domain::form::{Field, FormState};
use crate::domain::prediction::PredictionResult;
use crate::domain::traits::AttritionScorer;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Incomplete(ValidationError),
    Predicted(PredictionResult),
}

pub struct PredictUseCase {
    scorer:    Arc<dyn AttritionScorer>,
    threshold: f64,
}

impl PredictUseCase {
    /// Use the threshold calibrated for this scorer.
    pub fn new(scorer: Arc<dyn AttritionScorer>) -> Self {
        let threshold = scorer.decision_threshold();
        Self { scorer, threshold }
    }

    pub fn with_threshold(scorer: Arc<dyn AttritionScorer>, threshold: f64) -> Self {
        Self { scorer, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn evaluate(&self, state: &FormState) -> Result<Outcome, InferenceError> {
        if let Err(e) = validate(state) {
            tracing::info!("Submission rejected, missing {:?}", e.missing());
            return Ok(Outcome::Incomplete(e));
        }

        let record = match FeatureRecord::from_state(state) {
            Ok(record) => record,
            Err(e) => return Ok(Outcome::Incomplete(e)),
        };

        let probs  = self.scorer.predict_proba(&record)?;
        let result = PredictionResult::new(probs.resign, self.threshold);

        tracing::info!(
            "Prediction: {} (P(resign)={:.4}, threshold={})",
            result.verdict,
            result.probability,
            self.threshold
        );
        Ok(Outcome::Predicted(result))
    }
}

/// Read a form from a JSON object of `form key → value`, e.g.
/// `{"age": 30, "gender": "Male", "remote_work": "Never (0%)"}`.
/// Values go through the same widgets as the web form; keys that
/// are not given keep their defaults.
pub fn load_form(path: &Path) -> Result<FormState> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read form file '{}'", path.display()))?;
    let values: HashMap<String, serde_json::Value> = serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not a JSON object", path.display()))?;

    let mut state = FormState::with_defaults();
    for (key, value) in values {
        let Some(field) = Field::from_key(&key) else {
            bail!("Unknown form field '{key}'");
        };
        let raw = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => bail!("Field '{key}' has an unsupported value: {other}"),
        };
        state.set(field, &raw)?;
    }
    Ok(state)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::prediction::{ClassProbabilities, Verdict, DEFAULT_THRESHOLD};

    /// Returns a fixed P(resign) and counts how often it was asked.
    pub struct StubScorer {
        pub resign: f64,
        pub calls:  AtomicUsize,
    }

    impl StubScorer {
        pub fn new(resign: f64) -> Arc<Self> {
            Arc::new(Self { resign, calls: AtomicUsize::new(0) })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AttritionScorer for StubScorer {
        fn predict_proba(&self, _: &FeatureRecord) -> Result<ClassProbabilities, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ClassProbabilities { stay: 1.0 - self.resign, resign: self.resign })
        }
    }

    pub struct BrokenScorer;

    impl AttritionScorer for BrokenScorer {
        fn predict_proba(&self, _: &FeatureRecord) -> Result<ClassProbabilities, InferenceError> {
            Err(InferenceError::Backend("boom".into()))
        }
    }

    /// The reference employee: a 30-year-old developer in IT.
    pub fn reference_state() -> FormState {
        let mut state = FormState::with_defaults();
        let edits = [
            (Field::Age, "30"),
            (Field::Gender, "Male"),
            (Field::Education, "Bachelor"),
            (Field::Satisfaction, "4.0"),
            (Field::Department, "IT"),
            (Field::JobRole, "Developer"),
            (Field::Salary, "5000"),
            (Field::YearsAtCompany, "3"),
            (Field::WorkHours, "40"),
            (Field::Overtime, "10"),
            (Field::TeamSize, "5"),
            (Field::ProjectsHandled, "8"),
            (Field::Promotions, "1"),
            (Field::TrainingHours, "20"),
            (Field::SickDays, "2"),
            (Field::Performance, "4"),
            (Field::RemoteWork, "Never (0%)"),
        ];
        for (field, raw) in edits {
            state.set(field, raw).unwrap();
        }
        state
    }

    #[test]
    fn test_reference_employee_resigns() {
        let stub     = StubScorer::new(0.5);
        let use_case = PredictUseCase::new(stub.clone());

        let outcome = use_case.evaluate(&reference_state()).unwrap();
        match outcome {
            Outcome::Predicted(r) => {
                assert_eq!(r.verdict, Verdict::Resign);
                assert_eq!(r.probability, 0.5);
            }
            other => panic!("expected a prediction, got {other:?}"),
        }
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_missing_gender_never_calls_model() {
        let stub     = StubScorer::new(0.5);
        let use_case = PredictUseCase::new(stub.clone());

        let mut state = reference_state();
        state.set(Field::Gender, "").unwrap();

        let outcome = use_case.evaluate(&state).unwrap();
        assert!(matches!(outcome, Outcome::Incomplete(ref e) if e.missing() == [Field::Gender]));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_threshold_boundary() {
        for (p, expected) in [(0.027, Verdict::Resign), (0.026999, Verdict::Stay)] {
            let use_case = PredictUseCase::new(StubScorer::new(p));
            match use_case.evaluate(&reference_state()).unwrap() {
                Outcome::Predicted(r) => assert_eq!(r.verdict, expected, "p={p}"),
                other => panic!("expected a prediction, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_default_threshold_from_scorer() {
        let use_case = PredictUseCase::new(StubScorer::new(0.1));
        assert_eq!(use_case.threshold(), DEFAULT_THRESHOLD);

        let strict = PredictUseCase::with_threshold(StubScorer::new(0.1), 0.5);
        match strict.evaluate(&reference_state()).unwrap() {
            Outcome::Predicted(r) => assert_eq!(r.verdict, Verdict::Stay),
            other => panic!("expected a prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_inference_error_propagates() {
        let use_case = PredictUseCase::new(Arc::new(BrokenScorer));
        let err      = use_case.evaluate(&reference_state()).unwrap_err();
        assert_eq!(err, InferenceError::Backend("boom".into()));
    }

    #[test]
    fn test_load_form_from_json() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("form.json");
        fs::write(
            &path,
            r#"{"age": 30, "gender": "Male", "education": "Bachelor", "satisfaction": 4.0,
                "department": "IT", "job_role": "Developer", "salary": 5000,
                "years_at_company": 3, "work_hours": 40, "overtime": 10, "team_size": 5,
                "projects_handled": 8, "promotions": 1, "training_hours": 20, "sick_days": 2,
                "performance": 4, "remote_work": "Never (0%)"}"#,
        )
        .unwrap();

        let state = load_form(&path).unwrap();
        assert_eq!(state, reference_state());
    }

    #[test]
    fn test_load_form_keeps_defaults_and_rejects_unknown_keys() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("form.json");

        fs::write(&path, r#"{"gender": "Female"}"#).unwrap();
        let state = load_form(&path).unwrap();
        assert_eq!(state.text(Field::Gender), Some("Female"));
        assert_eq!(state.int(Field::Age), Some(22));

        fs::write(&path, r#"{"shoe_size": 44}"#).unwrap();
        assert!(load_form(&path).is_err());
    }
}
