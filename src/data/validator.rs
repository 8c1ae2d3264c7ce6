// ============================================================
// Layer 4 — Form Validator
// ============================================================
// Gates the model call. A submission is complete when:
//   - gender, education, department and job title are chosen
//     (not the "" sentinel)
//   - salary is positive
//   - the remote-work label maps to a known percentage
//
// Every other numeric field is already bounded by its widget.

use crate::domain::error::ValidationError;
use crate::domain::form::{Field, FormState, RemoteWork};

pub fn validate(state: &FormState) -> Result<(), ValidationError> {
    let mut missing: Vec<Field> = Field::REQUIRED_CHOICES
        .into_iter()
        .filter(|f| state.text(*f).map_or(true, str::is_empty))
        .collect();

    if state.int(Field::Salary).map_or(true, |s| s <= 0) {
        missing.push(Field::Salary);
    }

    if state.text(Field::RemoteWork).and_then(RemoteWork::from_label).is_none() {
        missing.push(Field::RemoteWork);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort();
        tracing::debug!("Incomplete form, missing: {:?}", missing);
        Err(ValidationError::IncompleteForm { missing })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::FieldValue;

    fn complete_state() -> FormState {
        let mut state = FormState::with_defaults();
        state.set(Field::Gender, "Female").unwrap();
        state.set(Field::Education, "Master").unwrap();
        state.set(Field::Department, "Finance").unwrap();
        state.set(Field::JobRole, "Analyst").unwrap();
        state
    }

    #[test]
    fn test_complete_form_passes() {
        assert!(validate(&complete_state()).is_ok());
    }

    #[test]
    fn test_defaults_are_incomplete() {
        let err = validate(&FormState::with_defaults()).unwrap_err();
        assert_eq!(
            err.missing(),
            &[Field::Gender, Field::Education, Field::Department, Field::JobRole]
        );
    }

    #[test]
    fn test_each_empty_choice_fails() {
        for field in Field::REQUIRED_CHOICES {
            let mut state = complete_state();
            state.set(field, "").unwrap();
            let err = validate(&state).unwrap_err();
            assert_eq!(err.missing(), &[field]);
        }
    }

    #[test]
    fn test_non_positive_salary_fails() {
        for salary in [0, -500] {
            let mut state = complete_state();
            state.insert(Field::Salary, FieldValue::Int(salary));
            let err = validate(&state).unwrap_err();
            assert_eq!(err.missing(), &[Field::Salary]);
        }
    }

    #[test]
    fn test_unknown_remote_label_fails() {
        let mut state = complete_state();
        state.insert(Field::RemoteWork, FieldValue::Text("Weekends".into()));
        let err = validate(&state).unwrap_err();
        assert_eq!(err.missing(), &[Field::RemoteWork]);
    }

    #[test]
    fn test_empty_state_fails() {
        let err = validate(&FormState::new()).unwrap_err();
        assert!(err.missing().contains(&Field::Salary));
        assert!(err.missing().contains(&Field::RemoteWork));
    }
}
