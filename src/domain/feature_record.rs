// ============================================================
// Layer 3 — FeatureRecord
// ============================================================
// The single row handed to the model. Column names and casing
// match the names the model was trained on; serde renames keep
// the Rust field names idiomatic while the wire names stay exact.
//
// Built fresh from a FormState on every submission and dropped
// right after scoring.

use serde::Serialize;

use crate::domain::error::ValidationError;
use crate::domain::form::{Field, FormState, RemoteWork};

/// A single feature as the encoder sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Number(f64),
    Category(&'a str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Education_Level")]
    pub education_level: String,
    #[serde(rename = "Employee_Satisfaction_Score")]
    pub satisfaction_score: f64,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Job_Title")]
    pub job_title: String,
    #[serde(rename = "Monthly_Salary")]
    pub monthly_salary: i64,
    #[serde(rename = "Years_At_Company")]
    pub years_at_company: i64,
    #[serde(rename = "Work_Hours_Per_Week")]
    pub work_hours_per_week: i64,
    #[serde(rename = "Overtime_Hours")]
    pub overtime_hours: i64,
    #[serde(rename = "Team_Size")]
    pub team_size: i64,
    #[serde(rename = "Projects_Handled")]
    pub projects_handled: i64,
    #[serde(rename = "Promotions")]
    pub promotions: i64,
    #[serde(rename = "Training_Hours")]
    pub training_hours: i64,
    #[serde(rename = "Sick_Days")]
    pub sick_days: i64,
    #[serde(rename = "Performance_Score")]
    pub performance_score: i64,
    #[serde(rename = "Remote_Work_Frequency")]
    pub remote_work_frequency: i64,
}

impl FeatureRecord {
    /// Column names in the order the form produces them.
    pub const FIELD_NAMES: [&'static str; 17] = [
        "Age",
        "Gender",
        "Education_Level",
        "Employee_Satisfaction_Score",
        "Department",
        "Job_Title",
        "Monthly_Salary",
        "Years_At_Company",
        "Work_Hours_Per_Week",
        "Overtime_Hours",
        "Team_Size",
        "Projects_Handled",
        "Promotions",
        "Training_Hours",
        "Sick_Days",
        "Performance_Score",
        "Remote_Work_Frequency",
    ];

    /// Columns that carry text; everything else is numeric.
    pub const CATEGORICAL: [&'static str; 4] =
        ["Gender", "Education_Level", "Department", "Job_Title"];

    pub fn is_categorical(name: &str) -> bool {
        Self::CATEGORICAL.contains(&name)
    }

    /// Rename form keys to model columns and map the remote-work label
    /// to its percentage. Every field must be present; which values are
    /// acceptable is the validator's job.
    pub fn from_state(state: &FormState) -> Result<Self, ValidationError> {
        let mut missing = Vec::new();

        let mut text = |field: Field| -> String {
            match state.text(field) {
                Some(s) => s.to_string(),
                None => {
                    missing.push(field);
                    String::new()
                }
            }
        };
        let gender          = text(Field::Gender);
        let education_level = text(Field::Education);
        let department      = text(Field::Department);
        let job_title       = text(Field::JobRole);

        let mut int = |field: Field| -> i64 {
            state.int(field).unwrap_or_else(|| {
                missing.push(field);
                0
            })
        };
        let age                 = int(Field::Age);
        let monthly_salary      = int(Field::Salary);
        let years_at_company    = int(Field::YearsAtCompany);
        let work_hours_per_week = int(Field::WorkHours);
        let overtime_hours      = int(Field::Overtime);
        let team_size           = int(Field::TeamSize);
        let projects_handled    = int(Field::ProjectsHandled);
        let promotions          = int(Field::Promotions);
        let training_hours      = int(Field::TrainingHours);
        let sick_days           = int(Field::SickDays);
        let performance_score   = int(Field::Performance);

        let satisfaction_score = state.float(Field::Satisfaction).unwrap_or_else(|| {
            missing.push(Field::Satisfaction);
            0.0
        });

        let remote_work_frequency = match state.text(Field::RemoteWork).and_then(RemoteWork::from_label) {
            Some(r) => r.percent(),
            None => {
                missing.push(Field::RemoteWork);
                0
            }
        };

        if !missing.is_empty() {
            missing.sort();
            return Err(ValidationError::IncompleteForm { missing });
        }

        Ok(Self {
            age,
            gender,
            education_level,
            satisfaction_score,
            department,
            job_title,
            monthly_salary,
            years_at_company,
            work_hours_per_week,
            overtime_hours,
            team_size,
            projects_handled,
            promotions,
            training_hours,
            sick_days,
            performance_score,
            remote_work_frequency,
        })
    }

    /// Look a column up by its model-side name.
    pub fn value(&self, name: &str) -> Option<FeatureValue<'_>> {
        use FeatureValue::{Category, Number};
        let v = match name {
            "Age"                         => Number(self.age as f64),
            "Gender"                      => Category(&self.gender),
            "Education_Level"             => Category(&self.education_level),
            "Employee_Satisfaction_Score" => Number(self.satisfaction_score),
            "Department"                  => Category(&self.department),
            "Job_Title"                   => Category(&self.job_title),
            "Monthly_Salary"              => Number(self.monthly_salary as f64),
            "Years_At_Company"            => Number(self.years_at_company as f64),
            "Work_Hours_Per_Week"         => Number(self.work_hours_per_week as f64),
            "Overtime_Hours"              => Number(self.overtime_hours as f64),
            "Team_Size"                   => Number(self.team_size as f64),
            "Projects_Handled"            => Number(self.projects_handled as f64),
            "Promotions"                  => Number(self.promotions as f64),
            "Training_Hours"              => Number(self.training_hours as f64),
            "Sick_Days"                   => Number(self.sick_days as f64),
            "Performance_Score"           => Number(self.performance_score as f64),
            "Remote_Work_Frequency"       => Number(self.remote_work_frequency as f64),
            _ => return None,
        };
        Some(v)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn filled_state() -> FormState {
        let mut state = FormState::with_defaults();
        state.set(Field::Gender, "Male").unwrap();
        state.set(Field::Education, "Bachelor").unwrap();
        state.set(Field::Department, "IT").unwrap();
        state.set(Field::JobRole, "Developer").unwrap();
        state.set(Field::RemoteWork, "Half Time (50%)").unwrap();
        state
    }

    #[test]
    fn test_from_state_renames_columns() {
        let record = FeatureRecord::from_state(&filled_state()).unwrap();
        let json   = serde_json::to_value(&record).unwrap();
        let obj    = json.as_object().unwrap();

        assert_eq!(obj.len(), FeatureRecord::FIELD_NAMES.len());
        for name in FeatureRecord::FIELD_NAMES {
            assert!(obj.contains_key(name), "missing column {name}");
        }
        assert_eq!(obj["Gender"], "Male");
        assert_eq!(obj["Remote_Work_Frequency"], 50);
    }

    #[test]
    fn test_value_lookup_matches_field_names() {
        let record = FeatureRecord::from_state(&filled_state()).unwrap();
        for name in FeatureRecord::FIELD_NAMES {
            let value = record.value(name).unwrap();
            let categorical = matches!(value, FeatureValue::Category(_));
            assert_eq!(categorical, FeatureRecord::is_categorical(name), "{name}");
        }
        assert_eq!(record.value("Job_Title"), Some(FeatureValue::Category("Developer")));
        assert!(record.value("Shoe_Size").is_none());
    }

    #[test]
    fn test_from_state_reports_absent_fields() {
        let err = FeatureRecord::from_state(&FormState::new()).unwrap_err();
        assert_eq!(err.missing().len(), Field::ALL.len());
    }
}
