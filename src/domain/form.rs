// ============================================================
// Layer 3 — Form Fields and Session State
// ============================================================
// Every input on the attrition form is a `Field`. A field knows
// its key, its label, which section of the page it sits in, the
// widget that edits it, and its default value.
//
// `FormState` is one session's mapping of field → current value.
// Widgets write through `FormState::set`, which applies the same
// parsing and clamping a browser number input would.
//
// Lifecycle:
//   new()        → empty map (no keys at all)
//   initialize() → fills in defaults for absent keys only
//   set()        → user edit through a widget
//   reset()      → back to the empty map; next render re-initializes

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::FieldError;

// ─── Fixed option lists ──────────────────────────────────────────────────────

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

pub const EDUCATION_LEVELS: [&str; 4] = ["High School", "Bachelor", "Master", "PhD"];

pub const DEPARTMENTS: [&str; 9] = [
    "IT", "Finance", "Customer Support", "Engineering", "Marketing",
    "HR", "Operations", "Sales", "Legal",
];

pub const JOB_TITLES: [&str; 7] = [
    "Specialist", "Developer", "Analyst", "Manager", "Technician", "Engineer", "Consultant",
];

pub const PERFORMANCE_SCORES: [i64; 5] = [1, 2, 3, 4, 5];

pub const REMOTE_WORK_LABELS: [&str; 5] = [
    "Never (0%)", "Occasionally (25%)", "Half Time (50%)", "Mostly (75%)", "Always (100%)",
];

// ─── RemoteWork ──────────────────────────────────────────────────────────────
/// The remote-work select box stores a label; the model wants a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteWork {
    Never,
    Occasionally,
    HalfTime,
    Mostly,
    Always,
}

impl RemoteWork {
    pub const ALL: [RemoteWork; 5] = [
        RemoteWork::Never,
        RemoteWork::Occasionally,
        RemoteWork::HalfTime,
        RemoteWork::Mostly,
        RemoteWork::Always,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    pub fn label(self) -> &'static str {
        match self {
            RemoteWork::Never        => REMOTE_WORK_LABELS[0],
            RemoteWork::Occasionally => REMOTE_WORK_LABELS[1],
            RemoteWork::HalfTime     => REMOTE_WORK_LABELS[2],
            RemoteWork::Mostly       => REMOTE_WORK_LABELS[3],
            RemoteWork::Always       => REMOTE_WORK_LABELS[4],
        }
    }

    pub fn percent(self) -> i64 {
        match self {
            RemoteWork::Never        => 0,
            RemoteWork::Occasionally => 25,
            RemoteWork::HalfTime     => 50,
            RemoteWork::Mostly       => 75,
            RemoteWork::Always       => 100,
        }
    }
}

// ─── Section ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Personal,
    Work,
    TeamPerformance,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Personal        => "👤 Personal Information",
            Section::Work            => "💼 Work Information",
            Section::TeamPerformance => "📊 Team & Performance",
        }
    }
}

// ─── Widget ──────────────────────────────────────────────────────────────────
/// How a field is edited, and therefore how a raw string is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Integer { min: i64, max: i64, step: i64 },
    Decimal { min: f64, max: f64, step: f64 },
    Slider { min: i64, max: i64 },
    /// `allow_empty` adds the "" sentinel meaning "nothing selected".
    Select { options: &'static [&'static str], allow_empty: bool },
    IntegerSelect { options: &'static [i64] },
}

impl Widget {
    /// Turn a raw submitted string into a stored value.
    /// Numbers are clamped to the widget range; choices must be listed.
    pub fn accept(&self, field: Field, raw: &str) -> Result<FieldValue, FieldError> {
        let raw = raw.trim();
        let not_a_number = || FieldError::NotANumber { field, raw: raw.to_string() };
        let not_an_option = || FieldError::NotAnOption { field, raw: raw.to_string() };

        match *self {
            Widget::Integer { min, max, .. } | Widget::Slider { min, max } => {
                let v = parse_int(raw).ok_or_else(not_a_number)?;
                Ok(FieldValue::Int(v.clamp(min, max)))
            }
            Widget::Decimal { min, max, .. } => {
                let v: f64 = raw.parse().map_err(|_| not_a_number())?;
                if !v.is_finite() {
                    return Err(not_a_number());
                }
                let v = (v.clamp(min, max) * 100.0).round() / 100.0;
                Ok(FieldValue::Float(v))
            }
            Widget::Select { options, allow_empty } => {
                if (raw.is_empty() && allow_empty) || options.contains(&raw) {
                    Ok(FieldValue::Text(raw.to_string()))
                } else {
                    Err(not_an_option())
                }
            }
            Widget::IntegerSelect { options } => {
                let v = parse_int(raw).ok_or_else(not_a_number)?;
                if options.contains(&v) {
                    Ok(FieldValue::Int(v))
                } else {
                    Err(not_an_option())
                }
            }
        }
    }
}

/// "30" and "30.0" are both the integer 30; "30.5" is not an integer.
fn parse_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

// ─── FieldValue ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats; text never converts.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v)   => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_)  => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v)   => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v:.2}"),
            FieldValue::Text(s)  => f.write_str(s),
        }
    }
}

// ─── Field ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    Education,
    Satisfaction,
    Department,
    JobRole,
    Salary,
    YearsAtCompany,
    WorkHours,
    Overtime,
    TeamSize,
    ProjectsHandled,
    Promotions,
    TrainingHours,
    SickDays,
    Performance,
    RemoteWork,
}

impl Field {
    /// Every field, in the order it appears on the page.
    pub const ALL: [Field; 17] = [
        Field::Age,
        Field::Gender,
        Field::Education,
        Field::Satisfaction,
        Field::Department,
        Field::JobRole,
        Field::Salary,
        Field::YearsAtCompany,
        Field::WorkHours,
        Field::Overtime,
        Field::TeamSize,
        Field::ProjectsHandled,
        Field::Promotions,
        Field::TrainingHours,
        Field::SickDays,
        Field::Performance,
        Field::RemoteWork,
    ];

    /// Select boxes that start on the "" sentinel and must be chosen.
    pub const REQUIRED_CHOICES: [Field; 4] = [
        Field::Gender,
        Field::Education,
        Field::Department,
        Field::JobRole,
    ];

    /// Form key, also used as the HTML input name.
    pub fn key(self) -> &'static str {
        match self {
            Field::Age             => "age",
            Field::Gender          => "gender",
            Field::Education       => "education",
            Field::Satisfaction    => "satisfaction",
            Field::Department      => "department",
            Field::JobRole         => "job_role",
            Field::Salary          => "salary",
            Field::YearsAtCompany  => "years_at_company",
            Field::WorkHours       => "work_hours",
            Field::Overtime        => "overtime",
            Field::TeamSize        => "team_size",
            Field::ProjectsHandled => "projects_handled",
            Field::Promotions      => "promotions",
            Field::TrainingHours   => "training_hours",
            Field::SickDays        => "sick_days",
            Field::Performance     => "performance",
            Field::RemoteWork      => "remote_work",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Age             => "Age",
            Field::Gender          => "Gender",
            Field::Education       => "Education Level",
            Field::Satisfaction    => "Employee Satisfaction Score (0.00 - 5.00)",
            Field::Department      => "Department",
            Field::JobRole         => "Job Title",
            Field::Salary          => "Monthly Salary (USD)",
            Field::YearsAtCompany  => "Years at Company",
            Field::WorkHours       => "Work Hours per Week",
            Field::Overtime        => "Overtime Hours (last year)",
            Field::TeamSize        => "Team Size",
            Field::ProjectsHandled => "Projects Handled",
            Field::Promotions      => "Number of Promotions",
            Field::TrainingHours   => "Training Hours (per year)",
            Field::SickDays        => "Sick Days",
            Field::Performance     => "Performance Score (1-5)",
            Field::RemoteWork      => "Remote Work Frequency",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Field::Age | Field::Gender | Field::Education | Field::Satisfaction => Section::Personal,
            Field::Department
            | Field::JobRole
            | Field::Salary
            | Field::YearsAtCompany
            | Field::WorkHours
            | Field::Overtime => Section::Work,
            _ => Section::TeamPerformance,
        }
    }

    pub fn widget(self) -> Widget {
        let int = |min, max| Widget::Integer { min, max, step: 1 };
        match self {
            Field::Age             => int(22, 60),
            Field::Gender          => Widget::Select { options: &GENDERS, allow_empty: true },
            Field::Education       => Widget::Select { options: &EDUCATION_LEVELS, allow_empty: true },
            Field::Satisfaction    => Widget::Decimal { min: 0.0, max: 5.0, step: 0.01 },
            Field::Department      => Widget::Select { options: &DEPARTMENTS, allow_empty: true },
            Field::JobRole         => Widget::Select { options: &JOB_TITLES, allow_empty: true },
            Field::Salary          => Widget::Integer { min: 1000, max: 200_000, step: 500 },
            Field::YearsAtCompany  => Widget::Slider { min: 0, max: 40 },
            Field::WorkHours       => int(20, 80),
            Field::Overtime        => int(0, 500),
            Field::TeamSize        => int(0, 30),
            Field::ProjectsHandled => int(0, 50),
            Field::Promotions      => int(0, 10),
            Field::TrainingHours   => int(0, 500),
            Field::SickDays        => int(0, 365),
            Field::Performance     => Widget::IntegerSelect { options: &PERFORMANCE_SCORES },
            Field::RemoteWork      => Widget::Select { options: &REMOTE_WORK_LABELS, allow_empty: false },
        }
    }

    pub fn default_value(self) -> FieldValue {
        match self {
            Field::Age             => FieldValue::Int(22),
            Field::Satisfaction    => FieldValue::Float(3.0),
            Field::Salary          => FieldValue::Int(1000),
            Field::YearsAtCompany  => FieldValue::Int(1),
            Field::WorkHours       => FieldValue::Int(40),
            Field::Performance     => FieldValue::Int(3),
            Field::RemoteWork      => FieldValue::Text(RemoteWork::Never.label().to_string()),
            Field::Gender
            | Field::Education
            | Field::Department
            | Field::JobRole       => FieldValue::Text(String::new()),
            Field::Overtime
            | Field::TeamSize
            | Field::ProjectsHandled
            | Field::Promotions
            | Field::TrainingHours
            | Field::SickDays      => FieldValue::Int(0),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ─── FormState ───────────────────────────────────────────────────────────────
/// One session's form values. Absent keys mean "never initialized".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<Field, FieldValue>,
}

impl FormState {
    /// An empty state with no keys at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty state that has already been initialized.
    pub fn with_defaults() -> Self {
        let mut state = Self::new();
        state.initialize();
        state
    }

    /// Seed every absent key with its default. Present keys are untouched,
    /// so calling this on every render never clobbers an edit.
    pub fn initialize(&mut self) {
        for field in Field::ALL {
            self.values.entry(field).or_insert_with(|| field.default_value());
        }
    }

    /// Current value bound to a field, if it has one.
    pub fn bind(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.bind(field).and_then(FieldValue::as_text)
    }

    pub fn int(&self, field: Field) -> Option<i64> {
        self.bind(field).and_then(FieldValue::as_int)
    }

    pub fn float(&self, field: Field) -> Option<f64> {
        self.bind(field).and_then(FieldValue::as_float)
    }

    /// Write a raw value through the field's widget. On rejection the
    /// previous value stays in place.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        let value = field.widget().accept(field, raw)?;
        self.values.insert(field, value);
        Ok(())
    }

    /// Programmatic write with no widget checks.
    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.values.insert(field, value);
    }

    /// Drop every key. The replacement is a brand new map.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
