// ============================================================
// Layer 1 — Page Renderer
// ============================================================
// Produces the whole HTML page for one view of the form. Every
// input is bound to the session's FormState by its field key, so
// a re-render always shows the values the user last submitted.
//
// Page layout:
//   header
//   flash (reset success / incomplete-form warning)
//   form: left column  → Personal + Work Information
//         right column → Team & Performance
//         buttons      → Predict Attrition | Reset Form
//   result block (only after a prediction)

use std::fmt::Write;

use crate::domain::form::{Field, FieldValue, FormState, Section, Widget};
use crate::domain::prediction::{PredictionResult, Verdict};

pub const RESET_MESSAGE: &str = "Form has been reset!";

#[derive(Debug, Clone, PartialEq)]
pub enum Flash {
    Success(String),
    Error(String),
}

pub struct PageView<'a> {
    pub form:   &'a FormState,
    pub flash:  Option<Flash>,
    pub result: Option<PredictionResult>,
}

impl<'a> PageView<'a> {
    pub fn new(form: &'a FormState) -> Self {
        Self { form, flash: None, result: None }
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }

    pub fn with_result(mut self, result: PredictionResult) -> Self {
        self.result = Some(result);
        self
    }
}

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
               background: #0e1117; color: #fafafa; margin: 0; }
        .page { max-width: 1100px; margin: 0 auto; padding: 2rem 1.25rem 4rem; }
        .columns { display: flex; gap: 2rem; flex-wrap: wrap; }
        .column { flex: 1 1 420px; }
        .form-group { margin-bottom: 1rem; }
        .form-group label { display: block; font-size: 0.875rem; margin-bottom: 0.375rem; }
        select, input[type="number"] { width: 100%; padding: 0.5rem; border-radius: 6px;
               border: 1px solid #3a3f4b; background: #262730; color: #fafafa; }
        input[type="range"] { width: 100%; }
        .buttons { display: flex; gap: 1rem; margin-top: 1rem; }
        .buttons button { flex: 1; padding: 0.625rem; border-radius: 6px; font-size: 1rem;
               border: 1px solid #3a3f4b; background: #262730; color: #fafafa; cursor: pointer; }
        .flash { padding: 0.75rem 1rem; border-radius: 6px; margin: 1rem 0; }
        .flash.success { background: #173928; color: #8ef0b0; }
        .flash.error { background: #3e2326; color: #ffb4b4; }
"#;

pub fn page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("    <title>Employee Attrition Prediction</title>\n");
    let _ = write!(html, "    <style>{STYLE}    </style>\n</head>\n<body>\n<div class=\"page\">\n");

    html.push_str("<h1>👨‍💼 Employee Attrition Prediction App</h1>\n");
    html.push_str(
        "<p>Provide employee details to predict if they are likely to <b>resign or stay</b>.</p>\n",
    );

    if let Some(flash) = &view.flash {
        let (class, text) = match flash {
            Flash::Success(t) => ("success", t),
            Flash::Error(t)   => ("error", t),
        };
        let _ = writeln!(html, "<div class=\"flash {class}\">{}</div>", escape(text));
    }

    html.push_str("<form method=\"post\" action=\"/\">\n<div class=\"columns\">\n");
    for sections in [&[Section::Personal, Section::Work][..], &[Section::TeamPerformance][..]] {
        html.push_str("<div class=\"column\">\n");
        for &section in sections {
            let _ = writeln!(html, "<h3>{}</h3>", section.title());
            for field in Field::ALL.into_iter().filter(|f| f.section() == section) {
                render_field(&mut html, field, view.form.bind(field));
            }
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"buttons\">\n");
    html.push_str("<button type=\"submit\" name=\"action\" value=\"predict\">🔮 Predict Attrition</button>\n");
    html.push_str("<button type=\"submit\" name=\"action\" value=\"reset\">🔄 Reset Form</button>\n");
    html.push_str("</div>\n</form>\n");

    if let Some(result) = &view.result {
        html.push_str("<h3>🔮 Prediction Result</h3>\n");
        html.push_str(&verdict_block(result.verdict));
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// The result banner. Exactly one verdict word appears in it.
pub fn verdict_block(verdict: Verdict) -> String {
    let (icon, color) = match verdict {
        Verdict::Resign => ("⚠️", "red"),
        Verdict::Stay   => ("✅", "green"),
    };
    format!(
        "<div class=\"verdict\" style=\"padding:20px; background-color:black; border-radius:10px; \
         text-align:center; font-size:22px; font-weight:bold;\">\n\
         {icon} Employee is likely to <span style=\"color:{color};\">{verdict}</span>\n\
         </div>\n"
    )
}

fn render_field(html: &mut String, field: Field, value: Option<&FieldValue>) {
    let key   = field.key();
    let label = escape(field.label());
    let current = value.map(ToString::to_string).unwrap_or_default();

    let _ = writeln!(html, "<div class=\"form-group\">");
    let _ = writeln!(html, "<label for=\"{key}\">{label}</label>");

    match field.widget() {
        Widget::Integer { min, max, step } => {
            let _ = writeln!(
                html,
                "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" \
                 step=\"{step}\" value=\"{}\">",
                escape(&current)
            );
        }
        Widget::Decimal { min, max, step } => {
            let _ = writeln!(
                html,
                "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min:.2}\" max=\"{max:.2}\" \
                 step=\"{step}\" value=\"{}\">",
                escape(&current)
            );
        }
        Widget::Slider { min, max } => {
            let _ = writeln!(
                html,
                "<input type=\"range\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" \
                 value=\"{0}\" oninput=\"this.nextElementSibling.value = this.value\">\
                 <output>{0}</output>",
                escape(&current)
            );
        }
        Widget::Select { options, allow_empty } => {
            let _ = writeln!(html, "<select id=\"{key}\" name=\"{key}\">");
            if allow_empty {
                push_option(html, "", current.is_empty());
            }
            for option in options {
                push_option(html, option, *option == current);
            }
            html.push_str("</select>\n");
        }
        Widget::IntegerSelect { options } => {
            let _ = writeln!(html, "<select id=\"{key}\" name=\"{key}\">");
            for option in options {
                let option = option.to_string();
                push_option(html, &option, option == current);
            }
            html.push_str("</select>\n");
        }
    }

    html.push_str("</div>\n");
}

fn push_option(html: &mut String, value: &str, selected: bool) {
    let value = escape(value);
    let selected = if selected { " selected" } else { "" };
    let _ = writeln!(html, "<option value=\"{value}\"{selected}>{value}</option>");
}

/// Minimal HTML escaping for text and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _    => out.push(c),
        }
    }
    out
}
