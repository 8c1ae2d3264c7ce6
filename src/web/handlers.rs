//! HTTP handlers for the attrition form

use std::collections::HashMap;

use actix_web::{
    cookie::Cookie,
    error::{ErrorBadRequest, ErrorInternalServerError},
    http::header::ContentType,
    web, HttpRequest, HttpResponse, Result as ActixResult,
};
use uuid::Uuid;

use crate::application::predict_use_case::{Outcome, PredictUseCase};
use crate::domain::form::{Field, FormState};
use crate::web::render::{self, Flash, PageView, RESET_MESSAGE};
use crate::web::server::AppState;
use crate::web::session::SESSION_COOKIE;

/// The live session named by the request cookie, if any.
fn existing_session(req: &HttpRequest, state: &AppState) -> Option<Uuid> {
    let cookie = req.cookie(SESSION_COOKIE);
    state.sessions.lookup(cookie.as_ref().map(|c| c.value()))
}

/// Session for a request that writes form state, opening one if needed.
fn writable_session(req: &HttpRequest, state: &AppState) -> (Uuid, bool) {
    match existing_session(req, state) {
        Some(id) => (id, false),
        None     => (state.sessions.open(), true),
    }
}

fn html_response(new_session: Option<Uuid>, body: String) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::html());
    if let Some(id) = new_session {
        let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
        cookie.set_path("/");
        cookie.set_http_only(true);
        builder.cookie(cookie);
    }
    builder.body(body)
}

/// GET /: render the form for this session, or a default form
/// when the request carries no live session.
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let body = match existing_session(&req, &state) {
        Some(id) => state.sessions.with_state(id, |form| {
            form.initialize();
            render::page(&PageView::new(form))
        }),
        None => render::page(&PageView::new(&FormState::with_defaults())),
    };
    html_response(None, body)
}

/// POST /: "predict" or "reset"
pub async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Form<HashMap<String, String>>,
) -> ActixResult<HttpResponse> {
    let params = params.into_inner();
    let action = params.get("action").map(String::as_str).unwrap_or("predict");
    if action != "predict" && action != "reset" {
        tracing::warn!("Unknown form action '{}'", action);
        return Err(ErrorBadRequest(format!("unknown action '{action}'")));
    }

    let (id, fresh) = writable_session(&req, &state);
    let new_session = fresh.then_some(id);

    match action {
        "reset" => {
            state.sessions.reset(id);
            tracing::info!("Session {} reset", id);
            let body = state.sessions.with_state(id, |form| {
                form.initialize();
                render::page(&PageView::new(form).with_flash(Flash::Success(RESET_MESSAGE.into())))
            });
            Ok(html_response(new_session, body))
        }
        _ => {
            // Snapshot the edited form so the model runs without the session lock held.
            let form = state.sessions.with_state(id, |form| {
                form.initialize();
                apply_edits(form, &params);
                form.clone()
            });

            let scorer = state.model.get_or_load().map_err(|e| {
                tracing::error!("Model unavailable: {e}");
                ErrorInternalServerError(e)
            })?;
            let outcome = PredictUseCase::new(scorer).evaluate(&form).map_err(|e| {
                tracing::error!("Inference failed: {e}");
                ErrorInternalServerError(e)
            })?;

            let view = match outcome {
                Outcome::Incomplete(e) => PageView::new(&form).with_flash(Flash::Error(e.to_string())),
                Outcome::Predicted(r)  => PageView::new(&form).with_result(r),
            };
            Ok(html_response(new_session, render::page(&view)))
        }
    }
}

/// GET /health
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model_loaded": state.model.is_loaded(),
        "sessions": state.sessions.len(),
    }))
}

/// Write each posted field through its widget. Rejected values keep
/// the previous state; keys that are not form fields are ignored.
fn apply_edits(form: &mut FormState, params: &HashMap<String, String>) {
    for (key, raw) in params {
        let Some(field) = Field::from_key(key) else {
            continue;
        };
        if let Err(e) = form.set(field, raw) {
            tracing::warn!("{e}");
        }
    }
}
