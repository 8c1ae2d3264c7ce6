// ============================================================
// Layer 1 — Web Presentation
// ============================================================
// The browser-facing form:
//
//   GET  /        — render the session's form
//   POST /        — action=predict | action=reset
//   GET  /health  — liveness + whether the model is loaded
//
//   session.rs  — per-browser FormState, keyed by cookie
//   render.rs   — HTML for one view of the form
//   handlers.rs — request → use case → page
//   server.rs   — HttpServer setup

pub mod handlers;
pub mod render;
pub mod server;
pub mod session;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/", web::post().to(handlers::submit))
        .route("/health", web::get().to(handlers::health));
}
