//! Axum router wiring.
//!
//! Dashboard, read API and static assets are nested under the configured base
//! path; ops endpoints stay at the root.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let gw = &state.cfg().gateway;

    let site = Router::new()
        .route("/", get(api::dashboard::dashboard))
        .route("/dashboard", get(api::dashboard::dashboard))
        .route("/api/map/:token", get(api::map::map_lookup))
        .route("/api/weather/current", get(api::weather::current))
        .route("/api/weather/history", get(api::weather::history))
        .nest_service("/static", ServeDir::new(&gw.static_dir));

    let app = if gw.base_path.is_empty() {
        site
    } else {
        Router::new().nest(&gw.base_path, site)
    };

    app.route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
