use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// GET /healthz
async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}
