//! Per-event RSVP endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use rsvp_core::RsvpError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::routes::{ApiResponse, ApiResult, AppError, required};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events/{id}/rsvp", get(rsvp_count).post(rsvp_to_event))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    pub user_address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCreated {
    pub event_id: String,
    pub event_name: String,
    pub new_rsvp_count: usize,
    pub rsvp_id: String,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCount {
    pub event_id: String,
    pub event_name: String,
    pub rsvp_count: usize,
}

/// POST /events/:id/rsvp - RSVP to an event
async fn rsvp_to_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    payload: Result<Json<RsvpRequest>, JsonRejection>,
) -> ApiResult<RsvpCreated> {
    let Json(req) = payload?;
    let user_address = required(req.user_address)
        .ok_or_else(|| RsvpError::Validation("User address is required".into()))?;

    let (rsvp, event) = state
        .with_registry(|r| r.rsvp(&event_id, &user_address))
        .map_err(AppError::context("Failed to RSVP to event"))?;

    info!(event = %event.id, address = %rsvp.user_address, count = event.rsvp_count, "RSVP recorded");

    Ok(Json(ApiResponse::success(RsvpCreated {
        message: format!("✅ You're RSVP'd for {}!", event.name),
        event_id: event.id,
        event_name: event.name,
        new_rsvp_count: event.rsvp_count,
        rsvp_id: rsvp.id,
    })))
}

/// GET /events/:id/rsvp - Cached RSVP count for an event
async fn rsvp_count(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<RsvpCount> {
    let event = state
        .with_registry(|r| {
            r.catalog
                .get(&event_id)
                .cloned()
                .ok_or_else(|| RsvpError::EventNotFound(event_id.clone()))
        })
        .map_err(AppError::context("Failed to get RSVP count"))?;

    Ok(Json(ApiResponse::success(RsvpCount {
        event_id: event.id,
        event_name: event.name,
        rsvp_count: event.rsvp_count,
    })))
}
