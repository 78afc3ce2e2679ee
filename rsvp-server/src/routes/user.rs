//! Per-user RSVP endpoints

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use rsvp_core::ledger::normalize_address;
use rsvp_core::{Rsvp, RsvpError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::routes::{ApiResponse, ApiResult, AppError, required};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/user/rsvps", get(user_rsvps).delete(cancel_rsvp))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_address: Option<String>,
    pub event_id: Option<String>,
}

#[derive(Serialize)]
pub struct UserRsvps {
    pub rsvps: Vec<Rsvp>,
    pub count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCancelled {
    pub event_id: String,
    pub new_rsvp_count: usize,
    pub message: String,
}

fn address_required(query: &mut UserQuery) -> Result<String, RsvpError> {
    required(query.user_address.take())
        .ok_or_else(|| RsvpError::Validation("User address is required".into()))
}

/// GET /user/rsvps?userAddress= - All RSVPs for an address
async fn user_rsvps(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<UserRsvps> {
    let Query(mut query) = query?;
    let user_address = address_required(&mut query)?;

    let rsvps = state
        .with_registry(|r| Ok(r.ledger.list_for_user(&user_address)))
        .map_err(AppError::context("Failed to fetch user RSVPs"))?;

    Ok(Json(ApiResponse::success(UserRsvps {
        count: rsvps.len(),
        rsvps,
    })))
}

/// DELETE /user/rsvps?userAddress=&eventId= - Cancel an RSVP
async fn cancel_rsvp(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<RsvpCancelled> {
    let Query(mut query) = query?;
    let user_address = address_required(&mut query)?;
    let event_id = required(query.event_id)
        .ok_or_else(|| RsvpError::Validation("Event id is required".into()))?;

    let new_rsvp_count = state
        .with_registry(|r| r.cancel(&user_address, &event_id))
        .map_err(AppError::context("Failed to cancel RSVP"))?;

    info!(event = %event_id, address = %normalize_address(&user_address), count = new_rsvp_count, "RSVP cancelled");

    Ok(Json(ApiResponse::success(RsvpCancelled {
        message: format!("RSVP for {} cancelled", event_id),
        event_id,
        new_rsvp_count,
    })))
}
