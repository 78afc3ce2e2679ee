//! Event catalog endpoints

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use rsvp_core::{CatalogStats, Event, NewEvent, Popularity, RsvpError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::routes::{ApiResponse, ApiResult, AppError, required};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/popular", get(popular_events))
}

#[derive(Serialize)]
pub struct EventList {
    pub events: Vec<Event>,
    pub stats: CatalogStats,
}

/// Request body for creating an event. Every field is required.
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl CreateEventRequest {
    fn into_new_event(self) -> Option<NewEvent> {
        Some(NewEvent {
            name: required(self.name)?,
            date: required(self.date)?,
            description: required(self.description)?,
            link: required(self.link)?,
        })
    }
}

/// GET /events - List all events with aggregate stats
async fn list_events(State(state): State<AppState>) -> ApiResult<EventList> {
    let list = state
        .with_registry(|r| {
            Ok(EventList {
                events: r.catalog.list().to_vec(),
                stats: r.catalog.stats(),
            })
        })
        .map_err(AppError::context("Failed to fetch events"))?;

    Ok(Json(ApiResponse::success(list)))
}

/// POST /events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), AppError> {
    let Json(req) = payload?;
    let new = req
        .into_new_event()
        .ok_or_else(|| RsvpError::Validation("Missing required fields".into()))?;

    let event = state
        .with_registry(|r| {
            let mut event = r.catalog.put(new);
            // Overwriting an existing id keeps the RSVPs already taken for it.
            event.rsvp_count = r.ledger.count_for_event(&event.id);
            r.catalog.set_rsvp_count(&event.id, event.rsvp_count);
            Ok(event)
        })
        .map_err(AppError::context("Failed to create event"))?;

    info!(event = %event.id, "event created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(event))))
}

/// GET /events/popular - Events sorted by RSVP count
async fn popular_events(State(state): State<AppState>) -> ApiResult<Popularity> {
    let popularity = state
        .with_registry(|r| Ok(r.catalog.popularity()))
        .map_err(AppError::context("Failed to fetch popular events"))?;

    Ok(Json(ApiResponse::success(popularity)))
}
