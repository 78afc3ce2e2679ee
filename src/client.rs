//! HTTP client for communicating with rsvp-server

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, StatusCode};
use rsvp_core::{CatalogStats, Event, NewEvent, Popularity, Rsvp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4096";

/// HTTP client for rsvp-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Response types matching server API

/// `{success, data?, error?}` envelope wrapping every response
#[derive(Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_result(self, status: StatusCode) -> Result<T> {
        if !self.success {
            let message = self
                .error
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            anyhow::bail!(message);
        }
        self.data.context("Server response is missing data")
    }
}

#[derive(Deserialize)]
pub struct EventList {
    pub events: Vec<Event>,
    pub stats: CatalogStats,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCount {
    pub event_id: String,
    pub event_name: String,
    pub rsvp_count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCreated {
    pub event_id: String,
    pub event_name: String,
    pub new_rsvp_count: usize,
    pub rsvp_id: String,
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpCancelled {
    pub event_id: String,
    pub new_rsvp_count: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRsvps {
    pub rsvps: Vec<Rsvp>,
    pub count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RsvpRequest<'a> {
    user_address: &'a str,
}

impl Client {
    /// Connect to a running server
    pub async fn connect(base_url: &str) -> Result<Self> {
        let client = Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        };

        client.health_check().await.with_context(|| {
            format!(
                "Could not reach rsvp-server at {}.\n\n\
                Start it with:\n  \
                rsvp-server",
                client.base_url
            )
        })?;

        Ok(client)
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(self.url("/healthz"))
            .timeout(Duration::from_secs(2))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send().await.context("Failed to connect to server")?;
        let status = resp.status();

        let envelope: Envelope<T> = resp
            .json()
            .await
            .with_context(|| format!("Unexpected response from server ({})", status))?;

        envelope.into_result(status)
    }

    /// GET /events
    pub async fn list_events(&self) -> Result<EventList> {
        self.send(self.http.get(self.url("/events"))).await
    }

    /// POST /events
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        self.send(self.http.post(self.url("/events")).json(event)).await
    }

    /// GET /events/popular
    pub async fn popular_events(&self) -> Result<Popularity> {
        self.send(self.http.get(self.url("/events/popular"))).await
    }

    /// GET /events/:id/rsvp
    pub async fn rsvp_count(&self, event_id: &str) -> Result<RsvpCount> {
        let url = self.url(&format!("/events/{}/rsvp", event_id));
        self.send(self.http.get(url)).await
    }

    /// POST /events/:id/rsvp
    pub async fn rsvp(&self, event_id: &str, user_address: &str) -> Result<RsvpCreated> {
        let url = self.url(&format!("/events/{}/rsvp", event_id));
        self.send(self.http.post(url).json(&RsvpRequest { user_address }))
            .await
    }

    /// GET /user/rsvps
    pub async fn user_rsvps(&self, user_address: &str) -> Result<UserRsvps> {
        let request = self
            .http
            .get(self.url("/user/rsvps"))
            .query(&[("userAddress", user_address)]);
        self.send(request).await
    }

    /// DELETE /user/rsvps
    pub async fn cancel_rsvp(&self, user_address: &str, event_id: &str) -> Result<RsvpCancelled> {
        let request = self
            .http
            .delete(self.url("/user/rsvps"))
            .query(&[("userAddress", user_address), ("eventId", event_id)]);
        self.send(request).await
    }
}
