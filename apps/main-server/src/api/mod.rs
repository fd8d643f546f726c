//! API endpoints.

pub mod admin;
pub mod contact;
pub mod event;
pub mod timeblock;
pub mod user;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use entities::TimeblockKind;
use schedule_store::ScheduleStore;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: ScheduleStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // User endpoints
        .route("/api/user/create", post(user::create_user))
        .route("/api/user/get", post(user::get_user))
        .route("/api/user/list", post(user::list_users))
        .route("/api/user/update", post(user::update_user))
        .route("/api/user/delete", post(user::delete_user))
        // Contact endpoints
        .route("/api/contact/add", post(contact::add_contact))
        .route("/api/contact/get", post(contact::get_contact))
        .route("/api/contact/list", post(contact::list_contacts))
        .route("/api/contact/remove", post(contact::remove_contact))
        .route("/api/contact/delete", post(contact::delete_contact))
        // Event endpoints
        .route("/api/event/create", post(event::create_event))
        .route("/api/event/get", post(event::get_event))
        .route("/api/event/list", post(event::list_events))
        .route("/api/event/update", post(event::update_event))
        .route("/api/event/delete", post(event::delete_event))
        // Timeblock endpoints
        .route("/api/timeblock/create", post(timeblock::create_timeblock))
        .route("/api/timeblock/get", post(timeblock::get_timeblock))
        .route("/api/timeblock/list", post(timeblock::list_timeblocks))
        .route("/api/timeblock/update", post(timeblock::update_timeblock))
        .route("/api/timeblock/delete", post(timeblock::delete_timeblock))
        // Admin
        .route("/admin/contacts", get(admin::list_contacts))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Parses a record ID supplied in request field `field`.
pub(crate) fn parse_id(field: &str, value: &str) -> ServerResult<Uuid> {
    value
        .parse()
        .map_err(|_| ServerError::InvalidRequest(format!("Invalid {field}")))
}

pub(crate) fn parse_optional_id(field: &str, value: Option<&str>) -> ServerResult<Option<Uuid>> {
    value.map(|v| parse_id(field, v)).transpose()
}

/// Parses the timeblock table selector.
pub(crate) fn parse_kind(value: &str) -> ServerResult<TimeblockKind> {
    Ok(value.parse::<TimeblockKind>()?)
}
