//! Event API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use entities::{EventDuration, EventPatch, EventType, NewEvent};
use rpc_protocol::{Event, requests::*, responses::*};
use schedule_store::{EventFilter, ScheduleStore};

use super::parse_id;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Creates an event after validating duration, type and title.
pub async fn create_event<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateEventRequest>,
) -> ServerResult<Json<CreateEventResponse>> {
    let event = NewEvent::from(request).validate()?;

    let event = state.store.create_event(event).await?;

    tracing::info!(
        event_id = %event.id,
        duration = event.duration.minutes(),
        event_type = %event.event_type,
        "Event created"
    );

    Ok(Json(CreateEventResponse {
        event: Event::from(&event),
    }))
}

/// Gets an event by ID.
pub async fn get_event<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetEventRequest>,
) -> ServerResult<Json<GetEventResponse>> {
    let event_id = parse_id("event_id", &request.event_id)?;

    let event = state
        .store
        .get_event(event_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Event".to_string()))?;

    Ok(Json(GetEventResponse {
        event: Event::from(&event),
    }))
}

/// Lists events.
pub async fn list_events<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListEventsRequest>,
) -> ServerResult<Json<ListEventsResponse>> {
    let event_type = request
        .event_type
        .as_deref()
        .map(str::parse::<EventType>)
        .transpose()?;

    let filter = EventFilter {
        event_type,
        invitee_id: request.invitee_id,
        limit: request.limit,
        offset: request.offset,
    };

    let (events, total) = state.store.list_events(filter).await?;

    Ok(Json(ListEventsResponse {
        events: events.iter().map(Event::from).collect(),
        total_count: total,
    }))
}

/// Updates the fields present in the request.
pub async fn update_event<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<UpdateEventRequest>,
) -> ServerResult<Json<UpdateEventResponse>> {
    let event_id = parse_id("event_id", &request.event_id)?;

    let patch = EventPatch {
        title: request.event_title,
        duration: request
            .event_duration
            .map(EventDuration::from_minutes)
            .transpose()?,
        event_type: request
            .event_type
            .as_deref()
            .map(str::parse::<EventType>)
            .transpose()?,
        description: request.description,
        invitee_id: request.invitee_id,
    };

    let event = state.store.update_event(event_id, patch).await?;

    tracing::info!(event_id = %event_id, "Event updated");

    Ok(Json(UpdateEventResponse {
        event: Event::from(&event),
    }))
}

/// Deletes an event. Timeblocks that referenced it are kept and unlinked.
pub async fn delete_event<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<DeleteEventRequest>,
) -> ServerResult<Json<DeleteEventResponse>> {
    let event_id = parse_id("event_id", &request.event_id)?;

    state.store.delete_event(event_id).await?;

    tracing::info!(event_id = %event_id, "Event deleted");

    Ok(Json(DeleteEventResponse {}))
}
