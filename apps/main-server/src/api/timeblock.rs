//! Timeblock API endpoints.
//!
//! Every request names the table it targets through `kind`.

use std::sync::Arc;

use axum::{Json, extract::State};
use entities::{PreferenceType, TimeblockPatch};
use rpc_protocol::{Timeblock, requests::*, responses::*};
use schedule_store::{ScheduleStore, TimeblockFilter};

use super::{parse_id, parse_kind, parse_optional_id};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Creates a timeblock.
pub async fn create_timeblock<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateTimeblockRequest>,
) -> ServerResult<Json<CreateTimeblockResponse>> {
    let kind = parse_kind(&request.kind)?;
    let user_id = parse_id("user_id", &request.user_id)?;
    let event_id = parse_optional_id("event_id", request.event_id.as_deref())?;
    let preference_type: PreferenceType = request.preference_type.parse()?;

    let mut block = entities::Timeblock::new(
        kind,
        user_id,
        request.date,
        request.start_time,
        request.end_time,
        preference_type,
    )
    .with_finalized(request.is_finalized);
    block.event_id = event_id;

    let block = state.store.create_timeblock(block).await?;

    tracing::info!(
        timeblock_id = %block.id,
        kind = %kind,
        user_id = %user_id,
        "Timeblock created"
    );

    Ok(Json(CreateTimeblockResponse {
        timeblock: Timeblock::from(&block),
    }))
}

/// Gets a timeblock by ID.
pub async fn get_timeblock<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetTimeblockRequest>,
) -> ServerResult<Json<GetTimeblockResponse>> {
    let kind = parse_kind(&request.kind)?;
    let timeblock_id = parse_id("timeblock_id", &request.timeblock_id)?;

    let block = state
        .store
        .get_timeblock(kind, timeblock_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(kind.entity_name().to_string()))?;

    Ok(Json(GetTimeblockResponse {
        timeblock: Timeblock::from(&block),
    }))
}

/// Lists timeblocks in date and time order.
pub async fn list_timeblocks<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListTimeblocksRequest>,
) -> ServerResult<Json<ListTimeblocksResponse>> {
    let kind = parse_kind(&request.kind)?;

    let filter = TimeblockFilter {
        user_id: parse_optional_id("user_id", request.user_id.as_deref())?,
        event_id: parse_optional_id("event_id", request.event_id.as_deref())?,
        date: request.date,
        is_finalized: request.is_finalized,
        limit: request.limit,
        offset: request.offset,
    };

    let (blocks, total) = state.store.list_timeblocks(kind, filter).await?;

    Ok(Json(ListTimeblocksResponse {
        timeblocks: blocks.iter().map(Timeblock::from).collect(),
        total_count: total,
    }))
}

/// Updates the fields present in the request.
pub async fn update_timeblock<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<UpdateTimeblockRequest>,
) -> ServerResult<Json<UpdateTimeblockResponse>> {
    let kind = parse_kind(&request.kind)?;
    let timeblock_id = parse_id("timeblock_id", &request.timeblock_id)?;

    let event_id = match parse_optional_id("event_id", request.event_id.as_deref())? {
        Some(event_id) => Some(Some(event_id)),
        None if request.unlink_event => Some(None),
        None => None,
    };

    let patch = TimeblockPatch {
        event_id,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        preference_type: request
            .preference_type
            .as_deref()
            .map(str::parse::<PreferenceType>)
            .transpose()?,
        is_finalized: request.is_finalized,
    };

    let block = state.store.update_timeblock(kind, timeblock_id, patch).await?;

    tracing::info!(timeblock_id = %timeblock_id, kind = %kind, "Timeblock updated");

    Ok(Json(UpdateTimeblockResponse {
        timeblock: Timeblock::from(&block),
    }))
}

/// Deletes a timeblock.
pub async fn delete_timeblock<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<DeleteTimeblockRequest>,
) -> ServerResult<Json<DeleteTimeblockResponse>> {
    let kind = parse_kind(&request.kind)?;
    let timeblock_id = parse_id("timeblock_id", &request.timeblock_id)?;

    state.store.delete_timeblock(kind, timeblock_id).await?;

    tracing::info!(timeblock_id = %timeblock_id, kind = %kind, "Timeblock deleted");

    Ok(Json(DeleteTimeblockResponse {}))
}
