//! Contact API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use rpc_protocol::{Contact, requests::*, responses::*};
use schedule_store::{ContactFilter, ScheduleStore};

use super::{parse_id, parse_optional_id};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Adds a contact between two existing users.
pub async fn add_contact<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<AddContactRequest>,
) -> ServerResult<Json<AddContactResponse>> {
    let user_id = parse_id("user_id", &request.user_id)?;
    let contact_user_id = parse_id("contact_user_id", &request.contact_user_id)?;

    let mut contact = entities::Contact::new(user_id, contact_user_id);
    if let Some(added_at) = request.added_at {
        contact = contact.with_added_at(added_at);
    }

    let contact = state.store.create_contact(contact).await?;

    tracing::info!(contact_id = %contact.id, user_id = %user_id, "Contact added");

    Ok(Json(AddContactResponse {
        contact: Contact::from(&contact),
    }))
}

/// Gets a contact by ID.
pub async fn get_contact<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetContactRequest>,
) -> ServerResult<Json<GetContactResponse>> {
    let contact_id = parse_id("contact_id", &request.contact_id)?;

    let contact = state
        .store
        .get_contact(contact_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Contact".to_string()))?;

    Ok(Json(GetContactResponse {
        contact: Contact::from(&contact),
    }))
}

/// Lists contacts, oldest first.
pub async fn list_contacts<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListContactsRequest>,
) -> ServerResult<Json<ListContactsResponse>> {
    let filter = ContactFilter {
        user_id: parse_optional_id("user_id", request.user_id.as_deref())?,
        include_removed: request.include_removed,
        limit: request.limit,
        offset: request.offset,
    };

    let (contacts, total) = state.store.list_contacts(filter).await?;

    Ok(Json(ListContactsResponse {
        contacts: contacts.iter().map(Contact::from).collect(),
        total_count: total,
    }))
}

/// Marks a contact as removed.
pub async fn remove_contact<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RemoveContactRequest>,
) -> ServerResult<Json<RemoveContactResponse>> {
    let contact_id = parse_id("contact_id", &request.contact_id)?;

    let contact = state.store.remove_contact(contact_id).await?;

    tracing::info!(contact_id = %contact_id, "Contact removed");

    Ok(Json(RemoveContactResponse {
        contact: Contact::from(&contact),
    }))
}

/// Permanently deletes a contact.
pub async fn delete_contact<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<DeleteContactRequest>,
) -> ServerResult<Json<DeleteContactResponse>> {
    let contact_id = parse_id("contact_id", &request.contact_id)?;

    state.store.delete_contact(contact_id).await?;

    tracing::info!(contact_id = %contact_id, "Contact deleted");

    Ok(Json(DeleteContactResponse {}))
}
