//! Administrative listings.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{Json, extract::State};
use entities::ContactAdminRow;
use rpc_protocol::responses::AdminContactsResponse;
use schedule_store::{ContactFilter, ScheduleStore, UserFilter};

use crate::error::ServerResult;
use crate::state::AppState;

/// Lists every contact, removed ones included, oldest first, with the owner
/// shown by username.
pub async fn list_contacts<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<AdminContactsResponse>> {
    let (contacts, _) = state.store.list_contacts(ContactFilter::all()).await?;
    let (users, _) = state.store.list_users(UserFilter::default()).await?;

    let usernames: HashMap<_, _> = users.into_iter().map(|u| (u.id, u.username)).collect();

    let rows = contacts
        .iter()
        .map(|contact| {
            let username = usernames
                .get(&contact.user_id)
                .cloned()
                .unwrap_or_else(|| contact.user_id.to_string());
            ContactAdminRow::new(contact, username)
        })
        .collect();

    Ok(Json(AdminContactsResponse { contacts: rows }))
}
