//! User API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use entities::UserPatch;
use rpc_protocol::{User, requests::*, responses::*};
use schedule_store::{ScheduleStore, UserFilter};

use super::parse_id;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Creates a user.
pub async fn create_user<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateUserRequest>,
) -> ServerResult<Json<CreateUserResponse>> {
    let mut user = entities::User::new(request.username, request.email)
        .with_name(request.first_name, request.last_name);
    user.phone_number = request.phone_number;

    let user = state.store.create_user(user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok(Json(CreateUserResponse {
        user: User::from(&user),
    }))
}

/// Gets a user by ID.
pub async fn get_user<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<GetUserResponse>> {
    let user_id = parse_id("user_id", &request.user_id)?;

    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User".to_string()))?;

    Ok(Json(GetUserResponse {
        user: User::from(&user),
    }))
}

/// Lists users ordered by username.
pub async fn list_users<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ListUsersRequest>,
) -> ServerResult<Json<ListUsersResponse>> {
    let filter = UserFilter {
        limit: request.limit,
        offset: request.offset,
    };

    let (users, total) = state.store.list_users(filter).await?;

    Ok(Json(ListUsersResponse {
        users: users.iter().map(User::from).collect(),
        total_count: total,
    }))
}

/// Updates the fields present in the request.
pub async fn update_user<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<UpdateUserRequest>,
) -> ServerResult<Json<UpdateUserResponse>> {
    let user_id = parse_id("user_id", &request.user_id)?;

    // An empty phone number clears it.
    let patch = UserPatch {
        username: request.username,
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
        phone_number: request
            .phone_number
            .map(|phone| Some(phone).filter(|p| !p.is_empty())),
    };

    let user = state.store.update_user(user_id, patch).await?;

    tracing::info!(user_id = %user_id, "User updated");

    Ok(Json(UpdateUserResponse {
        user: User::from(&user),
    }))
}

/// Deletes a user together with the user's contacts and timeblocks.
pub async fn delete_user<S: ScheduleStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<DeleteUserRequest>,
) -> ServerResult<Json<DeleteUserResponse>> {
    let user_id = parse_id("user_id", &request.user_id)?;

    state.store.delete_user(user_id).await?;

    tracing::info!(user_id = %user_id, "User deleted");

    Ok(Json(DeleteUserResponse {}))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::api::test_support::memory_state;

    fn create_request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let state = memory_state();
        create_user(State(state.clone()), Json(create_request("alice")))
            .await
            .unwrap();

        let err = create_user(State(state), Json(create_request("alice")))
            .await
            .unwrap_err();
        assert_eq!(err.to_api_error().0, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let state = memory_state();
        let Json(created) = create_user(State(state.clone()), Json(create_request("alice")))
            .await
            .unwrap();

        let Json(updated) = update_user(
            State(state.clone()),
            Json(UpdateUserRequest {
                user_id: created.user.id.clone(),
                username: None,
                email: None,
                first_name: Some("Alice".to_string()),
                last_name: None,
                phone_number: Some("555-0100".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.user.username, "alice");
        assert_eq!(updated.user.first_name, "Alice");
        assert_eq!(updated.user.phone_number.as_deref(), Some("555-0100"));

        let Json(listed) = list_users(State(state), Json(ListUsersRequest::default()))
            .await
            .unwrap();
        assert_eq!(listed.total_count, 1);
    }

    fn name_request(user_id: &str, first: Option<&str>, last: Option<&str>) -> UpdateUserRequest {
        UpdateUserRequest {
            user_id: user_id.to_string(),
            username: None,
            email: None,
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            phone_number: None,
        }
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_both_fields() {
        let state = memory_state();
        let Json(created) = create_user(State(state.clone()), Json(create_request("alice")))
            .await
            .unwrap();
        let id = created.user.id.as_str();

        let (first, last) = tokio::join!(
            update_user(State(state.clone()), Json(name_request(id, Some("Alice"), None))),
            update_user(State(state.clone()), Json(name_request(id, None, Some("Liddell")))),
        );
        first.unwrap();
        last.unwrap();

        let Json(fetched) = get_user(
            State(state),
            Json(GetUserRequest {
                user_id: created.user.id.clone(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(fetched.user.first_name, "Alice");
        assert_eq!(fetched.user.last_name, "Liddell");
    }

    #[tokio::test]
    async fn test_update_unknown_user_not_found() {
        let state = memory_state();
        let missing = uuid::Uuid::new_v4().to_string();

        let err = update_user(State(state), Json(name_request(&missing, Some("Nobody"), None)))
            .await
            .unwrap_err();
        assert_eq!(err.to_api_error().0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_and_missing_ids() {
        let state = memory_state();

        let err = get_user(
            State(state.clone()),
            Json(GetUserRequest {
                user_id: "not-a-uuid".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_api_error().0, StatusCode::BAD_REQUEST);

        let err = delete_user(
            State(state),
            Json(DeleteUserRequest {
                user_id: uuid::Uuid::new_v4().to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_api_error().0, StatusCode::NOT_FOUND);
    }
}
