use crate::domain::user::{UserPublic, UserSchema};
use crate::presentation::auth::CurrentUser;
use crate::presentation::handlers::{ApiError, AppState, Detail};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

#[derive(Debug, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserPublic>,
    pub count: usize,
}

#[instrument(skip(state))]
pub async fn read_users(
    state: web::Data<AppState>,
    page: web::Query<UserPage>,
) -> Result<HttpResponse, ApiError> {
    let users: Vec<UserPublic> = state
        .user_service
        .list_users(page.skip, page.limit)
        .await?
        .into_iter()
        .map(UserPublic::from)
        .collect();

    info!(count = users.len(), "Users listed");
    Ok(HttpResponse::Ok().json(UserList {
        count: users.len(),
        users,
    }))
}

#[instrument(skip(state, req), fields(username = %req.username))]
pub async fn create_user(
    state: web::Data<AppState>,
    req: web::Json<UserSchema>,
) -> Result<HttpResponse, ApiError> {
    info!("Registration request received");

    let user = state
        .user_service
        .create_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    info!(user_id = user.id, "User registered successfully");
    Ok(HttpResponse::Created().json(UserPublic::from(user)))
}

#[instrument(skip(state, current_user, req), fields(user_id = %*path, caller_id = current_user.0.id))]
pub async fn update_user(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    path: web::Path<i64>,
    req: web::Json<UserSchema>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let CurrentUser(caller) = current_user;

    let user = state
        .user_service
        .update_user(&caller, user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(user_id = user_id, error = %e, "Failed to update user");
            ApiError::from(e)
        })?;

    info!(user_id = user.id, "User updated successfully");
    Ok(HttpResponse::Ok().json(UserPublic::from(user)))
}

#[instrument(skip(state, current_user), fields(user_id = %*path, caller_id = current_user.0.id))]
pub async fn delete_user(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let CurrentUser(caller) = current_user;

    state
        .user_service
        .delete_user(&caller, user_id)
        .await
        .map_err(|e| {
            error!(user_id = user_id, error = %e, "Failed to delete user");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(Detail {
        detail: "User deleted".to_string(),
    }))
}
