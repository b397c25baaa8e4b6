use crate::domain::todo::{TodoFilter, TodoPublic, TodoSchema};
use crate::presentation::auth::CurrentUser;
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

#[instrument(skip(state, current_user, req), fields(user_id = current_user.0.id))]
pub async fn create_todo(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    req: web::Json<TodoSchema>,
) -> Result<HttpResponse, ApiError> {
    let todo = state
        .todo_service
        .create_todo(&current_user.0, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create todo");
            ApiError::from(e)
        })?;

    info!(todo_id = todo.id, "Todo created successfully");
    Ok(HttpResponse::Created().json(TodoPublic::from(todo)))
}

#[instrument(skip(state, current_user), fields(user_id = current_user.0.id))]
pub async fn list_todos(
    state: web::Data<AppState>,
    current_user: CurrentUser,
    filter: web::Query<TodoFilter>,
) -> Result<HttpResponse, ApiError> {
    let todos = state
        .todo_service
        .list_todos(&current_user.0, &filter)
        .await?
        .into_iter()
        .map(TodoPublic::from)
        .collect();

    Ok(HttpResponse::Ok().json(TodoList { todos }))
}
