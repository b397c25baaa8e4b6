use crate::presentation::auth::login_for_access_token;
use crate::presentation::handlers::{ApiError, health_check, read_root};
use crate::presentation::todos::{create_todo, list_todos};
use crate::presentation::users::{create_user, delete_user, read_users, update_user};
use actix_web::web;

/// Registers every endpoint plus extractor settings that turn malformed
/// bodies, queries and paths into 422 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .route("/", web::get().to(read_root))
    .route("/health", web::get().to(health_check))
    .route("/token", web::post().to(login_for_access_token))
    .service(
        web::scope("/users")
            .route("", web::get().to(read_users))
            .route("/", web::get().to(read_users))
            .route("", web::post().to(create_user))
            .route("/", web::post().to(create_user))
            .route("/{user_id}", web::put().to(update_user))
            .route("/{user_id}", web::delete().to(delete_user)),
    )
    .service(
        web::scope("/todos")
            .route("", web::get().to(list_todos))
            .route("/", web::get().to(list_todos))
            .route("", web::post().to(create_todo))
            .route("/", web::post().to(create_todo)),
    );
}
