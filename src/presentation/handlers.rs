use crate::application::auth_service::AuthService;
use crate::application::todo_service::TodoService;
use crate::application::user_service::UserService;
use crate::data::memory::InMemoryStore;
use crate::domain::error::DomainError;
use crate::infrastructure::config::JwtConfig;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services, all sharing one store
pub struct AppState {
    pub user_service: UserService<InMemoryStore>,
    pub todo_service: TodoService<InMemoryStore>,
    pub auth_service: AuthService<InMemoryStore>,
}

impl AppState {
    pub fn new(store: Arc<InMemoryStore>, jwt: JwtConfig) -> Self {
        Self {
            user_service: UserService::new(store.clone()),
            todo_service: TodoService::new(store.clone()),
            auth_service: AuthService::new(store, jwt),
        }
    }
}

/// Body of every error response and of plain acknowledgements.
#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(error = %detail, status = %status, "Request failed");
        } else {
            warn!(error = %detail, status = %status, "Request rejected");
        }

        let mut response = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            response.insert_header((header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")));
        }
        response.json(Detail { detail })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let detail = err.to_string();
        match err {
            DomainError::Conflict(_) | DomainError::InvalidCredentials => ApiError::BadRequest(detail),
            DomainError::Unauthenticated(_) => ApiError::Unauthorized(detail),
            DomainError::Forbidden => ApiError::Forbidden(detail),
            DomainError::Validation(_) => ApiError::Validation(detail),
            DomainError::NotFound(_) => ApiError::NotFound(detail),
            DomainError::Internal(_) => {
                error!(error = %detail, "Internal failure");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => ApiError::from(domain),
            Err(other) => {
                error!(error = %other, "Storage failure");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn read_root() -> HttpResponse {
    HttpResponse::Ok().json(Message {
        message: "Olá Mundo!".to_string(),
    })
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::Conflict("Username already exists".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (DomainError::Unauthenticated("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden, StatusCode::FORBIDDEN),
            (DomainError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain, status) in cases {
            assert_eq!(ApiError::from(domain).status_code(), status);
        }
    }

    #[test]
    fn test_unknown_errors_become_internal() {
        let err = ApiError::from(anyhow::anyhow!("connection reset"));
        assert!(matches!(err, ApiError::Internal(_)));
        // Storage details are not leaked to clients.
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[actix_web::test]
    async fn test_error_body_is_detail_object() {
        let response = ApiError::BadRequest("Username already exists".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json, serde_json::json!({"detail": "Username already exists"}));
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::Unauthorized("Not authenticated".into()).error_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
