use crate::domain::user::{LoginForm, User};
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use std::future::Future;
use std::pin::Pin;
use tracing::{error, info, instrument, trace};

/// The user a valid bearer token resolves to.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return None;
    }
    Some(token.trim().to_string())
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                error!("Application state is not registered");
                ApiError::Internal("Internal server error".to_string())
            })?;
            let token =
                token.ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

            let user = state.auth_service.current_user(&token).await?;
            trace!(user_id = user.id, "Request authenticated");
            Ok(CurrentUser(user))
        })
    }
}

#[instrument(skip(state, form), fields(email = %form.username))]
pub async fn login_for_access_token(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    info!("Token request received");

    let token = state
        .auth_service
        .login(form.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to issue token");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(token))
}
