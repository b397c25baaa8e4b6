use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{LoginForm, Token, User};
use crate::domain::validation::{normalize_email, validate_login};
use crate::infrastructure::config::JwtConfig;
use crate::infrastructure::security::{generate_token, validate_token, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

const INVALID_TOKEN: &str = "Could not validate credentials";

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt: JwtConfig,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt: JwtConfig) -> Self {
        Self {
            user_repository,
            jwt,
        }
    }

    /// Exchanges an email/password pair for a bearer token.
    #[instrument(skip(self, form), fields(email = %form.username))]
    pub async fn login(&self, form: LoginForm) -> Result<Token> {
        trace!("Starting login");
        validate_login(&form)?;

        let user = self
            .user_repository
            .find_user_by_email(&normalize_email(&form.username))
            .await?
            .ok_or_else(|| {
                warn!("User not found during login");
                DomainError::InvalidCredentials
            })?;

        let is_valid = verify_password(&form.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = user.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        let access_token = generate_token(&user.email, user.id, &self.jwt).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;

        info!(user_id = user.id, "Login successful");
        Ok(Token::bearer(access_token))
    }

    /// Resolves the user a bearer token was issued to.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> Result<User> {
        let claims = validate_token(token, &self.jwt).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            DomainError::Unauthenticated(INVALID_TOKEN.to_string())
        })?;

        let user = self
            .user_repository
            .find_user_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(email = %claims.sub, "Token subject no longer exists");
                DomainError::Unauthenticated(INVALID_TOKEN.to_string())
            })?;

        // Ids are never reused, so a mismatch means the email changed hands.
        if user.id != claims.uid {
            warn!(
                user_id = user.id,
                token_user_id = claims.uid,
                "Token was issued to a previous owner of this email"
            );
            return Err(DomainError::Unauthenticated(INVALID_TOKEN.to_string()).into());
        }

        trace!(user_id = user.id, "Bearer token resolved");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::domain::user::NewUser;
    use crate::infrastructure::security::hash_password;

    async fn service_with_alice() -> AuthService<InMemoryStore> {
        let store = InMemoryStore::new();
        store
            .insert_user(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: hash_password("secret").unwrap(),
            })
            .await
            .unwrap();
        AuthService::new(Arc::new(store), JwtConfig::new("auth-service-test"))
    }

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn domain_error(err: &anyhow::Error) -> &DomainError {
        err.downcast_ref::<DomainError>().expect("domain error")
    }

    #[tokio::test]
    async fn test_login_then_resolve_current_user() {
        let service = service_with_alice().await;

        let token = service.login(form("alice@example.com", "secret")).await.unwrap();
        assert_eq!(token.token_type, "bearer");

        let user = service.current_user(&token.access_token).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let service = service_with_alice().await;

        let token = service.login(form("Alice@Example.com", "secret")).await.unwrap();
        let user = service.current_user(&token.access_token).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service_with_alice().await;

        let err = service.login(form("alice@example.com", "nope")).await.unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = service_with_alice().await;

        let err = service.login(form("bob@example.com", "secret")).await.unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_current_user_rejects_bad_token() {
        let service = service_with_alice().await;

        let err = service.current_user("not-a-token").await.unwrap_err();
        assert!(matches!(
            domain_error(&err),
            DomainError::Unauthenticated(msg) if msg == INVALID_TOKEN
        ));
    }

    #[tokio::test]
    async fn test_current_user_rejects_token_for_deleted_user() {
        let service = service_with_alice().await;
        let token = service.login(form("alice@example.com", "secret")).await.unwrap();

        service.user_repository.delete_user(1).await.unwrap();

        let err = service.current_user(&token.access_token).await.unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_current_user_rejects_token_after_email_is_reregistered() {
        let service = service_with_alice().await;
        let token = service.login(form("alice@example.com", "secret")).await.unwrap();

        service.user_repository.delete_user(1).await.unwrap();
        service
            .user_repository
            .insert_user(NewUser {
                username: "mallory".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: hash_password("other").unwrap(),
            })
            .await
            .unwrap();

        let err = service.current_user(&token.access_token).await.unwrap_err();
        assert!(matches!(
            domain_error(&err),
            DomainError::Unauthenticated(msg) if msg == INVALID_TOKEN
        ));
    }
}
