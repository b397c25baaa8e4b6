use crate::domain::authorization::{Access, authorize_mutation};
use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User, UserSchema};
use crate::domain::validation::{normalize_email, validate_user};
use crate::infrastructure::security::hash_password;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

pub struct UserService<R: UserRepository> {
    user_repository: Arc<R>,
}

fn hash(password: &str) -> Result<String, DomainError> {
    hash_password(password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        DomainError::Internal(format!("Failed to hash password: {}", e))
    })
}

fn ensure_owner(caller: &User, user_id: i64) -> Result<(), DomainError> {
    match authorize_mutation(caller.id, user_id) {
        Access::Allowed => Ok(()),
        Access::Denied => {
            warn!(caller_id = caller.id, target_id = user_id, "Mutation denied");
            Err(DomainError::Forbidden)
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, offset: usize, limit: usize) -> Result<Vec<User>> {
        self.user_repository.list_users(offset, limit).await
    }

    #[instrument(skip(self, schema), fields(username = %schema.username, email = %schema.email))]
    pub async fn create_user(&self, mut schema: UserSchema) -> Result<User> {
        trace!("Starting user registration");
        schema.email = normalize_email(&schema.email);
        validate_user(&schema)?;

        if self
            .user_repository
            .find_user_by_username(&schema.username)
            .await?
            .is_some()
        {
            warn!("Username already exists");
            return Err(DomainError::Conflict("Username already exists".to_string()).into());
        }
        if self
            .user_repository
            .find_user_by_email(&schema.email)
            .await?
            .is_some()
        {
            warn!("Email already exists");
            return Err(DomainError::Conflict("Email already exists".to_string()).into());
        }

        let password_hash = hash(&schema.password)?;

        // The store re-checks uniqueness under its write lock.
        let user = self
            .user_repository
            .insert_user(NewUser {
                username: schema.username,
                email: schema.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered successfully");
        Ok(user)
    }

    #[instrument(skip(self, caller, schema), fields(caller_id = caller.id))]
    pub async fn update_user(&self, caller: &User, user_id: i64, mut schema: UserSchema) -> Result<User> {
        ensure_owner(caller, user_id)?;
        schema.email = normalize_email(&schema.email);
        validate_user(&schema)?;

        let user = User {
            id: user_id,
            username: schema.username,
            email: schema.email,
            password_hash: hash(&schema.password)?,
            created_at: caller.created_at,
        };

        debug!("Saving updated user");
        let user = self
            .user_repository
            .update_user(user)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))?;

        info!(user_id = user.id, "User updated successfully");
        Ok(user)
    }

    #[instrument(skip(self, caller), fields(caller_id = caller.id))]
    pub async fn delete_user(&self, caller: &User, user_id: i64) -> Result<()> {
        ensure_owner(caller, user_id)?;

        if !self.user_repository.delete_user(user_id).await? {
            warn!("User vanished before deletion");
            return Err(DomainError::NotFound("User not found".to_string()).into());
        }

        info!(user_id = user_id, "User deleted");
        Ok(())
    }
}
