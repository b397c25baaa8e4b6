use crate::data::memory::{InMemoryStore, Tables};
use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, trace, warn};

fn ensure_unique(tables: &Tables, id: Option<i64>, username: &str, email: &str) -> Result<()> {
    let others = tables.users.values().filter(|u| Some(u.id) != id);
    for other in others {
        if other.username == username {
            warn!(username = username, "Username already taken");
            return Err(DomainError::Conflict("Username already exists".to_string()).into());
        }
        if other.email == email {
            warn!(email = email, "Email already taken");
            return Err(DomainError::Conflict("Email already exists".to_string()).into());
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    #[instrument(skip(self, user), fields(username = %user.username, email = %user.email))]
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        trace!("Acquiring write lock for user storage");
        let mut tables = self.tables.write().await;
        ensure_unique(&tables, None, &user.username, &user.email)?;

        let user = User {
            id: tables.next_user_id(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        debug!(
            user_id = user.id,
            username = %user.username,
            "User saved to memory storage"
        );
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let tables = self.tables.read().await;
        let user = tables.users.get(&id).cloned();
        if user.is_none() {
            trace!(user_id = id, "User not found in storage");
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let tables = self.tables.read().await;
        let user = tables.users.values().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = u.id, email = %u.email, "User found in storage"),
            None => trace!(email = email, "User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_users(&self, offset: usize, limit: usize) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let users: Vec<User> = tables
            .users
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        debug!(count = users.len(), "Listed users from storage");
        Ok(users)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update_user(&self, user: User) -> Result<Option<User>> {
        trace!("Acquiring write lock for user storage");
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            trace!("User not found in storage");
            return Ok(None);
        }
        ensure_unique(&tables, Some(user.id), &user.username, &user.email)?;

        tables.users.insert(user.id, user.clone());
        debug!(username = %user.username, "User updated in memory storage");
        Ok(Some(user))
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: i64) -> Result<bool> {
        trace!("Acquiring write lock for user storage");
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        let before = tables.todos.len();
        tables.todos.retain(|_, todo| todo.user_id != id);
        debug!(
            removed_todos = before - tables.todos.len(),
            "User and owned to-dos removed from memory storage"
        );
        Ok(true)
    }
}
