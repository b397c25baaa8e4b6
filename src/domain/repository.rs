use crate::domain::query::TodoQuery;
use crate::domain::todo::{NewTodo, Todo};
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and assigns its id. Fails with a conflict when the
    /// username or email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users(&self, offset: usize, limit: usize) -> Result<Vec<User>>;
    /// Replaces an existing user. Returns `None` when the id is unknown.
    async fn update_user(&self, user: User) -> Result<Option<User>>;
    /// Removes a user together with the to-dos it owns.
    async fn delete_user(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo>;
    async fn find_todos(&self, query: &TodoQuery) -> Result<Vec<Todo>>;
}
