use crate::data::memory::InMemoryStore;
use crate::domain::error::DomainError;
use crate::domain::query::TodoQuery;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{NewTodo, Todo};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, trace, warn};

#[async_trait]
impl TodoRepository for InMemoryStore {
    #[instrument(skip(self, todo), fields(user_id = todo.user_id))]
    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo> {
        trace!("Acquiring write lock for todo storage");
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&todo.user_id) {
            warn!("Owner does not exist");
            return Err(DomainError::NotFound("User not found".to_string()).into());
        }

        let todo = Todo {
            id: tables.next_todo_id(),
            title: todo.title,
            description: todo.description,
            state: todo.state,
            user_id: todo.user_id,
            created_at: Utc::now(),
        };
        tables.todos.insert(todo.id, todo.clone());
        debug!(todo_id = todo.id, state = %todo.state, "Todo saved to memory storage");
        Ok(todo)
    }

    #[instrument(skip(self), fields(owner_id = query.owner_id))]
    async fn find_todos(&self, query: &TodoQuery) -> Result<Vec<Todo>> {
        trace!("Acquiring read lock for todo storage");
        let tables = self.tables.read().await;
        let todos = query.apply(tables.todos.values());
        debug!(count = todos.len(), "Todos selected from memory storage");
        Ok(todos)
    }
}
