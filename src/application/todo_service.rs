use crate::domain::query::TodoQuery;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{NewTodo, Todo, TodoFilter, TodoSchema};
use crate::domain::user::User;
use crate::domain::validation::validate_todo;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct TodoService<R: TodoRepository> {
    todo_repository: Arc<R>,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(todo_repository: Arc<R>) -> Self {
        Self { todo_repository }
    }

    #[instrument(skip(self, owner, schema), fields(user_id = owner.id, state = %schema.state))]
    pub async fn create_todo(&self, owner: &User, schema: TodoSchema) -> Result<Todo> {
        validate_todo(&schema)?;

        let todo = self
            .todo_repository
            .insert_todo(NewTodo {
                title: schema.title,
                description: schema.description,
                state: schema.state,
                user_id: owner.id,
            })
            .await?;

        info!(todo_id = todo.id, "Todo created successfully");
        Ok(todo)
    }

    /// Lists the owner's to-dos that match `filter`.
    #[instrument(skip(self, owner), fields(user_id = owner.id))]
    pub async fn list_todos(&self, owner: &User, filter: &TodoFilter) -> Result<Vec<Todo>> {
        let query = TodoQuery::build(owner.id, filter);
        let todos = self.todo_repository.find_todos(&query).await?;
        debug!(count = todos.len(), "Todos listed");
        Ok(todos)
    }
}
