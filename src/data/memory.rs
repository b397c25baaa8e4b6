use crate::domain::todo::Todo;
use crate::domain::user::User;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) todos: BTreeMap<i64, Todo>,
    last_user_id: i64,
    last_todo_id: i64,
}

impl Tables {
    pub(crate) fn next_user_id(&mut self) -> i64 {
        self.last_user_id += 1;
        self.last_user_id
    }

    pub(crate) fn next_todo_id(&mut self) -> i64 {
        self.last_todo_id += 1;
        self.last_todo_id
    }
}

/// Users and to-dos behind a single lock, so every repository call is one
/// atomic unit of work. Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub(crate) tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
