use crate::domain::todo::{Todo, TodoFilter, TodoState};

/// A to-do listing restricted to one owner.
///
/// Substring filters compare case-insensitively; the state filter is exact.
/// All supplied filters must match. Results keep the order of the input,
/// which the stores provide by ascending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    pub owner_id: i64,
    pub offset: usize,
    pub limit: usize,
    title: Option<String>,
    description: Option<String>,
    pub state: Option<TodoState>,
}

impl TodoQuery {
    pub fn build(owner_id: i64, filter: &TodoFilter) -> Self {
        Self {
            owner_id,
            offset: filter.offset,
            limit: filter.limit,
            title: filter.title.as_deref().map(str::to_lowercase),
            description: filter.description.as_deref().map(str::to_lowercase),
            state: filter.state,
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        if todo.user_id != self.owner_id {
            return false;
        }
        if let Some(state) = self.state {
            if todo.state != state {
                return false;
            }
        }
        contains(&todo.title, self.title.as_deref())
            && contains(&todo.description, self.description.as_deref())
    }

    pub fn apply<'a, I>(&self, todos: I) -> Vec<Todo>
    where
        I: IntoIterator<Item = &'a Todo>,
    {
        todos
            .into_iter()
            .filter(|todo| self.matches(todo))
            .skip(self.offset)
            .take(self.limit)
            .cloned()
            .collect()
    }
}

fn contains(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(needle),
        None => true,
    }
}
