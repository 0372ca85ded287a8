use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

pub type TodoId = i64;

/// A persisted todo item. `id` is assigned by storage and never reused;
/// `created_at` is set once, `updated_at` moves on every modification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw user-submitted field values, before validation. `due_date` is the
/// unparsed form string so a rejected submission can be redisplayed as
/// the user typed it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Validated fields ready for insertion; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoInput {
    fn from(todo: &Todo) -> TodoInput {
        TodoInput {
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}
