//! The five state-changing operations, combining validation and storage.

use chrono::Utc;
use log::info;

use super::data::{NewTodo, Todo, TodoId, TodoInput};
use super::store::{StoreResult, TodoStore};
use super::validate::{validate, FieldError};

/// Result of a create/edit submission: either the persisted record, or
/// the rejected input together with its field errors for redisplay.
#[derive(Debug)]
pub enum FormOutcome {
    Accepted(Todo),
    Rejected {
        input: TodoInput,
        errors: Vec<FieldError>,
    },
}

pub fn list_todos(store: &impl TodoStore) -> StoreResult<Vec<Todo>> {
    store.list_all_ordered()
}

pub fn create_todo(store: &impl TodoStore, input: TodoInput) -> StoreResult<FormOutcome> {
    let fields = match validate(&input) {
        Ok(fields) => fields,
        Err(errors) => return Ok(FormOutcome::Rejected { input, errors }),
    };

    let now = Utc::now();
    let todo = store.insert(&NewTodo {
        title: fields.title,
        description: fields.description,
        due_date: fields.due_date,
        resolved: false,
        created_at: now,
        updated_at: now,
    })?;
    info!("created todo {}", todo.id);

    Ok(FormOutcome::Accepted(todo))
}

/// Overwrites title/description/due_date of an existing record. The
/// not-found check runs before validation, so an unknown id is reported
/// as such even when the submission is also invalid.
pub fn edit_todo(store: &impl TodoStore, id: TodoId, input: TodoInput) -> StoreResult<FormOutcome> {
    let mut todo = store.find_by_id(id)?;

    let fields = match validate(&input) {
        Ok(fields) => fields,
        Err(errors) => return Ok(FormOutcome::Rejected { input, errors }),
    };

    todo.title = fields.title;
    todo.description = fields.description;
    todo.due_date = fields.due_date;
    todo.updated_at = Utc::now();
    store.update(&todo)?;
    info!("updated todo {id}");

    Ok(FormOutcome::Accepted(todo))
}

pub fn delete_todo(store: &impl TodoStore, id: TodoId) -> StoreResult<()> {
    store.delete(id)?;
    info!("deleted todo {id}");
    Ok(())
}

/// Flips the resolved flag. Applying it twice restores the original value.
pub fn toggle_resolved(store: &impl TodoStore, id: TodoId) -> StoreResult<Todo> {
    let mut todo = store.find_by_id(id)?;

    todo.resolved = !todo.resolved;
    todo.updated_at = Utc::now();
    store.update(&todo)?;
    info!("todo {id} resolved flag now {}", todo.resolved);

    Ok(todo)
}

/// Deletes every selected record that still exists. Unlike single
/// delete, unknown ids are skipped, not reported.
pub fn bulk_delete(store: &impl TodoStore, ids: &[TodoId]) -> StoreResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let removed = store.delete_many(ids)?;
    info!("bulk delete removed {removed} of {} selected todos", ids.len());

    Ok(removed)
}
