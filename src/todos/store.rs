//! Storage port and its SQLite implementation.
//!
//! SQL stays inside this module; callers only see `Todo` values and
//! `StoreError`. Each write is a single statement, so per-record
//! mutations are atomic.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::data::{NewTodo, Todo, TodoId};

const TODO_SELECT_SQL: &str =
    "SELECT id, title, description, due_date, resolved, created_at, updated_at FROM todos";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    NotFound(TodoId),
    Db(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Db(err)
    }
}

/// Creates the todos table if it does not exist yet.
///
/// AUTOINCREMENT keeps deleted ids from ever being reassigned.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            due_date TEXT,
            resolved INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        params![],
    )?;
    Ok(())
}

/// Persistence interface for todos.
pub trait TodoStore {
    /// Inserts a new record and returns it with its assigned id.
    fn insert(&self, new: &NewTodo) -> StoreResult<Todo>;
    /// Fetches one record, or `NotFound`.
    fn find_by_id(&self, id: TodoId) -> StoreResult<Todo>;
    /// Overwrites every mutable column of an existing record, or `NotFound`.
    /// `created_at` is immutable and never written.
    fn update(&self, todo: &Todo) -> StoreResult<()>;
    /// Removes one record permanently, or `NotFound`.
    fn delete(&self, id: TodoId) -> StoreResult<()>;
    /// Removes every listed record that exists; unknown ids are skipped.
    /// Returns how many rows went away.
    fn delete_many(&self, ids: &[TodoId]) -> StoreResult<usize>;
    /// All records ordered by due date ascending, undated ones first,
    /// id as the tiebreaker.
    fn list_all_ordered(&self) -> StoreResult<Vec<Todo>>;
}

/// `TodoStore` over a rusqlite connection.
pub struct SqliteTodoStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoStore for SqliteTodoStore<'_> {
    fn insert(&self, new: &NewTodo) -> StoreResult<Todo> {
        self.conn.execute(
            "INSERT INTO todos (title, description, due_date, resolved, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.title,
                new.description,
                new.due_date,
                new.resolved,
                new.created_at,
                new.updated_at
            ],
        )?;

        Ok(Todo {
            id: self.conn.last_insert_rowid(),
            title: new.title.clone(),
            description: new.description.clone(),
            due_date: new.due_date,
            resolved: new.resolved,
            created_at: new.created_at,
            updated_at: new.updated_at,
        })
    }

    fn find_by_id(&self, id: TodoId) -> StoreResult<Todo> {
        let sql = format!("{TODO_SELECT_SQL} WHERE id = ?1");
        let todo = self
            .conn
            .query_row(&sql, params![id], todo_from_row)
            .optional()?;

        todo.ok_or(StoreError::NotFound(id))
    }

    fn update(&self, todo: &Todo) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET title = ?2, description = ?3, due_date = ?4, resolved = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                todo.id,
                todo.title,
                todo.description,
                todo.due_date,
                todo.resolved,
                todo.updated_at
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(todo.id));
        }

        Ok(())
    }

    fn delete(&self, id: TodoId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete_many(&self, ids: &[TodoId]) -> StoreResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM todos WHERE id IN ({placeholders})");
        let changed = self.conn.execute(&sql, params_from_iter(ids.iter()))?;

        Ok(changed)
    }

    fn list_all_ordered(&self) -> StoreResult<Vec<Todo>> {
        let sql = format!("{TODO_SELECT_SQL} ORDER BY due_date IS NOT NULL, due_date, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], todo_from_row)?;

        let mut todos = Vec::new();
        for row in rows {
            todos.push(row?);
        }

        Ok(todos)
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date")?,
        resolved: row.get("resolved")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
