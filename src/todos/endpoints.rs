use std::sync::MutexGuard;

use log::error;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::{get, post, uri, FromForm, Responder, State};
use rocket_dyn_templates::{context, Template};
use rusqlite::Connection;

use crate::DBConnection;

use super::data::{TodoId, TodoInput};
use super::ops::{self, FormOutcome};
use super::store::{SqliteTodoStore, StoreError, TodoStore};
use super::validate::FieldError;

#[derive(Debug, FromForm)]
pub struct TodoForm {
    title: String,
    description: Option<String>,
    due_date: Option<String>,
}

impl From<TodoForm> for TodoInput {
    fn from(form: TodoForm) -> TodoInput {
        TodoInput {
            title: form.title,
            description: form.description,
            due_date: form.due_date,
        }
    }
}

#[derive(Debug, FromForm)]
pub struct BulkDeleteForm {
    selected_todos: Vec<TodoId>,
}

/// A form submission either redirects to the list or re-renders the form
/// with field errors.
#[derive(Responder)]
pub enum FormResponse {
    Redirect(Redirect),
    Form(Template),
}

fn lock(db_connection: &DBConnection) -> Result<MutexGuard<'_, Connection>, Status> {
    db_connection.lock().map_err(|e| {
        error!("database mutex poisoned: {e}");
        Status::InternalServerError
    })
}

fn failure(err: StoreError) -> Status {
    match err {
        StoreError::NotFound(_) => Status::NotFound,
        other => {
            error!("storage failure: {other}");
            Status::InternalServerError
        }
    }
}

#[get("/")]
pub fn index(db_connection: &State<DBConnection>) -> Result<Template, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    let todos = ops::list_todos(&store).map_err(failure)?;

    Ok(Template::render("home", context! { todos }))
}

#[get("/create")]
pub fn create_form() -> Template {
    Template::render(
        "todo_form",
        context! {
            heading: "Add Todo",
            action: uri!(create).to_string(),
            input: TodoInput::default(),
            errors: Vec::<FieldError>::new(),
        },
    )
}

#[post("/create", data = "<form>")]
pub fn create(
    form: Form<TodoForm>,
    db_connection: &State<DBConnection>,
) -> Result<FormResponse, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    match ops::create_todo(&store, form.into_inner().into()).map_err(failure)? {
        FormOutcome::Accepted(_) => Ok(FormResponse::Redirect(Redirect::to(uri!(index)))),
        FormOutcome::Rejected { input, errors } => Ok(FormResponse::Form(Template::render(
            "todo_form",
            context! {
                heading: "Add Todo",
                action: uri!(create).to_string(),
                input,
                errors,
            },
        ))),
    }
}

#[get("/<id>/edit")]
pub fn edit_form(id: TodoId, db_connection: &State<DBConnection>) -> Result<Template, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    let todo = store.find_by_id(id).map_err(failure)?;

    Ok(Template::render(
        "todo_form",
        context! {
            heading: "Edit Todo",
            action: uri!(edit(id)).to_string(),
            input: TodoInput::from(&todo),
            errors: Vec::<FieldError>::new(),
        },
    ))
}

#[post("/<id>/edit", data = "<form>")]
pub fn edit(
    id: TodoId,
    form: Form<TodoForm>,
    db_connection: &State<DBConnection>,
) -> Result<FormResponse, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    match ops::edit_todo(&store, id, form.into_inner().into()).map_err(failure)? {
        FormOutcome::Accepted(_) => Ok(FormResponse::Redirect(Redirect::to(uri!(index)))),
        FormOutcome::Rejected { input, errors } => Ok(FormResponse::Form(Template::render(
            "todo_form",
            context! {
                heading: "Edit Todo",
                action: uri!(edit(id)).to_string(),
                input,
                errors,
            },
        ))),
    }
}

#[get("/<id>/delete")]
pub fn delete_confirm(id: TodoId, db_connection: &State<DBConnection>) -> Result<Template, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    let todo = store.find_by_id(id).map_err(failure)?;

    Ok(Template::render(
        "todo_confirm_delete",
        context! {
            todo,
            action: uri!(delete(id)).to_string(),
        },
    ))
}

#[post("/<id>/delete")]
pub fn delete(id: TodoId, db_connection: &State<DBConnection>) -> Result<Redirect, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    ops::delete_todo(&store, id).map_err(failure)?;

    Ok(Redirect::to(uri!(index)))
}

#[post("/<id>/resolve")]
pub fn resolve(id: TodoId, db_connection: &State<DBConnection>) -> Result<Redirect, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    ops::toggle_resolved(&store, id).map_err(failure)?;

    Ok(Redirect::to(uri!(index)))
}

#[post("/bulk-delete", data = "<form>")]
pub fn bulk_delete(
    form: Form<BulkDeleteForm>,
    db_connection: &State<DBConnection>,
) -> Result<Redirect, Status> {
    let connection = lock(db_connection)?;
    let store = SqliteTodoStore::new(&connection);

    ops::bulk_delete(&store, &form.selected_todos).map_err(failure)?;

    Ok(Redirect::to(uri!(index)))
}
