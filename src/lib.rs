use std::sync::{Arc, Mutex};

use rocket::figment::{providers::Serialized, Figment};
use rocket::fs::FileServer;
use rocket::{routes, Build, Rocket};
use rocket_dyn_templates::Template;
use rusqlite::Connection;

pub mod todos;

use todos::endpoints;

pub type DBConnection = Arc<Mutex<Connection>>;

pub const DEFAULT_DATABASE_PATH: &str = "todos.db";

/// Base configuration: Rocket's own figment plus app-level defaults.
/// `database_path` stays overridable through `Rocket.toml` and env vars;
/// the template dir is pinned to the crate so the server and the test
/// client resolve it regardless of working directory.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .join(Serialized::default("database_path", DEFAULT_DATABASE_PATH))
        .merge((
            "template_dir",
            concat!(env!("CARGO_MANIFEST_DIR"), "/templates"),
        ))
}

pub fn rocket(figment: Figment, db_connection: DBConnection) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(db_connection)
        .mount(
            "/",
            routes![
                endpoints::index,
                endpoints::create_form,
                endpoints::create,
                endpoints::edit_form,
                endpoints::edit,
                endpoints::delete_confirm,
                endpoints::delete,
                endpoints::resolve,
                endpoints::bulk_delete,
            ],
        )
        .mount(
            "/static",
            FileServer::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .attach(Template::fairing())
}
