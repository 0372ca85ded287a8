use std::error::Error;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use tasklist::todos::store;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let figment = tasklist::figment();
    let database_path: String = figment.extract_inner("database_path")?;

    let connection = Connection::open(&database_path)?;
    store::init_schema(&connection)?;
    let connection = Arc::new(Mutex::new(connection));

    tasklist::rocket(figment, connection).launch().await?;

    Ok(())
}
