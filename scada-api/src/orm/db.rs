use std::error::Error;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rocket::fairing::AdHoc;
use rocket_sync_db_pools::database;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a connection waits on a locked database before the
/// statement fails with `SQLITE_BUSY`.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Pooled connection to the plant database.
///
/// Connections handed out by the pool already run in WAL mode with a busy
/// timeout, so readers are not blocked by a writer and lock contention
/// surfaces as an error instead of a hang.
#[database("sqlite_db")]
pub struct DbConn(diesel::SqliteConnection);

/// Applies the journal and locking settings used outside the rocket pool.
///
/// `journal_mode = WAL` persists in the database file; `busy_timeout` is per
/// connection and has to be set every time a connection is opened.
pub fn configure_connection(conn: &mut diesel::SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(&format!(
        "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = {};",
        BUSY_TIMEOUT_MS
    ))
}

/// Runs all pending database migrations on the provided connection.
pub fn run_pending_migrations(
    conn: &mut diesel::SqliteConnection,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Opens a standalone connection, configures it, and brings the schema up
/// to date. Used by the admin CLI, which does not go through rocket.
pub fn establish_connection(
    database_url: &str,
) -> Result<diesel::SqliteConnection, Box<dyn Error + Send + Sync>> {
    let mut conn = diesel::SqliteConnection::establish(database_url)?;
    configure_connection(&mut conn)?;
    run_pending_migrations(&mut conn)?;
    Ok(conn)
}

/// Creates a Rocket fairing that runs database migrations on ignition.
///
/// Ignition is aborted if no connection can be acquired or a migration
/// fails.
pub fn run_migrations_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Diesel Migrations", |rocket| async {
        let Some(conn) = DbConn::get_one(&rocket).await else {
            error!("[migrations] ERROR: Could not get DB connection.");
            return Err(rocket);
        };

        let result = conn.run(|c| run_pending_migrations(c).map_err(|e| e.to_string())).await;
        match result {
            Ok(()) => Ok(rocket),
            Err(e) => {
                error!("[migrations] FATAL: {}", e);
                Err(rocket)
            }
        }
    })
}
