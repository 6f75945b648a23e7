//! Database and rocket fixtures shared by unit and integration tests.

use std::path::PathBuf;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rocket::figment::{
    util::map,
    value::{Map, Value},
};
use rocket::{Build, Rocket};

use super::db::run_pending_migrations;
use super::seed::seed_if_empty;

/// Creates a synchronous in-memory SQLite database connection for unit tests.
///
/// Runs all embedded migrations. Each call returns a new, independent, empty
/// database.
pub fn setup_test_db() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:")
        .expect("Failed to create in-memory SQLite database");
    run_pending_migrations(&mut conn).expect("Failed to run pending migrations");
    conn
}

/// Like [`setup_test_db`], with the standard plant devices and technicians.
pub fn seeded_test_db() -> SqliteConnection {
    let mut conn = setup_test_db();
    seed_if_empty(&mut conn).expect("Failed to seed test database");
    conn
}

/// Path of a fresh, uniquely named database file in the temp directory.
pub fn unique_test_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("scada_test_{}.db", uuid::Uuid::new_v4()))
}

/// Creates a Rocket instance backed by its own temporary database file.
///
/// The returned Rocket instance has the connection pool, migrations, seed
/// data, configuration, and API routes attached, the same as production.
pub fn test_rocket() -> Rocket<Build> {
    test_rocket_with(&[])
}

/// Like [`test_rocket`] with extra top-level configuration values, for
/// example `("search_policy", "parameterized")`.
pub fn test_rocket_with(overrides: &[(&str, &str)]) -> Rocket<Build> {
    let db_url = unique_test_db_path().to_string_lossy().to_string();

    let db_config: Map<_, Value> = map! {
        "url" => db_url.into(),
        "pool_size" => 5.into(),
        "timeout" => 5.into(),
    };

    let mut figment = rocket::Config::figment()
        .merge(("databases", map!["sqlite_db" => db_config]))
        .merge(("log_level", "critical"));
    for (key, value) in overrides {
        figment = figment.merge((*key, *value));
    }

    crate::build_rocket(figment)
}
