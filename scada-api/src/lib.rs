#[macro_use]
extern crate rocket;

use std::path::Path;

use rocket::fairing::AdHoc;
use rocket::figment::value::Map;
use rocket::figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use rocket::fs::FileServer;
use rocket::request::Request;
use rocket::serde::json::{Json, Value, json};
use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod models;
pub mod orm;
pub use orm::DbConn;
pub mod schema;
pub mod seed_fairing;

#[cfg(test)]
pub mod generate_types;

pub use config::PlantConfig;

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Not Found",
        "path": req.uri().path().to_string(),
        "status": 404
    }))
}

#[catch(422)]
fn unprocessable_entity(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Unprocessable Entity",
        "path": req.uri().path().to_string(),
        "status": 422
    }))
}

#[catch(500)]
fn internal_server_error(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Internal Server Error",
        "path": req.uri().path().to_string(),
        "status": 500
    }))
}

#[catch(default)]
fn default_catcher(status: rocket::http::Status, req: &Request) -> Json<Value> {
    Json(json!({
        "error": status.reason().unwrap_or("Unknown Error"),
        "path": req.uri().path().to_string(),
        "status": status.code
    }))
}

pub fn mount_api_routes(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/api", api::routes())
}

fn log_rocket_info(rocket: &Rocket<Build>) {
    let figment = rocket.figment();

    if let Ok(address) = figment.extract_inner::<String>("address") {
        info!("Rocket is running at: {}", address);
    }

    if let Ok(port) = figment.extract_inner::<u16>("port") {
        info!("Rocket is listening on port: {}", port);
    }

    match figment.extract_inner::<Map<String, Value>>("databases.sqlite_db") {
        Ok(db_config) => {
            if let Some(Value::String(url)) = db_config.get("url") {
                info!("Database URL: {}", url);
            } else {
                warn!("Database URL not found in configuration");
            }
        }
        Err(e) => {
            warn!("Failed to extract database configuration: {}", e);
        }
    }

    match figment.extract::<PlantConfig>() {
        Ok(config) => info!("Log search policy: {}", config.search_policy),
        Err(e) => warn!("Failed to extract plant configuration: {}", e),
    }
}

/// Assembles the application on top of an already prepared figment.
///
/// Fairings run in attachment order: pool, migrations, seed data, then
/// [`PlantConfig`] extraction into managed state.
pub fn build_rocket(figment: Figment) -> Rocket<Build> {
    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(orm::run_migrations_fairing())
        .attach(seed_fairing::seed_fairing())
        .attach(AdHoc::config::<PlantConfig>())
        .register(
            "/",
            catchers![not_found, unprocessable_entity, internal_server_error, default_catcher],
        );

    mount_api_routes(rocket)
}

/// Production entry point. Reads `DATABASE_URL` (falling back to
/// `scada.db`) and layers `Rocket.toml` and `ROCKET_*` variables over the
/// defaults.
///
/// Note that this function doesn't get tested by our tests. Tests build
/// through `orm::testing::test_rocket`, which uses a throwaway database.
pub fn rocket() -> Rocket<Build> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        warn!("DATABASE_URL not set, using scada.db");
        "scada.db".to_string()
    });

    let figment = Figment::from(rocket::Config::default())
        .merge(Toml::file("Rocket.toml").nested())
        .merge(Env::prefixed("ROCKET_").global())
        .merge(("databases.sqlite_db.url", database_url));

    let rocket = build_rocket(figment);
    log_rocket_info(&rocket);

    match std::env::var("SCADA_STATIC_DIR") {
        Ok(static_dir) if Path::new(&static_dir).is_dir() => {
            rocket.mount("/", FileServer::from(static_dir).rank(10))
        }
        Ok(static_dir) => {
            warn!("SCADA_STATIC_DIR '{}' is not a directory, not serving static files", static_dir);
            rocket
        }
        Err(_) => rocket,
    }
}
