use rocket::serde::Deserialize;

use crate::orm::log_query::SearchPolicy;

/// Application settings read from the rocket figment (`Rocket.toml`,
/// `ROCKET_*` environment variables).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PlantConfig {
    /// How free-text log searches are matched. Defaults to the exclusion
    /// list behaviour.
    #[serde(default)]
    pub search_policy: SearchPolicy,
}
