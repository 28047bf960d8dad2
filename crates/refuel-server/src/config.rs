//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    /// Directory rendered map artifacts are written to and served from.
    pub static_dir: String,
    pub nominatim_url: String,
    pub geocoder_user_agent: String,
    pub ors_base_url: String,
    pub ors_api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("REFUEL_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("REFUEL_DATABASE_PATH")
                .unwrap_or_else(|_| "data/refuel.db".to_string()),
            database_max_connections: env::var("REFUEL_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            static_dir: env::var("REFUEL_STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            geocoder_user_agent: env::var("REFUEL_USER_AGENT")
                .unwrap_or_else(|_| "refuel-server".to_string()),
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org".to_string()),
            ors_api_key: env::var("ORS_API_KEY").unwrap_or_default(),
        }
    }
}
