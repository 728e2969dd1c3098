use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(env::var("DATABASE_URL").ok(), env::var("PORT").ok())
    }

    fn from_values(database_url: Option<String>, port: Option<String>) -> Self {
        Self {
            database_url: database_url
                .unwrap_or_else(|| "postgres://localhost/encore".to_string()),
            port: port
                .and_then(|value| value.parse().ok())
                .unwrap_or(3001),
        }
    }
}
