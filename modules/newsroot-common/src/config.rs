use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres
    pub database_url: String,

    // Embedding provider (only needed for the embedding method)
    pub voyage_api_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            voyage_api_key: required_env("VOYAGE_API_KEY"),
        }
    }

    /// Load a config for hashed-vectorizer runs, which never call the
    /// embedding API and therefore need no key.
    pub fn hashed_from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            voyage_api_key: env::var("VOYAGE_API_KEY").unwrap_or_default(),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
