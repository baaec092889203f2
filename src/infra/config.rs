//! Process configuration, read from the environment.
//!
//! Only the store connection string and the listen address live here; neither
//! is part of the API contract.

/// Connection string for the document store. Required, no fallback.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Listen host (defaults to all interfaces).
pub fn host() -> String {
    std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
}

/// Listen port (defaults to 3000).
pub fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3000)
}
