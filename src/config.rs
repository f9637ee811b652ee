//! Runtime configuration read from the environment.
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_filter: String,
    /// Use the stored simulated date instead of the wall clock.
    pub simulated_clock: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_path = lookup("FLASHCARDS_DB")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("db.sqlite3"));

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let simulated_clock = lookup("FLASHCARDS_SIMULATED_CLOCK")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            database_path,
            log_filter,
            simulated_clock,
        }
    }
}
