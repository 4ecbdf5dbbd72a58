use std::path::PathBuf;

/// Engine-level constants
pub const ENGINE_NAME: &str = "cardiorisk";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Conventional page size for score-history queries. The store itself treats
/// a `None` limit as unlimited; hosts that page pass this.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Default tracing filter for hosts that do not set RUST_LOG.
pub fn default_log_filter() -> String {
    format!("{ENGINE_NAME}=info")
}

/// Get the engine data directory
/// ~/.cardiorisk/ on all platforms (host applications usually override this
/// by opening the database at a path of their own choosing)
pub fn data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".cardiorisk")
}

/// Default on-disk location for the score measurement database
pub fn default_database_path() -> PathBuf {
    data_dir().join("scores.db")
}
