use std::env;
use std::path::PathBuf;

/// Server settings read from the environment at startup.
///
/// `PORT` picks the listen port, `RACKSPEC_DB` the SQLite file, and
/// `RACKSPEC_CHROME` an explicit Chromium binary for the page renderer.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            db_path: PathBuf::from("specs.db"),
            chrome_executable: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.port);
        let db_path = env::var("RACKSPEC_DB")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let chrome_executable = env::var("RACKSPEC_CHROME").ok().map(PathBuf::from);
        Self {
            port,
            db_path,
            chrome_executable,
        }
    }
}
