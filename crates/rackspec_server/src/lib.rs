//! Rackspec server: the HTTP surface over the scrape pipeline and store.
use std::sync::Arc;

use rackspec_engine::{PageTextProvider, ScrapeSettings, SpecStore};

mod config;
pub mod routes;

pub use config::ServerConfig;

/// Shared per-process state handed to every handler.
pub struct AppState {
    pub store: SpecStore,
    pub provider: Arc<dyn PageTextProvider>,
    pub settings: ScrapeSettings,
}
