use std::sync::Arc;

use chrono::Local;
use log::debug;
use thiserror::Error;

use rackspec_core::{extract, model_name_from_url, SpecField, SpecRecord};

use crate::render::{PageTextProvider, RenderError};
use crate::store::{SpecStore, StoreError};

/// Source of the human-readable scrape timestamp. Injectable so tests can
/// pin it.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ScrapeSettings {
    pub clock: Clock,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            clock: Arc::new(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub record: SpecRecord,
    /// False when the URL was already in the store. The returned record is
    /// then the freshly extracted one, which is discarded rather than
    /// overwriting what was stored first.
    pub newly_stored: bool,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page fetch failed: {0}")]
    Provider(#[from] RenderError),
    #[error("record store failed: {0}")]
    Store(StoreError),
}

/// Renders the page, extracts a record, and stores it unless the URL has
/// been seen before. A conflicting insert is the normal duplicate outcome,
/// never an error.
pub async fn scrape_url(
    provider: &dyn PageTextProvider,
    store: &SpecStore,
    settings: &ScrapeSettings,
    url: &str,
) -> Result<ScrapeOutcome, ScrapeError> {
    let text = provider.render_text(url).await?;
    let fields = extract(&text);
    let found = SpecField::ALL
        .iter()
        .filter(|field| fields.get(**field).is_some())
        .count();
    debug!("extracted {found} of {} fields from {url}", SpecField::ALL.len());

    let record = SpecRecord {
        url: url.to_string(),
        model_name: model_name_from_url(url),
        date_scraped: (settings.clock)(),
        fields,
    };
    let newly_stored = match store.insert(&record) {
        Ok(()) => true,
        Err(StoreError::Conflict) => false,
        Err(err) => return Err(ScrapeError::Store(err)),
    };
    Ok(ScrapeOutcome {
        record,
        newly_stored,
    })
}
