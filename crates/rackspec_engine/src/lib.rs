//! Rackspec engine: page rendering, record storage, and workbook export
//! around the pure rules in `rackspec_core`.
mod export;
mod pipeline;
mod render;
mod store;

pub use export::{record_set_workbook, single_record_workbook, ExportError, WORKBOOK_MIME};
pub use pipeline::{scrape_url, Clock, ScrapeError, ScrapeOutcome, ScrapeSettings};
pub use render::{ChromiumRenderer, PageTextProvider, RenderError, RenderSettings};
pub use store::{SpecStore, StoreError, StoredSummary};
