use std::sync::Arc;

use pretty_assertions::assert_eq;
use rackspec_engine::{
    scrape_url, PageTextProvider, RenderError, ScrapeError, ScrapeSettings, SpecStore,
};

const PAGE: &str = "1U\nDDR5 RDIMM\n350W TDP\ndual processor\n";

struct FixedPage(&'static str);

#[async_trait::async_trait]
impl PageTextProvider for FixedPage {
    async fn render_text(&self, _url: &str) -> Result<String, RenderError> {
        Ok(self.0.to_string())
    }
}

struct DeadEnd;

#[async_trait::async_trait]
impl PageTextProvider for DeadEnd {
    async fn render_text(&self, url: &str) -> Result<String, RenderError> {
        Err(RenderError::Navigation(format!("no route to {url}")))
    }
}

fn settings_at(timestamp: &'static str) -> ScrapeSettings {
    ScrapeSettings {
        clock: Arc::new(move || timestamp.to_string()),
    }
}

fn init_logging() {
    rackspec_logging::initialize_for_tests();
}

#[tokio::test]
async fn first_scrape_extracts_and_stores() {
    init_logging();
    let provider = FixedPage(PAGE);
    let store = SpecStore::open_in_memory().expect("open");
    let url = "https://example.com/products/r183-z92#Specifications";

    let outcome = scrape_url(&provider, &store, &settings_at("2025-03-01 10:00:00"), url)
        .await
        .expect("scrape");

    assert!(outcome.newly_stored);
    assert_eq!(outcome.record.model_name, "r183-z92");
    assert_eq!(outcome.record.date_scraped, "2025-03-01 10:00:00");
    assert_eq!(outcome.record.fields.rack_unit.as_deref(), Some("1U"));
    assert_eq!(outcome.record.fields.cpu_count, "2");
    assert_eq!(outcome.record.fields.max_tdp.as_deref(), Some("350W"));
    assert_eq!(outcome.record.fields.total_tdp.as_deref(), Some("700W"));
    assert!(store.exists(url).expect("exists"));
}

#[tokio::test]
async fn repeat_scrape_reports_duplicate_and_keeps_the_first_row() {
    init_logging();
    let provider = FixedPage(PAGE);
    let store = SpecStore::open_in_memory().expect("open");
    let url = "https://example.com/products/r183-z92";

    let first = scrape_url(&provider, &store, &settings_at("2025-03-01 10:00:00"), url)
        .await
        .expect("first scrape");
    let second = scrape_url(&provider, &store, &settings_at("2025-03-01 11:00:00"), url)
        .await
        .expect("second scrape");

    assert!(first.newly_stored);
    assert!(!second.newly_stored);
    // The caller sees the fresh extraction, the stored row stays the first.
    assert_eq!(second.record.date_scraped, "2025-03-01 11:00:00");
    let stored = store
        .get_by_model("r183-z92")
        .expect("lookup")
        .expect("stored record");
    assert_eq!(stored.date_scraped, "2025-03-01 10:00:00");
    assert_eq!(store.list().expect("list").len(), 1);
}

#[tokio::test]
async fn provider_failure_surfaces_and_stores_nothing() {
    init_logging();
    let store = SpecStore::open_in_memory().expect("open");
    let url = "https://unreachable.example/r183-z92";

    let err = scrape_url(&DeadEnd, &store, &settings_at("2025-03-01 10:00:00"), url)
        .await
        .expect_err("scrape should fail");

    assert!(matches!(
        err,
        ScrapeError::Provider(RenderError::Navigation(_))
    ));
    assert!(err.to_string().contains("no route to"));
    assert!(!store.exists(url).expect("exists"));
}

#[tokio::test]
async fn segmentless_url_falls_back_to_unknown_model() {
    init_logging();
    let provider = FixedPage(PAGE);
    let store = SpecStore::open_in_memory().expect("open");
    let url = "https://example.com/products/";

    let outcome = scrape_url(&provider, &store, &settings_at("2025-03-01 10:00:00"), url)
        .await
        .expect("scrape");

    assert_eq!(outcome.record.model_name, "Unknown");
    assert!(store.exists(url).expect("exists"));
}
