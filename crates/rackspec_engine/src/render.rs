use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures_util::StreamExt;
use log::warn;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use url::Url;

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub request_timeout: Duration,
    /// Budget for the whole navigate + scroll + text read sequence.
    pub render_timeout: Duration,
    /// Chromium binary to launch. `None` lets the browser library find one.
    pub chrome_executable: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            render_timeout: Duration::from_secs(60),
            chrome_executable: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("page render timed out")]
    Timeout,
}

/// Renders a URL and hands back the visible text of the loaded page.
#[async_trait::async_trait]
pub trait PageTextProvider: Send + Sync {
    async fn render_text(&self, url: &str) -> Result<String, RenderError>;
}

/// Headless-Chromium provider. Each call launches a fresh browser, navigates,
/// scrolls halfway down to wake lazy-loaded sections, reads
/// `document.body.innerText`, and tears the browser down again. The process
/// never outlives the call, whichever way the call ends.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    settings: RenderSettings,
}

const HALF_PAGE_SCROLL: &str = "window.scrollTo(0, document.body.scrollHeight / 2);";
const BODY_TEXT: &str = "document.body.innerText";

impl ChromiumRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args(vec!["--disable-gpu", "--disable-dev-shm-usage"])
            .request_timeout(self.settings.request_timeout);
        if let Some(executable) = &self.settings.chrome_executable {
            builder = builder.chrome_executable(executable);
        }
        builder.build().map_err(RenderError::Launch)
    }
}

#[async_trait::async_trait]
impl PageTextProvider for ChromiumRenderer {
    async fn render_text(&self, url: &str) -> Result<String, RenderError> {
        let parsed = Url::parse(url).map_err(|err| RenderError::Navigation(err.to_string()))?;

        let config = self.browser_config()?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| RenderError::Launch(err.to_string()))?;
        let handler_task: JoinHandle<()> = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let outcome = timeout(
            self.settings.render_timeout,
            read_rendered_text(&browser, parsed.as_str()),
        )
        .await
        .unwrap_or(Err(RenderError::Timeout));

        if let Err(err) = browser.close().await {
            warn!("chromium close failed: {err}");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        outcome
    }
}

async fn read_rendered_text(browser: &Browser, url: &str) -> Result<String, RenderError> {
    let page = browser.new_page(url).await.map_err(cdp_to_render)?;
    page.wait_for_navigation().await.map_err(cdp_to_render)?;
    page.evaluate(HALF_PAGE_SCROLL).await.map_err(cdp_to_render)?;
    let evaluated = page.evaluate(BODY_TEXT).await.map_err(cdp_to_render)?;
    evaluated
        .into_value()
        .map_err(|err| RenderError::Navigation(format!("body text unavailable: {err}")))
}

fn cdp_to_render(err: CdpError) -> RenderError {
    match err {
        CdpError::Timeout => RenderError::Timeout,
        other => RenderError::Navigation(other.to_string()),
    }
}
