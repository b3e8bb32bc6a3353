use rackspec_engine::{ChromiumRenderer, PageTextProvider, RenderError, RenderSettings};

#[tokio::test]
async fn unparseable_urls_are_rejected_before_any_browser_work() {
    let renderer = ChromiumRenderer::new(RenderSettings::default());
    for input in ["not a url", "example.com/products/r183-z92"] {
        let err = renderer
            .render_text(input)
            .await
            .expect_err("render should fail");
        assert!(matches!(err, RenderError::Navigation(_)), "{input}: got {err}");
        // The URL parser's own message, not a browser navigation failure.
        assert!(
            err.to_string().contains("relative URL without a base"),
            "{input}: got {err}"
        );
    }
}
