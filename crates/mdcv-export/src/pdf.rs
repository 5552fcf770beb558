//! PDF capture via headless Chromium.
//!
//! The rendered page is served from an ephemeral localhost port instead
//! of a `file://` URL so the browser applies the same origin rules it
//! would in the preview server.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::response::Html;
use axum::routing::get;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::error::ExportError;

/// A4 paper size in inches.
const PAPER_WIDTH_IN: f64 = 8.27;
const PAPER_HEIGHT_IN: f64 = 11.69;

/// 20mm page margin in inches.
const MARGIN_IN: f64 = 0.79;

/// Capture a rendered HTML page to an A4 PDF file.
///
/// # Errors
///
/// Returns an error if the local server cannot bind, the browser fails
/// to launch or load the page within `timeout`, or the PDF cannot be
/// written to `output`.
pub async fn export_pdf(html: String, output: &Path, timeout: Duration) -> Result<(), ExportError> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .map_err(ExportError::Bind)?;
    let addr = listener.local_addr().map_err(ExportError::Bind)?;
    let url = format!("http://{addr}/");

    let body = Arc::new(html);
    let app = Router::new().route(
        "/",
        get(move || {
            let body = Arc::clone(&body);
            async move { Html(body.as_str().to_owned()) }
        }),
    );
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    tracing::info!(url = %url, "Capturing PDF");

    // headless_chrome is synchronous; keep the capture off the runtime
    let capture = tokio::task::spawn_blocking(move || print_page(&url, timeout)).await;
    server.abort();

    let bytes = capture.map_err(|e| ExportError::Browser(e.to_string()))??;
    std::fs::write(output, bytes).map_err(|e| ExportError::PdfWrite {
        path: output.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %output.display(), "PDF written");
    Ok(())
}

/// Load `url` in a fresh headless browser and print it to PDF bytes.
fn print_page(url: &str, timeout: Duration) -> Result<Vec<u8>, ExportError> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .idle_browser_timeout(timeout)
        .build()
        .map_err(|e| ExportError::Browser(e.to_string()))?;

    let browser = Browser::new(options).map_err(|e| ExportError::Browser(e.to_string()))?;
    let tab = browser
        .new_tab()
        .map_err(|e| ExportError::Browser(e.to_string()))?;
    tab.set_default_timeout(timeout);

    tab.navigate_to(url)
        .map_err(|e| ExportError::PageLoad(e.to_string()))?;
    tab.wait_until_navigated()
        .map_err(|e| ExportError::PageLoad(e.to_string()))?;

    let pdf_options = PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(PAPER_WIDTH_IN),
        paper_height: Some(PAPER_HEIGHT_IN),
        margin_top: Some(MARGIN_IN),
        margin_bottom: Some(MARGIN_IN),
        margin_left: Some(MARGIN_IN),
        margin_right: Some(MARGIN_IN),
        ..Default::default()
    };

    tab.print_to_pdf(Some(pdf_options))
        .map_err(|e| ExportError::Browser(e.to_string()))
}
