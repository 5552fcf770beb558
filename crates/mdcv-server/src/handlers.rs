//! Request handlers.
//!
//! The CV page is rendered from disk on every request so a plain browser
//! refresh always reflects the current source, with or without live reload.

use std::path::Component;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use mdcv_renderer::{Layout, RenderOptions, Theme, render_document};
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters for GET /.
#[derive(Deserialize)]
pub(crate) struct RenderQuery {
    /// Theme name ("dark", "light"); anything else renders the default.
    theme: Option<String>,
}

/// Render the CV in the preview layout.
pub(crate) async fn render_cv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, ServerError> {
    let theme = query.theme.as_deref().map(Theme::parse).unwrap_or_default();

    let markdown = tokio::fs::read_to_string(&state.source)
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ServerError::SourceNotFound(state.source.clone())
            } else {
                ServerError::Io(e)
            }
        })?;

    // A missing stylesheet is common on first run (CSS not built yet);
    // serve the page unstyled rather than failing.
    let css = match tokio::fs::read_to_string(&state.css_output).await {
        Ok(css) => css,
        Err(_) => {
            if state.verbose {
                tracing::warn!(
                    path = %state.css_output.display(),
                    "Stylesheet not found, serving unstyled page"
                );
            }
            String::new()
        }
    };

    let options = RenderOptions {
        theme,
        layout: Layout::Preview {
            live_reload: state.live_reload_enabled(),
        },
    };

    Ok(Html(render_document(&markdown, &css, &options)))
}

/// Serve a file from the directory holding the compiled stylesheet.
pub(crate) async fn serve_dist(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let Some(dist_dir) = state.css_output.parent() else {
        return Err(ServerError::AssetNotFound(path));
    };

    // Reject traversal outside the dist directory.
    let relative = std::path::Path::new(&path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(ServerError::AssetNotFound(path));
    }

    let full_path = dist_dir.join(relative);
    let bytes = tokio::fs::read(&full_path)
        .await
        .map_err(|_| ServerError::AssetNotFound(path.clone()))?;

    let content_type = mime_for(&path);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

/// Content type from file extension.
fn mime_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript",
        Some("json" | "map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for("output.css"), "text/css; charset=utf-8");
        assert_eq!(mime_for("fonts/inter.woff2"), "font/woff2");
        assert_eq!(mime_for("logo.svg"), "image/svg+xml");
    }

    #[test]
    fn test_mime_for_unknown_extension() {
        assert_eq!(mime_for("data.bin"), "application/octet-stream");
        assert_eq!(mime_for("noextension"), "application/octet-stream");
    }
}
