//! Full-document assembly.

use std::fmt::Write;

use mdcv_core::{DocumentTitle, Region, filter_region, split_sections};

use crate::html::escape_html;
use crate::section::render_section;
use crate::theme::Theme;

/// Client script injected by the dev server layout. Reconnects are not
/// attempted; a dropped connection means the server is gone anyway.
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(() => {
  const socket = new WebSocket(`ws://${location.host}/ws/live-reload`);
  socket.addEventListener("message", () => location.reload());
})();
</script>"#;

/// Page layout variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Print layout used for PDF capture and `--html-only` output.
    Print,
    /// Dev server layout: split background decoration plus, when
    /// enabled, the live-reload client script.
    Preview { live_reload: bool },
}

/// Options for a single document render.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: Layout,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            layout: Layout::Print,
        }
    }
}

/// Render a complete CV document to a self-contained HTML page.
///
/// The stylesheet is embedded verbatim in the head; the output has no
/// external script or style dependencies. The document is split once
/// and the two columns render independently from the shared split.
#[must_use]
pub fn render_document(markdown: &str, css: &str, options: &RenderOptions) -> String {
    let title = DocumentTitle::parse(markdown);
    let sections = split_sections(markdown);

    let mut sidebar = String::new();
    for section in filter_region(&sections, Region::Sidebar) {
        sidebar.push_str(&render_section(section));
    }
    let mut main = String::new();
    for section in filter_region(&sections, Region::Main) {
        main.push_str(&render_section(section));
    }

    let container_class = match options.theme.container_class() {
        "" => "cv-container".to_owned(),
        theme_class => format!("cv-container {theme_class}"),
    };

    let mut out = String::with_capacity(css.len() + markdown.len() * 2 + 1024);
    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title_text}</title>\n\
         <style>{css}</style>\n\
         </head>\n<body>\n\
         <div class=\"{container_class}\">\n",
        title_text = escape_html(&title.page_title()),
    )
    .unwrap();

    let preview = matches!(options.layout, Layout::Preview { .. });
    if preview {
        out.push_str("<div class=\"cv-split-bg\"></div>\n<div class=\"cv-wrapper\">\n");
    }

    write!(
        out,
        "<header class=\"cv-header\"><div class=\"cv-title-outer\">\
         <h1 class=\"cv-title\">{title_text}</h1>\
         </div></header>\n\
         <main class=\"cv-content\">\n\
         <div class=\"cv-left\">{sidebar}</div>\n\
         <div class=\"cv-right\">{main}</div>\n\
         </main>\n",
        title_text = escape_html(&title.page_title()),
    )
    .unwrap();

    if preview {
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");

    if let Layout::Preview { live_reload: true } = options.layout {
        out.push_str(LIVE_RELOAD_SCRIPT);
        out.push('\n');
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = "\
# Backend Developer | Jane Doe

## Details

**Email** jane@example.com

## Profile

Seasoned engineer.

## Skills

- Rust

## Employment History

### Senior Developer, Acme Corp

Jan 2021 — Present
";

    fn options(theme: Theme) -> RenderOptions {
        RenderOptions {
            theme,
            layout: Layout::Print,
        }
    }

    #[test]
    fn test_columns_route_sections() {
        let html = render_document(DOCUMENT, "", &options(Theme::Default));

        let left_start = html.find(r#"<div class="cv-left">"#).unwrap();
        let right_start = html.find(r#"<div class="cv-right">"#).unwrap();

        let left = &html[left_start..right_start];
        let right = &html[right_start..];

        assert!(left.contains("Details"));
        assert!(left.contains("Skills"));
        assert!(!left.contains("Profile"));
        assert!(right.contains("Profile"));
        assert!(right.contains("Employment History"));
        assert!(!right.contains("Skills"));
    }

    #[test]
    fn test_title_in_header_and_head() {
        let html = render_document(DOCUMENT, "", &options(Theme::Default));
        assert!(html.contains("<title>Backend Developer | Jane Doe</title>"));
        assert!(html.contains(r#"<h1 class="cv-title">Backend Developer | Jane Doe</h1>"#));
    }

    #[test]
    fn test_css_embedded_verbatim() {
        let html = render_document(DOCUMENT, ".cv-title { color: red; }", &options(Theme::Default));
        assert!(html.contains("<style>.cv-title { color: red; }</style>"));
    }

    #[test]
    fn test_dark_theme_class() {
        let html = render_document(DOCUMENT, "", &options(Theme::Dark));
        assert!(html.contains(r#"<div class="cv-container dark-theme">"#));
    }

    #[test]
    fn test_default_theme_has_no_extra_class() {
        let html = render_document(DOCUMENT, "", &options(Theme::Default));
        assert!(html.contains(r#"<div class="cv-container">"#));
        assert!(!html.contains("dark-theme"));
        assert!(!html.contains("light-theme"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let first = render_document(DOCUMENT, "body{}", &options(Theme::Dark));
        let second = render_document(DOCUMENT, "body{}", &options(Theme::Dark));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document_renders_empty_columns() {
        let html = render_document("", "", &options(Theme::Default));
        assert!(html.contains(r#"<div class="cv-left"></div>"#));
        assert!(html.contains(r#"<div class="cv-right"></div>"#));
        // Malformed title line degrades to placeholders.
        assert!(html.contains("<title>Curriculum Vitae | Unknown</title>"));
    }

    #[test]
    fn test_preview_layout_adds_split_background() {
        let opts = RenderOptions {
            theme: Theme::Default,
            layout: Layout::Preview { live_reload: false },
        };
        let html = render_document(DOCUMENT, "", &opts);
        assert!(html.contains(r#"<div class="cv-split-bg"></div>"#));
        assert!(html.contains(r#"<div class="cv-wrapper">"#));
        assert!(!html.contains("/ws/live-reload"));
    }

    #[test]
    fn test_preview_layout_injects_live_reload_script() {
        let opts = RenderOptions {
            theme: Theme::Default,
            layout: Layout::Preview { live_reload: true },
        };
        let html = render_document(DOCUMENT, "", &opts);
        assert!(html.contains("/ws/live-reload"));
    }

    #[test]
    fn test_print_layout_has_no_preview_markup() {
        let html = render_document(DOCUMENT, "", &options(Theme::Default));
        assert!(!html.contains("cv-split-bg"));
        assert!(!html.contains("/ws/live-reload"));
    }
}
