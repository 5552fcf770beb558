//! HTML serialization of the block tree.

use std::fmt::Write;

use crate::block::{Block, Inline};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Presentation options applied while serializing inline content.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct InlineOptions<'a> {
    /// Class attached to every anchor (e.g. "portfolio-link").
    pub link_class: Option<&'a str>,
    /// Wrap `mailto:`/`tel:` anchors in a contact span.
    pub contact_spans: bool,
}

/// Serialize inline content with the given presentation options.
pub(crate) fn write_inlines(inlines: &[Inline], options: InlineOptions<'_>, out: &mut String) {
    for inline in inlines {
        write_inline(inline, options, out);
    }
}

fn write_inline(inline: &Inline, options: InlineOptions<'_>, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(&escape_html(text)),
        Inline::Code(code) => {
            write!(out, "<code>{}</code>", escape_html(code)).unwrap();
        }
        Inline::Strong(children) => {
            out.push_str("<strong>");
            write_inlines(children, options, out);
            out.push_str("</strong>");
        }
        Inline::Emphasis(children) => {
            out.push_str("<em>");
            write_inlines(children, options, out);
            out.push_str("</em>");
        }
        Inline::Link { href, children } => write_link(href, children, options, out),
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br>"),
    }
}

fn write_link(href: &str, children: &[Inline], options: InlineOptions<'_>, out: &mut String) {
    let is_contact = href.starts_with("mailto:") || href.starts_with("tel:");
    let wrap_contact = options.contact_spans && is_contact;

    if wrap_contact {
        out.push_str(r#"<span class="reference-contact">"#);
    }
    match options.link_class {
        Some(class) => {
            write!(out, r#"<a class="{class}" href="{}">"#, escape_html(href)).unwrap();
        }
        None => {
            write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
        }
    }
    write_inlines(children, options, out);
    out.push_str("</a>");
    if wrap_contact {
        out.push_str("</span>");
    }
}

/// Serialize a block with its default markup.
///
/// Used for blocks no section rule claims, so unexpected content still
/// renders instead of disappearing.
pub(crate) fn write_block_default(block: &Block, options: InlineOptions<'_>, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            write!(out, "<h{level}>").unwrap();
            write_inlines(content, options, out);
            write!(out, "</h{level}>").unwrap();
        }
        Block::Paragraph(content) => {
            out.push_str("<p>");
            write_inlines(content, options, out);
            out.push_str("</p>");
        }
        Block::List { items } => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                write_inlines(item, options, out);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_write_link_with_class() {
        let mut out = String::new();
        write_link(
            "https://example.com",
            &[Inline::Text("Site".to_owned())],
            InlineOptions {
                link_class: Some("portfolio-link"),
                contact_spans: false,
            },
            &mut out,
        );
        assert_eq!(
            out,
            r#"<a class="portfolio-link" href="https://example.com">Site</a>"#
        );
    }

    #[test]
    fn test_write_mailto_link_with_contact_span() {
        let mut out = String::new();
        write_link(
            "mailto:jane@example.com",
            &[Inline::Text("jane@example.com".to_owned())],
            InlineOptions {
                link_class: None,
                contact_spans: true,
            },
            &mut out,
        );
        assert_eq!(
            out,
            r#"<span class="reference-contact"><a href="mailto:jane@example.com">jane@example.com</a></span>"#
        );
    }

    #[test]
    fn test_contact_span_ignores_regular_links() {
        let mut out = String::new();
        write_link(
            "https://example.com",
            &[Inline::Text("Site".to_owned())],
            InlineOptions {
                link_class: None,
                contact_spans: true,
            },
            &mut out,
        );
        assert_eq!(out, r#"<a href="https://example.com">Site</a>"#);
    }
}
