//! Markdown to themed HTML renderer for CV documents.
//!
//! Rendering happens in three stages:
//!
//! 1. [`parse_blocks`] turns a section body into a small block tree
//!    (headings, paragraphs, lists, inline formatting) via
//!    pulldown-cmark. The CV format only uses this subset; anything
//!    else degrades to plain text instead of failing.
//! 2. [`render_section`] applies the per-section rules (one rule set
//!    per [`mdcv_core::SectionKind`]) as tree-to-HTML transforms and
//!    wraps the result in a titled `<section>` container.
//! 3. [`render_document`] splits the whole document once, renders the
//!    sidebar and main columns independently and interpolates the full
//!    HTML page with the embedded stylesheet and theme class.
//!
//! Rendering is synchronous, side-effect free and deterministic: the
//! same markdown, CSS and theme always produce byte-identical output.

mod block;
mod document;
mod html;
mod section;
mod theme;

pub use block::{Block, Inline, parse_blocks};
pub use document::{Layout, RenderOptions, render_document};
pub use html::escape_html;
pub use section::render_section;
pub use theme::Theme;
