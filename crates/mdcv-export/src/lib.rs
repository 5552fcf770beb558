//! Output pipeline for mdcv.
//!
//! Two stages:
//! - [`build_stylesheet`] runs the configured CSS build command (Tailwind
//!   by default) and reads back the compiled stylesheet
//! - [`export_pdf`] serves a rendered HTML page on an ephemeral local
//!   port and captures it to an A4 PDF with headless Chromium

mod css;
mod error;
mod pdf;

pub use css::build_stylesheet;
pub use error::ExportError;
pub use pdf::export_pdf;
