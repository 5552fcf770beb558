//! Document model for markdown CVs.
//!
//! A CV document is a markdown file whose first line is a level-1
//! heading of the form `# Title | Name` followed by a sequence of
//! level-2 sections (`## Details`, `## Profile`, ...). This crate
//! splits the document into named [`Section`]s, classifies them into
//! layout [`Region`]s using a fixed vocabulary, and parses the title
//! line.
//!
//! Everything here is pure string processing: no I/O, no shared state,
//! safe to call concurrently.

mod section;
mod title;

pub use section::{Region, Section, SectionKind, filter_region, split_sections};
pub use title::DocumentTitle;
