//! Title line parsing.

/// Placeholder used when the title line has no `|` separator.
const FALLBACK_TITLE: &str = "Curriculum Vitae";
/// Placeholder used when the title line has no `|` separator.
const FALLBACK_NAME: &str = "Unknown";

/// Job title and candidate name from the document's first line.
///
/// The first line is expected to be `# Title | Name`. A malformed line
/// degrades to fixed placeholder values instead of failing the render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentTitle {
    /// Job title (left of the `|`).
    pub title: String,
    /// Candidate name (right of the `|`).
    pub name: String,
}

impl DocumentTitle {
    /// Parse the title line from a full document.
    #[must_use]
    pub fn parse(markdown: &str) -> Self {
        let first_line = markdown.lines().next().unwrap_or("");
        let heading = first_line.trim_start_matches('#').trim();

        match heading.split_once('|') {
            Some((title, name)) if !title.trim().is_empty() && !name.trim().is_empty() => Self {
                title: title.trim().to_owned(),
                name: name.trim().to_owned(),
            },
            _ => Self {
                title: FALLBACK_TITLE.to_owned(),
                name: FALLBACK_NAME.to_owned(),
            },
        }
    }

    /// Page title shown in the document header.
    #[must_use]
    pub fn page_title(&self) -> String {
        format!("{} | {}", self.title, self.name)
    }

    /// Base output filename: lowercased title and name joined by a
    /// hyphen. The caller appends the extension (`.html` / `.pdf`).
    #[must_use]
    pub fn base_filename(&self) -> String {
        format!(
            "{}-{}",
            self.title.to_lowercase(),
            self.name.to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_title_line() {
        let parsed = DocumentTitle::parse("# Backend Developer | Jane Doe\n\n## Details\n");
        assert_eq!(parsed.title, "Backend Developer");
        assert_eq!(parsed.name, "Jane Doe");
    }

    #[test]
    fn test_base_filename() {
        let parsed = DocumentTitle::parse("# Backend Developer | Jane Doe\n");
        assert_eq!(parsed.base_filename(), "backend developer-jane doe");
    }

    #[test]
    fn test_page_title() {
        let parsed = DocumentTitle::parse("# Backend Developer | Jane Doe\n");
        assert_eq!(parsed.page_title(), "Backend Developer | Jane Doe");
    }

    #[test]
    fn test_missing_separator_falls_back_to_placeholders() {
        let parsed = DocumentTitle::parse("# Backend Developer\n");
        assert_eq!(parsed.title, "Curriculum Vitae");
        assert_eq!(parsed.name, "Unknown");
    }

    #[test]
    fn test_empty_side_falls_back_to_placeholders() {
        let parsed = DocumentTitle::parse("# | Jane Doe\n");
        assert_eq!(parsed.title, "Curriculum Vitae");
        assert_eq!(parsed.name, "Unknown");
    }

    #[test]
    fn test_empty_document() {
        let parsed = DocumentTitle::parse("");
        assert_eq!(parsed.title, "Curriculum Vitae");
        assert_eq!(parsed.name, "Unknown");
    }
}
