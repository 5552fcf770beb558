//! Section splitting and region classification.

/// Delimiter that starts a new section.
///
/// A level-2 heading only counts as a section boundary when it directly
/// follows a newline. A literal `"\n## "` inside a paragraph would start
/// a new section; this is a documented edge case of the format, not
/// something the splitter guards against.
const SECTION_DELIMITER: &str = "\n## ";

/// A named block of the CV document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Trimmed heading text (e.g. "Employment History").
    pub name: String,
    /// Unrendered markdown body: everything after the heading line.
    pub body: String,
}

/// Layout column a section is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Narrow side column: Details, Links, Skills.
    Sidebar,
    /// Main content column: Profile, Employment History, References.
    Main,
}

/// Recognized section names, keyed for per-section rendering rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Details,
    Links,
    Skills,
    Profile,
    EmploymentHistory,
    References,
}

impl SectionKind {
    /// Look up a section kind by its exact, trimmed heading text.
    ///
    /// Matching is case-sensitive. Unknown names return `None`; callers
    /// drop such sections from the output rather than reporting them.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Details" => Some(Self::Details),
            "Links" => Some(Self::Links),
            "Skills" => Some(Self::Skills),
            "Profile" => Some(Self::Profile),
            "Employment History" => Some(Self::EmploymentHistory),
            "References" => Some(Self::References),
            _ => None,
        }
    }

    /// The layout region this kind belongs to.
    #[must_use]
    pub fn region(self) -> Region {
        match self {
            Self::Details | Self::Links | Self::Skills => Region::Sidebar,
            Self::Profile | Self::EmploymentHistory | Self::References => Region::Main,
        }
    }
}

/// Split a markdown document into sections.
///
/// Splits on the literal [`SECTION_DELIMITER`]. The leading slice
/// (anything before the first `"\n## "`, typically the title line) is
/// not a section and is discarded. For every other slice the first
/// line is the section name and the remaining lines form the body.
#[must_use]
pub fn split_sections(markdown: &str) -> Vec<Section> {
    markdown
        .split(SECTION_DELIMITER)
        .skip(1)
        .map(|slice| {
            let (name, body) = slice.split_once('\n').unwrap_or((slice, ""));
            Section {
                name: name.trim().to_owned(),
                body: body.to_owned(),
            }
        })
        .collect()
}

/// Filter sections belonging to a region, preserving document order.
///
/// A pure filter: it never reorders sections, never merges duplicates
/// (two "Skills" sections render as two blocks) and silently drops
/// sections whose name is not in the fixed vocabulary.
pub fn filter_region(sections: &[Section], region: Region) -> impl Iterator<Item = &Section> {
    sections
        .iter()
        .filter(move |section| SectionKind::from_name(&section.name).is_some_and(|k| k.region() == region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = "\
# Backend Developer | Jane Doe

## Details

**Address** 12 Example Street

## Profile

Seasoned engineer.

## Skills

- Rust
- SQL
";

    #[test]
    fn test_split_discards_leading_slice() {
        let sections = split_sections(DOCUMENT);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].name, "Details");
        assert_eq!(sections[1].name, "Profile");
        assert_eq!(sections[2].name, "Skills");
    }

    #[test]
    fn test_split_body_excludes_heading_line() {
        let sections = split_sections(DOCUMENT);
        assert_eq!(sections[0].body, "\n**Address** 12 Example Street\n");
        assert_eq!(sections[2].body, "\n- Rust\n- SQL\n");
    }

    #[test]
    fn test_split_section_without_body() {
        let sections = split_sections("# T | N\n## Skills");
        assert_eq!(
            sections,
            vec![Section {
                name: "Skills".to_owned(),
                body: String::new(),
            }]
        );
    }

    #[test]
    fn test_split_empty_document() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("just a paragraph").is_empty());
    }

    #[test]
    fn test_filter_region_preserves_order() {
        let sections = split_sections(DOCUMENT);

        let sidebar: Vec<_> = filter_region(&sections, Region::Sidebar)
            .map(|s| s.name.as_str())
            .collect();
        let main: Vec<_> = filter_region(&sections, Region::Main)
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(sidebar, vec!["Details", "Skills"]);
        assert_eq!(main, vec!["Profile"]);
    }

    #[test]
    fn test_filter_region_drops_unknown_names() {
        let doc = "# T | N\n## Hobbies\n\nChess.\n\n## Skills\n\n- Rust\n";
        let sections = split_sections(doc);
        assert_eq!(sections.len(), 2);

        let sidebar: Vec<_> = filter_region(&sections, Region::Sidebar).collect();
        let main: Vec<_> = filter_region(&sections, Region::Main).collect();

        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar[0].name, "Skills");
        assert!(main.is_empty());
    }

    #[test]
    fn test_filter_region_keeps_duplicates_separate() {
        let doc = "# T | N\n## Skills\n\n- Rust\n\n## Skills\n\n- SQL\n";
        let sections = split_sections(doc);

        let sidebar: Vec<_> = filter_region(&sections, Region::Sidebar).collect();
        assert_eq!(sidebar.len(), 2);
        assert_eq!(sidebar[0].body.trim(), "- Rust");
        assert_eq!(sidebar[1].body.trim(), "- SQL");
    }

    #[test]
    fn test_matching_is_case_sensitive_and_exact() {
        assert_eq!(SectionKind::from_name("skills"), None);
        assert_eq!(SectionKind::from_name("Skills "), None);
        assert_eq!(SectionKind::from_name("Skillset"), None);
        assert_eq!(SectionKind::from_name("Skills"), Some(SectionKind::Skills));
    }

    #[test]
    fn test_kind_regions() {
        assert_eq!(SectionKind::Details.region(), Region::Sidebar);
        assert_eq!(SectionKind::Links.region(), Region::Sidebar);
        assert_eq!(SectionKind::Skills.region(), Region::Sidebar);
        assert_eq!(SectionKind::Profile.region(), Region::Main);
        assert_eq!(SectionKind::EmploymentHistory.region(), Region::Main);
        assert_eq!(SectionKind::References.region(), Region::Main);
    }
}
