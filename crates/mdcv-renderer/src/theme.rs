//! Theme selection.

/// Visual variant selected at render time.
///
/// A theme only affects the class attached to the outer container (the
/// stylesheet carries the palette overrides); section logic never
/// depends on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Light,
}

impl Theme {
    /// Parse a theme name. Unrecognized values fall back to the
    /// default theme rather than erroring.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            "light" => Self::Light,
            _ => Self::Default,
        }
    }

    /// Class added to the `cv-container` element.
    #[must_use]
    pub fn container_class(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Dark => "dark-theme",
            Self::Light => "light-theme",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_themes() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("default"), Theme::Default);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_default() {
        assert_eq!(Theme::parse("neon"), Theme::Default);
        assert_eq!(Theme::parse(""), Theme::Default);
    }

    #[test]
    fn test_container_classes() {
        assert_eq!(Theme::Default.container_class(), "");
        assert_eq!(Theme::Dark.container_class(), "dark-theme");
        assert_eq!(Theme::Light.container_class(), "light-theme");
    }
}
