use std::sync::OnceLock;

use regex::Regex;

/// Deepest heading level the grammar recognizes.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A recognized `#`-style heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub title: String,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(#{1,6})\s+(.+)$").unwrap_or_else(|err| panic!("invalid heading pattern: {err}"))
    })
}

/// Detect a heading: 1-6 leading `#`, at least one whitespace character, then
/// at least one more character. The title is the trimmed remainder.
///
/// A single trailing `'\r'` is ignored so CRLF input still yields headings.
/// Seven or more `#` never match.
pub fn detect_heading(line: &str) -> Option<Heading> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let captures = heading_pattern().captures(line)?;

    let marker = captures.get(1)?.as_str();
    let remainder = captures.get(2)?.as_str();

    Some(Heading {
        level: marker.len() as u8,
        title: remainder.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_one_through_six() {
        for level in 1..=MAX_HEADING_LEVEL {
            let line = format!("{} Title", "#".repeat(level as usize));
            let heading = detect_heading(&line).unwrap();
            assert_eq!(heading.level, level);
            assert_eq!(heading.title, "Title");
        }
    }

    #[test]
    fn rejects_seven_markers() {
        assert!(detect_heading("####### Too deep").is_none());
    }

    #[test]
    fn requires_whitespace_after_marker() {
        assert!(detect_heading("#NoSpace").is_none());
        assert!(detect_heading("#").is_none());
        assert!(detect_heading("# ").is_none());
    }

    #[test]
    fn trims_title() {
        let heading = detect_heading("##   Spaced out   ").unwrap();
        assert_eq!(heading.level, 2);
        assert_eq!(heading.title, "Spaced out");
    }

    #[test]
    fn whitespace_only_remainder_gives_empty_title() {
        let heading = detect_heading("#   ").unwrap();
        assert_eq!(heading.level, 1);
        assert_eq!(heading.title, "");
    }

    #[test]
    fn leading_indent_is_not_a_heading() {
        assert!(detect_heading("  # Indented").is_none());
    }

    #[test]
    fn tolerates_carriage_return() {
        let heading = detect_heading("# Windows\r").unwrap();
        assert_eq!(heading.title, "Windows");
    }

    #[test]
    fn tab_counts_as_separator() {
        let heading = detect_heading("###\tTabbed").unwrap();
        assert_eq!(heading.level, 3);
        assert_eq!(heading.title, "Tabbed");
    }
}
