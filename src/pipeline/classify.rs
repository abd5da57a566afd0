//! Line classification: decide what a single source line is.
//!
//! Classification looks only at the line's own leading characters. The two
//! pieces of context that matter (being inside a code fence, being inside a
//! table) are owned by the block scanner in [`super::blocks`], which is the
//! only caller that needs them.
//!
//! Tests run in a fixed priority order:
//!
//! ```text
//! fence  >  table row  >  rule  >  heading  >  list item  >  blank  >  paragraph
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// The category of one line outside a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Triple-backtick line opening or closing a code block.
    Fence,
    /// Pipe-delimited table row (header, separator or body).
    TableRow,
    /// `---`, `___` or `***` on its own.
    HorizontalRule,
    /// `#` .. `####` followed by a space.
    Heading { level: u8, text: &'a str },
    /// `- `, `* ` or `<digits>. ` list item.
    ListItem { marker: ListMarker, text: &'a str },
    /// Empty or whitespace-only line.
    Blank,
    /// Anything else.
    Paragraph(&'a str),
}

/// How a list item was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    /// Ordered item with the number as written (`7. ` → `Ordered(7)`).
    Ordered(u64),
}

impl ListMarker {
    pub fn is_ordered(self) -> bool {
        matches!(self, ListMarker::Ordered(_))
    }
}

static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\. ").unwrap());

const HEADING_PREFIXES: [(&str, u8); 4] = [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)];

/// Classify a line that is not inside a code block.
pub fn classify(line: &str) -> LineKind<'_> {
    if is_fence(line) {
        return LineKind::Fence;
    }
    if is_table_row(line) {
        return LineKind::TableRow;
    }
    if matches!(line.trim(), "---" | "___" | "***") {
        return LineKind::HorizontalRule;
    }
    for (prefix, level) in HEADING_PREFIXES {
        if let Some(rest) = line.strip_prefix(prefix) {
            return LineKind::Heading {
                level,
                text: rest.trim(),
            };
        }
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineKind::ListItem {
            marker: ListMarker::Bullet,
            text: rest.trim(),
        };
    }
    if let Some(caps) = RE_ORDERED_ITEM.captures(line) {
        let prefix_len = caps[0].len();
        // Overlong digit runs still count as an ordered item; only the number is lost.
        let number = caps[1].parse().unwrap_or(1);
        return LineKind::ListItem {
            marker: ListMarker::Ordered(number),
            text: line[prefix_len..].trim(),
        };
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    LineKind::Paragraph(line)
}

/// Whether the line opens or closes a fenced code block.
pub fn is_fence(line: &str) -> bool {
    line.starts_with("```")
}

/// Whether the line belongs to a pipe-delimited table.
pub fn is_table_row(line: &str) -> bool {
    line.starts_with('|')
}

/// Split a table row into trimmed cell texts.
///
/// One leading and one trailing pipe are stripped, the rest is split on `|`.
/// `"| a | b |"` and `"| a | b"` both yield `["a", "b"]`.
pub fn split_cells(row: &str) -> Vec<&str> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            classify("# Title"),
            LineKind::Heading { level: 1, text: "Title" }
        );
        assert_eq!(
            classify("## Section"),
            LineKind::Heading { level: 2, text: "Section" }
        );
        assert_eq!(
            classify("### Sub"),
            LineKind::Heading { level: 3, text: "Sub" }
        );
        assert_eq!(
            classify("#### Deep  "),
            LineKind::Heading { level: 4, text: "Deep" }
        );
    }

    #[test]
    fn test_heading_requires_space_and_max_four_hashes() {
        assert_eq!(classify("#hashtag"), LineKind::Paragraph("#hashtag"));
        assert_eq!(classify("##### Five"), LineKind::Paragraph("##### Five"));
    }

    #[test]
    fn test_fence_beats_everything() {
        assert_eq!(classify("```rust"), LineKind::Fence);
        assert_eq!(classify("```"), LineKind::Fence);
    }

    #[test]
    fn test_table_row_beats_rule() {
        assert_eq!(classify("| --- | --- |"), LineKind::TableRow);
        assert_eq!(classify("|a|b|"), LineKind::TableRow);
    }

    #[test]
    fn test_horizontal_rules() {
        for rule in ["---", "___", "***", "  ---  "] {
            assert_eq!(classify(rule), LineKind::HorizontalRule, "rule {rule:?}");
        }
        assert_eq!(classify("----"), LineKind::Paragraph("----"));
    }

    #[test]
    fn test_bullet_items() {
        assert_eq!(
            classify("- first"),
            LineKind::ListItem { marker: ListMarker::Bullet, text: "first" }
        );
        assert_eq!(
            classify("* second"),
            LineKind::ListItem { marker: ListMarker::Bullet, text: "second" }
        );
    }

    #[test]
    fn test_ordered_items_keep_number() {
        assert_eq!(
            classify("12. twelfth"),
            LineKind::ListItem { marker: ListMarker::Ordered(12), text: "twelfth" }
        );
        assert_eq!(classify("3.no space"), LineKind::Paragraph("3.no space"));
    }

    #[test]
    fn test_emphasis_line_is_not_a_list() {
        assert_eq!(
            classify("*emphasis* starts here"),
            LineKind::Paragraph("*emphasis* starts here")
        );
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Blank);
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("| a | b"), vec!["a", "b"]);
        assert_eq!(split_cells("|  |x|"), vec!["", "x"]);
    }
}
