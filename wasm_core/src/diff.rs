//! Text diff for the diff checker page. Compares two texts line-by-line or
//! word-by-word and renders a side-by-side view with highlighted changes.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

use crate::config::ToolkitConfig;

/// Granularity of the comparison.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    Line,
    Word,
}

impl DiffMode {
    pub fn parse(name: &str) -> Result<Self, String> {
        match name.trim().to_lowercase().as_str() {
            "line" | "lines" | "" => Ok(Self::Line),
            "word" | "words" => Ok(Self::Word),
            other => Err(format!("unsupported diff mode {other}")),
        }
    }
}

/// Type of change in a diff segment
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffChangeType {
    /// Present in both texts
    Common,
    /// Present only in the new text
    Added,
    /// Present only in the original text
    Removed,
}

/// A run of consecutive tokens sharing the same change type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiffSegment {
    pub value: String,
    pub change: DiffChangeType,
}

/// Token counts per change type (lines or words, depending on the mode).
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub common: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiffResult {
    pub mode: DiffMode,
    pub segments: Vec<DiffSegment>,
    pub stats: DiffStats,
}

/// HTML fragments for the two result columns, one entry per segment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SideBySide {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

const ADDED_CLASS: &str = "bg-green-800 text-white rounded px-1";
const REMOVED_CLASS: &str = "bg-red-800 text-white rounded px-1";

/// Diffs `old_text` against `new_text`, rejecting inputs above the configured limit.
///
/// # Example
/// ```
/// use devtoolkit_core::config::ToolkitConfig;
/// use devtoolkit_core::diff::{generate_diff, DiffMode};
///
/// let result = generate_diff("a b c", "a x c", DiffMode::Word, &ToolkitConfig::default())?;
/// assert_eq!(result.stats.additions, 1);
/// assert_eq!(result.stats.deletions, 1);
/// # Ok::<(), String>(())
/// ```
pub fn generate_diff(
    old_text: &str,
    new_text: &str,
    mode: DiffMode,
    config: &ToolkitConfig,
) -> Result<DiffResult, String> {
    config.check_diff_len(old_text, new_text)?;
    let diff = match mode {
        DiffMode::Line => TextDiff::from_lines(old_text, new_text),
        DiffMode::Word => TextDiff::from_words(old_text, new_text),
    };

    let mut segments: Vec<DiffSegment> = Vec::new();
    let mut stats = DiffStats::default();
    for op in diff.ops() {
        for change in diff.iter_changes(op) {
            let kind = match change.tag() {
                ChangeTag::Equal => DiffChangeType::Common,
                ChangeTag::Insert => DiffChangeType::Added,
                ChangeTag::Delete => DiffChangeType::Removed,
            };
            let value = change.value();
            // Whitespace tokens in word mode are not worth counting.
            if mode == DiffMode::Line || !value.trim().is_empty() {
                match kind {
                    DiffChangeType::Common => stats.common += 1,
                    DiffChangeType::Added => stats.additions += 1,
                    DiffChangeType::Removed => stats.deletions += 1,
                }
            }
            match segments.last_mut() {
                Some(last) if last.change == kind => last.value.push_str(value),
                _ => segments.push(DiffSegment {
                    value: value.to_string(),
                    change: kind,
                }),
            }
        }
    }

    Ok(DiffResult {
        mode,
        segments,
        stats,
    })
}

/// Builds the two highlighted columns. Removed text shows on the left only, added
/// text on the right only, common text on both sides.
pub fn render_side_by_side(result: &DiffResult) -> SideBySide {
    let mut left = Vec::with_capacity(result.segments.len());
    let mut right = Vec::with_capacity(result.segments.len());
    for segment in &result.segments {
        let escaped = escape_html(&segment.value);
        match segment.change {
            DiffChangeType::Added => {
                left.push(String::new());
                right.push(format!("<span class=\"{ADDED_CLASS}\">{escaped}</span>"));
            }
            DiffChangeType::Removed => {
                left.push(format!("<span class=\"{REMOVED_CLASS}\">{escaped}</span>"));
                right.push(String::new());
            }
            DiffChangeType::Common => {
                left.push(format!("<span>{escaped}</span>"));
                right.push(format!("<span>{escaped}</span>"));
            }
        }
    }
    SideBySide { left, right }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(old: &str, new: &str, mode: DiffMode) -> DiffResult {
        generate_diff(old, new, mode, &ToolkitConfig::default()).unwrap()
    }

    #[test]
    fn test_identical_texts() {
        let text = "line 1\nline 2\nline 3";
        let result = diff(text, text, DiffMode::Line);

        assert_eq!(result.stats.additions, 0);
        assert_eq!(result.stats.deletions, 0);
        assert_eq!(result.stats.common, 3);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].value, text);
    }

    #[test]
    fn test_line_replacement() {
        let old = "This is a text example.\nThis line is the same.\nThis line is to be removed.\n";
        let new = "This is a text example.\nThis line is the same.\nThis line is newly added.\n";
        let result = diff(old, new, DiffMode::Line);

        assert_eq!(result.stats.additions, 1);
        assert_eq!(result.stats.deletions, 1);
        let changes: Vec<_> = result.segments.iter().map(|s| s.change).collect();
        assert_eq!(
            changes,
            vec![
                DiffChangeType::Common,
                DiffChangeType::Removed,
                DiffChangeType::Added
            ]
        );
        assert_eq!(result.segments[1].value, "This line is to be removed.\n");
    }

    #[test]
    fn test_word_mode_isolates_changed_word() {
        let result = diff(
            "It will be compared to another text.",
            "It will be compared with another text.",
            DiffMode::Word,
        );
        let removed: Vec<_> = result
            .segments
            .iter()
            .filter(|s| s.change == DiffChangeType::Removed)
            .map(|s| s.value.as_str())
            .collect();
        let added: Vec<_> = result
            .segments
            .iter()
            .filter(|s| s.change == DiffChangeType::Added)
            .map(|s| s.value.as_str())
            .collect();
        assert_eq!(removed, vec!["to"]);
        assert_eq!(added, vec!["with"]);
    }

    #[test]
    fn test_side_by_side_escapes_and_aligns() {
        let result = diff("<a>\n", "<b>\n", DiffMode::Line);
        let view = render_side_by_side(&result);
        assert_eq!(view.left.len(), view.right.len());
        assert!(view.left[0].contains("&lt;a&gt;"));
        assert!(view.left[0].contains("bg-red-800"));
        assert_eq!(view.right[0], "");
        assert!(view.right[1].contains("bg-green-800"));
    }

    #[test]
    fn test_limit_is_enforced() {
        let config = ToolkitConfig {
            max_diff_chars: 4,
            ..ToolkitConfig::default()
        };
        assert!(generate_diff("12345", "", DiffMode::Line, &config).is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(DiffMode::parse("Word").unwrap(), DiffMode::Word);
        assert_eq!(DiffMode::parse("").unwrap(), DiffMode::Line);
        assert!(DiffMode::parse("char").is_err());
    }
}
