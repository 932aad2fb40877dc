//! Plain-text tools: case converter, word counter and regex tester.
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Lower,
    Upper,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Constant,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 7] = [
        CaseStyle::Lower,
        CaseStyle::Upper,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Snake,
        CaseStyle::Kebab,
        CaseStyle::Constant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lower => "lowercase",
            Self::Upper => "UPPERCASE",
            Self::Camel => "camelCase",
            Self::Pascal => "PascalCase",
            Self::Snake => "snake_case",
            Self::Kebab => "kebab-case",
            Self::Constant => "CONSTANT_CASE",
        }
    }
}

impl FromStr for CaseStyle {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        CaseStyle::ALL
            .into_iter()
            .find(|style| style.label() == name || style.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unsupported case {name}"))
    }
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[_\-]+").expect("valid separator regex"))
}

fn boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("valid boundary regex"))
}

/// Splits text into lowercase words across spaces, `_`, `-` and camel-case humps.
fn case_words(text: &str) -> Vec<String> {
    let normalized = separator_re().replace_all(text.trim(), " ");
    let split = boundary_re().replace_all(&normalized, "$1 $2");
    split.split_whitespace().map(str::to_lowercase).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts `text` into the requested case.
///
/// # Example
/// ```
/// use devtoolkit_core::text::{convert_case, CaseStyle};
/// assert_eq!(convert_case("hello world-wide_web", CaseStyle::Camel), "helloWorldWideWeb");
/// assert_eq!(convert_case("someValue here", CaseStyle::Constant), "SOME_VALUE_HERE");
/// ```
pub fn convert_case(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Camel => {
            let words = case_words(text);
            let mut out = words.first().cloned().unwrap_or_default();
            for word in words.iter().skip(1) {
                out.push_str(&capitalize(word));
            }
            out
        }
        CaseStyle::Pascal => case_words(text).iter().map(|w| capitalize(w)).collect(),
        CaseStyle::Snake => case_words(text).join("_"),
        CaseStyle::Kebab => case_words(text).join("-"),
        CaseStyle::Constant => case_words(text).join("_").to_uppercase(),
    }
}

/// Every case rendering keyed by label.
pub fn convert_all_cases(text: &str) -> BTreeMap<String, String> {
    CaseStyle::ALL
        .iter()
        .map(|style| (style.label().to_string(), convert_case(text, *style)))
        .collect()
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub lines: usize,
}

/// Counts words, characters (with and without whitespace) and lines.
pub fn count_text(text: &str) -> TextStats {
    TextStats {
        words: text.split_whitespace().count(),
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|ch| !ch.is_whitespace()).count(),
        lines: text.lines().count(),
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegexTestResult {
    pub matched: bool,
    pub matches: Vec<RegexMatch>,
}

/// Tests `pattern` against `input`. Flags: `i` case-insensitive, `m` multi-line,
/// `s` dot matches newline, `g` report every match instead of the first.
///
/// The engine is the `regex` crate, so lookaround and backreferences are not
/// supported and come back as an invalid expression. `start`/`end` are UTF-16
/// code unit offsets, the same indices JavaScript strings use.
///
/// # Example
/// ```
/// use devtoolkit_core::text::test_regex;
/// let result = test_regex(r"\d+", "g", "a1 b22")?;
/// assert!(result.matched);
/// assert_eq!(result.matches.len(), 2);
/// # Ok::<(), String>(())
/// ```
pub fn test_regex(pattern: &str, flags: &str, input: &str) -> Result<RegexTestResult, String> {
    let mut builder = RegexBuilder::new(pattern);
    let mut global = false;
    for flag in flags.chars().filter(|ch| !ch.is_whitespace()) {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'g' => global = true,
            other => return Err(format!("unsupported regex flag '{other}'")),
        }
    }
    let regex = builder
        .build()
        .map_err(|err| format!("Invalid regular expression: {err}"))?;
    let to_match = |m: regex::Match<'_>| {
        let start = utf16_len(&input[..m.start()]);
        RegexMatch {
            text: m.as_str().to_string(),
            start,
            end: start + utf16_len(m.as_str()),
        }
    };
    let matches: Vec<RegexMatch> = if global {
        regex.find_iter(input).map(to_match).collect()
    } else {
        regex.find(input).map(to_match).into_iter().collect()
    };
    Ok(RegexTestResult {
        matched: !matches.is_empty(),
        matches,
    })
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_every_case() {
        let input = "Hello world_example-text";
        assert_eq!(convert_case(input, CaseStyle::Lower), "hello world_example-text");
        assert_eq!(convert_case(input, CaseStyle::Upper), "HELLO WORLD_EXAMPLE-TEXT");
        assert_eq!(convert_case(input, CaseStyle::Camel), "helloWorldExampleText");
        assert_eq!(convert_case(input, CaseStyle::Pascal), "HelloWorldExampleText");
        assert_eq!(convert_case(input, CaseStyle::Snake), "hello_world_example_text");
        assert_eq!(convert_case(input, CaseStyle::Kebab), "hello-world-example-text");
        assert_eq!(convert_case(input, CaseStyle::Constant), "HELLO_WORLD_EXAMPLE_TEXT");
    }

    #[test]
    fn camel_humps_split_into_words() {
        assert_eq!(convert_case("parseHttpRequest", CaseStyle::Snake), "parse_http_request");
        assert_eq!(convert_case("   ", CaseStyle::Camel), "");
    }

    #[test]
    fn case_labels_parse() {
        assert_eq!("kebab-case".parse::<CaseStyle>(), Ok(CaseStyle::Kebab));
        assert_eq!("uppercase".parse::<CaseStyle>(), Ok(CaseStyle::Upper));
        assert!("title".parse::<CaseStyle>().is_err());
        assert_eq!(convert_all_cases("a b").len(), 7);
    }

    #[test]
    fn counts_words_and_characters() {
        let stats = count_text("  Hello   world\nsecond line ");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.characters, 28);
        assert_eq!(stats.characters_no_spaces, 20);
        assert_eq!(stats.lines, 2);
        assert_eq!(count_text(""), TextStats::default());
    }

    #[test]
    fn regex_flags_apply() {
        assert!(!test_regex("hello", "", "HELLO").unwrap().matched);
        assert!(test_regex("hello", "i", "HELLO").unwrap().matched);
        assert!(test_regex("^b", "m", "a\nb").unwrap().matched);
        assert!(test_regex("a.b", "s", "a\nb").unwrap().matched);
        let single = test_regex("o", "", "foo").unwrap();
        assert_eq!(single.matches, vec![RegexMatch { text: "o".into(), start: 1, end: 2 }]);
    }

    #[test]
    fn match_offsets_count_utf16_units() {
        let found = test_regex("b+", "g", "é😀 bb").unwrap();
        assert_eq!(found.matches, vec![RegexMatch { text: "bb".into(), start: 4, end: 6 }]);
    }

    #[test]
    fn lookaround_and_backreferences_are_reported_invalid() {
        for pattern in [r"foo(?=bar)", r"(?<!x)y", r"(a)\1"] {
            let err = test_regex(pattern, "", "foobar").unwrap_err();
            assert!(err.starts_with("Invalid regular expression"), "{pattern}: {err}");
        }
    }

    #[test]
    fn invalid_pattern_or_flag_errors() {
        assert!(test_regex("(", "", "x").unwrap_err().starts_with("Invalid regular expression"));
        assert!(test_regex("x", "y", "x").is_err());
    }
}
