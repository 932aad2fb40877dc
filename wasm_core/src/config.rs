// Limits and formatting knobs shared by the tool pages. The JS side may pass a partial object.
use serde::Deserialize;

/// Largest input the JSON formatter accepts, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 100_000;
/// Largest input (per side) the diff checker accepts, in characters.
pub const DEFAULT_MAX_DIFF_CHARS: usize = 10_000;
pub const DEFAULT_INDENT: usize = 2;

/// Runtime configuration for the toolkit. Every field is optional when deserialized.
///
/// # Example
/// ```
/// use devtoolkit_core::config::ToolkitConfig;
/// let config: ToolkitConfig = serde_json::from_str(r#"{"indent":4}"#).unwrap();
/// assert_eq!(config.indent, 4);
/// assert_eq!(config.max_diff_chars, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolkitConfig {
    pub max_input_chars: usize,
    pub max_diff_chars: usize,
    pub indent: usize,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            indent: DEFAULT_INDENT,
        }
    }
}

impl ToolkitConfig {
    /// Returns an error string when `input` exceeds the formatter limit.
    pub fn check_input_len(&self, input: &str) -> Result<(), String> {
        let len = input.chars().count();
        if len > self.max_input_chars {
            return Err(format!(
                "Input too large. Please keep it under {} characters.",
                self.max_input_chars
            ));
        }
        Ok(())
    }

    /// Returns an error string when either diff side exceeds the diff limit.
    pub fn check_diff_len(&self, left: &str, right: &str) -> Result<(), String> {
        if left.chars().count() > self.max_diff_chars || right.chars().count() > self.max_diff_chars
        {
            return Err(format!(
                "Each input is limited to {} characters.",
                self.max_diff_chars
            ));
        }
        Ok(())
    }
}
