//! Format conversion helpers.
//!
//! Every structured format exposed by the converter pages (JSON, YAML, XML, CSV) is
//! normalized through `serde_json::Value`, so any pair of formats converts through
//! the same two steps: parse into a value, then render the value.
//!
//! # Examples
//!
//! ```rust
//! use devtoolkit_core::convert::formats::convert_formats;
//!
//! let yaml = convert_formats("JSON", "YAML", r#"{"name":"Ada"}"#)?;
//! assert_eq!(yaml.trim(), "name: Ada");
//! # Ok::<(), String>(())
//! ```
use crate::config::ToolkitConfig;
use crate::convert::json_utils::{encode_json, encode_json_indented, parse_json, yaml_to_json};
use crate::convert::{tabular, xml};
use serde_json::Value;

const FORMAT_JSON: &str = "JSON";
const FORMAT_YAML: &str = "YAML";
const FORMAT_XML: &str = "XML";
const FORMAT_CSV: &str = "CSV";

/// Pretty-prints (or minifies) JSON after enforcing the configured input limit.
///
/// # Examples
/// ```
/// use devtoolkit_core::config::ToolkitConfig;
/// use devtoolkit_core::convert::formats::format_json;
///
/// let pretty = format_json(r#"{"a":[1,2]}"#, false, &ToolkitConfig::default())?;
/// assert_eq!(pretty, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
/// # Ok::<(), String>(())
/// ```
pub fn format_json(input: &str, minify: bool, config: &ToolkitConfig) -> Result<String, String> {
    config.check_input_len(input)?;
    let value = parse_json(input)?;
    if minify {
        encode_json(&value, true)
    } else {
        encode_json_indented(&value, config.indent)
    }
}

/// Converts JSON text into a YAML document.
pub fn json_to_yaml(input: &str) -> Result<String, String> {
    let value = parse_json(input)?;
    serde_yaml::to_string(&value).map_err(|err| err.to_string())
}

/// Converts a YAML document into pretty-printed JSON.
pub fn yaml_to_json_text(input: &str) -> Result<String, String> {
    let value = parse_yaml(input)?;
    encode_json(&value, false)
}

fn parse_yaml(input: &str) -> Result<Value, String> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(input).map_err(|err| err.to_string())?;
    Ok(yaml_to_json(yaml))
}

/// Converts between JSON, YAML and XML; CSV is accepted as a source only.
///
/// # Examples
/// ```
/// use devtoolkit_core::convert::formats::convert_formats;
///
/// let yaml = convert_formats("JSON", "YAML", "{\"id\":1}")?;
/// let back = convert_formats("YAML", "JSON", &yaml)?;
/// assert!(back.contains("\"id\": 1"));
/// # Ok::<(), String>(())
/// ```
pub fn convert_formats(from: &str, to: &str, input: &str) -> Result<String, String> {
    let value = match from {
        FORMAT_JSON => parse_json(input)?,
        FORMAT_YAML => parse_yaml(input)?,
        FORMAT_XML => xml::parse_xml(input)?,
        FORMAT_CSV => tabular::parse_csv(input)?.to_json_rows(),
        _ => return Err(format!("Unsupported source format: {from}")),
    };
    match to {
        FORMAT_JSON => encode_json(&value, false),
        FORMAT_YAML => serde_yaml::to_string(&value).map_err(|err| err.to_string()),
        FORMAT_XML => Ok(xml::value_to_xml(&value)),
        _ => Err(format!("Unsupported target format: {to}")),
    }
}
