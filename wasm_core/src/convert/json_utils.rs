// Lightweight JSON/YAML helpers used by multiple format converters.
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Number, Value};

/// Parses a JSON string into `serde_json::Value`, returning a human-readable error string.
///
/// # Example
/// ```
/// use devtoolkit_core::convert::json_utils::parse_json;
/// let value = parse_json("{\"id\":1}")?;
/// assert_eq!(value["id"], 1);
/// # Ok::<(), String>(())
/// ```
pub fn parse_json(input: &str) -> Result<Value, String> {
    serde_json::from_str(input.trim()).map_err(|err| err.to_string())
}

/// Encodes a JSON `Value` with optional minification, trimming trailing newlines
/// so the output is UI-friendly. Pretty output uses two-space indentation.
///
/// # Example
/// ```
/// use serde_json::json;
/// use devtoolkit_core::convert::json_utils::encode_json;
/// let text = encode_json(&json!({"a":1}), true)?;
/// assert_eq!(text, "{\"a\":1}");
/// # Ok::<(), String>(())
/// ```
pub fn encode_json(value: &Value, minify: bool) -> Result<String, String> {
    if minify {
        return serde_json::to_string(value).map_err(|err| err.to_string());
    }
    encode_json_indented(value, 2)
}

/// Pretty-prints with a caller-chosen indentation width.
pub fn encode_json_indented(value: &Value, indent: usize) -> Result<String, String> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser).map_err(|err| err.to_string())?;
    let text = String::from_utf8(out).map_err(|err| err.to_string())?;
    Ok(text.trim_end().to_string())
}

/// Renders a scalar the way the page shows leaf values (strings unquoted).
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Converts a `serde_yaml::Value` into a JSON `Value`, normalizing tagged values too.
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(num) => {
            if let Some(i) = num.as_i64() {
                Value::Number(Number::from(i))
            } else if let Some(u) = num.as_u64() {
                Value::Number(Number::from(u))
            } else if let Some(f) = num.as_f64() {
                // NaN and infinities have no JSON form.
                Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut obj = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    other => serde_yaml::to_string(&other)
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                };
                obj.insert(key, yaml_to_json(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
