//! CSV → JSON and CSV → XML conversion.
//!
//! The first record holds the headers. Data rows are matched to headers by position:
//! missing trailing fields become empty strings and surplus fields are dropped, so
//! every output row carries exactly one entry per header.
use std::io::Cursor;

use serde_json::{Map, Value};

use crate::convert::helpers::{xml_escape, xml_tag_name};
use crate::convert::json_utils::encode_json;

/// Headers plus rows already padded/truncated to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn err<T: std::fmt::Display>(msg: T) -> String {
    msg.to_string()
}

/// Parses comma-separated text into a [`CsvTable`].
///
/// # Example
/// ```
/// use devtoolkit_core::convert::tabular::parse_csv;
/// let table = parse_csv("name,age\nAda")?;
/// assert_eq!(table.rows, vec![vec!["Ada".to_string(), String::new()]]);
/// # Ok::<(), String>(())
/// ```
pub fn parse_csv(input: &str) -> Result<CsvTable, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("CSV input is empty.".into());
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(trimmed.as_bytes()));

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record.map_err(err)?.iter().map(str::to_string).collect(),
        None => return Err("CSV input is empty.".into()),
    };
    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(err)?;
        let row = (0..headers.len())
            .map(|idx| record.get(idx).unwrap_or_default().to_string())
            .collect();
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

impl CsvTable {
    /// Builds one JSON object per row, keys in header order.
    pub fn to_json_rows(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (header, cell) in self.headers.iter().zip(row) {
                    obj.insert(header.clone(), Value::String(cell.clone()));
                }
                Value::Object(obj)
            })
            .collect();
        Value::Array(rows)
    }

    /// Renders `<root><row><header>value</header>…</row>…</root>` with two-space indents.
    pub fn to_xml(&self) -> String {
        let tags: Vec<String> = self.headers.iter().map(|h| xml_tag_name(h)).collect();
        let mut out = String::from("<root>\n");
        for row in &self.rows {
            out.push_str("  <row>\n");
            for (tag, cell) in tags.iter().zip(row) {
                out.push_str(&format!("    <{tag}>{}</{tag}>\n", xml_escape(cell)));
            }
            out.push_str("  </row>\n");
        }
        out.push_str("</root>");
        out
    }
}

/// Converts CSV text into a pretty-printed JSON array of objects.
///
/// # Example
/// ```
/// use devtoolkit_core::convert::tabular::csv_to_json;
/// let json = csv_to_json("name,age\nAda,36")?;
/// assert_eq!(json, "[\n  {\n    \"name\": \"Ada\",\n    \"age\": \"36\"\n  }\n]");
/// # Ok::<(), String>(())
/// ```
pub fn csv_to_json(input: &str) -> Result<String, String> {
    let table = parse_csv(input)?;
    encode_json(&table.to_json_rows(), false)
}

/// Converts CSV text into XML; at least one data row is required.
pub fn csv_to_xml(input: &str) -> Result<String, String> {
    let table = parse_csv(input)?;
    if table.rows.is_empty() {
        return Err("CSV must have at least one header and one data row".into());
    }
    Ok(table.to_xml())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = "name,age,city\nPeter Parker,26,New York\nMary Jane,25,Los Angeles";

    #[test]
    fn sample_converts_to_objects() {
        let table = parse_csv(SAMPLE).unwrap();
        assert_eq!(
            table.to_json_rows(),
            json!([
                {"name": "Peter Parker", "age": "26", "city": "New York"},
                {"name": "Mary Jane", "age": "25", "city": "Los Angeles"}
            ])
        );
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let table = parse_csv("a,b,c\n1\n1,2,3,4").unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn fields_and_headers_are_trimmed() {
        let table = parse_csv(" a , b \r\n 1 , 2 \r\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn header_only_yields_empty_array() {
        assert_eq!(csv_to_json("a,b").unwrap(), "[]");
        assert!(csv_to_xml("a,b").is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(csv_to_json("   \n ").is_err());
    }

    #[test]
    fn xml_output_escapes_values() {
        let xml = csv_to_xml("name,note\nAda,a<b & c").unwrap();
        assert_eq!(
            xml,
            "<root>\n  <row>\n    <name>Ada</name>\n    <note>a&lt;b &amp; c</note>\n  </row>\n</root>"
        );
    }

    #[test]
    fn header_names_are_sanitized_as_tags() {
        let xml = csv_to_xml("first name,2nd\nAda,x").unwrap();
        assert!(xml.contains("<first_name>Ada</first_name>"));
        assert!(xml.contains("<_2nd>x</_2nd>"));
    }
}
