pub mod formats;
pub mod helpers;
pub mod json_utils;
pub mod tabular;
pub mod xml;

pub use formats::{convert_formats, format_json, json_to_yaml, yaml_to_json_text};
pub use tabular::{csv_to_json, csv_to_xml};
pub use xml::{json_to_xml, xml_to_json};
