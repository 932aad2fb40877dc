//! Registry of the single-input text tools.
//!
//! Each page runs its converter through [`run`], which never panics and keeps the
//! page invariant: a failed conversion clears the output and reports the page's
//! fixed message. The detailed reason is only logged.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::codec;
use crate::config::ToolkitConfig;
use crate::convert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTool {
    JsonFormat,
    JsonMinify,
    JsonToXml,
    XmlToJson,
    JsonToYaml,
    YamlToJson,
    CsvToJson,
    CsvToXml,
    Base64Encode,
    Base64Decode,
    UrlEncode,
    UrlDecode,
    HtmlEncode,
    HtmlDecode,
}

/// File name and MIME type offered by a page's download button.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub download: Download,
}

const MIME_JSON: &str = "application/json";
const MIME_XML: &str = "application/xml";
const MIME_YAML: &str = "application/x-yaml";
const MIME_TEXT: &str = "text/plain";

impl TextTool {
    pub const ALL: [TextTool; 14] = [
        TextTool::JsonFormat,
        TextTool::JsonMinify,
        TextTool::JsonToXml,
        TextTool::XmlToJson,
        TextTool::JsonToYaml,
        TextTool::YamlToJson,
        TextTool::CsvToJson,
        TextTool::CsvToXml,
        TextTool::Base64Encode,
        TextTool::Base64Decode,
        TextTool::UrlEncode,
        TextTool::UrlDecode,
        TextTool::HtmlEncode,
        TextTool::HtmlDecode,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::JsonFormat => "json-formatter",
            Self::JsonMinify => "json-minifier",
            Self::JsonToXml => "json-to-xml",
            Self::XmlToJson => "xml-to-json",
            Self::JsonToYaml => "json-to-yaml",
            Self::YamlToJson => "yaml-to-json",
            Self::CsvToJson => "csv-to-json",
            Self::CsvToXml => "csv-to-xml",
            Self::Base64Encode => "base64-encode",
            Self::Base64Decode => "base64-decode",
            Self::UrlEncode => "url-encode",
            Self::UrlDecode => "url-decode",
            Self::HtmlEncode => "html-entity-encode",
            Self::HtmlDecode => "html-entity-decode",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::JsonFormat => "JSON Formatter",
            Self::JsonMinify => "JSON Minifier",
            Self::JsonToXml => "JSON to XML Converter",
            Self::XmlToJson => "XML to JSON Converter",
            Self::JsonToYaml => "JSON to YAML Converter",
            Self::YamlToJson => "YAML to JSON Converter",
            Self::CsvToJson => "CSV to JSON Converter",
            Self::CsvToXml => "CSV to XML Converter",
            Self::Base64Encode => "Base64 Encoder",
            Self::Base64Decode => "Base64 Decoder",
            Self::UrlEncode => "URL Encoder",
            Self::UrlDecode => "URL Decoder",
            Self::HtmlEncode => "HTML Entity Encoder",
            Self::HtmlDecode => "HTML Entity Decoder",
        }
    }

    /// The message a page shows when its conversion fails.
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::JsonFormat | Self::JsonMinify => "Invalid JSON input",
            Self::JsonToXml | Self::JsonToYaml => "Invalid JSON format",
            Self::XmlToJson => "Invalid XML format",
            Self::YamlToJson => "Invalid YAML format",
            Self::CsvToJson | Self::CsvToXml => "Invalid CSV format",
            Self::Base64Encode => "Invalid input for Base64 encode",
            Self::Base64Decode => "Invalid input for Base64 decode",
            Self::UrlEncode => "Invalid input for encoding.",
            Self::UrlDecode => "Invalid input for decoding.",
            Self::HtmlEncode | Self::HtmlDecode => "Invalid input for HTML entities",
        }
    }

    pub fn download(&self) -> Download {
        let (file_name, mime_type) = match self {
            Self::JsonFormat => ("formatted.json", MIME_JSON),
            Self::JsonMinify => ("minified.json", MIME_JSON),
            Self::XmlToJson | Self::YamlToJson | Self::CsvToJson => ("converted.json", MIME_JSON),
            Self::JsonToXml | Self::CsvToXml => ("converted.xml", MIME_XML),
            Self::JsonToYaml => ("converted.yaml", MIME_YAML),
            Self::Base64Encode => ("base64-encode.txt", MIME_TEXT),
            Self::Base64Decode => ("base64-decode.txt", MIME_TEXT),
            Self::UrlEncode => ("url-encode.txt", MIME_TEXT),
            Self::UrlDecode => ("url-decode.txt", MIME_TEXT),
            Self::HtmlEncode => ("html-entity-encode.txt", MIME_TEXT),
            Self::HtmlDecode => ("html-entity-decode.txt", MIME_TEXT),
        };
        Download {
            file_name,
            mime_type,
        }
    }

    pub fn info(&self) -> ToolInfo {
        ToolInfo {
            slug: self.slug(),
            title: self.title(),
            download: self.download(),
        }
    }

    fn convert(&self, input: &str, config: &ToolkitConfig) -> Result<String, String> {
        match self {
            Self::JsonFormat => convert::format_json(input, false, config),
            Self::JsonMinify => convert::format_json(input, true, config),
            Self::JsonToXml => convert::json_to_xml(input),
            Self::XmlToJson => convert::xml_to_json(input),
            Self::JsonToYaml => convert::json_to_yaml(input),
            Self::YamlToJson => convert::yaml_to_json_text(input),
            Self::CsvToJson => convert::csv_to_json(input),
            Self::CsvToXml => convert::csv_to_xml(input),
            Self::Base64Encode => Ok(codec::base64_encode(input)),
            Self::Base64Decode => codec::base64_decode(input),
            Self::UrlEncode => Ok(codec::url_encode(input)),
            Self::UrlDecode => codec::url_decode(input),
            Self::HtmlEncode => Ok(codec::html_encode(input)),
            Self::HtmlDecode => Ok(codec::html_decode(input)),
        }
    }
}

impl fmt::Display for TextTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TextTool {
    type Err = ToolError;

    fn from_str(slug: &str) -> Result<Self, Self::Err> {
        let slug = slug.trim();
        TextTool::ALL
            .into_iter()
            .find(|tool| tool.slug().eq_ignore_ascii_case(slug))
            .ok_or_else(|| ToolError::UnknownTool {
                slug: slug.to_string(),
            })
    }
}

/// Failures surfaced to a tool page. `Display` is what the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("unknown tool: {slug}")]
    UnknownTool { slug: String },
    #[error("{0}")]
    InputTooLarge(String),
    #[error("{message}")]
    Conversion {
        message: &'static str,
        reason: String,
    },
}

/// Result of one tool run as the page renders it.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub output: String,
    pub error: Option<String>,
}

impl ToolOutput {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<Result<String, ToolError>> for ToolOutput {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(output) => ToolOutput {
                output,
                error: None,
            },
            Err(err) => ToolOutput {
                output: String::new(),
                error: Some(err.to_string()),
            },
        }
    }
}

/// Runs `tool`, mapping any converter failure to the tool's fixed message.
pub fn try_run(tool: TextTool, input: &str, config: &ToolkitConfig) -> Result<String, ToolError> {
    config
        .check_input_len(input)
        .map_err(ToolError::InputTooLarge)?;
    tool.convert(input, config)
        .map_err(|reason| ToolError::Conversion {
            message: tool.error_message(),
            reason,
        })
}

/// Runs `tool` and packages the outcome for the page.
///
/// # Example
/// ```
/// use devtoolkit_core::config::ToolkitConfig;
/// use devtoolkit_core::tools::{run, TextTool};
///
/// let ok = run(TextTool::Base64Encode, "Hello, Base64!", &ToolkitConfig::default());
/// assert_eq!(ok.output, "SGVsbG8sIEJhc2U2NCE=");
///
/// let failed = run(TextTool::CsvToJson, "", &ToolkitConfig::default());
/// assert_eq!(failed.output, "");
/// assert_eq!(failed.error.as_deref(), Some("Invalid CSV format"));
/// ```
pub fn run(tool: TextTool, input: &str, config: &ToolkitConfig) -> ToolOutput {
    let result = try_run(tool, input, config);
    match &result {
        Ok(output) => trace!(tool = tool.slug(), output_len = output.len(), "tool run succeeded"),
        Err(ToolError::Conversion { reason, .. }) => {
            debug!(tool = tool.slug(), %reason, "tool run failed")
        }
        Err(err) => debug!(tool = tool.slug(), %err, "tool run rejected"),
    }
    result.into()
}

/// Looks up a tool by slug and runs it. Unknown slugs yield an error output.
pub fn run_slug(slug: &str, input: &str, config: &ToolkitConfig) -> ToolOutput {
    match slug.parse::<TextTool>() {
        Ok(tool) => run(tool, input, config),
        Err(err) => {
            debug!(%slug, "unknown tool requested");
            ToolOutput::from(Err::<String, _>(err))
        }
    }
}

pub fn list_tools() -> Vec<ToolInfo> {
    TextTool::ALL.iter().map(TextTool::info).collect()
}
