use console_error_panic_hook::set_once as set_panic_hook;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::ToolkitConfig;
use crate::diff::{DiffMode, DiffResult, SideBySide};

pub mod codec;
pub mod color;
pub mod config;
pub mod convert;
pub mod datetime;
pub mod diff;
pub mod hash;
pub mod ids;
pub mod jwt;
pub mod numbers;
pub mod text;
pub mod tools;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    set_panic_hook();
}

/// Plain objects on the JS side, including for maps.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn js_err(err: String) -> JsValue {
    JsValue::from_str(&err)
}

fn config_from_js(config: JsValue) -> Result<ToolkitConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ToolkitConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|err| JsValue::from_str(&format!("invalid config: {err}")))
}

#[wasm_bindgen]
pub fn run_text_tool(slug: &str, input: &str, config: JsValue) -> Result<JsValue, JsValue> {
    let config = config_from_js(config)?;
    to_js(&tools::run_slug(slug, input, &config))
}

#[wasm_bindgen]
pub fn list_tools() -> Result<JsValue, JsValue> {
    to_js(&tools::list_tools())
}

#[wasm_bindgen]
pub fn format_json(input: &str, minify: bool) -> Result<String, JsValue> {
    convert::format_json(input, minify, &ToolkitConfig::default()).map_err(js_err)
}

#[wasm_bindgen]
pub fn json_to_xml(input: &str) -> Result<String, JsValue> {
    convert::json_to_xml(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn xml_to_json(input: &str) -> Result<String, JsValue> {
    convert::xml_to_json(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn json_to_yaml(input: &str) -> Result<String, JsValue> {
    convert::json_to_yaml(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn yaml_to_json(input: &str) -> Result<String, JsValue> {
    convert::yaml_to_json_text(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn csv_to_json(input: &str) -> Result<String, JsValue> {
    convert::csv_to_json(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn csv_to_xml(input: &str) -> Result<String, JsValue> {
    convert::csv_to_xml(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn transform_format(from: &str, to: &str, input: &str) -> Result<String, JsValue> {
    convert::convert_formats(from, to, input).map_err(js_err)
}

#[wasm_bindgen]
pub fn base64_encode(input: &str) -> String {
    codec::base64_encode(input)
}

#[wasm_bindgen]
pub fn base64_decode(input: &str) -> Result<String, JsValue> {
    codec::base64_decode(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn url_encode(input: &str) -> String {
    codec::url_encode(input)
}

#[wasm_bindgen]
pub fn url_decode(input: &str) -> Result<String, JsValue> {
    codec::url_decode(input).map_err(js_err)
}

#[wasm_bindgen]
pub fn html_encode(input: &str) -> String {
    codec::html_encode(input)
}

#[wasm_bindgen]
pub fn html_decode(input: &str) -> String {
    codec::html_decode(input)
}

#[wasm_bindgen]
pub fn hash_text(algorithm: &str, input: &str) -> Result<String, JsValue> {
    hash::hash_text(algorithm, input).map_err(js_err)
}

#[wasm_bindgen]
pub fn hash_content(input: &str) -> Result<JsValue, JsValue> {
    to_js(&hash::hash_all(input.as_bytes()))
}

#[wasm_bindgen]
pub fn jwt_decode(token: &str) -> Result<JsValue, JsValue> {
    jwt::jwt_decode(token)
        .map_err(js_err)
        .and_then(|res| to_js(&res))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextDiffPayload {
    #[serde(flatten)]
    result: DiffResult,
    side_by_side: SideBySide,
}

#[wasm_bindgen]
pub fn generate_text_diff(old_text: &str, new_text: &str, mode: &str) -> Result<JsValue, JsValue> {
    let mode = DiffMode::parse(mode).map_err(js_err)?;
    let result = diff::generate_diff(old_text, new_text, mode, &ToolkitConfig::default())
        .map_err(js_err)?;
    let side_by_side = diff::render_side_by_side(&result);
    to_js(&TextDiffPayload {
        result,
        side_by_side,
    })
}

#[wasm_bindgen]
pub fn convert_case(input: &str, style: &str) -> Result<String, JsValue> {
    let style = style.parse::<text::CaseStyle>().map_err(js_err)?;
    Ok(text::convert_case(input, style))
}

#[wasm_bindgen]
pub fn convert_all_cases(input: &str) -> Result<JsValue, JsValue> {
    to_js(&text::convert_all_cases(input))
}

#[wasm_bindgen]
pub fn count_text(input: &str) -> Result<JsValue, JsValue> {
    to_js(&text::count_text(input))
}

#[wasm_bindgen]
pub fn test_regex(pattern: &str, flags: &str, input: &str) -> Result<JsValue, JsValue> {
    text::test_regex(pattern, flags, input)
        .map_err(js_err)
        .and_then(|res| to_js(&res))
}

#[wasm_bindgen]
pub fn convert_number_base(value: &str, from_radix: u32, to_radix: u32) -> Result<String, JsValue> {
    numbers::convert_base(value, from_radix, to_radix).map_err(js_err)
}

#[wasm_bindgen]
pub fn convert_css_length(value: &str, base: f64, to_px: bool) -> Result<String, JsValue> {
    numbers::convert_css_length(value, base, to_px).map_err(js_err)
}

#[wasm_bindgen]
pub fn convert_color(input: &str) -> Result<JsValue, JsValue> {
    color::convert_color(input)
        .map_err(js_err)
        .and_then(|res| to_js(&res))
}

#[wasm_bindgen]
pub fn epoch_to_date(input: &str, offset_minutes: i32) -> Result<JsValue, JsValue> {
    datetime::epoch_to_date(input, offset_minutes)
        .map_err(js_err)
        .and_then(|res| to_js(&res))
}

/// Epoch seconds as a JS number; every representable date fits in 2^53.
#[wasm_bindgen]
pub fn date_to_epoch(date: &str, time: &str, offset_minutes: i32) -> Result<f64, JsValue> {
    datetime::date_to_epoch(date, time, offset_minutes)
        .map(|secs| secs as f64)
        .map_err(js_err)
}

#[wasm_bindgen]
pub fn current_epoch() -> Result<JsValue, JsValue> {
    to_js(&datetime::current_epoch())
}

#[wasm_bindgen]
pub fn age_between(from: &str, to: &str) -> Result<JsValue, JsValue> {
    datetime::age_between(from, to)
        .map_err(js_err)
        .and_then(|res| to_js(&res))
}

#[wasm_bindgen]
pub fn generate_uuid() -> String {
    ids::generate_uuid()
}

#[wasm_bindgen]
pub fn generate_uuids(count: u32) -> Result<JsValue, JsValue> {
    ids::generate_uuids(count as usize)
        .map_err(js_err)
        .and_then(|res| to_js(&res))
}
