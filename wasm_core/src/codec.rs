//! Text codecs: Base64 over UTF-8, URL component encoding and HTML entities.
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Standard alphabet, padding optional and stray trailing bits tolerated, like `atob`.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes UTF-8 text as padded standard Base64.
pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input.as_bytes())
}

/// Decodes standard Base64 into UTF-8 text. ASCII whitespace anywhere in the input
/// (line-wrapped output) is skipped and padding may be left off.
///
/// # Example
/// ```
/// use devtoolkit_core::codec::base64_decode;
/// assert_eq!(base64_decode("SGVsbG8sIEJhc2U2NCE=")?, "Hello, Base64!");
/// assert_eq!(base64_decode("SGVs\nbG8")?, "Hello");
/// # Ok::<(), String>(())
/// ```
pub fn base64_decode(input: &str) -> Result<String, String> {
    let compact: Vec<u8> = input
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT.decode(&compact).map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|_| "decoded bytes are not valid UTF-8".to_string())
}

/// Percent-encodes a URL component the way `encodeURIComponent` does: only
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` pass through.
pub fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Decodes percent escapes. Every `%` must start a two-digit hex escape and the
/// decoded bytes must be UTF-8.
///
/// # Example
/// ```
/// use devtoolkit_core::codec::url_decode;
/// assert_eq!(url_decode("caf%C3%A9")?, "café");
/// assert!(url_decode("100%zz").is_err());
/// # Ok::<(), String>(())
/// ```
pub fn url_decode(input: &str) -> Result<String, String> {
    let bytes = input.as_bytes();
    for (idx, _) in input.match_indices('%') {
        let escape = bytes.get(idx + 1..idx + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(format!("malformed escape at offset {idx}"));
        }
    }
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .map_err(|_| "invalid URL encoding".to_string())
}

/// Replaces markup-significant characters and `U+00A0..=U+9999` with decimal references.
///
/// # Example
/// ```
/// use devtoolkit_core::codec::html_encode;
/// assert_eq!(html_encode("<b>é</b>"), "&#60;b&#62;&#233;&#60;/b&#62;");
/// ```
pub fn html_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if needs_reference(ch) {
            out.push_str(&format!("&#{};", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

fn needs_reference(ch: char) -> bool {
    matches!(ch, '<' | '>' | '&' | '"' | '\'' | '`') || ('\u{00A0}'..='\u{9999}').contains(&ch)
}

/// Resolves every HTML5 named reference plus decimal and hexadecimal ones, as the
/// browser does. Unknown references are copied through untouched.
///
/// # Example
/// ```
/// use devtoolkit_core::codec::html_decode;
/// assert_eq!(html_decode("caf&eacute; &alpha; &lt;3"), "café α <3");
/// ```
pub fn html_decode(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
