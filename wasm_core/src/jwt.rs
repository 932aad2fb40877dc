// JWT inspection: decodes header and payload without verifying the signature.
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JwtDecodeResult {
    pub header: String,
    pub payload: String,
    pub signature: Option<String>,
    pub algorithm: Option<String>,
    pub token_type: Option<String>,
    pub issued_at: Option<String>,
    pub expires_at: Option<String>,
}

/// Splits a compact JWT and pretty-prints its header and payload.
///
/// # Example
/// ```
/// use devtoolkit_core::jwt::jwt_decode;
/// let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxIn0.sig";
/// let decoded = jwt_decode(token)?;
/// assert_eq!(decoded.algorithm.as_deref(), Some("HS256"));
/// assert!(decoded.payload.contains("\"sub\": \"1\""));
/// # Ok::<(), String>(())
/// ```
pub fn jwt_decode(token: &str) -> Result<JwtDecodeResult, String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err("token is empty".into());
    }
    let segments: Vec<&str> = trimmed.split('.').collect();
    if segments.len() != 3 {
        return Err("Invalid JWT format".into());
    }
    let header_bytes =
        decode_base64_segment(segments[0]).map_err(|err| format!("invalid header: {err}"))?;
    let payload_bytes =
        decode_base64_segment(segments[1]).map_err(|err| format!("invalid payload: {err}"))?;
    let header: Value = serde_json::from_slice(&header_bytes)
        .map_err(|err| format!("invalid header JSON: {err}"))?;
    let payload: Value = serde_json::from_slice(&payload_bytes)
        .map_err(|err| format!("invalid payload JSON: {err}"))?;

    let claim = |value: &Value, key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    Ok(JwtDecodeResult {
        header: serde_json::to_string_pretty(&header).map_err(|err| err.to_string())?,
        payload: serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?,
        signature: (!segments[2].is_empty()).then(|| segments[2].to_string()),
        algorithm: claim(&header, "alg"),
        token_type: claim(&header, "typ"),
        issued_at: numeric_date(&payload, "iat"),
        expires_at: numeric_date(&payload, "exp"),
    })
}

fn numeric_date(payload: &Value, key: &str) -> Option<String> {
    let seconds = payload.get(key)?.as_i64()?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Decodes a base64url segment, tolerating missing padding and the standard alphabet.
fn decode_base64_segment(segment: &str) -> Result<Vec<u8>, String> {
    let mut normalized = segment.trim().to_string();
    if normalized.is_empty() {
        return Err("segment is empty".into());
    }
    let rem = normalized.len() % 4;
    if rem != 0 {
        normalized.extend(std::iter::repeat_n('=', 4 - rem));
    }
    URL_SAFE
        .decode(normalized.as_bytes())
        .or_else(|_| STANDARD.decode(normalized.as_bytes()))
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token(header: &str, payload: &str, sig: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload),
            sig
        )
    }

    #[test]
    fn decodes_example_token() {
        let jwt = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                   eyJ1c2VySWQiOiIxMjM0NTYiLCJ1c2VybmFtZSI6InRlc3RVc2VyIiwiZXhwIjoxNjg3NzY4MDB9.\
                   SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";
        let decoded = jwt_decode(jwt).unwrap();
        assert_eq!(decoded.header, "{\n  \"alg\": \"HS256\",\n  \"typ\": \"JWT\"\n}");
        assert!(decoded.payload.contains("\"username\": \"testUser\""));
        assert_eq!(decoded.token_type.as_deref(), Some("JWT"));
        assert_eq!(
            decoded.signature.as_deref(),
            Some("SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c")
        );
        assert_eq!(decoded.expires_at.as_deref(), Some("1975-05-08T10:26:40Z"));
    }

    #[test]
    fn requires_three_segments() {
        assert_eq!(jwt_decode("a.b").unwrap_err(), "Invalid JWT format");
        assert_eq!(jwt_decode("a.b.c.d").unwrap_err(), "Invalid JWT format");
        assert!(jwt_decode("   ").is_err());
    }

    #[test]
    fn empty_signature_is_none() {
        let decoded = jwt_decode(&token(r#"{"alg":"none"}"#, r#"{"iat":0}"#, "")).unwrap();
        assert!(decoded.signature.is_none());
        assert_eq!(decoded.issued_at.as_deref(), Some("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn non_json_payload_is_rejected() {
        let err = jwt_decode(&token(r#"{"alg":"HS256"}"#, "not json", "x")).unwrap_err();
        assert!(err.starts_with("invalid payload JSON"));
    }
}
