// Hex digests for the hash generator page.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashAlgorithm {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(data)),
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha384 => hex::encode(Sha384::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    /// Accepts `SHA-256`, `sha256`, `Sha_256` and so on.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(format!("unsupported hash algorithm {name}")),
        }
    }
}

/// Hashes `input` with the named algorithm. Empty input produces an empty string, the
/// same as the page showing nothing until text is entered.
///
/// # Example
/// ```
/// use devtoolkit_core::hash::hash_text;
/// assert_eq!(
///     hash_text("SHA-256", "abc")?,
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// # Ok::<(), String>(())
/// ```
pub fn hash_text(algorithm: &str, input: &str) -> Result<String, String> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    if input.is_empty() {
        return Ok(String::new());
    }
    Ok(algorithm.digest_hex(input.as_bytes()))
}

/// Digest of `data` under every supported algorithm, keyed by label.
pub fn hash_all(data: &[u8]) -> BTreeMap<String, String> {
    HashAlgorithm::ALL
        .iter()
        .map(|algo| (algo.label().to_string(), algo.digest_hex(data)))
        .collect()
}
