//! API token format and verifier hashing.
//!
//! Tokens look like `ag_v1_<uuid>.<secret>`, where `<uuid>` is the token's
//! simple-format UUID and `<secret>` is 32 random bytes as lowercase hex.
//! Only `sha256(pepper ‖ verifier input)` is stored.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use crate::domain::users::records::UserUuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "ag";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Secret half of a token. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        encode_hex(secret.as_bytes()).as_str()
    )
}

/// Split a bearer token into its parts.
///
/// # Errors
///
/// Returns an [`ApiTokenError`] when the prefix, version, UUID or secret
/// segment is malformed.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut segments = id.splitn(3, '_');

    let (Some(prefix), Some(version), Some(token_uuid)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(ApiTokenError::InvalidFormat);
    };

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = version.parse::<ApiTokenVersion>()?;

    let token_uuid = Uuid::try_parse(token_uuid).map_err(|_err| ApiTokenError::InvalidFormat)?;

    let secret = decode_secret(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret,
    })
}

/// Hash the verifier for a token.
///
/// The input binds the secret to its token UUID, version and owning user, so
/// a stored hash cannot be replayed for another token row.
#[must_use]
pub fn hash_api_token(
    pepper: &str,
    token_uuid: Uuid,
    version: ApiTokenVersion,
    user_uuid: UserUuid,
    secret: &ApiTokenSecret,
) -> String {
    let secret_hex = encode_hex(secret.as_bytes());

    let input = Zeroizing::new(format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        secret_hex.as_str(),
    ));

    let mut hasher = Sha256::new();

    hasher.update(pepper.as_bytes());
    hasher.update(input.as_bytes());

    encode_hex(&hasher.finalize()).to_string()
}

/// Compare two verifier hashes without short-circuiting on the first
/// mismatching byte.
#[must_use]
pub fn verifier_matches(expected: &str, actual: &str) -> bool {
    let (expected, actual) = (expected.as_bytes(), actual.as_bytes());

    if expected.len() != actual.len() {
        return false;
    }

    expected
        .iter()
        .zip(actual)
        .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

fn encode_hex(bytes: &[u8]) -> Zeroizing<String> {
    let mut encoded = Zeroizing::new(String::with_capacity(bytes.len() * 2));

    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            if let Some(digit) = HEX_DIGITS.get(usize::from(nibble)) {
                encoded.push(char::from(*digit));
            }
        }
    }

    encoded
}

fn decode_secret(secret_hex: &str) -> Option<ApiTokenSecret> {
    if secret_hex.len() != API_TOKEN_SECRET_BYTES * 2 {
        return None;
    }

    let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

    for (byte, pair) in bytes.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (hex_value(*hi)? << 4) | hex_value(*lo)?;
    }

    Some(ApiTokenSecret::from_bytes(bytes))
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formatted_token_parses_back() -> TestResult {
        let token_uuid = Uuid::now_v7();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);

        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);

        assert!(token.starts_with("ag_v1_"), "{token}");

        let parsed = parse_api_token(&token)?;

        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let uuid = Uuid::nil().simple();
        let secret = "ab".repeat(API_TOKEN_SECRET_BYTES);

        assert!(matches!(
            parse_api_token(&format!("lt_v1_{uuid}.{secret}")),
            Err(ApiTokenError::InvalidFormat)
        ));
        assert!(matches!(
            parse_api_token(&format!("ag_v9_{uuid}.{secret}")),
            Err(ApiTokenError::UnsupportedVersion)
        ));
        assert!(matches!(
            parse_api_token(&format!("ag_v1_{uuid}.abc")),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            parse_api_token(&format!("ag_v1_{uuid}.{}", "zz".repeat(32))),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            parse_api_token("ag_v1_not-a-uuid"),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn hash_depends_on_every_input() {
        let token_uuid = Uuid::now_v7();
        let user = UserUuid::new();
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);

        let hash = hash_api_token("pepper", token_uuid, ApiTokenVersion::V1, user, &secret);

        assert_eq!(hash.len(), 64, "sha256 hex digest");
        assert_eq!(
            hash,
            hash_api_token("pepper", token_uuid, ApiTokenVersion::V1, user, &secret)
        );
        assert_ne!(
            hash,
            hash_api_token("other", token_uuid, ApiTokenVersion::V1, user, &secret)
        );
        assert_ne!(
            hash,
            hash_api_token("pepper", token_uuid, ApiTokenVersion::V1, UserUuid::new(), &secret)
        );
    }

    #[test]
    fn verifier_comparison() {
        assert!(verifier_matches("abc123", "abc123"));
        assert!(!verifier_matches("abc123", "abc124"));
        assert!(!verifier_matches("abc123", "abc12"));
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let secret = ApiTokenSecret::generate();

        assert_eq!(format!("{secret:?}"), "ApiTokenSecret(**redacted**)");
    }
}
