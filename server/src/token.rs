//! Bearer token codec.
//!
//! A token is the standard Base64 encoding of `"{identity}|{unix_millis}"`.
//! There is no signature and no expiry: anyone can mint a token for any
//! identity, and every issued token stays valid forever. Treat this as a
//! placeholder for a real session scheme, not as authentication.
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use chrono::Utc;

const DELIMITER: char = '|';

/// Standard alphabet that accepts input with or without `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Stateless encoder/decoder for bearer tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCodec;

impl TokenCodec {
    pub fn new() -> Self {
        TokenCodec
    }

    /// Issue a token for `identity` stamped with the current time.
    pub fn issue(&self, identity: &str) -> String {
        self.issue_at(identity, Utc::now().timestamp_millis())
    }

    pub fn issue_at(&self, identity: &str, unix_millis: i64) -> String {
        STANDARD.encode(format!("{identity}{DELIMITER}{unix_millis}"))
    }

    /// Recover the identity carried by `token`.
    ///
    /// Padding is optional. Returns `None` when the token is not valid
    /// Base64, not UTF-8, or does not decode to exactly two `|`-separated
    /// fields. Trailing empty fields are discarded before counting, so
    /// `"bob|"` is rejected.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let bytes = LENIENT.decode(token).ok()?;
        let decoded = String::from_utf8(bytes).ok()?;

        let mut parts: Vec<&str> = decoded.split(DELIMITER).collect();
        while parts.last() == Some(&"") {
            parts.pop();
        }

        match parts.as_slice() {
            [identity, _issued_at] => Some((*identity).to_string()),
            _ => None,
        }
    }
}
