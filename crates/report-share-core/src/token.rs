//! Share tokens: the opaque, URL-safe part of a share link.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// URL-safe token alphabet.
pub const TOKEN_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Default generated token length.
pub const DEFAULT_TOKEN_LENGTH: usize = 10;

/// Shortest token length accepted for generation.
pub const MIN_TOKEN_LENGTH: usize = 8;

/// Longest token length accepted for generation or lookup.
pub const MAX_TOKEN_LENGTH: usize = 64;

/// An opaque share token.
///
/// `Display` is redacted to the first four characters so tokens can be
/// logged without leaking the link. Use [`ShareToken::as_str`] for the
/// full value. Deserialization goes through [`ShareToken::parse`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareToken(String);

impl ShareToken {
    /// Generate a fresh random token using the thread-local RNG.
    pub fn generate(len: usize) -> Result<Self, ValidationError> {
        Self::generate_with(&mut rand::thread_rng(), len)
    }

    /// Generate a token from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Result<Self, ValidationError> {
        if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&len) {
            return Err(ValidationError::InvalidTokenLength {
                min: MIN_TOKEN_LENGTH,
                max: MAX_TOKEN_LENGTH,
                got: len,
            });
        }

        let token = (0..len)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect();
        Ok(Self(token))
    }

    /// Parse a token presented in a share URL.
    ///
    /// Tokens are matched exactly; this only rejects input that could never
    /// have been issued.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_TOKEN_LENGTH
            && raw.bytes().all(|b| TOKEN_ALPHABET.contains(&b));
        if well_formed {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::MalformedToken(raw.to_string()))
        }
    }

    /// Get the full token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(4)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl TryFrom<String> for ShareToken {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<ShareToken> for String {
    fn from(token: ShareToken) -> Self {
        token.0
    }
}

impl fmt::Debug for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShareToken({}…)", self.redacted())
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…", self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_length_and_alphabet() {
        let token = ShareToken::generate(DEFAULT_TOKEN_LENGTH).unwrap();
        assert_eq!(token.as_str().len(), DEFAULT_TOKEN_LENGTH);
        assert!(token.as_str().bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_deterministic_with_seed() {
        let a = ShareToken::generate_with(&mut StdRng::seed_from_u64(7), 12).unwrap();
        let b = ShareToken::generate_with(&mut StdRng::seed_from_u64(7), 12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rejects_bad_length() {
        assert!(ShareToken::generate(4).is_err());
        assert!(ShareToken::generate(MAX_TOKEN_LENGTH + 1).is_err());
    }

    #[test]
    fn test_parse() {
        assert!(ShareToken::parse("abc").is_ok());
        assert!(ShareToken::parse("V1StGXR8_Z").is_ok());
        assert!(ShareToken::parse("").is_err());
        assert!(ShareToken::parse("has space").is_err());
        assert!(ShareToken::parse("../etc").is_err());
    }

    #[test]
    fn test_display_is_redacted() {
        let token = ShareToken::parse("abcdefghij").unwrap();
        assert_eq!(token.to_string(), "abcd…");
        assert!(!format!("{:?}", token).contains("efghij"));
    }

    #[test]
    fn test_deserialize_validates() {
        let token: ShareToken = serde_json::from_str("\"V1StGXR8_Z\"").unwrap();
        assert_eq!(token.as_str(), "V1StGXR8_Z");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"V1StGXR8_Z\"");

        assert!(serde_json::from_str::<ShareToken>("\"aéé\"").is_err());
        assert!(serde_json::from_str::<ShareToken>("\"\"").is_err());
    }

    #[test]
    fn test_redaction_respects_char_boundaries() {
        // Not constructible through `parse`; checks the formatter alone
        let token = ShareToken("aéé€x".to_string());
        assert_eq!(token.to_string(), "aéé€…");
        assert_eq!(ShareToken("ab".to_string()).to_string(), "ab…");
    }

    proptest! {
        #[test]
        fn prop_generated_tokens_parse(seed: u64, len in MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH) {
            let token = ShareToken::generate_with(&mut StdRng::seed_from_u64(seed), len).unwrap();
            prop_assert_eq!(token.as_str().len(), len);
            prop_assert_eq!(ShareToken::parse(token.as_str()).unwrap(), token);
        }
    }
}
