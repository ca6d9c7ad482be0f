//! Line colour code type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid colour code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color code {input:?}: {reason}")]
pub struct InvalidColorCode {
    input: String,
    reason: &'static str,
}

/// A `#RRGGBB` hex colour code.
///
/// # Examples
///
/// ```
/// use metro_server::domain::ColorCode;
///
/// let red = ColorCode::parse("#FF0000").unwrap();
/// assert_eq!(red.as_str(), "#FF0000");
///
/// // Five hex digits is rejected
/// assert!(ColorCode::parse("#12345").is_err());
/// // So is a missing hash
/// assert!(ColorCode::parse("FF0000").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorCode([u8; 7]);

impl ColorCode {
    /// Parse a colour code.
    ///
    /// The input must be `#` followed by exactly six hex digits. Case is preserved.
    pub fn parse(s: &str) -> Result<Self, InvalidColorCode> {
        let bytes = s.as_bytes();
        let invalid = |reason| InvalidColorCode {
            input: s.to_string(),
            reason,
        };

        if bytes.first() != Some(&b'#') {
            return Err(invalid("must start with '#'"));
        }
        if bytes.len() != 7 {
            return Err(invalid("must have exactly 6 hex digits"));
        }
        if !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
            return Err(invalid("must contain only hex digits"));
        }

        let mut buf = [0u8; 7];
        buf.copy_from_slice(bytes);
        Ok(ColorCode(buf))
    }

    /// Returns the colour code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored
        std::str::from_utf8(&self.0).unwrap_or("#000000")
    }
}

impl TryFrom<String> for ColorCode {
    type Error = InvalidColorCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ColorCode::parse(&value)
    }
}

impl From<ColorCode> for String {
    fn from(code: ColorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Debug for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorCode({})", self.as_str())
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(ColorCode::parse("#AABBCC").is_ok());
        assert!(ColorCode::parse("#aabbcc").is_ok());
        assert!(ColorCode::parse("#0f0F09").is_ok());
    }

    #[test]
    fn reject_five_digits() {
        assert!(ColorCode::parse("#12345").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(ColorCode::parse("").is_err());
        assert!(ColorCode::parse("#").is_err());
        assert!(ColorCode::parse("#1234567").is_err());
    }

    #[test]
    fn reject_missing_hash() {
        assert!(ColorCode::parse("AABBCC").is_err());
        assert!(ColorCode::parse("AABBCCD").is_err());
    }

    #[test]
    fn reject_non_hex() {
        assert!(ColorCode::parse("#GGHHII").is_err());
        assert!(ColorCode::parse("#12 456").is_err());
    }

    #[test]
    fn error_display() {
        let err = ColorCode::parse("#12345").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid color code \"#12345\": must have exactly 6 hex digits"
        );
    }

    #[test]
    fn preserves_case() {
        let c = ColorCode::parse("#aBcDeF").unwrap();
        assert_eq!(c.to_string(), "#aBcDeF");
        assert_eq!(format!("{:?}", c), "ColorCode(#aBcDeF)");
    }

    #[test]
    fn serde_roundtrip_and_rejection() {
        let c: ColorCode = serde_json::from_str("\"#008000\"").unwrap();
        assert_eq!(c.as_str(), "#008000");
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#008000\"");
        assert!(serde_json::from_str::<ColorCode>("\"green\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_always_parses(s in "#[0-9A-Fa-f]{6}") {
            let c = ColorCode::parse(&s).unwrap();
            prop_assert_eq!(c.as_str(), s.as_str());
        }

        #[test]
        fn wrong_digit_count_rejected(s in "#[0-9A-Fa-f]{0,5}|#[0-9A-Fa-f]{7,10}") {
            prop_assert!(ColorCode::parse(&s).is_err());
        }

        #[test]
        fn missing_hash_rejected(s in "[0-9A-Fa-f]{6,7}") {
            prop_assert!(ColorCode::parse(&s).is_err());
        }
    }
}
