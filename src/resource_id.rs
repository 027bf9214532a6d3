//! Resource ID type and grammar.

use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_RESOURCE_ID_LENGTH;
use crate::error::ResourceIdError;

/// A validated resource ID, the second half of every KRN segment.
///
/// Resource IDs are 1 to 200 characters of ASCII letters, digits, `-`, `_`
/// and `.`, starting and ending with a letter or digit.
///
/// # Examples
///
/// ```
/// use krn::ResourceId;
///
/// let id = ResourceId::parse("iso27001").unwrap();
/// assert_eq!(id.as_str(), "iso27001");
///
/// // Control numbers keep their dots and dashes
/// assert!(ResourceId::parse("PR.AC-1").is_ok());
/// assert!(ResourceId::parse("-draft").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Parses a resource ID from a string.
    ///
    /// # Errors
    ///
    /// Returns `ResourceIdError` if:
    /// - The ID is empty
    /// - The ID exceeds 200 characters
    /// - The ID contains a character outside `[A-Za-z0-9._-]`
    /// - The ID starts or ends with something other than a letter or digit
    pub fn parse(input: &str) -> Result<Self, ResourceIdError> {
        Self::check(input)?;
        Ok(Self(input.to_string()))
    }

    pub(crate) fn check(input: &str) -> Result<(), ResourceIdError> {
        if input.is_empty() {
            return Err(ResourceIdError::Empty);
        }

        if input.len() > MAX_RESOURCE_ID_LENGTH {
            return Err(ResourceIdError::TooLong {
                max: MAX_RESOURCE_ID_LENGTH,
                actual: input.len(),
            });
        }

        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(ResourceIdError::InvalidChar { char: c, position: i });
            }
        }

        // All chars are ASCII past this point, so byte positions are char positions.
        let bytes = input.as_bytes();
        let last = bytes.len() - 1;
        if !bytes[0].is_ascii_alphanumeric() {
            return Err(ResourceIdError::InvalidBoundary {
                char: char::from(bytes[0]),
                position: 0,
            });
        }
        if !bytes[last].is_ascii_alphanumeric() {
            return Err(ResourceIdError::InvalidBoundary {
                char: char::from(bytes[last]),
                position: last,
            });
        }

        Ok(())
    }

    /// Returns the resource ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character may appear anywhere in a resource ID.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
    }
}

/// Returns true if `input` is a valid resource ID.
///
/// ```
/// assert!(krn::is_valid_resource_id("a-5-1"));
/// assert!(!krn::is_valid_resource_id("a-5-1."));
/// ```
#[must_use]
pub fn is_valid_resource_id(input: &str) -> bool {
    ResourceId::check(input).is_ok()
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = ResourceIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_shapes() {
        for id in [
            "valid", "Valid123", "with-dash", "with_underscore", "with.dot", "a", "ab", "a1",
            "1a", "ABC123", "5.1.1", "PR.AC-1",
        ] {
            assert!(is_valid_resource_id(id), "{id} should be valid");
        }
    }

    #[test]
    fn parse_empty_fails() {
        assert!(matches!(ResourceId::parse(""), Err(ResourceIdError::Empty)));
    }

    #[test]
    fn parse_at_max_length() {
        let id = "a".repeat(200);
        assert!(ResourceId::parse(&id).is_ok());
    }

    #[test]
    fn parse_too_long_fails() {
        let id = "a".repeat(201);
        assert!(matches!(
            ResourceId::parse(&id),
            Err(ResourceIdError::TooLong { max: 200, actual: 201 })
        ));
    }

    #[test]
    fn parse_leading_dash_fails() {
        assert!(matches!(
            ResourceId::parse("-starts-with-dash"),
            Err(ResourceIdError::InvalidBoundary { char: '-', position: 0 })
        ));
    }

    #[test]
    fn parse_trailing_dot_fails() {
        assert!(matches!(
            ResourceId::parse("ends-with-dot."),
            Err(ResourceIdError::InvalidBoundary { char: '.', position: 13 })
        ));
    }

    #[test]
    fn parse_underscore_boundary_fails() {
        assert!(!is_valid_resource_id("_x"));
        assert!(!is_valid_resource_id("x_"));
    }

    #[test]
    fn parse_invalid_char_fails() {
        assert!(matches!(
            ResourceId::parse("has space"),
            Err(ResourceIdError::InvalidChar { char: ' ', position: 3 })
        ));
        assert!(!is_valid_resource_id("has@symbol"));
        assert!(!is_valid_resource_id("has/slash"));
        assert!(!is_valid_resource_id("caf\u{e9}"));
    }

    #[test]
    fn boundary_rule_holds_at_every_length() {
        for len in [1, 2, 50, 199] {
            let body = "a".repeat(len);
            assert!(!is_valid_resource_id(&format!("-{body}")));
            assert!(!is_valid_resource_id(&format!("{body}-")));
            assert!(!is_valid_resource_id(&format!(".{body}")));
            assert!(!is_valid_resource_id(&format!("{body}.")));
        }
    }
}
