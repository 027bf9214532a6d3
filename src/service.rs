//! Service label type.

use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_SERVICE_LENGTH;
use crate::error::ServiceError;

/// A validated service label, the optional subdomain in front of the root
/// domain (`//catalog.kopexa.com/...`).
///
/// Service labels follow DNS label rules restricted to lowercase: 1 to 63
/// characters of lowercase letters, digits and hyphens, starting with a
/// letter and not ending with a hyphen.
///
/// # Examples
///
/// ```
/// use krn::Service;
///
/// let service = Service::parse("catalog").unwrap();
/// assert_eq!(service.as_str(), "catalog");
///
/// assert!(Service::parse("Catalog").is_err());
/// assert!(Service::parse("1catalog").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Service(String);

impl Service {
    /// Parses a service label from a string.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if:
    /// - The label is empty
    /// - The label exceeds 63 characters
    /// - The label does not start with a lowercase letter
    /// - The label contains anything but lowercase letters, digits and hyphens
    /// - The label ends with a hyphen
    pub fn parse(input: &str) -> Result<Self, ServiceError> {
        Self::check(input)?;
        Ok(Self(input.to_string()))
    }

    pub(crate) fn check(input: &str) -> Result<(), ServiceError> {
        let Some(first) = input.chars().next() else {
            return Err(ServiceError::Empty);
        };

        if input.len() > MAX_SERVICE_LENGTH {
            return Err(ServiceError::TooLong {
                max: MAX_SERVICE_LENGTH,
                actual: input.len(),
            });
        }

        if !first.is_ascii_lowercase() {
            return Err(ServiceError::MustStartWithLetter { found: first });
        }

        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(ServiceError::InvalidChar { char: c, position: i });
            }
        }

        if input.ends_with('-') {
            return Err(ServiceError::TrailingHyphen);
        }

        Ok(())
    }

    /// Returns the service label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character is valid in a service label.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
    }
}

/// Returns true if `input` is a valid service label.
///
/// ```
/// assert!(krn::is_valid_service("isms"));
/// assert!(!krn::is_valid_service("service_name"));
/// ```
#[must_use]
pub fn is_valid_service(input: &str) -> bool {
    Service::check(input).is_ok()
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Service {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Service {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Service {
    type Error = ServiceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Service {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Service {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
