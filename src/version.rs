//! Version tag type and the version grammar policies.

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_VERSION_GROUPS, VERSION_KEYWORDS};
use crate::error::VersionError;

/// Which version tags a KRN accepts after `@`.
///
/// The two policies disagree on tags such as `2022` or `1.0.0`: the strict
/// policy only knows `latest`, `draft` and `v`-prefixed numbers, while the
/// permissive policy accepts any tag used by external catalogs (OSCAL and
/// similar).
///
/// The crate applies [`VERSION_POLICY`] everywhere a version is validated.
///
/// # Examples
///
/// ```
/// use krn::VersionPolicy;
///
/// assert!(VersionPolicy::Strict.accepts("v1.2.3"));
/// assert!(!VersionPolicy::Strict.accepts("2022"));
/// assert!(VersionPolicy::Permissive.accepts("2022-01-15"));
/// assert!(!VersionPolicy::Permissive.accepts("v"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionPolicy {
    /// `latest`, `draft`, or `v` followed by one to three dot-separated numbers.
    Strict,
    /// Any ASCII alphanumeric tag with inner `-`, `_` or `.`; never a bare `v`.
    Permissive,
}

/// The policy used by parsing, building and [`crate::Krn::with_version`].
///
/// `Strict` unless the `permissive-versions` feature is enabled.
pub const VERSION_POLICY: VersionPolicy = if cfg!(feature = "permissive-versions") {
    VersionPolicy::Permissive
} else {
    VersionPolicy::Strict
};

impl VersionPolicy {
    /// Returns true if `version` is acceptable under this policy.
    #[must_use]
    pub fn accepts(self, version: &str) -> bool {
        self.check(version).is_ok()
    }

    /// Validates `version` under this policy.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::Empty` for an empty tag and
    /// `VersionError::InvalidFormat` for anything the policy does not accept.
    pub fn check(self, version: &str) -> Result<(), VersionError> {
        if version.is_empty() {
            return Err(VersionError::Empty);
        }

        let valid = match self {
            Self::Strict => is_strict_version(version),
            Self::Permissive => is_permissive_version(version),
        };

        if valid {
            Ok(())
        } else {
            Err(VersionError::InvalidFormat { policy: self })
        }
    }

    /// Human-readable description of the accepted format.
    #[must_use]
    pub const fn expected_format(self) -> &'static str {
        match self {
            Self::Strict => "'latest', 'draft', or 'v<major>[.<minor>[.<patch>]]'",
            Self::Permissive => {
                "letters and digits with inner '-', '_' or '.', other than a bare 'v'"
            }
        }
    }
}

fn is_strict_version(version: &str) -> bool {
    if VERSION_KEYWORDS.contains(&version) {
        return true;
    }

    let Some(numbers) = version.strip_prefix('v') else {
        return false;
    };

    let mut groups = 0;
    for group in numbers.split('.') {
        groups += 1;
        if groups > MAX_VERSION_GROUPS
            || group.is_empty()
            || !group.bytes().all(|b| b.is_ascii_digit())
        {
            return false;
        }
    }
    true
}

fn is_permissive_version(version: &str) -> bool {
    if version == "v" {
        return false;
    }

    let bytes = version.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// Returns true if `input` is a valid version under [`VERSION_POLICY`].
///
/// ```
/// assert!(krn::is_valid_version("latest"));
/// assert!(!krn::is_valid_version(""));
/// ```
#[must_use]
pub fn is_valid_version(input: &str) -> bool {
    VERSION_POLICY.accepts(input)
}

/// A version tag validated under [`VERSION_POLICY`].
///
/// # Examples
///
/// ```
/// use krn::Version;
///
/// let version = Version::parse("v2").unwrap();
/// assert_eq!(version.as_str(), "v2");
/// assert!(Version::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(String);

impl Version {
    /// Parses a version tag (without the leading `@`).
    ///
    /// # Errors
    ///
    /// Returns `VersionError` if the tag is empty or not accepted by
    /// [`VERSION_POLICY`].
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        VERSION_POLICY.check(input)?;
        Ok(Self(input.to_string()))
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the `latest` and `draft` keywords.
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        VERSION_KEYWORDS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Version {
    type Error = VersionError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
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
    fn strict_accepts_keywords_and_v_numbers() {
        for v in ["v1", "v12", "v123", "v1.2", "v1.2.3", "v10.20.30", "latest", "draft"] {
            assert!(VersionPolicy::Strict.accepts(v), "{v} should be valid");
        }
    }

    #[test]
    fn strict_rejects_everything_else() {
        for v in [
            "", "1", "1.0", "2022", "v", "v1.2.3.4", "v1.", "v.1", "v1..2", "version1",
            "release", "invalid", "V1", "vx",
        ] {
            assert!(!VersionPolicy::Strict.accepts(v), "{v} should be invalid");
        }
    }

    #[test]
    fn permissive_accepts_external_tags() {
        for v in [
            "v1", "v1.2.3", "v1.2.3.4", "2022", "2022-01-15", "1.0.0", "latest", "draft",
            "rev_4", "R2",
        ] {
            assert!(VersionPolicy::Permissive.accepts(v), "{v} should be valid");
        }
    }

    #[test]
    fn permissive_rejects_bad_boundaries() {
        for v in ["", "v", "-1", "1-", ".1", "1.", "has space", "a@b", "a/b"] {
            assert!(!VersionPolicy::Permissive.accepts(v), "{v} should be invalid");
        }
    }

    #[test]
    fn check_reports_policy() {
        assert_eq!(VersionPolicy::Strict.check(""), Err(VersionError::Empty));
        assert_eq!(
            VersionPolicy::Strict.check("2022"),
            Err(VersionError::InvalidFormat {
                policy: VersionPolicy::Strict
            })
        );
    }

    #[test]
    fn crate_policy_drives_free_function() {
        assert_eq!(is_valid_version("2022"), VERSION_POLICY.accepts("2022"));
        assert!(is_valid_version("v1.2.3"));
    }

    #[test]
    fn keyword_detection() {
        assert!(Version::parse("latest").unwrap().is_keyword());
        assert!(!Version::parse("v1").unwrap().is_keyword());
    }
}
