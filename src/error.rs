//! Error types for KRN parsing, construction and lookup.

use std::error::Error;
use std::fmt;

use crate::constants::DOMAIN;
use crate::version::VersionPolicy;

/// Stable, matchable failure categories.
///
/// Every error in this crate maps to exactly one code, so callers can branch
/// on the category without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The input string was empty.
    EmptyIdentifier,
    /// The input does not have the `//domain/collection/id` shape.
    MalformedIdentifier,
    /// The domain (or its service label) is not acceptable.
    InvalidDomain,
    /// A resource ID violates the resource ID grammar.
    InvalidResourceId,
    /// The version tag violates the active version policy.
    InvalidVersion,
    /// A lookup by collection found no matching segment.
    ResourceNotFound,
}

impl ErrorCode {
    /// Returns the code as shared with other KRN implementations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyIdentifier => "EMPTY_KRN",
            Self::MalformedIdentifier => "INVALID_KRN",
            Self::InvalidDomain => "INVALID_DOMAIN",
            Self::InvalidResourceId => "INVALID_RESOURCE_ID",
            Self::InvalidVersion => "INVALID_VERSION",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when parsing or constructing a KRN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that was rejected
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// Returns the stable category of this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

/// Specific parsing and construction error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// KRN is empty
    Empty,
    /// KRN exceeds maximum length
    TooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Missing the leading `//`
    MissingPathRoot,
    /// The path does not form `domain/collection/id` pairs
    Malformed {
        /// What was wrong with the shape
        reason: &'static str,
    },
    /// A builder finished without any resource segment
    MissingResource,
    /// The domain is neither the root domain nor a subdomain of it
    InvalidDomain {
        /// The domain that was found
        domain: String,
    },
    /// The service label in front of the root domain is invalid
    InvalidService {
        /// The rejected service label
        service: String,
        /// Reason for invalidity
        reason: ServiceError,
    },
    /// A collection name is empty or contains a delimiter
    InvalidCollection {
        /// The rejected collection name
        collection: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// A resource ID is invalid
    InvalidResourceId {
        /// The rejected resource ID
        resource_id: String,
        /// Reason for invalidity
        reason: ResourceIdError,
    },
    /// The version tag is invalid
    InvalidVersion {
        /// The rejected version
        version: String,
        /// Reason for invalidity
        reason: VersionError,
    },
}

impl ParseErrorKind {
    /// Returns the stable category of this error kind.
    ///
    /// An invalid service label is reported as [`ErrorCode::InvalidDomain`],
    /// since the service is part of the domain token.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Empty => ErrorCode::EmptyIdentifier,
            Self::TooLong { .. }
            | Self::MissingPathRoot
            | Self::Malformed { .. }
            | Self::MissingResource
            | Self::InvalidCollection { .. } => ErrorCode::MalformedIdentifier,
            Self::InvalidDomain { .. } | Self::InvalidService { .. } => ErrorCode::InvalidDomain,
            Self::InvalidResourceId { .. } => ErrorCode::InvalidResourceId,
            Self::InvalidVersion { .. } => ErrorCode::InvalidVersion,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::TooLong { max, actual } => {
                write!(f, "KRN length {actual} exceeds maximum {max}")
            }
            Self::MissingPathRoot => write!(f, "KRN must start with '//'"),
            Self::Malformed { reason } => write!(f, "malformed KRN: {reason}"),
            Self::MissingResource => write!(f, "KRN must have at least one resource"),
            Self::InvalidDomain { domain } => {
                write!(f, "expected '{DOMAIN}' or '{{service}}.{DOMAIN}', found '{domain}'")
            }
            Self::InvalidService { service, reason } => {
                write!(f, "invalid service '{service}': {reason}")
            }
            Self::InvalidCollection { collection, reason } => {
                write!(f, "invalid collection '{collection}': {reason}")
            }
            Self::InvalidResourceId {
                resource_id,
                reason,
            } => write!(f, "invalid resource ID '{resource_id}': {reason}"),
            Self::InvalidVersion { version, reason } => {
                write!(f, "invalid version '{version}': {reason}")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "krn: rejected '{}': {}", self.input, self.kind)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidService { reason, .. } => Some(reason),
            ParseErrorKind::InvalidResourceId { reason, .. } => Some(reason),
            ParseErrorKind::InvalidVersion { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors for resource ID validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    /// Resource ID is empty
    Empty,
    /// Resource ID exceeds maximum length
    TooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Invalid character (not ASCII alphanumeric, `-`, `_` or `.`)
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// First or last character is not ASCII alphanumeric
    InvalidBoundary {
        /// The offending character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for ResourceIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "resource ID cannot be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "resource ID length {actual} exceeds maximum {max}")
            }
            Self::InvalidChar { char, position } => write!(
                f,
                "invalid character '{char}' at position {position}; only letters, digits, '-', '_' and '.' allowed"
            ),
            Self::InvalidBoundary { char, position } => write!(
                f,
                "resource ID must start and end with a letter or digit, found '{char}' at position {position}"
            ),
        }
    }
}

impl Error for ResourceIdError {}

/// Errors for service label validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Service is empty
    Empty,
    /// Service exceeds the DNS label length
    TooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Service must start with a lowercase letter
    MustStartWithLetter {
        /// The character found
        found: char,
    },
    /// Invalid character (not lowercase letter, digit or hyphen)
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// Service ends with a hyphen
    TrailingHyphen,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "service cannot be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "service length {actual} exceeds maximum {max}")
            }
            Self::MustStartWithLetter { found } => {
                write!(f, "service must start with a lowercase letter, found '{found}'")
            }
            Self::InvalidChar { char, position } => write!(
                f,
                "invalid character '{char}' at position {position}; only lowercase letters, digits, and hyphens allowed"
            ),
            Self::TrailingHyphen => write!(f, "service cannot end with a hyphen"),
        }
    }
}

impl Error for ServiceError {}

/// Errors for version validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Version is empty
    Empty,
    /// Version does not match the policy's format
    InvalidFormat {
        /// The policy the version was checked against
        policy: VersionPolicy,
    },
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "version cannot be empty"),
            Self::InvalidFormat { policy } => {
                write!(f, "expected {}", policy.expected_format())
            }
        }
    }
}

impl Error for VersionError {}

/// A lookup by collection name found no matching segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNotFound {
    /// The collection that was looked up
    pub collection: String,
}

impl ResourceNotFound {
    /// Returns [`ErrorCode::ResourceNotFound`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ResourceNotFound
    }
}

impl fmt::Display for ResourceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "krn: resource not found: {}", self.collection)
    }
}

impl Error for ResourceNotFound {}

/// Errors from looking up a resource in KRN text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The text is not a valid KRN
    Parse(ParseError),
    /// The KRN has no segment with the requested collection
    NotFound(ResourceNotFound),
}

impl LookupError {
    /// Returns the stable category of this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(e) => e.code(),
            Self::NotFound(e) => e.code(),
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::NotFound(e) => write!(f, "{e}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::NotFound(e) => Some(e),
        }
    }
}

impl From<ParseError> for LookupError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ResourceNotFound> for LookupError {
    fn from(e: ResourceNotFound) -> Self {
        Self::NotFound(e)
    }
}
