//! Constants for KRN validation.

/// The naming authority every KRN lives under.
pub const DOMAIN: &str = "kopexa.com";

/// Marker that opens every KRN.
pub const PATH_ROOT: &str = "//";

/// Separates path tokens.
pub const PATH_SEPARATOR: char = '/';

/// Separates the resource path from the version tag.
pub const VERSION_SEPARATOR: char = '@';

/// Maximum total KRN length in bytes, checked before any splitting.
pub const MAX_KRN_LENGTH: usize = 4096;

/// Maximum resource ID length in characters.
pub const MAX_RESOURCE_ID_LENGTH: usize = 200;

/// Maximum service label length (a DNS label).
pub const MAX_SERVICE_LENGTH: usize = 63;

/// Version keywords accepted by the strict policy.
pub const VERSION_KEYWORDS: [&str; 2] = ["latest", "draft"];

/// Maximum number of numeric groups in a strict `v` version (`v1.2.3`).
pub const MAX_VERSION_GROUPS: usize = 3;
