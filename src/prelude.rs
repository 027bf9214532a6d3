//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use krn::prelude::*;
//!
//! let krn = Krn::parse("//kopexa.com/frameworks/iso27001").unwrap();
//! assert!(is_valid(krn.as_str()));
//! ```

pub use crate::{
    // Core types
    Krn, ResourceId, Segment, Service, Version, VersionPolicy,
    // Builder
    KrnBuilder,
    // Errors
    ErrorCode, LookupError, ParseError, ParseErrorKind, ResourceIdError, ResourceNotFound,
    ServiceError, VersionError,
    // Free functions
    get_resource, is_valid, is_valid_resource_id, is_valid_service, is_valid_version,
    safe_resource_id,
    // Constants
    DOMAIN, MAX_KRN_LENGTH, VERSION_POLICY,
};
