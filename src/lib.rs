//! Parser, validator and builder for Kopexa Resource Names (KRNs).
//!
//! A KRN is a stable, URL-safe identifier for any resource on the Kopexa
//! platform: frameworks, controls, tenants, evidence and so on. KRNs travel
//! through logs, URLs and database keys, so every value this crate produces
//! parses back to an equal value.
//!
//! # Overview
//!
//! KRNs have the structure:
//!
//! ```text
//! //[<service>.]kopexa.com/<collection>/<resource-id>[/<collection>/<resource-id>...][@<version>]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use krn::Krn;
//!
//! let krn = Krn::parse("//catalog.kopexa.com/frameworks/iso27001/controls/a-5-1@v2").unwrap();
//!
//! assert_eq!(krn.service(), Some("catalog"));
//! assert_eq!(krn.path(), "frameworks/iso27001/controls/a-5-1");
//! assert_eq!(krn.resource_id("frameworks").unwrap(), "iso27001");
//! assert_eq!(krn.version(), Some("v2"));
//!
//! let framework = krn.parent().unwrap();
//! assert_eq!(framework.to_string(), "//catalog.kopexa.com/frameworks/iso27001");
//! ```
//!
//! # Builder
//!
//! ```rust
//! use krn::Krn;
//!
//! let krn = Krn::builder()
//!     .resource("tenants", "acme-corp")
//!     .resource("workspaces", "main")
//!     .version("draft")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(krn.to_string(), "//kopexa.com/tenants/acme-corp/workspaces/main@draft");
//! ```
//!
//! # Grammar
//!
//! | Component | Rule |
//! |-----------|------|
//! | Total KRN | at most 4096 bytes |
//! | Service | 1-63 chars, `[a-z0-9-]`, starts with a letter, no trailing `-` |
//! | Collection | non-empty, no `/` or `@` |
//! | Resource ID | 1-200 chars, `[A-Za-z0-9._-]`, alphanumeric first and last |
//! | Version | see [`VersionPolicy`] |
//!
//! # Feature Flags
//!
//! - `serde`: string-form `Serialize`/`Deserialize` for all value types
//! - `tracing`: debug events for rejected input
//! - `permissive-versions`: switches [`VERSION_POLICY`] to
//!   [`VersionPolicy::Permissive`]

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod constants;
mod error;
#[cfg(kani)]
mod kani_impls;
mod krn;
pub mod prelude;
mod resource_id;
mod sanitize;
mod segment;
mod service;
mod version;

pub use builder::KrnBuilder;
pub use constants::{
    DOMAIN, MAX_KRN_LENGTH, MAX_RESOURCE_ID_LENGTH, MAX_SERVICE_LENGTH, PATH_ROOT,
    PATH_SEPARATOR, VERSION_SEPARATOR,
};
pub use error::{
    ErrorCode, LookupError, ParseError, ParseErrorKind, ResourceIdError, ResourceNotFound,
    ServiceError, VersionError,
};
pub use krn::{Krn, get_resource, is_valid};
pub use resource_id::{ResourceId, is_valid_resource_id};
pub use sanitize::safe_resource_id;
pub use segment::Segment;
pub use service::{Service, is_valid_service};
pub use version::{VERSION_POLICY, Version, VersionPolicy, is_valid_version};
