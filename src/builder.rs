//! Fluent builder for [`Krn`] values.
//!
//! Each step validates its piece immediately. The first failure is kept and
//! every later step becomes a no-op, so a chain reports the earliest error
//! when [`KrnBuilder::build`] is called.

use crate::constants::{DOMAIN, PATH_ROOT};
use crate::error::{ParseError, ParseErrorKind};
use crate::krn::Krn;
use crate::segment::Segment;
use crate::service::Service;
use crate::version::Version;

#[derive(Debug, Clone, Default)]
struct Draft {
    service: Option<Service>,
    segments: Vec<Segment>,
    version: Option<Version>,
}

/// A builder for constructing [`Krn`] instances step by step.
///
/// # Examples
///
/// ```
/// use krn::KrnBuilder;
///
/// let krn = KrnBuilder::new()
///     .service("catalog")
///     .resource("frameworks", "iso27001")
///     .resource("controls", "a-5-1")
///     .version("v1")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     krn.to_string(),
///     "//catalog.kopexa.com/frameworks/iso27001/controls/a-5-1@v1"
/// );
/// ```
///
/// A builder without any resource fails:
///
/// ```
/// use krn::{ErrorCode, KrnBuilder};
///
/// let err = KrnBuilder::new().version("v1").build().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::MalformedIdentifier);
/// ```
#[derive(Debug, Clone)]
pub struct KrnBuilder {
    state: Result<Draft, ParseError>,
}

impl KrnBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Ok(Draft::default()),
        }
    }

    /// Sets the service label. If called multiple times, the last value wins.
    #[must_use]
    pub fn service(self, service: &str) -> Self {
        self.step(|draft| {
            let parsed = Service::parse(service).map_err(|reason| {
                ParseError::new(
                    service,
                    ParseErrorKind::InvalidService {
                        service: service.to_string(),
                        reason,
                    },
                )
            })?;
            draft.service = Some(parsed);
            Ok(())
        })
    }

    /// Appends a collection/resource-ID pair.
    #[must_use]
    pub fn resource(self, collection: &str, resource_id: &str) -> Self {
        self.step(|draft| {
            draft.segments.push(Segment::new(collection, resource_id)?);
            Ok(())
        })
    }

    /// Sets the version tag. If called multiple times, the last value wins.
    #[must_use]
    pub fn version(self, version: &str) -> Self {
        self.step(|draft| {
            let parsed = Version::parse(version).map_err(|reason| {
                ParseError::new(
                    version,
                    ParseErrorKind::InvalidVersion {
                        version: version.to_string(),
                        reason,
                    },
                )
            })?;
            draft.version = Some(parsed);
            Ok(())
        })
    }

    /// Builds the final [`Krn`].
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by an earlier step, a
    /// `MissingResource` error if no resource was added, or `TooLong` if the
    /// result would exceed 4096 bytes.
    pub fn build(self) -> Result<Krn, ParseError> {
        let draft = self.state?;

        if draft.segments.is_empty() {
            let domain = match &draft.service {
                Some(service) => format!("{PATH_ROOT}{service}.{DOMAIN}"),
                None => format!("{PATH_ROOT}{DOMAIN}"),
            };
            return Err(ParseError::new(domain, ParseErrorKind::MissingResource));
        }

        // Too long to be worth echoing back as input.
        Krn::assemble_checked(draft.service, draft.segments, draft.version)
            .map_err(|kind| ParseError::new(String::new(), kind))
    }

    /// Builds the final [`Krn`], panicking on any error.
    ///
    /// # Panics
    ///
    /// Panics with the error [`KrnBuilder::build`] would return.
    #[must_use]
    #[track_caller]
    pub fn must_build(self) -> Krn {
        match self.build() {
            Ok(krn) => krn,
            Err(e) => panic!("{e}"),
        }
    }

    fn step(mut self, apply: impl FnOnce(&mut Draft) -> Result<(), ParseError>) -> Self {
        let result = match &mut self.state {
            Ok(draft) => apply(draft),
            Err(_) => return self,
        };
        if let Err(e) = result {
            self.state = Err(e);
        }
        self
    }
}

impl Default for KrnBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn build_single_resource() {
        let krn = KrnBuilder::new()
            .resource("frameworks", "iso27001")
            .build()
            .unwrap();
        assert_eq!(krn.to_string(), "//kopexa.com/frameworks/iso27001");
    }

    #[test]
    fn build_with_all_parts() {
        let krn = KrnBuilder::new()
            .service("catalog")
            .resource("frameworks", "iso27001")
            .resource("controls", "a-5-1")
            .version("v1")
            .build()
            .unwrap();
        assert_eq!(krn.service(), Some("catalog"));
        assert_eq!(krn.depth(), 2);
        assert_eq!(krn.version(), Some("v1"));
        assert_eq!(
            krn.to_string(),
            "//catalog.kopexa.com/frameworks/iso27001/controls/a-5-1@v1"
        );
    }

    #[test]
    fn build_output_parses_to_equal_value() {
        let built = KrnBuilder::new()
            .service("isms")
            .resource("tenants", "acme-corp")
            .version("latest")
            .build()
            .unwrap();
        let parsed = Krn::parse(built.as_str()).unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn last_service_and_version_win() {
        let krn = KrnBuilder::new()
            .service("catalog")
            .service("isms")
            .version("v1")
            .version("v2")
            .resource("frameworks", "iso27001")
            .build()
            .unwrap();
        assert_eq!(krn.to_string(), "//isms.kopexa.com/frameworks/iso27001@v2");
    }

    #[test]
    fn build_without_resource_fails() {
        let err = KrnBuilder::new().build().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingResource);
        assert_eq!(err.code(), ErrorCode::MalformedIdentifier);

        let err = KrnBuilder::new().service("catalog").build().unwrap_err();
        assert_eq!(err.input, "//catalog.kopexa.com");
    }

    #[test]
    fn first_error_wins() {
        let err = KrnBuilder::new()
            .resource("frameworks", "-bad")
            .version("nope nope")
            .service("BAD")
            .build()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidResourceId);
    }

    #[test]
    fn invalid_service_reports_domain_code() {
        let err = KrnBuilder::new()
            .service("Catalog")
            .resource("frameworks", "iso27001")
            .build()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidDomain);
    }

    #[test]
    fn invalid_version_fails() {
        let err = KrnBuilder::new()
            .resource("frameworks", "iso27001")
            .version("")
            .build()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidVersion);
    }

    #[test]
    fn invalid_collection_fails() {
        let err = KrnBuilder::new()
            .resource("", "iso27001")
            .build()
            .unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidCollection { .. }));
    }

    #[test]
    fn too_long_fails() {
        let id = "a".repeat(200);
        let mut builder = KrnBuilder::new();
        for _ in 0..25 {
            builder = builder.resource("c", &id);
        }
        let err = builder.build().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::TooLong { max: 4096, .. }));
    }

    #[test]
    fn shortcut_on_krn() {
        let krn = Krn::builder().resource("policies", "pol-1").must_build();
        assert_eq!(krn.basename(), "pol-1");
    }

    #[test]
    #[should_panic(expected = "at least one resource")]
    fn must_build_panics() {
        let _ = KrnBuilder::default().must_build();
    }

    #[test]
    fn clone_preserves_state() {
        let builder = KrnBuilder::new().resource("frameworks", "iso27001");
        let a = builder.clone().version("v1").build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a.without_version(), b);
    }
}
