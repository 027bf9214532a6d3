//! Collection/resource-ID pairs that make up a KRN path.

use std::fmt;

use crate::constants::{PATH_SEPARATOR, VERSION_SEPARATOR};
use crate::error::{ParseError, ParseErrorKind};
use crate::resource_id::ResourceId;

/// One level of the resource hierarchy: a collection name and the ID of a
/// resource inside it.
///
/// Collection names are uninterpreted (plural nouns by convention) but must
/// be non-empty and free of the `/` and `@` delimiters.
///
/// # Examples
///
/// ```
/// use krn::Segment;
///
/// let seg = Segment::new("controls", "a-5-1").unwrap();
/// assert_eq!(seg.collection(), "controls");
/// assert_eq!(seg.resource_id(), "a-5-1");
/// assert_eq!(seg.to_string(), "controls/a-5-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    collection: String,
    resource_id: ResourceId,
}

impl Segment {
    /// Creates a segment from a collection name and a resource ID.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with kind `InvalidCollection` if the collection is
    /// empty or contains a delimiter, or `InvalidResourceId` if the ID is
    /// invalid.
    pub fn new(collection: &str, resource_id: &str) -> Result<Self, ParseError> {
        Self::new_inner(collection, resource_id)
            .map_err(|kind| ParseError::new(format!("{collection}/{resource_id}"), kind))
    }

    pub(crate) fn new_inner(collection: &str, resource_id: &str) -> Result<Self, ParseErrorKind> {
        check_collection(collection)?;
        let resource_id =
            ResourceId::parse(resource_id).map_err(|reason| ParseErrorKind::InvalidResourceId {
                resource_id: resource_id.to_string(),
                reason,
            })?;

        Ok(Self {
            collection: collection.to_string(),
            resource_id,
        })
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the resource ID.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        self.resource_id.as_str()
    }
}

pub(crate) fn check_collection(collection: &str) -> Result<(), ParseErrorKind> {
    let reason = if collection.is_empty() {
        "collection cannot be empty"
    } else if collection.contains(PATH_SEPARATOR) {
        "collection cannot contain '/'"
    } else if collection.contains(VERSION_SEPARATOR) {
        "collection cannot contain '@'"
    } else {
        return Ok(());
    };

    Err(ParseErrorKind::InvalidCollection {
        collection: collection.to_string(),
        reason,
    })
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PATH_SEPARATOR}{}", self.collection, self.resource_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ResourceIdError};

    #[test]
    fn new_valid_segment() {
        let seg = Segment::new("frameworks", "iso27001").unwrap();
        assert_eq!(seg.collection(), "frameworks");
        assert_eq!(seg.resource_id(), "iso27001");
    }

    #[test]
    fn empty_collection_fails() {
        let err = Segment::new("", "iso27001").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedIdentifier);
        assert!(matches!(err.kind, ParseErrorKind::InvalidCollection { .. }));
    }

    #[test]
    fn delimiter_in_collection_fails() {
        assert!(Segment::new("a/b", "x").is_err());
        assert!(Segment::new("a@b", "x").is_err());
    }

    #[test]
    fn collection_is_otherwise_uninterpreted() {
        let seg = Segment::new("Control Implementations", "ci-1").unwrap();
        assert_eq!(seg.collection(), "Control Implementations");
    }

    #[test]
    fn invalid_resource_id_fails() {
        let err = Segment::new("frameworks", "-bad").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidResourceId);
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidResourceId {
                reason: ResourceIdError::InvalidBoundary { .. },
                ..
            }
        ));
    }
}
