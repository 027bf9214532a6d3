//! Main KRN type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::builder::KrnBuilder;
use crate::constants::{DOMAIN, MAX_KRN_LENGTH, PATH_ROOT, PATH_SEPARATOR, VERSION_SEPARATOR};
use crate::error::{LookupError, ParseError, ParseErrorKind, ResourceNotFound};
use crate::segment::Segment;
use crate::service::Service;
use crate::version::Version;

/// A parsed and validated Kopexa Resource Name.
///
/// KRNs address resources under the `kopexa.com` naming authority as a
/// hierarchy of collection/resource-ID pairs, optionally scoped to a service
/// and tagged with a version.
///
/// # Structure
///
/// ```text
/// //[<service>.]kopexa.com/<collection>/<resource-id>[/<collection>/<resource-id>...][@<version>]
/// ```
///
/// Values are immutable: every transformation returns a new `Krn`. Two KRNs
/// are equal when their canonical text is equal.
///
/// # Examples
///
/// ```
/// use krn::Krn;
///
/// let krn = Krn::parse("//kopexa.com/frameworks/iso27001/controls/a-5-1@v2").unwrap();
/// assert_eq!(krn.depth(), 2);
/// assert_eq!(krn.basename(), "a-5-1");
/// assert_eq!(krn.resource_id("frameworks").unwrap(), "iso27001");
/// assert_eq!(krn.version(), Some("v2"));
///
/// // With a service scope
/// let krn = Krn::parse("//catalog.kopexa.com/frameworks/iso27001").unwrap();
/// assert_eq!(krn.service(), Some("catalog"));
/// assert_eq!(krn.full_domain(), "catalog.kopexa.com");
/// ```
#[derive(Debug, Clone)]
pub struct Krn {
    service: Option<Service>,
    segments: Vec<Segment>,
    version: Option<Version>,
    /// Canonical string representation
    normalized: String,
}

impl Krn {
    /// Parses a KRN from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is empty
    /// - The input exceeds 4096 bytes
    /// - The input does not start with `//`
    /// - The domain is not `kopexa.com` or `{service}.kopexa.com`
    /// - The path is not a non-empty list of collection/resource-ID pairs
    /// - Any resource ID, the service label, or the version is invalid
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| {
            #[cfg(feature = "tracing")]
            tracing::debug!(input, code = %kind.code(), "rejected KRN");
            ParseError::new(input, kind)
        })
    }

    /// Parses a KRN, panicking if it is invalid.
    ///
    /// Meant for literals and input that was validated earlier.
    ///
    /// # Panics
    ///
    /// Panics with the parse error if `input` is not a valid KRN.
    #[must_use]
    #[track_caller]
    pub fn must_parse(input: &str) -> Self {
        match Self::parse(input) {
            Ok(krn) => krn,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns a builder for assembling a KRN piece by piece.
    #[must_use]
    pub fn builder() -> KrnBuilder {
        KrnBuilder::new()
    }

    /// Creates a child of `parent` with one more collection/resource-ID pair.
    ///
    /// The child keeps the parent's service but not its version.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the collection is empty or contains a
    /// delimiter, the resource ID is invalid, or the result would be too long.
    ///
    /// # Examples
    ///
    /// ```
    /// use krn::Krn;
    ///
    /// let framework = Krn::parse("//kopexa.com/frameworks/iso27001@v1").unwrap();
    /// let control = Krn::new_child(&framework, "controls", "a-5-1").unwrap();
    /// assert_eq!(control.to_string(), "//kopexa.com/frameworks/iso27001/controls/a-5-1");
    /// ```
    pub fn new_child(parent: &Self, collection: &str, resource_id: &str) -> Result<Self, ParseError> {
        parent.child(collection, resource_id)
    }

    /// Parses `parent` and creates a child of it.
    ///
    /// # Errors
    ///
    /// Returns the parse error of `parent` unchanged, or any error of
    /// [`Krn::new_child`].
    pub fn new_child_from_str(
        parent: &str,
        collection: &str,
        resource_id: &str,
    ) -> Result<Self, ParseError> {
        Self::parse(parent)?.child(collection, resource_id)
    }

    /// Returns the service label, if present.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.service.as_ref().map(Service::as_str)
    }

    /// Returns true if the KRN is scoped to a service.
    #[must_use]
    pub const fn has_service(&self) -> bool {
        self.service.is_some()
    }

    /// Returns the version tag, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().map(Version::as_str)
    }

    /// Returns true if the KRN carries a version tag.
    #[must_use]
    pub const fn has_version(&self) -> bool {
        self.version.is_some()
    }

    /// Returns the domain including the service, e.g. `catalog.kopexa.com`.
    #[must_use]
    pub fn full_domain(&self) -> &str {
        let start = PATH_ROOT.len();
        &self.normalized[start..start + self.full_domain_len()]
    }

    /// Returns the resource path without domain and version,
    /// e.g. `frameworks/iso27001/controls/a-5-1`.
    #[must_use]
    pub fn path(&self) -> &str {
        let start = PATH_ROOT.len() + self.full_domain_len() + 1;
        let end = self.normalized.len() - self.version.as_ref().map_or(0, |v| v.as_str().len() + 1);
        self.normalized.get(start..end).unwrap_or("")
    }

    /// Alias for [`Krn::path`].
    #[must_use]
    pub fn relative_resource_name(&self) -> &str {
        self.path()
    }

    /// Returns the resource ID of the last segment.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.segments.last().map_or("", Segment::resource_id)
    }

    /// Returns the collection of the last segment.
    #[must_use]
    pub fn basename_collection(&self) -> &str {
        self.segments.last().map_or("", Segment::collection)
    }

    /// Returns the number of collection/resource-ID pairs.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns the segments from root to leaf.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the resource ID stored under `collection`.
    ///
    /// When a collection name repeats at several levels, the outermost one
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no segment has that collection.
    pub fn resource_id(&self, collection: &str) -> Result<&str, ResourceNotFound> {
        self.segments
            .iter()
            .find(|seg| seg.collection() == collection)
            .map(Segment::resource_id)
            .ok_or_else(|| ResourceNotFound {
                collection: collection.to_string(),
            })
    }

    /// Returns the resource ID stored under `collection`, panicking if absent.
    ///
    /// # Panics
    ///
    /// Panics if no segment has that collection.
    #[must_use]
    #[track_caller]
    pub fn must_resource_id(&self, collection: &str) -> &str {
        match self.resource_id(collection) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns true if some segment has the given collection.
    #[must_use]
    pub fn has_resource(&self, collection: &str) -> bool {
        self.segments.iter().any(|seg| seg.collection() == collection)
    }

    /// Returns the canonical KRN string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns true if `other` is the canonical text of an equal KRN.
    ///
    /// Invalid text is never equal.
    #[must_use]
    pub fn equals_str(&self, other: &str) -> bool {
        // Canonical text re-parses to itself, so text equality is KRN equality.
        self.normalized == other
    }

    /// Returns the KRN one level up, or `None` for a single-segment KRN.
    ///
    /// The parent keeps the service but never the version.
    ///
    /// # Examples
    ///
    /// ```
    /// use krn::Krn;
    ///
    /// let control = Krn::parse("//isms.kopexa.com/frameworks/iso27001/controls/a-5-1@v3").unwrap();
    /// let parent = control.parent().unwrap();
    /// assert_eq!(parent.to_string(), "//isms.kopexa.com/frameworks/iso27001");
    /// assert!(parent.parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, ancestors) = self.segments.split_last()?;
        if ancestors.is_empty() {
            return None;
        }
        Some(Self::assemble(self.service.clone(), ancestors.to_vec(), None))
    }

    /// Returns a copy tagged with `version`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the version is not accepted by
    /// [`crate::VERSION_POLICY`] or the result would be too long.
    pub fn with_version(&self, version: &str) -> Result<Self, ParseError> {
        let parsed = Version::parse(version).map_err(|reason| {
            ParseError::new(
                version,
                ParseErrorKind::InvalidVersion {
                    version: version.to_string(),
                    reason,
                },
            )
        })?;

        Self::assemble_checked(self.service.clone(), self.segments.clone(), Some(parsed))
            .map_err(|kind| ParseError::new(version, kind))
    }

    /// Returns a copy without a version tag.
    #[must_use]
    pub fn without_version(&self) -> Self {
        Self::assemble(self.service.clone(), self.segments.clone(), None)
    }

    /// Returns a copy scoped to `service`; segments and version are kept.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the service label is invalid or the result
    /// would be too long.
    pub fn with_service(&self, service: &str) -> Result<Self, ParseError> {
        let parsed = Service::parse(service).map_err(|reason| {
            ParseError::new(
                service,
                ParseErrorKind::InvalidService {
                    service: service.to_string(),
                    reason,
                },
            )
        })?;

        Self::assemble_checked(Some(parsed), self.segments.clone(), self.version.clone())
            .map_err(|kind| ParseError::new(service, kind))
    }

    /// Returns a copy without a service scope; segments and version are kept.
    #[must_use]
    pub fn without_service(&self) -> Self {
        Self::assemble(None, self.segments.clone(), self.version.clone())
    }

    /// Returns a child KRN; see [`Krn::new_child`].
    ///
    /// # Errors
    ///
    /// Same as [`Krn::new_child`].
    pub fn child(&self, collection: &str, resource_id: &str) -> Result<Self, ParseError> {
        let segment = Segment::new(collection, resource_id)?;

        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);

        Self::assemble_checked(self.service.clone(), segments, None)
            .map_err(|kind| ParseError::new(format!("{collection}/{resource_id}"), kind))
    }

    pub(crate) fn assemble_checked(
        service: Option<Service>,
        segments: Vec<Segment>,
        version: Option<Version>,
    ) -> Result<Self, ParseErrorKind> {
        let krn = Self::assemble(service, segments, version);
        let len = krn.normalized.len();

        if len > MAX_KRN_LENGTH {
            return Err(ParseErrorKind::TooLong {
                max: MAX_KRN_LENGTH,
                actual: len,
            });
        }

        Ok(krn)
    }

    fn assemble(service: Option<Service>, segments: Vec<Segment>, version: Option<Version>) -> Self {
        let normalized = Self::normalize(service.as_ref(), &segments, version.as_ref());
        Self {
            service,
            segments,
            version,
            normalized,
        }
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        if input.is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        if input.len() > MAX_KRN_LENGTH {
            return Err(ParseErrorKind::TooLong {
                max: MAX_KRN_LENGTH,
                actual: input.len(),
            });
        }

        let rest = input
            .strip_prefix(PATH_ROOT)
            .ok_or(ParseErrorKind::MissingPathRoot)?;

        let (rest, version) = Self::split_version(rest)?;

        let tokens: Vec<&str> = rest.split(PATH_SEPARATOR).collect();
        if tokens.len() < 3 {
            return Err(ParseErrorKind::Malformed {
                reason: "must have at least domain/collection/id",
            });
        }

        let service = Self::parse_domain(tokens[0])?;

        let pairs = tokens[1..].chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(ParseErrorKind::Malformed {
                reason: "resource path must be pairs of collection/id",
            });
        }

        let segments = pairs
            .map(|pair| Self::parse_segment(pair[0], pair[1]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::assemble(service, segments, version))
    }

    fn split_version(input: &str) -> Result<(&str, Option<Version>), ParseErrorKind> {
        // Resource IDs cannot contain '@', so the last one starts the version.
        let Some(at_idx) = input.rfind(VERSION_SEPARATOR) else {
            return Ok((input, None));
        };

        let rest = &input[..at_idx];
        let version_str = &input[at_idx + 1..];
        let version =
            Version::parse(version_str).map_err(|reason| ParseErrorKind::InvalidVersion {
                version: version_str.to_string(),
                reason,
            })?;

        Ok((rest, Some(version)))
    }

    fn parse_domain(domain: &str) -> Result<Option<Service>, ParseErrorKind> {
        if domain == DOMAIN {
            return Ok(None);
        }

        let label = domain
            .strip_suffix(DOMAIN)
            .and_then(|prefix| prefix.strip_suffix('.'))
            .ok_or_else(|| ParseErrorKind::InvalidDomain {
                domain: domain.to_string(),
            })?;

        Service::parse(label)
            .map(Some)
            .map_err(|reason| ParseErrorKind::InvalidService {
                service: label.to_string(),
                reason,
            })
    }

    fn parse_segment(collection: &str, resource_id: &str) -> Result<Segment, ParseErrorKind> {
        if collection.is_empty() {
            return Err(ParseErrorKind::Malformed {
                reason: "empty collection name",
            });
        }

        if resource_id.is_empty() {
            return Err(ParseErrorKind::Malformed {
                reason: "empty resource ID",
            });
        }

        Segment::new_inner(collection, resource_id)
    }

    fn normalize(service: Option<&Service>, segments: &[Segment], version: Option<&Version>) -> String {
        let mut result = String::from(PATH_ROOT);

        if let Some(service) = service {
            result.push_str(service.as_str());
            result.push('.');
        }
        result.push_str(DOMAIN);

        for seg in segments {
            result.push(PATH_SEPARATOR);
            result.push_str(seg.collection());
            result.push(PATH_SEPARATOR);
            result.push_str(seg.resource_id());
        }

        if let Some(version) = version {
            result.push(VERSION_SEPARATOR);
            result.push_str(version.as_str());
        }

        result
    }

    fn full_domain_len(&self) -> usize {
        DOMAIN.len() + self.service.as_ref().map_or(0, |s| s.as_str().len() + 1)
    }
}

/// Returns true if `input` is a valid KRN.
///
/// ```
/// assert!(krn::is_valid("//kopexa.com/frameworks/iso27001@v1"));
/// assert!(!krn::is_valid("//google.com/frameworks/iso27001"));
/// ```
#[must_use]
pub fn is_valid(input: &str) -> bool {
    Krn::parse(input).is_ok()
}

/// Parses `input` and returns the resource ID stored under `collection`.
///
/// # Errors
///
/// Returns `LookupError::Parse` if `input` is not a valid KRN and
/// `LookupError::NotFound` if it has no segment with that collection.
///
/// # Examples
///
/// ```
/// let id = krn::get_resource("//kopexa.com/frameworks/iso27001/controls/a-5-1", "controls")?;
/// assert_eq!(id, "a-5-1");
/// # Ok::<(), krn::LookupError>(())
/// ```
pub fn get_resource(input: &str, collection: &str) -> Result<String, LookupError> {
    let krn = Krn::parse(input)?;
    Ok(krn.resource_id(collection)?.to_string())
}

impl fmt::Display for Krn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl FromStr for Krn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Krn {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl TryFrom<&str> for Krn {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialEq for Krn {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Krn {}

impl PartialEq<str> for Krn {
    fn eq(&self, other: &str) -> bool {
        self.equals_str(other)
    }
}

impl PartialEq<&str> for Krn {
    fn eq(&self, other: &&str) -> bool {
        self.equals_str(other)
    }
}

impl Hash for Krn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for Krn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Krn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Krn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Krn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
