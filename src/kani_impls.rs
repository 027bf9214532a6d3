//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{Krn, ResourceId, Segment, Service, Version, safe_resource_id};

/// Characters allowed anywhere in a resource ID
const ID_CHARS: &[u8] = b"abcXYZ019-_.";

/// Characters allowed at the first and last position of a resource ID
const ID_BOUNDARY_CHARS: &[u8] = b"abcXYZ019";

/// A few collection names; collections are uninterpreted
const COLLECTIONS: [&str; 3] = ["frameworks", "controls", "evidences"];

const SERVICES: [&str; 3] = ["catalog", "isms", "a-1"];

const VERSIONS: [&str; 4] = ["latest", "draft", "v1", "v1.2.3"];

fn pick<T: Copy>(items: &[T]) -> T {
    let idx: usize = kani::any();
    items[idx % items.len()]
}

impl kani::Arbitrary for ResourceId {
    fn any() -> Self {
        // 1-6 chars for tractability
        let len: usize = kani::any();
        let len = 1 + (len % 6);

        let s: String = (0..len)
            .map(|i| {
                if i == 0 || i == len - 1 {
                    pick(ID_BOUNDARY_CHARS) as char
                } else {
                    pick(ID_CHARS) as char
                }
            })
            .collect();

        ResourceId::parse(&s).expect("valid resource ID by construction")
    }
}

impl kani::Arbitrary for Segment {
    fn any() -> Self {
        let id: ResourceId = kani::any();
        Segment::new(pick(&COLLECTIONS), id.as_str()).expect("valid segment by construction")
    }
}

impl kani::Arbitrary for Krn {
    fn any() -> Self {
        let mut builder = Krn::builder();

        if kani::any() {
            builder = builder.service(pick(&SERVICES));
        }

        let depth: usize = kani::any();
        for _ in 0..=(depth % 2) {
            let seg: Segment = kani::any();
            builder = builder.resource(seg.collection(), seg.resource_id());
        }

        if kani::any() {
            builder = builder.version(pick(&VERSIONS));
        }

        builder.build().expect("valid KRN by construction")
    }
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: Display then parse gives an equal KRN
#[kani::proof]
#[kani::unwind(10)]
fn proof_parse_roundtrip() {
    let krn: Krn = kani::any();
    let text = krn.to_string();
    let reparsed = Krn::parse(&text).expect("canonical text should parse");
    assert_eq!(reparsed, krn);
    assert_eq!(reparsed.to_string(), text);
}

/// Proof: The parent is one level shallower and never versioned
#[kani::proof]
#[kani::unwind(10)]
fn proof_parent_drops_one_level() {
    let krn: Krn = kani::any();
    if let Some(parent) = krn.parent() {
        assert_eq!(parent.depth() + 1, krn.depth());
        assert!(!parent.has_version());
        assert_eq!(parent.service(), krn.service());
    } else {
        assert_eq!(krn.depth(), 1);
    }
}

/// Proof: A child of any KRN has the parent's path as a prefix
#[kani::proof]
#[kani::unwind(10)]
fn proof_child_extends_path() {
    let krn: Krn = kani::any();
    let seg: Segment = kani::any();
    let child = krn
        .child(seg.collection(), seg.resource_id())
        .expect("short KRN plus one segment fits");
    assert!(child.path().starts_with(krn.path()));
    assert_eq!(child.basename(), seg.resource_id());
}

/// Proof: Service and version are independent of each other
#[kani::proof]
#[kani::unwind(10)]
fn proof_service_version_independent() {
    let krn: Krn = kani::any();
    let stripped = krn.without_service();
    assert_eq!(stripped.version(), krn.version());

    let service = Service::parse(pick(&SERVICES)).expect("valid service");
    let scoped = krn.with_service(service.as_str()).expect("valid service");
    assert_eq!(scoped.version(), krn.version());
    assert_eq!(scoped.path(), krn.path());
}

/// Proof: Accepted versions are kept verbatim
#[kani::proof]
#[kani::unwind(10)]
fn proof_with_version_verbatim() {
    let krn: Krn = kani::any();
    let version = Version::parse(pick(&VERSIONS)).expect("valid version");
    let tagged = krn.with_version(version.as_str()).expect("valid version");
    assert_eq!(tagged.version(), Some(version.as_str()));
    assert_eq!(tagged.without_version(), krn.without_version());
}

/// Proof: Sanitizing a valid resource ID returns it unchanged
#[kani::proof]
#[kani::unwind(8)]
fn proof_sanitize_keeps_valid_ids() {
    let id: ResourceId = kani::any();
    assert_eq!(safe_resource_id(id.as_str()), id.as_str());
}
