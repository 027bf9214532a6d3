//! Best-effort conversion of arbitrary text into a resource ID.

use crate::constants::MAX_RESOURCE_ID_LENGTH;
use crate::resource_id::ResourceId;

/// Converts `input` into a resource ID by replacing invalid characters.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `-`, leading and
/// trailing `-`, `.` and `_` are trimmed, and the result is cut to 200
/// characters. Never fails; the output is either empty or a valid resource
/// ID. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use krn::safe_resource_id;
///
/// assert_eq!(safe_resource_id("ISO 27001:2022"), "ISO-27001-2022");
/// assert_eq!(safe_resource_id("-leading-dash"), "leading-dash");
/// assert_eq!(safe_resource_id("_draft_"), "draft");
/// assert_eq!(safe_resource_id(""), "");
/// ```
#[must_use]
pub fn safe_resource_id(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if ResourceId::is_valid_char(c) { c } else { '-' })
        .collect();

    let trimmed = replaced.trim_matches(is_trimmed);

    // The replaced string is pure ASCII, so byte slicing lands on char boundaries.
    if trimmed.len() > MAX_RESOURCE_ID_LENGTH {
        trimmed[..MAX_RESOURCE_ID_LENGTH]
            .trim_end_matches(is_trimmed)
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_trimmed(c: char) -> bool {
    matches!(c, '-' | '.' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_valid_ids() {
        assert_eq!(safe_resource_id("valid"), "valid");
        assert_eq!(safe_resource_id("multiple---dashes"), "multiple---dashes");
    }

    #[test]
    fn replaces_invalid_chars() {
        assert_eq!(safe_resource_id("with space"), "with-space");
        assert_eq!(safe_resource_id("with@symbol"), "with-symbol");
        assert_eq!(safe_resource_id("with/slash"), "with-slash");
    }

    #[test]
    fn replaces_each_multibyte_char_once() {
        assert_eq!(safe_resource_id("caf\u{e9} cr\u{e8}me"), "caf--cr-me");
    }

    #[test]
    fn trims_dashes_and_dots() {
        assert_eq!(safe_resource_id("-leading-dash"), "leading-dash");
        assert_eq!(safe_resource_id("trailing-dash-"), "trailing-dash");
        assert_eq!(safe_resource_id(".leading-dot"), "leading-dot");
        assert_eq!(safe_resource_id("trailing-dot."), "trailing-dot");
        assert_eq!(safe_resource_id("  "), "");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(safe_resource_id(""), "");
    }

    #[test]
    fn truncates_to_max_length() {
        assert_eq!(safe_resource_id(&"a".repeat(250)), "a".repeat(200));
        assert_eq!(
            safe_resource_id(&format!("{}-", "a".repeat(199))),
            "a".repeat(199)
        );
    }

    #[test]
    fn retrims_after_truncation() {
        let input = format!("{}-.-{}", "a".repeat(198), "b".repeat(10));
        assert_eq!(safe_resource_id(&input), "a".repeat(198));
    }

    #[test]
    fn trims_underscore_boundaries() {
        assert_eq!(safe_resource_id("_draft_"), "draft");
        assert_eq!(safe_resource_id("__init__.py"), "init__.py");
        assert_eq!(safe_resource_id("-_."), "");
        assert!(crate::is_valid_resource_id(&safe_resource_id("_draft_")));
    }

    #[test]
    fn retrims_underscore_after_truncation() {
        let input = format!("{}_{}", "a".repeat(199), "b".repeat(10));
        assert_eq!(safe_resource_id(&input), "a".repeat(199));
    }

    #[test]
    fn output_is_a_valid_id_for_alphanumeric_edges() {
        let out = safe_resource_id("Annex A: 5.1 (Policies)");
        assert_eq!(out, "Annex-A--5.1--Policies");
        assert!(crate::is_valid_resource_id(&out));
    }
}
