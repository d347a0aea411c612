//! Failure kinds for path resolution and field mutation.
//!
//! All variants are deterministic structural mismatches; none is transient,
//! so callers report them and move on to the next update target.

use imagebump_types::fields;
use thiserror::Error;

/// The failure kinds the engine can surface, each carrying the offending
/// path segment or key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A path segment was applied to a node that cannot be navigated into.
    #[error("cannot navigate into a scalar at segment `{segment}`")]
    NotNavigable { segment: String },

    /// A mapping held no key equal to the segment.
    #[error("key `{key}` not found")]
    KeyNotFound { key: String },

    /// No sequence element had a `name` field equal to the selector.
    #[error("no element named `{selector}`")]
    ElementNotFound { selector: String },

    /// The object-identifier lookup found no matching entry.
    #[error("object key `{key}` not found")]
    ObjectKeyNotFound { key: String },

    /// The target object lacked one or both of the fields being written.
    /// Nothing was modified.
    #[error("missing required field(s): {}", missing_list(.tag_missing, .digest_missing))]
    MissingRequiredField {
        tag_missing: bool,
        digest_missing: bool,
    },

    /// The document root is not a mapping.
    #[error("document root is not a mapping")]
    MalformedRoot,
}

fn missing_list(tag_missing: &bool, digest_missing: &bool) -> String {
    match (tag_missing, digest_missing) {
        (true, true) => format!("{}, {}", fields::IMAGE_TAG, fields::IMAGE_DIGEST),
        (true, false) => fields::IMAGE_TAG.to_string(),
        _ => fields::IMAGE_DIGEST.to_string(),
    }
}
