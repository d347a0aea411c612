//! Path resolution and in-place field mutation for manifest documents.
//!
//! Responsibilities:
//! - Walk a document tree along a dotted path, disambiguating mapping-key
//!   lookups from sequence-element-by-`name` selection ([`resolve`]).
//! - Locate the addressed object by its key, with an optional second descent
//!   ([`locate_object`]).
//! - Overwrite the image tag and digest scalars while leaving their
//!   presentation style untouched ([`apply_field_pair`]).
//!
//! [`apply_update`] chains the three for one update target. Mutation is
//! atomic per target: either both fields are written or neither is.

mod error;

pub use error::PatchError;

use imagebump_types::fields;
use imagebump_types::structure::UpdateTarget;
use imagebump_yaml::{Document, Node, Sequence};

/// Walk `root` along the dot-separated `path` and return the node it names.
///
/// How a segment is interpreted depends on the node the previous segment
/// resolved to: against a mapping it is a key lookup; against a sequence it
/// selects the first element (a mapping) whose `name` field equals the
/// segment. A path that ends on a sequence stays at the sequence. The empty
/// path is a no-op returning `root` — that is how an omitted parent path is
/// spelled.
///
/// Pure traversal: the returned reference aliases the tree so callers can
/// mutate through it. First match wins on duplicate keys or duplicate
/// `name` values.
pub fn resolve<'a>(root: &'a mut Node, path: &str) -> Result<&'a mut Node, PatchError> {
    if path.is_empty() {
        return Ok(root);
    }
    let mut cur = root;
    for segment in path.split('.') {
        cur = match cur {
            Node::Mapping(map) => map.get_mut(segment).ok_or_else(|| PatchError::KeyNotFound {
                key: segment.to_string(),
            })?,
            Node::Sequence(seq) => {
                select_named(seq, segment).ok_or_else(|| PatchError::ElementNotFound {
                    selector: segment.to_string(),
                })?
            }
            Node::Scalar(_) => {
                return Err(PatchError::NotNavigable {
                    segment: segment.to_string(),
                });
            }
        };
    }
    Ok(cur)
}

/// First element whose `name` field equals `name`. Elements that are not
/// mappings, or carry no scalar `name`, are passed over.
fn select_named<'a>(seq: &'a mut Sequence, name: &str) -> Option<&'a mut Node> {
    seq.items_mut().iter_mut().find(|item| {
        item.as_mapping()
            .and_then(|m| m.get("name"))
            .and_then(Node::as_scalar)
            .is_some_and(|s| s.value() == name)
    })
}

/// Find the object stored under `object_key` in `container`, then descend
/// along `parent_path` (empty means stay at the object).
///
/// `container` must be a mapping of object identifiers to object subtrees;
/// identifiers are runtime values (artifact names), which is why they are
/// looked up here rather than encoded into the structure path.
pub fn locate_object<'a>(
    container: &'a mut Node,
    object_key: &str,
    parent_path: &str,
) -> Result<&'a mut Node, PatchError> {
    let Some(map) = container.as_mapping_mut() else {
        return Err(PatchError::NotNavigable {
            segment: object_key.to_string(),
        });
    };
    let object = map
        .get_mut(object_key)
        .ok_or_else(|| PatchError::ObjectKeyNotFound {
            key: object_key.to_string(),
        })?;
    resolve(object, parent_path)
}

/// Overwrite the version and digest scalars on `node`, preserving each value
/// node's presentation style.
///
/// Presence is checked before anything is written, so a missing field leaves
/// the other untouched. Both fields present is a hard requirement; partial
/// success is an error, not a half-applied update.
pub fn apply_field_pair(
    node: &mut Node,
    version_field: &str,
    digest_field: &str,
    version: &str,
    digest: &str,
) -> Result<(), PatchError> {
    let Some(map) = node.as_mapping_mut() else {
        return Err(PatchError::MissingRequiredField {
            tag_missing: true,
            digest_missing: true,
        });
    };

    let tag_present = matches!(map.get(version_field), Some(Node::Scalar(_)));
    let digest_present = matches!(map.get(digest_field), Some(Node::Scalar(_)));
    if !tag_present || !digest_present {
        return Err(PatchError::MissingRequiredField {
            tag_missing: !tag_present,
            digest_missing: !digest_present,
        });
    }

    for (key, value) in map.iter_mut() {
        let new = if key.value() == version_field {
            version
        } else if key.value() == digest_field {
            digest
        } else {
            continue;
        };
        if let Some(scalar) = value.as_scalar_mut() {
            scalar.set_value(new);
        }
    }
    Ok(())
}

/// Apply one update target to a parsed document: resolve the structure path,
/// locate the object, then rewrite the image tag and digest.
pub fn apply_update(
    doc: &mut Document,
    target: &UpdateTarget,
    object_key: &str,
    version: &str,
    digest: &str,
) -> Result<(), PatchError> {
    let root = doc.root_mut();
    if !root.is_mapping() {
        return Err(PatchError::MalformedRoot);
    }
    let container = resolve(root, &target.structure_path)?;
    let object = locate_object(container, object_key, target.parent_path())?;
    apply_field_pair(
        object,
        fields::IMAGE_TAG,
        fields::IMAGE_DIGEST,
        version,
        digest,
    )
}
