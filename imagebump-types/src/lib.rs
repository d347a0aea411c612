//! Shared DTOs (schemas-as-code) for the imagebump workspace.
//!
//! # Design constraints
//! - These types mirror on-disk and on-the-wire formats (the structure file
//!   and the inbound notification payload).
//! - Be conservative with breaking changes; field names are part of the
//!   contract with existing structure files.

pub mod notify;
pub mod structure;

/// Names of the two manifest fields that are ever written.
pub mod fields {
    /// Scalar holding the artifact version.
    pub const IMAGE_TAG: &str = "imageTag";
    /// Scalar holding the artifact content hash.
    pub const IMAGE_DIGEST: &str = "imageDigest";
}
