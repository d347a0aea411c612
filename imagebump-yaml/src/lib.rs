//! Style-preserving YAML document tree.
//!
//! Parses the block-YAML subset used by deployment manifests into a tree of
//! [`Node`]s whose scalars remember their source span and presentation style.
//! Serializing a [`Document`] (via `Display`/`to_string`) splices re-rendered
//! values over their original spans, so every byte the caller did not touch —
//! comments, key order, indentation, quoting — survives a round-trip
//! unchanged.
//!
//! Out of scope, rejected with typed errors rather than silently mangled:
//! anchors, aliases, tags, directives, and multi-document streams.

mod error;
mod node;
mod parser;

pub use error::ParseError;
pub use node::{Document, Mapping, Node, Scalar, ScalarStyle, Sequence, Span};
