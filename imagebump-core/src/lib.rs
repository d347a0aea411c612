//! Embeddable core library for imagebump.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a host process or driving from tests.
//!
//! # Port traits
//!
//! All file access goes through [`ports::ManifestStore`]; the [`adapters`]
//! module provides the default filesystem-backed implementation and an
//! in-memory one for embedding and testing.
//!
//! # Entry point
//!
//! - [`run_update`](pipeline::run_update) — apply a notification payload to
//!   every manifest the structure file names.

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the DTOs so callers don't need imagebump-types directly.
pub use imagebump_types::notify::{parse_notifications, ImageUpdate};
pub use imagebump_types::structure::{AppEntry, FileConfig, Structure, UpdateTarget};
