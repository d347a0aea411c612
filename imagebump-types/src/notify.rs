//! Inbound change notification: which artifact moved, and to what.

use serde::{Deserialize, Serialize};

/// One record of the notification payload.
///
/// `image` follows the `name:version` convention: the artifact name is
/// everything before the first colon, the version everything after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpdate {
    pub image: String,
    pub sha: String,
}

impl ImageUpdate {
    /// Does this record refer to the artifact called `name`?
    pub fn matches(&self, name: &str) -> bool {
        self.image.split(':').next() == Some(name)
    }

    /// The version component of the image reference; empty when the
    /// reference carries no colon.
    pub fn version(&self) -> &str {
        self.image.split_once(':').map(|(_, v)| v).unwrap_or("")
    }
}

/// Parse the notification payload: a JSON array of records.
pub fn parse_notifications(input: &str) -> Result<Vec<ImageUpdate>, serde_json::Error> {
    serde_json::from_str(input)
}
