//! Structure file schema: which manifests to examine and where inside each
//! one the image fields live.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Top-level structure file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    /// Applications to examine, in file order.
    #[serde(default)]
    pub app: Vec<AppEntry>,
}

/// One application entry: a logical artifact name and the manifest files it
/// appears in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEntry {
    /// Logical artifact name, matched against inbound image references.
    pub name: String,

    /// Manifest files carrying this artifact's image fields.
    #[serde(default)]
    pub files: Vec<FileConfig>,

    /// Pre-`files` single-path form. Kept so old structure files still
    /// deserialize; entries using it carry no update targets and are skipped
    /// with a warning.
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub legacy_file: Option<String>,
}

/// One manifest file and the update targets to apply inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub path: Utf8PathBuf,

    #[serde(rename = "update-targets", default)]
    pub update_targets: Vec<UpdateTarget>,
}

/// Where to find one pair of image fields inside a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTarget {
    /// Dotted path to the container that holds addressable objects.
    #[serde(rename = "structure-path")]
    pub structure_path: String,

    /// Optional path from the located object down to the node holding the
    /// image fields.
    #[serde(
        rename = "image-parent-path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_parent_path: Option<String>,

    /// Key selecting the object within the container. Defaults to the entry
    /// name when unset.
    #[serde(rename = "object-key", default, skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
}

impl UpdateTarget {
    /// The parent path, with "not set" spelled as the empty (no-op) path.
    pub fn parent_path(&self) -> &str {
        self.image_parent_path.as_deref().unwrap_or("")
    }

    /// The object key, falling back to `default` (the entry name) when the
    /// target does not set one.
    pub fn object_key_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.object_key.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_kebab_case_fields() {
        let yaml = r#"
app:
  - name: storefront
    files:
      - path: deploy/storefront.yaml
        update-targets:
          - structure-path: spec.containers.web
            image-parent-path: image
            object-key: main
"#;
        let structure: Structure = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(structure.app.len(), 1);
        let entry = &structure.app[0];
        assert_eq!(entry.name, "storefront");
        let target = &entry.files[0].update_targets[0];
        assert_eq!(target.structure_path, "spec.containers.web");
        assert_eq!(target.parent_path(), "image");
        assert_eq!(target.object_key_or("storefront"), "main");
    }

    #[test]
    fn optional_fields_default() {
        let yaml = r#"
app:
  - name: api
    files:
      - path: deploy/api.yaml
        update-targets:
          - structure-path: spec
"#;
        let structure: Structure = serde_yaml::from_str(yaml).expect("deserialize");
        let target = &structure.app[0].files[0].update_targets[0];
        assert_eq!(target.parent_path(), "");
        assert_eq!(target.object_key_or("api"), "api");
    }

    #[test]
    fn legacy_file_field_still_deserializes() {
        let yaml = r#"
app:
  - name: worker
    file: deploy/worker.yaml
"#;
        let structure: Structure = serde_yaml::from_str(yaml).expect("deserialize");
        let entry = &structure.app[0];
        assert_eq!(entry.legacy_file.as_deref(), Some("deploy/worker.yaml"));
        assert!(entry.files.is_empty());
    }
}
