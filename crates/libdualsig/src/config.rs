//! Rendering configuration, loadable from JSON.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, model::Language};

/// Nullability annotations accepted by default.
///
/// The `android.` variants are for the platform itself and are rewritten to `androidx.` on output.
pub const DEFAULT_VALID_NULLABILITY_ANNOTATIONS: &[&str] = &[
    "androidx.annotation.Nullable",
    "android.annotation.Nullable",
    "androidx.annotation.NonNull",
    "android.annotation.NonNull",
    "org.jspecify.annotations.NonNull",
    "org.jspecify.annotations.Nullable",
];

/// Default for [`DualsigConfig::doc_root_path`].
fn default_doc_root_path() -> String {
    "reference".to_string()
}

/// Default for [`DualsigConfig::valid_nullability_annotations`].
fn default_valid_nullability_annotations() -> Vec<String> {
    DEFAULT_VALID_NULLABILITY_ANNOTATIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Options controlling how signatures are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DualsigConfig {
    /// Dialect to render.
    pub display_language: Language,
    /// Prefix of every generated link.
    pub doc_root_path: String,
    /// Fully qualified annotation names never displayed. Nullability annotations are handled
    /// separately.
    pub annotations_not_to_display: Vec<String>,
    /// Additional names hidden in Java output.
    pub annotations_not_to_display_java: Vec<String>,
    /// Additional names hidden in Kotlin output.
    pub annotations_not_to_display_kotlin: Vec<String>,
    /// Fully qualified names of annotation classes that are themselves hidden from the docs.
    pub hidden_annotations: Vec<String>,
    /// Nullability annotations that may be used; any other is an error.
    pub valid_nullability_annotations: Vec<String>,
    /// Name Java array element types by their fully qualified names.
    pub qualified_array_names: bool,
}

impl Default for DualsigConfig {
    fn default() -> Self {
        Self {
            display_language: Language::default(),
            doc_root_path: default_doc_root_path(),
            annotations_not_to_display: Vec::new(),
            annotations_not_to_display_java: Vec::new(),
            annotations_not_to_display_kotlin: Vec::new(),
            hidden_annotations: Vec::new(),
            valid_nullability_annotations: default_valid_nullability_annotations(),
            qualified_array_names: false,
        }
    }
}

impl DualsigConfig {
    /// Parse a configuration from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Whether `full_name` is excluded from output in `language`.
    pub fn is_not_displayed(&self, full_name: &str, language: Language) -> bool {
        let extra = match language {
            Language::Java => &self.annotations_not_to_display_java,
            Language::Kotlin => &self.annotations_not_to_display_kotlin,
        };
        self.annotations_not_to_display
            .iter()
            .chain(extra)
            .any(|name| name == full_name)
    }

    /// Whether `full_name` may be used as a nullability annotation.
    pub fn is_valid_nullability_annotation(&self, full_name: &str) -> bool {
        self.valid_nullability_annotations
            .iter()
            .any(|name| name == full_name)
    }

    /// Whether the annotation class `full_name` is hidden.
    pub fn is_hidden(&self, full_name: &str) -> bool {
        self.hidden_annotations.iter().any(|name| name == full_name)
    }
}
