use thiserror::Error;

use crate::model::Dri;

#[derive(Error, Debug)]
pub enum DualsigError {
    #[error("Unsupported projection in {stage}: {shape}")]
    UnsupportedProjection {
        /// Where the projection was encountered.
        stage: &'static str,
        /// Short name of the offending projection shape.
        shape: &'static str,
    },

    #[error("Cannot name a dynamic type as a Java array element")]
    DynamicArrayElement,

    #[error("Nullability annotation {0} is not one of the configured valid annotations")]
    InvalidNullabilityAnnotation(String),

    #[error("'const' on {0}?")]
    ConstOnNonProperty(String),

    #[error("No source sets for {0}")]
    NoSourceSets(String),

    #[error("Failed to render {name} ({dri}){}: {source}", at_location(.location))]
    Symbol {
        /// Name of the declaration being rendered.
        name: String,
        /// Identity of the declaration being rendered.
        dri: Dri,
        /// Source location, when the model carries one.
        location: Option<String>,
        /// The underlying failure.
        source: Box<DualsigError>,
    },

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

impl DualsigError {
    /// Shorthand for an unsupported projection shape reaching `stage`.
    pub fn unsupported(stage: &'static str, shape: &'static str) -> Self {
        Self::UnsupportedProjection { stage, shape }
    }
}

/// Formats an optional source location as an ` at ...` suffix.
fn at_location(location: &Option<String>) -> String {
    location
        .as_deref()
        .map(|l| format!(" at {l}"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, DualsigError>;
