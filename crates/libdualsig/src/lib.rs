//! Signature and nullability resolution for Java and Kotlin API documentation.
//!
//! A [`model::Module`] describes documented declarations as they appear in each source set of a
//! multiplatform project. [`Dualsig`] renders every declaration's signature in one display
//! dialect, inferring nullability, mapping types between the two standard libraries and merging
//! source sets that render identically.

mod annotation_converter;
pub mod annotations;
pub mod components;
pub mod config;
pub mod context;
mod dualsig;
mod error;
pub mod kmp;
pub mod mapped;
pub mod model;
pub mod modifiers;
pub mod nullability;
pub mod paths;
pub mod projection;
pub mod rewrite;
pub mod signature;

pub use crate::{
    annotation_converter::{annotation_component, annotation_components},
    config::DualsigConfig,
    context::RenderContext,
    dualsig::{Dualsig, RenderedDeclaration},
    error::{DualsigError, Result},
    kmp::{KmpSignatures, SignatureGroup},
    model::{Language, Module},
    nullability::Nullability,
};
