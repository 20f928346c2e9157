//! Nullability inference for type occurrences.
//!
//! Nullability describes what a reader of the rendered signature should assume, not what the
//! source language said: Java sources are made to look like Kotlin and vice versa.

use serde::Serialize;

use crate::{
    annotations::{AT_NON_NULL, Annotation, source_set_independent_annotations},
    mapped::is_kotlin_primitive,
    model::{Language, Projection},
};

/// What is known about the nullability of one type occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Nullability {
    /// `T?` in Kotlin source.
    KotlinNullable,
    /// A plain Kotlin type, which is non-null.
    KotlinDefault,
    /// Annotated `@NonNull` or `@NotNull`.
    JavaAnnotatedNotNull,
    /// Annotated `@Nullable`.
    JavaAnnotatedNullable,
    /// Types that cannot hold null at all, such as `void`.
    JavaNeverNull,
    /// A Java platform type: unannotated, so possibly null.
    JavaNotAnnotated,
    /// Not shown, usually because it is obvious from context.
    DontCare,
}

/// Merge order for [`Nullability::or`]: earlier entries win.
pub const NULLABILITY_PRECEDENCE: [Nullability; 7] = [
    Nullability::DontCare,
    Nullability::JavaNeverNull,
    Nullability::KotlinNullable,
    Nullability::JavaAnnotatedNullable,
    Nullability::JavaAnnotatedNotNull,
    Nullability::KotlinDefault,
    Nullability::JavaNotAnnotated,
];

impl Nullability {
    /// Position in [`NULLABILITY_PRECEDENCE`].
    pub fn precedence(self) -> usize {
        NULLABILITY_PRECEDENCE
            .iter()
            .position(|n| *n == self)
            .unwrap_or(NULLABILITY_PRECEDENCE.len())
    }

    /// The higher-precedence of `self` and `other`.
    #[must_use]
    pub fn or(self, other: Option<Self>) -> Self {
        match other {
            Some(other) if other.precedence() < self.precedence() => other,
            _ => self,
        }
    }

    /// Whether a reader must expect null.
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            Self::KotlinNullable | Self::JavaAnnotatedNullable | Self::JavaNotAnnotated | Self::DontCare
        )
    }

    /// Suffix appended to the type name in Kotlin.
    pub fn kotlin_suffix(self) -> &'static str {
        match self {
            Self::KotlinNullable | Self::JavaAnnotatedNullable => "?",
            Self::JavaNotAnnotated => "!",
            Self::KotlinDefault | Self::JavaAnnotatedNotNull | Self::JavaNeverNull | Self::DontCare => "",
        }
    }

    /// Annotation injected in Java output. `@Nullable` is never injected.
    pub fn java_annotation(self) -> Option<Annotation> {
        match self {
            Self::KotlinDefault | Self::JavaAnnotatedNotNull => Some(Annotation::from_qualified(AT_NON_NULL)),
            _ => None,
        }
    }

    /// Nullability of an unannotated reference type, by source language.
    pub fn source_default(is_java_source: Option<bool>) -> Self {
        match is_java_source {
            Some(false) => Self::KotlinDefault,
            Some(true) | None => Self::JavaNotAnnotated,
        }
    }

    /// Nullability stated by explicit annotations, if any.
    pub fn from_annotations(annotations: &[Annotation]) -> Option<Self> {
        if annotations.iter().any(Annotation::is_nullable_marker) {
            Some(Self::JavaAnnotatedNullable)
        } else if annotations.iter().any(Annotation::is_not_null_marker) {
            Some(Self::JavaAnnotatedNotNull)
        } else {
            None
        }
    }
}

/// Whether `projection` can be null at all when displayed in `language`.
///
/// Kotlin primitives, `Nothing` and `Unit` become Java primitives or `void`, Java `void` is never
/// null, and only array-typed Java primitives are references.
pub fn type_is_nullable_at_all(projection: &Projection, language: Language) -> bool {
    match projection {
        Projection::TypeConstructor(tc) if tc.dri.package == "kotlin" && language == Language::Java => {
            let class_names = tc.dri.class_names();
            !(is_kotlin_primitive(class_names) || class_names == "Nothing" || class_names == "Unit")
        }
        Projection::Void => false,
        Projection::Primitive { name } => name.contains('['),
        _ => true,
    }
}

/// Resolve the nullability of one occurrence of `projection`.
///
/// `injected` carries annotations propagated from the enclosing declaration; they only override
/// the source default on reference-like leaves.
pub fn nullability(
    projection: &Projection,
    language: Language,
    is_java_source: Option<bool>,
    injected: &[Annotation],
) -> Nullability {
    if !type_is_nullable_at_all(projection, language) {
        return Nullability::DontCare;
    }
    match projection {
        Projection::Nullable { .. } => Nullability::KotlinNullable,
        Projection::DefinitelyNonNull { .. } => Nullability::KotlinDefault,
        Projection::Variance { inner, .. } | Projection::TypeAliased { inner, .. } => {
            nullability(inner, language, is_java_source, &[])
        }
        Projection::Void => Nullability::JavaNeverNull,
        Projection::Dynamic | Projection::Star => Nullability::KotlinDefault,
        Projection::TypeParameter(_)
        | Projection::TypeConstructor(_)
        | Projection::JavaObject { .. }
        | Projection::UnresolvedBound { .. }
        | Projection::Primitive { .. } => {
            let mut annotations = injected.to_vec();
            annotations.extend(source_set_independent_annotations(projection));
            Nullability::from_annotations(&annotations)
                .unwrap_or_else(|| Nullability::source_default(is_java_source))
        }
    }
}
