//! Annotation model and the fixed rules for where an annotation belongs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Dri, Projection, SourceSet, SourcedAnnotations};

/// Simple names treated as nullability annotations.
pub const NULLABILITY_ANNOTATION_NAMES: &[&str] = &["NonNull", "Nullable", "NotNull"];

/// Names of annotations that annotate the type rather than the declaration.
const TYPE_ANNOTATION_NAMES: &[&str] = &["Dimension", "Px", "Size"];

/// Final capitalized words that mark an annotation as type-bound, e.g. `@StringRes`.
const TYPE_ANNOTATION_SUFFIXES: &[&str] = &["Res", "Range", "Long", "Int", "Float", "Context"];

/// Suppression annotations, never displayed.
const SUPPRESS_NAMES: &[&str] = &["Suppress", "SuppressWarnings", "SuppressLint"];

/// Package of compiler-facing JVM interop annotations such as `@JvmName`.
pub const KOTLIN_JVM_PACKAGE: &str = "kotlin.jvm";

/// Fully qualified names of the deprecation annotations.
const DEPRECATED_NAMES: &[&str] = &["kotlin.Deprecated", "java.lang.Deprecated"];

/// Fully qualified name of the public nullable annotation.
pub const AT_NULLABLE: &str = "androidx.annotation.Nullable";

/// Fully qualified name of the public non-null annotation.
pub const AT_NON_NULL: &str = "androidx.annotation.NonNull";

/// A value passed to an annotation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// A string literal, without quotes.
    String(String),
    /// Any other literal, verbatim.
    Literal(String),
    /// An enum constant reference, e.g. `RetentionPolicy.SOURCE`.
    Enum(String),
    /// A class literal, e.g. `Foo.class`.
    Class(String),
    /// An array of values.
    Array(Vec<AnnotationValue>),
    /// A nested annotation.
    Annotation(Box<Annotation>),
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Literal(s) | Self::Enum(s) | Self::Class(s) => f.write_str(s),
            Self::Array(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
            Self::Annotation(annotation) => write!(f, "@{}", annotation.identifier()),
        }
    }
}

/// A named parameter of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationArg {
    /// Parameter name; `value` for positional use.
    pub name: String,
    /// Parameter value.
    pub value: AnnotationValue,
}

/// An annotation applied to a declaration or type occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Identity of the annotation class.
    pub dri: Dri,
    /// Parameters in source order.
    #[serde(default)]
    pub params: Vec<AnnotationArg>,
}

impl Annotation {
    /// A parameterless annotation of `package.name`.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            dri: Dri::new(package, name),
            params: Vec::new(),
        }
    }

    /// Parse a fully qualified name like `androidx.annotation.NonNull`.
    pub fn from_qualified(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }

    /// Builder-style parameter append.
    pub fn with_param(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.params.push(AnnotationArg {
            name: name.into(),
            value,
        });
        self
    }

    /// Simple (class) name of the annotation.
    pub fn class_name(&self) -> &str {
        self.dri.class_names()
    }

    /// Fully qualified name.
    pub fn full_name(&self) -> String {
        self.dri.full_name()
    }

    /// Full name plus rendered parameters; the de-duplication key.
    pub fn identifier(&self) -> String {
        if self.params.is_empty() {
            return self.full_name();
        }
        let params = self
            .params
            .iter()
            .map(|p| format!("{}={}", p.name, p.value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({params})", self.full_name())
    }

    /// `@Nullable`, `@NonNull` or `@NotNull` from any package.
    pub fn is_nullability(&self) -> bool {
        NULLABILITY_ANNOTATION_NAMES.contains(&self.class_name())
    }

    /// Whether this annotation marks the type as nullable.
    pub fn is_nullable_marker(&self) -> bool {
        self.class_name() == "Nullable"
    }

    /// Whether this annotation marks the type as not null.
    pub fn is_not_null_marker(&self) -> bool {
        matches!(self.class_name(), "NonNull" | "NotNull")
    }

    /// Whether this annotation is rendered next to the type rather than the declaration.
    pub fn belongs_on_return_type(&self) -> bool {
        let name = self.class_name();
        self.is_nullability()
            || TYPE_ANNOTATION_NAMES.contains(&name)
            || TYPE_ANNOTATION_SUFFIXES.contains(&final_word(name))
    }

    /// Suppression annotations.
    pub fn is_suppress(&self) -> bool {
        SUPPRESS_NAMES.contains(&self.class_name())
    }

    /// `kotlin.Deprecated` or `java.lang.Deprecated`.
    pub fn is_deprecated(&self) -> bool {
        DEPRECATED_NAMES.contains(&self.full_name().as_str())
    }

    /// Compiler-facing annotations from `kotlin.jvm`.
    pub fn is_kotlin_jvm(&self) -> bool {
        self.dri.package == KOTLIN_JVM_PACKAGE
    }

    /// The public `androidx` equivalent of a platform-internal nullability annotation.
    pub fn public_equivalent(self) -> Self {
        if self.dri.package != "android.annotation"
            || !matches!(self.class_name(), "Nullable" | "NonNull")
        {
            return self;
        }
        let name = self.class_name().to_string();
        Self {
            dri: Dri::new("androidx.annotation", name),
            params: self.params,
        }
    }
}

/// The suffix of `name` starting at its last capital letter.
///
/// The start index is the first occurrence of that letter, so `RangeRange` yields `RangeRange`.
pub fn final_word(name: &str) -> &str {
    let Some(last_upper) = name.chars().rev().find(char::is_ascii_uppercase) else {
        return name;
    };
    name.find(last_upper).map_or(name, |at| &name[at..])
}

/// Split annotations into (type-bound, declaration-bound), preserving order.
pub fn partition_by_placement(annotations: &[Annotation]) -> (Vec<Annotation>, Vec<Annotation>) {
    annotations
        .iter()
        .cloned()
        .partition(Annotation::belongs_on_return_type)
}

/// Remove duplicates by identifier, keeping the first occurrence.
pub fn distinct_by_identifier(annotations: Vec<Annotation>) -> Vec<Annotation> {
    let mut seen = Vec::new();
    annotations
        .into_iter()
        .filter(|a| {
            let id = a.identifier();
            if seen.contains(&id) {
                false
            } else {
                seen.push(id);
                true
            }
        })
        .collect()
}

/// Annotations attached to this occurrence of a projection in `source_set`.
///
/// Wrappers that re-expose their inner type carry its annotations; `T & Any` drops `@Nullable`.
pub fn projection_annotations(projection: &Projection, source_set: &SourceSet) -> Vec<Annotation> {
    match projection {
        Projection::TypeConstructor(tc) => in_source_set(&tc.annotations, source_set),
        Projection::TypeParameter(tp) => in_source_set(&tp.annotations, source_set),
        Projection::JavaObject { annotations } => in_source_set(annotations, source_set),
        Projection::Nullable { inner } | Projection::TypeAliased { inner, .. } => {
            projection_annotations(inner, source_set)
        }
        Projection::DefinitelyNonNull { inner } => projection_annotations(inner, source_set)
            .into_iter()
            .filter(|a| a.full_name() != AT_NULLABLE)
            .collect(),
        _ => Vec::new(),
    }
}

/// Annotations of a projection that apply regardless of source set: those of its first source
/// set.
pub fn source_set_independent_annotations(projection: &Projection) -> Vec<Annotation> {
    let map = match projection {
        Projection::TypeConstructor(tc) => &tc.annotations,
        Projection::TypeParameter(tp) => &tp.annotations,
        Projection::JavaObject { annotations } => annotations,
        _ => return Vec::new(),
    };
    map.first().cloned().unwrap_or_default()
}

/// Declaration annotations in one source set.
pub fn in_source_set(annotations: &SourcedAnnotations, source_set: &SourceSet) -> Vec<Annotation> {
    annotations.get(source_set).cloned().unwrap_or_default()
}
