//! The documentable model consumed by the signature engine.
//!
//! Everything here is read-only input: type projections, declarations and the per-source-set data
//! attached to them. All types are plain values with structural equality and hashing so they can
//! key the per-run caches.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{annotations::Annotation, modifiers::Modifier};

/// The dialect a signature is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Java-style signatures with annotations for nullability.
    Java,
    /// Kotlin-style signatures with `?`/`!` nullability suffixes.
    #[default]
    Kotlin,
}

impl Language {
    /// Lower-case display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Documentation resource identifier: a package-qualified name with an optional member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dri {
    /// Dotted package name, possibly empty.
    pub package: String,
    /// Dotted class path within the package, e.g. `Map.Entry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_names: Option<String>,
    /// Name of a member function or property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callable: Option<String>,
}

impl Dri {
    /// Identity of a class-like in `package`.
    pub fn new(package: impl Into<String>, class_names: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_names: Some(class_names.into()),
            callable: None,
        }
    }

    /// Identity of a package.
    pub fn package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_names: None,
            callable: None,
        }
    }

    /// Identity with `callable` as its member qualifier.
    pub fn with_callable(mut self, callable: impl Into<String>) -> Self {
        self.callable = Some(callable.into());
        self
    }

    /// `package.ClassNames`, or the bare package for package identities.
    pub fn full_name(&self) -> String {
        match (&self.class_names, self.package.is_empty()) {
            (None, _) => self.package.clone(),
            (Some(class_names), true) => class_names.clone(),
            (Some(class_names), false) => format!("{}.{class_names}", self.package),
        }
    }

    /// Class path within the package, or the empty string.
    pub fn class_names(&self) -> &str {
        self.class_names.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Dri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.package,
            self.class_names(),
            self.callable.as_deref().unwrap_or_default()
        )
    }
}

/// Analysis platform of a source set. Variants are declared in their sort order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Shared code compiled for every target.
    Common,
    /// JVM and Android.
    #[default]
    Jvm,
    /// Kotlin/Native.
    Native,
    /// WebAssembly.
    Wasm,
    /// JavaScript.
    Js,
}

impl Platform {
    /// Short label used when listing the platforms of a signature group.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Common => "Cmn",
            Self::Jvm => "A",
            Self::Native => "N",
            Self::Wasm => "WASM",
            Self::Js => "JS",
        }
    }
}

/// A named compilation unit for one platform. Sorted by platform, then name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceSet {
    /// Analysis platform.
    #[serde(default)]
    pub platform: Platform,
    /// Display name, e.g. `commonMain`.
    pub name: String,
}

impl SourceSet {
    /// Create a source set.
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            platform,
            name: name.into(),
        }
    }
}

/// Per-source-set values keyed by source set name, in insertion order.
///
/// Serialized as a JSON object. Document order is kept because the first entry is the source-set
/// independent one, and equality and hashing are order-sensitive to match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSetMap<T>(IndexMap<String, T>);

impl<T> Default for SourceSetMap<T> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<T> SourceSetMap<T> {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, source_set: impl Into<String>, value: T) -> Self {
        self.insert(source_set, value);
        self
    }

    /// Insert or replace the value for `source_set`, keeping its original position.
    pub fn insert(&mut self, source_set: impl Into<String>, value: T) {
        self.0.insert(source_set.into(), value);
    }

    /// Value for a source set.
    pub fn get(&self, source_set: &SourceSet) -> Option<&T> {
        self.get_named(&source_set.name)
    }

    /// Value for a source set name.
    pub fn get_named(&self, name: &str) -> Option<&T> {
        self.0.get(name)
    }

    /// The first inserted value.
    pub fn first(&self) -> Option<&T> {
        self.0.first().map(|(_, v)| v)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.values()
    }

    /// Whether no source set has a value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: PartialEq> PartialEq for SourceSetMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl<T: Eq> Eq for SourceSetMap<T> {}

impl<T: Hash> Hash for SourceSetMap<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0.len());
        for entry in &self.0 {
            entry.hash(state);
        }
    }
}

/// Annotations attached to one element, per source set.
pub type SourcedAnnotations = SourceSetMap<Vec<Annotation>>;

/// Variance of a projected type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceKind {
    /// `out T` / `? extends T`.
    Covariant,
    /// `in T` / `? super T`.
    Contravariant,
    /// Explicitly invariant.
    Invariant,
}

/// Whether a type constructor is an ordinary generic class or a function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorKind {
    /// Ordinary class reference.
    #[default]
    Generic,
    /// A function type such as `(A) -> B`.
    Functional {
        /// The first argument is the receiver of an extension function type.
        #[serde(default)]
        is_extension: bool,
        /// The function type is `suspend`.
        #[serde(default)]
        is_suspendable: bool,
    },
}

/// A reference to a class with its generic arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeConstructor {
    /// Identity of the referenced class.
    pub dri: Dri,
    /// Generic arguments, in order.
    #[serde(default)]
    pub projections: Vec<Projection>,
    /// Name shown instead of the class name, e.g. a named lambda type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentable_name: Option<String>,
    /// Annotations on this type occurrence.
    #[serde(default)]
    pub annotations: SourcedAnnotations,
    /// Generic or functional. Serialized as `constructor`, since `kind` tags the projection.
    #[serde(default, rename = "constructor")]
    pub kind: ConstructorKind,
}

/// A reference to a declared type parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameterRef {
    /// Identity of the declaration owning the parameter.
    pub dri: Dri,
    /// Parameter name, e.g. `T`.
    pub name: String,
    /// Name shown instead of `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentable_name: Option<String>,
    /// Annotations on this type occurrence.
    #[serde(default)]
    pub annotations: SourcedAnnotations,
}

/// One occurrence of a type in a signature.
///
/// Wrappers may nest but a projection is always a finite tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// A class reference.
    TypeConstructor(TypeConstructor),
    /// A type parameter reference.
    TypeParameter(TypeParameterRef),
    /// A Java primitive such as `int` or `int[]`.
    Primitive {
        /// Java spelling of the primitive.
        name: String,
    },
    /// `java.lang.Object` as seen from Java sources.
    JavaObject {
        /// Annotations on this type occurrence.
        #[serde(default)]
        annotations: SourcedAnnotations,
    },
    /// Java `void`.
    Void,
    /// `*` / `?`.
    Star,
    /// The dynamic type of Kotlin/JS.
    Dynamic,
    /// A bound the host could not resolve; only its name is known.
    UnresolvedBound {
        /// Name as written in source.
        name: String,
    },
    /// `T?`.
    Nullable {
        /// The wrapped type.
        inner: Box<Projection>,
    },
    /// `T & Any`.
    DefinitelyNonNull {
        /// The wrapped type.
        inner: Box<Projection>,
    },
    /// A variance-projected argument.
    Variance {
        /// Declared variance.
        variance: VarianceKind,
        /// The wrapped type.
        inner: Box<Projection>,
    },
    /// A use of a type alias, carrying the expanded type as `inner`.
    TypeAliased {
        /// The alias as written.
        alias: Box<Projection>,
        /// The expansion.
        inner: Box<Projection>,
    },
}

impl Projection {
    /// A generic class reference.
    pub fn class(dri: Dri, projections: Vec<Self>) -> Self {
        Self::TypeConstructor(TypeConstructor {
            dri,
            projections,
            presentable_name: None,
            annotations: SourceSetMap::new(),
            kind: ConstructorKind::Generic,
        })
    }

    /// A function type reference.
    pub fn function(dri: Dri, projections: Vec<Self>, is_extension: bool, is_suspendable: bool) -> Self {
        Self::TypeConstructor(TypeConstructor {
            dri,
            projections,
            presentable_name: None,
            annotations: SourceSetMap::new(),
            kind: ConstructorKind::Functional {
                is_extension,
                is_suspendable,
            },
        })
    }

    /// A type parameter reference owned by `owner`.
    pub fn type_parameter(owner: Dri, name: impl Into<String>) -> Self {
        Self::TypeParameter(TypeParameterRef {
            dri: owner,
            name: name.into(),
            presentable_name: None,
            annotations: SourceSetMap::new(),
        })
    }

    /// A Java primitive.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive { name: name.into() }
    }

    /// Wrap in [`Projection::Nullable`].
    pub fn nullable(self) -> Self {
        Self::Nullable {
            inner: Box::new(self),
        }
    }

    /// Wrap in [`Projection::DefinitelyNonNull`].
    pub fn definitely_non_null(self) -> Self {
        Self::DefinitelyNonNull {
            inner: Box::new(self),
        }
    }

    /// Wrap in [`Projection::Variance`].
    pub fn with_variance(self, variance: VarianceKind) -> Self {
        Self::Variance {
            variance,
            inner: Box::new(self),
        }
    }

    /// Attach annotations for `source_set` to a leaf that can carry them. Other shapes are
    /// returned unchanged.
    pub fn annotated(mut self, source_set: &str, annotations: Vec<Annotation>) -> Self {
        match &mut self {
            Self::TypeConstructor(tc) => tc.annotations.insert(source_set, annotations),
            Self::TypeParameter(tp) => tp.annotations.insert(source_set, annotations),
            Self::JavaObject { annotations: a } => a.insert(source_set, annotations),
            _ => {}
        }
        self
    }

    /// Short tag naming the variant, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::TypeConstructor(_) => "TypeConstructor",
            Self::TypeParameter(_) => "TypeParameter",
            Self::Primitive { .. } => "Primitive",
            Self::JavaObject { .. } => "JavaObject",
            Self::Void => "Void",
            Self::Star => "Star",
            Self::Dynamic => "Dynamic",
            Self::UnresolvedBound { .. } => "UnresolvedBound",
            Self::Nullable { .. } => "Nullable",
            Self::DefinitelyNonNull { .. } => "DefinitelyNonNull",
            Self::Variance { .. } => "Variance",
            Self::TypeAliased { .. } => "TypeAliased",
        }
    }

    /// This projection with any `T & Any` wrappers removed.
    pub fn without_definitely_non_null(&self) -> &Self {
        match self {
            Self::DefinitelyNonNull { inner } => inner.without_definitely_non_null(),
            _ => self,
        }
    }

    /// The class reference, if this is one.
    pub fn as_constructor(&self) -> Option<&TypeConstructor> {
        match self {
            Self::TypeConstructor(tc) => Some(tc),
            _ => None,
        }
    }
}

/// Kind of the element enclosing a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Top-level in a package.
    Package,
    /// An ordinary class.
    #[default]
    Class,
    /// An interface.
    Interface,
    /// A Kotlin `object`.
    Object,
    /// A companion object.
    Companion,
    /// An enum class.
    Enum,
    /// An annotation class.
    Annotation,
}

/// A function or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Declared name; receivers and some lambda parameters have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: Projection,
    /// Annotations on the parameter declaration.
    #[serde(default)]
    pub annotations: SourcedAnnotations,
    /// Default value expression, per source set.
    #[serde(default)]
    pub default_value: SourceSetMap<String>,
    /// Parameter modifiers such as `vararg`.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Parameter {
    /// A parameter with no annotations or default.
    pub fn new(name: impl Into<String>, ty: Projection) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            annotations: SourceSetMap::new(),
            default_value: SourceSetMap::new(),
            modifiers: Vec::new(),
        }
    }
}

/// A declared type parameter with its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameterDecl {
    /// Parameter name.
    pub name: String,
    /// Upper bounds.
    #[serde(default)]
    pub bounds: Vec<Projection>,
    /// Annotations on the parameter declaration.
    #[serde(default)]
    pub annotations: SourcedAnnotations,
}

/// A function or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Function {
    /// Extension receiver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Parameter>,
    /// Declared type parameters.
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    /// Value parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type.
    pub return_type: Projection,
    /// Whether this is a constructor.
    #[serde(default)]
    pub is_constructor: bool,
}

/// A property or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    /// Extension receiver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Parameter>,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: Projection,
    /// `var` rather than `val`.
    #[serde(default)]
    pub is_mutable: bool,
    /// Constant initializer, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<String>,
    /// Whether the property exposes a getter (Java fields with getters are not constants).
    #[serde(default)]
    pub has_getter: bool,
}

/// The signature-bearing part of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationKind {
    /// A function or constructor.
    Function(Function),
    /// A property or field.
    Property(Property),
}

/// A documented function or property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    /// Identity of the declaration.
    pub dri: Dri,
    /// Simple name.
    pub name: String,
    /// Source sets the declaration is present in.
    pub source_sets: Vec<SourceSet>,
    /// Source set holding the `expect` declaration of a multiplatform symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_present_in: Option<String>,
    /// Declared in Java source.
    #[serde(default)]
    pub from_java: bool,
    /// Kind of the enclosing element.
    #[serde(default)]
    pub container: ContainerKind,
    /// Whether the declaration is hoisted to static by `@JvmStatic` or `@JvmField`.
    #[serde(default)]
    pub inject_static: bool,
    /// Annotations on the declaration.
    #[serde(default)]
    pub annotations: SourcedAnnotations,
    /// Raw modifiers, per source set.
    #[serde(default)]
    pub modifiers: SourceSetMap<Vec<Modifier>>,
    /// Source location for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Function or property details.
    #[serde(flatten)]
    pub kind: DeclarationKind,
}

/// A module: the unit the command line renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module name.
    pub name: String,
    /// Declarations to render.
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}
