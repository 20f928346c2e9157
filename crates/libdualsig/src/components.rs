//! Renderable signature components.
//!
//! Components are the output of the converters: plain values that compare structurally, so
//! equal renderings of different platform variants can be merged. `Display` produces the
//! single-line text form of each component in its dialect.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::{
    model::Language,
    modifiers::{Modifier, Modifiers},
    nullability::Nullability,
};

/// Text plus link target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    /// Displayed text.
    pub name: String,
    /// Target URL; empty when the target is not documented.
    pub url: String,
}

impl Link {
    /// A link with no target.
    pub fn unlinked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
        }
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Write `items` separated by `sep`.
fn write_joined<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Write each annotation followed by a space.
fn write_annotations(f: &mut fmt::Formatter<'_>, annotations: &[AnnotationComponent]) -> fmt::Result {
    for annotation in annotations {
        write!(f, "{annotation} ")?;
    }
    Ok(())
}

/// Write `<A, B>` when `generics` is non-empty.
fn write_generics(f: &mut fmt::Formatter<'_>, generics: &[TypeProjectionComponent]) -> fmt::Result {
    if generics.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    write_joined(f, generics, ", ")?;
    f.write_str(">")
}

/// One parameter of an annotation use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationParameter {
    /// A single value. Array elements have an empty name.
    Value {
        /// Parameter name.
        name: String,
        /// Rendered value, with quotes for strings.
        value: String,
    },
    /// An array of values.
    Array {
        /// Parameter name.
        name: String,
        /// Elements.
        values: Vec<AnnotationParameter>,
    },
    /// A nested annotation.
    Annotation {
        /// Parameter name.
        name: String,
        /// The nested annotation.
        annotation: AnnotationComponent,
    },
}

impl AnnotationParameter {
    fn name(&self) -> &str {
        match self {
            Self::Value { name, .. } | Self::Array { name, .. } | Self::Annotation { name, .. } => name,
        }
    }
}

impl Display for AnnotationParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name().is_empty() {
            write!(f, "{} = ", self.name())?;
        }
        match self {
            Self::Value { value, .. } => f.write_str(value),
            Self::Array { values, .. } => {
                f.write_str("{")?;
                write_joined(f, values, ", ")?;
                f.write_str("}")
            }
            Self::Annotation { annotation, .. } => write!(f, "{annotation}"),
        }
    }
}

/// An annotation use as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationComponent {
    /// The annotation class.
    pub link: Link,
    /// Parameters in source order.
    pub parameters: Vec<AnnotationParameter>,
}

impl Display for AnnotationComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.link)?;
        if !self.parameters.is_empty() {
            f.write_str("(")?;
            write_joined(f, &self.parameters, ", ")?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A type reference with generics and nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeComponent {
    /// The type name.
    pub link: Link,
    /// Resolved nullability.
    pub nullability: Nullability,
    /// Dialect.
    pub language: Language,
    /// Generic arguments.
    pub generics: Vec<TypeProjectionComponent>,
    /// Type-bound annotations.
    pub annotations: Vec<AnnotationComponent>,
}

impl TypeComponent {
    /// Nullability suffix for this component's dialect.
    fn suffix(&self) -> &'static str {
        match self.language {
            Language::Kotlin => self.nullability.kotlin_suffix(),
            Language::Java => "",
        }
    }
}

impl Display for TypeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_annotations(f, &self.annotations)?;
        write!(f, "{}", self.link)?;
        write_generics(f, &self.generics)?;
        f.write_str(self.suffix())
    }
}

/// A Kotlin function type such as `suspend String.(Int) -> Unit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LambdaComponent {
    /// Return type of the function type.
    pub return_type: Box<TypeProjectionComponent>,
    /// Nullability of the function type itself.
    pub nullability: Nullability,
    /// Dialect; always Kotlin in practice.
    pub language: Language,
    /// Modifiers such as `suspend`.
    pub modifiers: Vec<String>,
    /// Parameters of the function type.
    pub parameters: Vec<ParameterComponent>,
    /// Receiver of an extension function type.
    pub receiver: Option<Box<TypeProjectionComponent>>,
    /// Type-bound annotations.
    pub annotations: Vec<AnnotationComponent>,
}

impl Display for LambdaComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_annotations(f, &self.annotations)?;
        let suffix = self.nullability.kotlin_suffix();
        if !suffix.is_empty() {
            f.write_str("(")?;
        }
        for modifier in &self.modifiers {
            write!(f, "{modifier} ")?;
        }
        if let Some(receiver) = &self.receiver {
            write!(f, "{receiver}.")?;
        }
        f.write_str("(")?;
        write_joined(f, &self.parameters, ", ")?;
        write!(f, ") -> {}", self.return_type)?;
        if !suffix.is_empty() {
            write!(f, "){suffix}")?;
        }
        Ok(())
    }
}

/// A Java collection seen from Kotlin, shown as `(Mutable)List<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MappedComponent {
    /// The read-only type.
    pub base: TypeComponent,
    /// Link to the mutable counterpart, with text `Mutable`.
    pub alternative_prefix: Link,
}

impl Display for MappedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_annotations(f, &self.base.annotations)?;
        write!(f, "({}){}", self.alternative_prefix, self.base.link)?;
        write_generics(f, &self.base.generics)?;
        f.write_str(self.base.suffix())
    }
}

/// A rendered type occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeProjectionComponent {
    /// Ordinary type.
    Plain(TypeComponent),
    /// Kotlin function type.
    Lambda(LambdaComponent),
    /// Java collection in Kotlin.
    Mapped(MappedComponent),
}

impl TypeProjectionComponent {
    /// Resolved nullability.
    pub fn nullability(&self) -> Nullability {
        match self {
            Self::Plain(c) => c.nullability,
            Self::Lambda(c) => c.nullability,
            Self::Mapped(c) => c.base.nullability,
        }
    }

    /// Type-bound annotations.
    pub fn annotations(&self) -> &[AnnotationComponent] {
        match self {
            Self::Plain(c) => &c.annotations,
            Self::Lambda(c) => &c.annotations,
            Self::Mapped(c) => &c.base.annotations,
        }
    }

    /// Generic arguments; function types carry none.
    pub fn generics(&self) -> &[Self] {
        match self {
            Self::Plain(c) => &c.generics,
            Self::Lambda(_) => &[],
            Self::Mapped(c) => &c.base.generics,
        }
    }

    /// Link of the type; the return type's for function types.
    pub fn link(&self) -> &Link {
        match self {
            Self::Plain(c) => &c.link,
            Self::Lambda(c) => c.return_type.link(),
            Self::Mapped(c) => &c.base.link,
        }
    }

    /// Displayed type name.
    pub fn name(&self) -> &str {
        &self.link().name
    }
}

impl Display for TypeProjectionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(c) => c.fmt(f),
            Self::Lambda(c) => c.fmt(f),
            Self::Mapped(c) => c.fmt(f),
        }
    }
}

/// A parameter of a function, lambda or property receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterComponent {
    /// Parameter name; may be empty for lambda parameters.
    pub name: String,
    /// Parameter type.
    #[serde(rename = "type")]
    pub ty: TypeProjectionComponent,
    /// Default value, shown in detail views only.
    pub default_value: Option<String>,
    /// Display modifiers such as `vararg`. Java shows only `vararg`, as `T...`.
    pub modifiers: Modifiers,
    /// Declaration annotations.
    pub annotations: Vec<AnnotationComponent>,
    /// Dialect.
    pub language: Language,
}

impl Display for ParameterComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_annotations(f, &self.annotations)?;
        match self.language {
            Language::Java if self.modifiers.contains(Modifier::Vararg) => {
                write!(f, "{}... {}", self.ty, self.name)?;
            }
            Language::Java if self.name.is_empty() => write!(f, "{}", self.ty)?,
            Language::Java => write!(f, "{} {}", self.ty, self.name)?,
            Language::Kotlin => write_modifiers(f, &self.modifiers)?,
        }
        match self.language {
            Language::Java => {}
            Language::Kotlin if self.name.is_empty() => write!(f, "{}", self.ty)?,
            Language::Kotlin => write!(f, "{}: {}", self.name, self.ty)?,
        }
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// A declared type parameter with its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeParameterComponent {
    /// Parameter name.
    pub name: String,
    /// Upper bounds.
    pub bounds: Vec<TypeProjectionComponent>,
    /// Dialect.
    pub language: Language,
}

impl TypeParameterComponent {
    /// Bounds after the first, which Kotlin moves into a `where` clause.
    pub fn extra_bounds(&self) -> &[TypeProjectionComponent] {
        match self.language {
            Language::Kotlin if self.bounds.len() > 1 => &self.bounds[1..],
            _ => &[],
        }
    }
}

impl Display for TypeParameterComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.language {
            Language::Java if !self.bounds.is_empty() => {
                f.write_str(" extends ")?;
                write_joined(f, &self.bounds, " & ")
            }
            Language::Kotlin => match self.bounds.first() {
                Some(bound) => write!(f, " : {bound}"),
                None => Ok(()),
            },
            Language::Java => Ok(()),
        }
    }
}

/// Write `<T, U> ` when `type_parameters` is non-empty.
fn write_type_parameters(
    f: &mut fmt::Formatter<'_>,
    type_parameters: &[TypeParameterComponent],
) -> fmt::Result {
    if type_parameters.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    write_joined(f, type_parameters, ", ")?;
    f.write_str("> ")
}

/// Write ` where T : B, T : C` for Kotlin type parameters with several bounds.
fn write_where_clause(
    f: &mut fmt::Formatter<'_>,
    type_parameters: &[TypeParameterComponent],
) -> fmt::Result {
    let mut first = true;
    for tp in type_parameters {
        for bound in tp.extra_bounds() {
            f.write_str(if first { " where " } else { ", " })?;
            write!(f, "{} : {bound}", tp.name)?;
            first = false;
        }
    }
    Ok(())
}

/// Write modifiers followed by a space.
fn write_modifiers(f: &mut fmt::Formatter<'_>, modifiers: &Modifiers) -> fmt::Result {
    if modifiers.is_empty() {
        return Ok(());
    }
    write!(f, "{modifiers} ")
}

/// The signature of a function or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSignature {
    /// Dialect.
    pub language: Language,
    /// Function name.
    pub name: Link,
    /// Display modifiers.
    pub modifiers: Modifiers,
    /// Declaration annotations.
    pub annotations: Vec<AnnotationComponent>,
    /// Declared type parameters.
    pub type_parameters: Vec<TypeParameterComponent>,
    /// Extension receiver; Java renders it as the first parameter instead.
    pub receiver: Option<ParameterComponent>,
    /// Value parameters.
    pub parameters: Vec<ParameterComponent>,
    /// Return type.
    pub return_type: TypeProjectionComponent,
    /// Whether the function is a constructor.
    pub is_constructor: bool,
    /// Whether the function is deprecated.
    pub is_deprecated: bool,
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_annotations(f, &self.annotations)?;
        write_modifiers(f, &self.modifiers)?;
        match self.language {
            Language::Java => {
                write_type_parameters(f, &self.type_parameters)?;
                if !self.is_constructor {
                    write!(f, "{} ", self.return_type)?;
                }
                write!(f, "{}(", self.name)?;
                write_joined(f, &self.parameters, ", ")?;
                f.write_str(")")
            }
            Language::Kotlin => {
                if self.is_constructor {
                    f.write_str("constructor(")?;
                    write_joined(f, &self.parameters, ", ")?;
                    return f.write_str(")");
                }
                f.write_str("fun ")?;
                write_type_parameters(f, &self.type_parameters)?;
                if let Some(receiver) = &self.receiver {
                    write!(f, "{}.", receiver.ty)?;
                }
                write!(f, "{}(", self.name)?;
                write_joined(f, &self.parameters, ", ")?;
                write!(f, "): {}", self.return_type)?;
                write_where_clause(f, &self.type_parameters)
            }
        }
    }
}

/// The signature of a property or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertySignature {
    /// Dialect.
    pub language: Language,
    /// Property name.
    pub name: Link,
    /// Display modifiers.
    pub modifiers: Modifiers,
    /// Declaration annotations.
    pub annotations: Vec<AnnotationComponent>,
    /// Extension receiver.
    pub receiver: Option<ParameterComponent>,
    /// Property type.
    #[serde(rename = "type")]
    pub ty: TypeProjectionComponent,
    /// `var` rather than `val`.
    pub is_mutable: bool,
    /// Constant initializer, kept for constants only.
    pub constant_value: Option<String>,
    /// Whether the property is deprecated.
    pub is_deprecated: bool,
}

impl Display for PropertySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_annotations(f, &self.annotations)?;
        write_modifiers(f, &self.modifiers)?;
        match self.language {
            Language::Java => write!(f, "{} {}", self.ty, self.name)?,
            Language::Kotlin => {
                f.write_str(if self.is_mutable { "var " } else { "val " })?;
                if let Some(receiver) = &self.receiver {
                    write!(f, "{}.", receiver.ty)?;
                }
                write!(f, "{}: {}", self.name, self.ty)?;
            }
        }
        if let Some(value) = &self.constant_value {
            write!(f, " = {value}")?;
        }
        Ok(())
    }
}

/// Signature of any declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationSignature {
    /// Function or constructor.
    Function(FunctionSignature),
    /// Property or field.
    Property(PropertySignature),
}

impl DeclarationSignature {
    /// Declared name.
    pub fn name(&self) -> &str {
        match self {
            Self::Function(s) => &s.name.name,
            Self::Property(s) => &s.name.name,
        }
    }
}

impl Display for DeclarationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(s) => s.fmt(f),
            Self::Property(s) => s.fmt(f),
        }
    }
}
