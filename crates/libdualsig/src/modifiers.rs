//! Modifier filtering for display.
//!
//! The host model reports every modifier the compiler infers, including the implicit ones
//! (`abstract` on interface members, `final` on everything). These rules keep what a reader of
//! each dialect would expect to see in source.
#![allow(clippy::missing_docs_in_private_items)]

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{
    error::{DualsigError, Result},
    model::{ContainerKind, Language},
};

/// A source-level modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `internal`
    Internal,
    /// `expect`
    Expect,
    /// `actual`
    Actual,
    /// `static`
    Static,
    /// Marks a Java static member when displayed in Kotlin.
    JavaStatic,
    /// `final`
    Final,
    /// `open`
    Open,
    /// `abstract`
    Abstract,
    /// `sealed`
    Sealed,
    /// `const`
    Const,
    /// `external`
    External,
    /// `override`
    Override,
    /// `lateinit`
    Lateinit,
    /// `tailrec`
    Tailrec,
    /// `vararg`
    Vararg,
    /// `suspend`
    Suspend,
    /// `inner`
    Inner,
    /// `enum`
    Enum,
    /// `annotation`
    Annotation,
    /// `fun`
    Fun,
    /// `companion`
    Companion,
    /// `inline`
    Inline,
    /// `infix`
    Infix,
    /// `operator`
    Operator,
    /// `data`
    Data,
    /// `noinline`
    Noinline,
    /// `crossinline`
    Crossinline,
    /// `reified`
    Reified,
    /// `value`
    Value,
    /// Java interface `default`.
    Default,
    /// `transient`
    Transient,
    /// `volatile`
    Volatile,
    /// `synchronized`
    Synchronized,
    /// `native`
    Native,
    /// `strictfp`
    Strictfp,
}

/// Display order of modifiers, following the Kotlin coding conventions. Modifiers not listed sort
/// before all listed ones.
pub const MODIFIER_ORDER: &[Modifier] = &[
    // visibility
    Modifier::Public,
    Modifier::Protected,
    Modifier::Private,
    Modifier::Internal,
    // multiplatform
    Modifier::Expect,
    Modifier::Actual,
    // containing scope
    Modifier::Static,
    Modifier::JavaStatic,
    // extensibility
    Modifier::Final,
    Modifier::Open,
    Modifier::Abstract,
    Modifier::Sealed,
    Modifier::Const,
    // other
    Modifier::External,
    Modifier::Override,
    Modifier::Lateinit,
    Modifier::Tailrec,
    Modifier::Vararg,
    Modifier::Suspend,
    Modifier::Inner,
    // types
    Modifier::Enum,
    Modifier::Annotation,
    Modifier::Fun,
    // more
    Modifier::Companion,
    Modifier::Inline,
    Modifier::Infix,
    Modifier::Operator,
    Modifier::Data,
    Modifier::Noinline,
    Modifier::Crossinline,
];

/// Kotlin-only modifiers removed from Java signatures.
const KOTLIN_ONLY: &[Modifier] = &[
    Modifier::Suspend,
    Modifier::Inline,
    Modifier::Noinline,
    Modifier::Crossinline,
    Modifier::Reified,
    Modifier::Operator,
    Modifier::Override,
    Modifier::Open,
    Modifier::Const,
    Modifier::Infix,
    Modifier::Data,
];

impl Modifier {
    /// Source keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Expect => "expect",
            Self::Actual => "actual",
            Self::Static => "static",
            Self::JavaStatic => "java-static",
            Self::Final => "final",
            Self::Open => "open",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Const => "const",
            Self::External => "external",
            Self::Override => "override",
            Self::Lateinit => "lateinit",
            Self::Tailrec => "tailrec",
            Self::Vararg => "vararg",
            Self::Suspend => "suspend",
            Self::Inner => "inner",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Fun => "fun",
            Self::Companion => "companion",
            Self::Inline => "inline",
            Self::Infix => "infix",
            Self::Operator => "operator",
            Self::Data => "data",
            Self::Noinline => "noinline",
            Self::Crossinline => "crossinline",
            Self::Reified => "reified",
            Self::Value => "value",
            Self::Default => "default",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
        }
    }

    /// Position in [`MODIFIER_ORDER`]; `None` for unlisted modifiers, which sort first.
    pub fn order_index(self) -> Option<usize> {
        MODIFIER_ORDER.iter().position(|m| *m == self)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The kind of element whose modifiers are being filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A function.
    Function,
    /// A constructor.
    Constructor,
    /// A property or field.
    Property,
    /// A function or lambda parameter.
    Parameter,
}

impl ElementKind {
    fn label(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Parameter => "parameter",
        }
    }
}

bitflags! {
    /// Boolean facts about the element whose modifiers are filtered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HintFlags: u8 {
        /// Declared in Java source.
        const FROM_JAVA = 1 << 0;
        /// Rendered in a summary table rather than a detail block.
        const SUMMARY = 1 << 1;
        /// Hoisted to static, e.g. by `@JvmField` on a companion property.
        const INJECT_STATIC = 1 << 2;
        /// The element is a constructor.
        const CONSTRUCTOR = 1 << 3;
        /// The element is a member of a companion object.
        const COMPANION = 1 << 4;
    }
}

/// Decision context for [`modifiers_for`].
///
/// This is an approximation: the host reports implicit modifiers, and we drop the ones a reader
/// will assume without replicating the compiler's inheritance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierHints {
    /// Dialect being rendered.
    pub language: Language,
    /// Kind of the element itself.
    pub kind: ElementKind,
    /// Kind of the enclosing element, if any.
    pub container: Option<ContainerKind>,
    /// Additional facts.
    pub flags: HintFlags,
}

impl ModifierHints {
    /// Hints with no flags set.
    pub fn new(language: Language, kind: ElementKind, container: Option<ContainerKind>) -> Self {
        Self {
            language,
            kind,
            container,
            flags: HintFlags::empty(),
        }
    }

    /// Builder-style flag setter.
    pub fn with_flags(mut self, flags: HintFlags) -> Self {
        self.flags |= flags;
        self
    }

    fn in_interface(&self) -> bool {
        self.container == Some(ContainerKind::Interface)
    }

    fn in_package(&self) -> bool {
        self.container == Some(ContainerKind::Package)
    }

    fn in_companion(&self) -> bool {
        self.flags.contains(HintFlags::COMPANION) || self.container == Some(ContainerKind::Companion)
    }

    fn is_property(&self) -> bool {
        self.kind == ElementKind::Property
    }

    fn from_java(&self) -> bool {
        self.flags.contains(HintFlags::FROM_JAVA)
    }
}

/// An ordered, duplicate-free list of display modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    /// Modifiers in display order.
    pub fn as_slice(&self) -> &[Modifier] {
        &self.0
    }

    /// Whether `modifier` is present.
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Whether there are no modifiers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}

/// Insertion-ordered set used while rewriting.
#[derive(Default)]
struct ModifierSet(Vec<Modifier>);

impl ModifierSet {
    fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    fn add(&mut self, modifier: Modifier) {
        if !self.contains(modifier) {
            self.0.push(modifier);
        }
    }

    fn remove(&mut self, modifier: Modifier) {
        self.0.retain(|m| *m != modifier);
    }
}

/// Filter and rewrite `raw` for display under `hints`.
pub fn modifiers_for(raw: &[Modifier], hints: &ModifierHints) -> Result<Modifiers> {
    let mut modifiers = ModifierSet::default();
    for modifier in raw {
        modifiers.add(*modifier);
    }

    match hints.language {
        Language::Java => rewrite_for_java(&mut modifiers, hints)?,
        Language::Kotlin => rewrite_for_kotlin(&mut modifiers, hints),
    }

    if hints.flags.contains(HintFlags::SUMMARY) {
        modifiers.remove(Modifier::Public);
        modifiers.remove(Modifier::Protected);
    }

    let mut out = modifiers.0;
    out.sort_by_key(|m| m.order_index());
    Ok(Modifiers(out))
}

fn rewrite_for_java(modifiers: &mut ModifierSet, hints: &ModifierHints) -> Result<()> {
    if modifiers.contains(Modifier::Const) {
        if !hints.is_property() {
            return Err(DualsigError::ConstOnNonProperty(hints.kind.label().to_string()));
        }
        // `const val`
        modifiers.add(Modifier::Static);
        modifiers.add(Modifier::Final);
    }

    if hints.flags.contains(HintFlags::INJECT_STATIC) {
        modifiers.add(Modifier::Static);
    }

    // Interface members are public by default.
    if hints.in_interface() {
        modifiers.remove(Modifier::Public);
    }

    // Companion and top-level members compile to statics, including extensions.
    if hints.in_companion() || hints.in_package() {
        modifiers.add(Modifier::Static);
    }

    if !modifiers.contains(Modifier::Abstract) && hints.in_interface() {
        modifiers.add(Modifier::Default);
    }

    if hints.flags.contains(HintFlags::CONSTRUCTOR) || hints.kind == ElementKind::Constructor {
        modifiers.remove(Modifier::Final);
    }

    for modifier in KOTLIN_ONLY {
        modifiers.remove(*modifier);
    }
    Ok(())
}

fn rewrite_for_kotlin(modifiers: &mut ModifierSet, hints: &ModifierHints) {
    if modifiers.contains(Modifier::Static)
        && modifiers.contains(Modifier::Final)
        && hints.is_property()
        && hints.from_java()
    {
        modifiers.remove(Modifier::Static);
        modifiers.remove(Modifier::Final);
        modifiers.add(Modifier::Const);
    }

    modifiers.remove(Modifier::Public);
    if !modifiers.contains(Modifier::Override) {
        modifiers.remove(Modifier::Final);
    }
    if hints.in_interface() {
        modifiers.remove(Modifier::Abstract);
    }

    if modifiers.contains(Modifier::Static) {
        modifiers.remove(Modifier::Static);
        if hints.from_java() {
            modifiers.add(Modifier::JavaStatic);
        }
    }

    modifiers.remove(Modifier::Override);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(raw: &[Modifier], hints: &ModifierHints) -> String {
        modifiers_for(raw, hints).expect("valid modifiers").to_string()
    }

    #[test]
    fn java_const_property_becomes_static_final() {
        let hints = ModifierHints::new(Language::Java, ElementKind::Property, Some(ContainerKind::Object));
        assert_eq!(render(&[Modifier::Public, Modifier::Const], &hints), "public static final");
    }

    #[test]
    fn java_const_function_is_an_error() {
        let hints = ModifierHints::new(Language::Java, ElementKind::Function, None);
        let err = modifiers_for(&[Modifier::Const], &hints).unwrap_err();
        assert!(matches!(err, DualsigError::ConstOnNonProperty(_)));
    }

    #[test]
    fn java_interface_members() {
        let hints =
            ModifierHints::new(Language::Java, ElementKind::Function, Some(ContainerKind::Interface));
        assert_eq!(render(&[Modifier::Public, Modifier::Open], &hints), "default");
        assert_eq!(render(&[Modifier::Public, Modifier::Abstract], &hints), "abstract");
    }

    #[test]
    fn java_drops_kotlin_only_modifiers() {
        let hints = ModifierHints::new(Language::Java, ElementKind::Function, Some(ContainerKind::Package));
        let raw = [
            Modifier::Suspend,
            Modifier::Public,
            Modifier::Inline,
            Modifier::Final,
            Modifier::Operator,
        ];
        assert_eq!(render(&raw, &hints), "public static final");
    }

    #[test]
    fn java_constructor_is_never_final() {
        let hints =
            ModifierHints::new(Language::Java, ElementKind::Constructor, Some(ContainerKind::Class))
                .with_flags(HintFlags::CONSTRUCTOR);
        assert_eq!(render(&[Modifier::Public, Modifier::Final], &hints), "public");
    }

    #[test]
    fn kotlin_java_constant_becomes_const() {
        let hints = ModifierHints::new(Language::Kotlin, ElementKind::Property, Some(ContainerKind::Class))
            .with_flags(HintFlags::FROM_JAVA);
        assert_eq!(
            render(&[Modifier::Public, Modifier::Static, Modifier::Final], &hints),
            "const"
        );
    }

    #[test]
    fn kotlin_static_marks_java_statics() {
        let java = ModifierHints::new(Language::Kotlin, ElementKind::Function, Some(ContainerKind::Class))
            .with_flags(HintFlags::FROM_JAVA);
        assert_eq!(render(&[Modifier::Public, Modifier::Static], &java), "java-static");
        let kotlin = ModifierHints::new(Language::Kotlin, ElementKind::Function, Some(ContainerKind::Class));
        assert_eq!(render(&[Modifier::Static, Modifier::Suspend], &kotlin), "suspend");
    }

    #[test]
    fn kotlin_keeps_final_only_on_overrides() {
        let hints =
            ModifierHints::new(Language::Kotlin, ElementKind::Function, Some(ContainerKind::Interface));
        assert_eq!(render(&[Modifier::Final, Modifier::Abstract], &hints), "");
        assert_eq!(render(&[Modifier::Override, Modifier::Final], &hints), "final");
    }

    #[test]
    fn summary_drops_visibility_and_orders_output() {
        let hints = ModifierHints::new(Language::Kotlin, ElementKind::Function, Some(ContainerKind::Class))
            .with_flags(HintFlags::SUMMARY);
        let raw = [
            Modifier::Inline,
            Modifier::Protected,
            Modifier::Suspend,
            Modifier::Reified,
            Modifier::Open,
        ];
        assert_eq!(render(&raw, &hints), "reified open suspend inline");
    }
}
