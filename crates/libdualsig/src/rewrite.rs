//! Projection rewriting between the two dialects.
//!
//! Java output needs Kotlin primitives turned into Java primitives, boxed types or arrays.
//! Kotlin output needs Java standard library types turned into their Kotlin counterparts.

use crate::{
    context::KotlinCache,
    error::{DualsigError, Result},
    mapped::{self, is_kotlin_primitive, is_kotlin_primitive_array, kotlin_array_for},
    model::{ConstructorKind, Dri, Projection, TypeConstructor},
};

/// Flags for [`rewrite_for_java`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JavaRewrite {
    /// The projection is a return type, so `Unit` becomes `void`.
    pub is_return: bool,
    /// A primitive here must be boxed: generic arguments, nullable types, variances.
    pub must_box: bool,
    /// Name array element types by fully qualified name.
    pub qualified: bool,
}

impl JavaRewrite {
    /// Flags for a position that must box, such as a generic argument.
    fn boxed(self) -> Self {
        Self {
            is_return: false,
            must_box: true,
            qualified: self.qualified,
        }
    }
}

/// Rewrite Kotlin primitives for Java display.
///
/// `Int` is `int` where it can be, `java.lang.Integer` where it must be boxed, and `Unit` is
/// `void` only as a return type since it can also appear as a generic argument. `Unit?` is
/// `void` in every position.
pub fn rewrite_for_java(projection: &Projection, flags: JavaRewrite) -> Result<Projection> {
    Ok(match projection {
        Projection::TypeConstructor(tc) => rewrite_constructor_for_java(tc, flags)?,
        Projection::Nullable { inner } if is_unit(inner) => Projection::Void,
        Projection::Nullable { inner } => match rewrite_for_java(inner, flags.boxed())? {
            Projection::Void => Projection::Void,
            inner => inner.nullable(),
        },
        Projection::Variance { variance, inner } => {
            rewrite_for_java(inner, flags.boxed())?.with_variance(*variance)
        }
        Projection::DefinitelyNonNull { inner } => {
            rewrite_for_java(inner, flags.boxed())?.definitely_non_null()
        }
        // Aliases are cosmetic and keep the position's flags.
        Projection::TypeAliased { alias, inner } => Projection::TypeAliased {
            alias: alias.clone(),
            inner: Box::new(rewrite_for_java(inner, flags)?),
        },
        Projection::TypeParameter(_)
        | Projection::Primitive { .. }
        | Projection::JavaObject { .. }
        | Projection::Void
        | Projection::Dynamic
        | Projection::Star
        | Projection::UnresolvedBound { .. } => projection.clone(),
    })
}

/// Whether `projection` is `kotlin.Unit`.
fn is_unit(projection: &Projection) -> bool {
    projection
        .as_constructor()
        .is_some_and(|tc| tc.dri.package == "kotlin" && tc.dri.class_names() == "Unit")
}

/// The class reference arm of [`rewrite_for_java`].
fn rewrite_constructor_for_java(tc: &TypeConstructor, flags: JavaRewrite) -> Result<Projection> {
    let is_stdlib = tc.dri.package == "kotlin";
    let class_names = tc.dri.class_names();
    // Generic arguments can't be primitives in Java and are never in return position.
    let projections = tc
        .projections
        .iter()
        .map(|p| rewrite_for_java(p, flags.boxed()))
        .collect::<Result<Vec<_>>>()?;

    if flags.is_return && is_stdlib && class_names == "Unit" {
        return Ok(Projection::Void);
    }
    if is_stdlib && is_kotlin_primitive(class_names) {
        if !flags.must_box {
            return Ok(Projection::primitive(class_names.to_lowercase()));
        }
        let boxed = match class_names {
            "Char" => "Character",
            "Int" => "Integer",
            other => other,
        };
        return Ok(Projection::TypeConstructor(TypeConstructor {
            dri: Dri::new("java.lang", boxed),
            ..tc.clone()
        }));
    }
    if is_stdlib && is_kotlin_primitive_array(class_names) {
        let element = class_names.trim_end_matches("Array").to_lowercase();
        return Ok(Projection::primitive(format!("{element}[]")));
    }
    if is_stdlib && class_names == "Array" {
        let element = match projections.as_slice() {
            [element] => name_for_java_array(element, flags.qualified)?,
            _ => "java.lang.Object".to_string(),
        };
        return Ok(Projection::primitive(format!("{element}[]")));
    }
    Ok(Projection::TypeConstructor(TypeConstructor {
        dri: mapped::to_java(&tc.dri),
        projections,
        ..tc.clone()
    }))
}

/// Name of `projection` as the element type of a Java array.
pub fn name_for_java_array(projection: &Projection, qualified: bool) -> Result<String> {
    let class_name = |dri: &Dri| {
        if qualified {
            dri.full_name()
        } else {
            dri.class_names().to_string()
        }
    };
    Ok(match projection {
        Projection::TypeParameter(tp) => tp.name.clone(),
        Projection::TypeConstructor(tc) => match tc.kind {
            ConstructorKind::Generic => class_name(&tc.dri),
            ConstructorKind::Functional { .. } => {
                let args = tc
                    .projections
                    .iter()
                    .map(|p| name_for_java_array(p, qualified))
                    .collect::<Result<Vec<_>>>()?;
                format!("{}({})", class_name(&tc.dri), args.join(", "))
            }
        },
        Projection::Nullable { inner }
        | Projection::DefinitelyNonNull { inner }
        | Projection::TypeAliased { inner, .. }
        | Projection::Variance { inner, .. } => name_for_java_array(inner, qualified)?,
        Projection::UnresolvedBound { name } | Projection::Primitive { name } => name.clone(),
        Projection::Void => "void".to_string(),
        Projection::Star => "*".to_string(),
        Projection::JavaObject { .. } if qualified => "java.lang.Object".to_string(),
        Projection::JavaObject { .. } => "Object".to_string(),
        Projection::Dynamic => return Err(DualsigError::DynamicArrayElement),
    })
}

/// Convert Java standard library types to Kotlin, memoized in `cache`.
///
/// `kotlin.Array<int>` becomes `kotlin.IntArray`; variance wrappers are dropped.
pub fn as_kotlin(projection: &Projection, cache: &KotlinCache) -> Projection {
    cache.get_or_insert_with(projection, |p| convert_to_kotlin(p, cache))
}

/// Uncached conversion step of [`as_kotlin`].
fn convert_to_kotlin(projection: &Projection, cache: &KotlinCache) -> Projection {
    match projection {
        Projection::TypeConstructor(tc) => {
            let primitive_array = match tc.projections.as_slice() {
                [Projection::Primitive { name }]
                    if tc.dri.package == "kotlin" && tc.dri.class_names() == "Array" =>
                {
                    kotlin_array_for(name)
                }
                _ => None,
            };
            match primitive_array {
                Some(array) => Projection::TypeConstructor(TypeConstructor {
                    dri: Dri::new("kotlin", array),
                    projections: Vec::new(),
                    ..tc.clone()
                }),
                None => Projection::TypeConstructor(TypeConstructor {
                    dri: mapped::to_kotlin(&tc.dri),
                    projections: tc.projections.iter().map(|p| as_kotlin(p, cache)).collect(),
                    ..tc.clone()
                }),
            }
        }
        Projection::Variance { inner, .. } => as_kotlin(inner, cache),
        _ => projection.clone(),
    }
}

/// Whether `projection` is a suspend function type.
pub fn is_suspend(projection: &Projection) -> Result<bool> {
    match projection.without_definitely_non_null() {
        Projection::Dynamic => Err(DualsigError::unsupported("is_suspend", "Dynamic")),
        Projection::TypeConstructor(tc) => Ok(match tc.kind {
            ConstructorKind::Functional { is_suspendable, .. } if is_suspendable => true,
            _ => {
                tc.dri.package == "kotlin.coroutines"
                    && tc.dri.class_names().starts_with("SuspendFunction")
            }
        }),
        _ => Ok(false),
    }
}

/// Whether `projection` is a Kotlin function type, suspending or not.
pub fn is_lambda(projection: &Projection) -> Result<bool> {
    if is_suspend(projection)? {
        return Ok(true);
    }
    Ok(match projection.without_definitely_non_null() {
        Projection::TypeConstructor(tc) => {
            tc.dri.package == "kotlin" && tc.dri.class_names().starts_with("Function")
        }
        _ => false,
    })
}
