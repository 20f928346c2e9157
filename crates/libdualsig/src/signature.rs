//! Function and property signature builders.
//!
//! A signature is built for one source set at a time. Declaration annotations are split by
//! placement: type-bound ones (nullability and type-use annotations) move onto the return or
//! property type, the rest are shown on the declaration.

use crate::{
    annotation_converter::annotation_components,
    annotations::{Annotation, in_source_set, partition_by_placement},
    components::{DeclarationSignature, FunctionSignature, Link, PropertySignature, TypeProjectionComponent},
    context::RenderContext,
    error::Result,
    model::{ContainerKind, Declaration, DeclarationKind, Function, Projection, Property, SourceSet},
    modifiers::{ElementKind, HintFlags, Modifier, ModifierHints, Modifiers, modifiers_for},
    nullability::{Nullability, nullability},
    projection::{
        ProjectionRequest, component_for_parameter, component_for_projection, component_for_type_parameter,
    },
};

/// The signature of `decl` as declared in `source_set`.
pub fn signature_for(
    ctx: &RenderContext,
    decl: &Declaration,
    source_set: &SourceSet,
    is_summary: bool,
) -> Result<DeclarationSignature> {
    Ok(match &decl.kind {
        DeclarationKind::Function(function) => {
            DeclarationSignature::Function(function_signature(ctx, decl, function, source_set, is_summary)?)
        }
        DeclarationKind::Property(property) => {
            DeclarationSignature::Property(property_signature(ctx, decl, property, source_set, is_summary)?)
        }
    })
}

/// Build the signature of a function or constructor.
pub fn function_signature(
    ctx: &RenderContext,
    decl: &Declaration,
    function: &Function,
    source_set: &SourceSet,
    is_summary: bool,
) -> Result<FunctionSignature> {
    let kind = if function.is_constructor {
        ElementKind::Constructor
    } else {
        ElementKind::Function
    };
    let modifiers = declaration_modifiers(ctx, decl, kind, source_set, is_summary)?;
    let (on_type, on_declaration) = partition_by_placement(&in_source_set(&decl.annotations, source_set));
    let return_type = typed_component(ctx, decl, &function.return_type, on_type, source_set, true)?;

    let type_parameters = function
        .type_parameters
        .iter()
        .map(|tp| component_for_type_parameter(ctx, tp, decl.from_java, source_set))
        .collect::<Result<Vec<_>>>()?;
    let mut parameters = function
        .parameters
        .iter()
        .map(|p| component_for_parameter(ctx, p, is_summary, decl.from_java, source_set))
        .collect::<Result<Vec<_>>>()?;
    let mut receiver = function
        .receiver
        .as_ref()
        .map(|r| component_for_parameter(ctx, r, is_summary, decl.from_java, source_set))
        .transpose()?;
    // Java sees an extension receiver as the first parameter.
    if ctx.is_java()
        && let Some(receiver) = receiver.take()
    {
        parameters.insert(0, receiver);
    }

    Ok(FunctionSignature {
        language: ctx.language(),
        name: declaration_name(ctx, decl),
        modifiers,
        annotations: annotation_components(ctx, &on_declaration, Nullability::DontCare)?,
        type_parameters,
        receiver,
        parameters,
        return_type,
        is_constructor: function.is_constructor,
        is_deprecated: is_deprecated(decl),
    })
}

/// Build the signature of a property or field.
pub fn property_signature(
    ctx: &RenderContext,
    decl: &Declaration,
    property: &Property,
    source_set: &SourceSet,
    is_summary: bool,
) -> Result<PropertySignature> {
    let modifiers = declaration_modifiers(ctx, decl, ElementKind::Property, source_set, is_summary)?;
    let (on_type, on_declaration) = partition_by_placement(&in_source_set(&decl.annotations, source_set));
    let ty = typed_component(ctx, decl, &property.ty, on_type, source_set, false)?;
    let receiver = match &property.receiver {
        Some(r) if !ctx.is_java() => Some(component_for_parameter(
            ctx,
            r,
            is_summary,
            decl.from_java,
            source_set,
        )?),
        _ => None,
    };
    let constant_value = if is_constant(decl, property, source_set) {
        property.constant_value.clone()
    } else {
        None
    };

    Ok(PropertySignature {
        language: ctx.language(),
        name: declaration_name(ctx, decl),
        modifiers,
        annotations: annotation_components(ctx, &on_declaration, Nullability::DontCare)?,
        receiver,
        ty,
        is_mutable: property.is_mutable,
        constant_value,
        is_deprecated: is_deprecated(decl),
    })
}

/// Convert a return or property type, carrying the declaration's type-bound annotations and the
/// nullability they imply.
fn typed_component(
    ctx: &RenderContext,
    decl: &Declaration,
    projection: &Projection,
    on_type: Vec<Annotation>,
    source_set: &SourceSet,
    is_return: bool,
) -> Result<TypeProjectionComponent> {
    let resolved = nullability(projection, ctx.language(), Some(decl.from_java), &on_type);
    let req = ProjectionRequest::new(projection, decl.from_java, source_set)
        .with_propagated_annotations(on_type)
        .with_return(is_return)
        .with_propagated_nullability(resolved);
    component_for_projection(ctx, &req)
}

/// Link text and target for the declaration's name.
fn declaration_name(ctx: &RenderContext, decl: &Declaration) -> Link {
    Link {
        name: decl.name.clone(),
        url: ctx.link_for(&decl.dri).url,
    }
}

/// Hints describing `decl` for the modifier filter.
pub fn hints_for(
    ctx: &RenderContext,
    decl: &Declaration,
    kind: ElementKind,
    is_summary: bool,
) -> ModifierHints {
    let mut flags = HintFlags::empty();
    flags.set(HintFlags::FROM_JAVA, decl.from_java);
    flags.set(HintFlags::SUMMARY, is_summary);
    flags.set(HintFlags::INJECT_STATIC, decl.inject_static);
    flags.set(HintFlags::CONSTRUCTOR, kind == ElementKind::Constructor);
    flags.set(HintFlags::COMPANION, decl.container == ContainerKind::Companion);
    ModifierHints::new(ctx.language(), kind, Some(decl.container)).with_flags(flags)
}

/// Displayed modifiers of `decl` in `source_set`.
fn declaration_modifiers(
    ctx: &RenderContext,
    decl: &Declaration,
    kind: ElementKind,
    source_set: &SourceSet,
    is_summary: bool,
) -> Result<Modifiers> {
    let raw = raw_modifiers(decl, source_set);
    modifiers_for(raw, &hints_for(ctx, decl, kind, is_summary))
}

/// Raw modifiers of `decl` in `source_set`.
fn raw_modifiers<'d>(decl: &'d Declaration, source_set: &SourceSet) -> &'d [Modifier] {
    decl.modifiers.get(source_set).map(Vec::as_slice).unwrap_or_default()
}

/// Whether `property` is a compile-time constant whose value is shown.
///
/// Java `static final` fields count unless they expose a getter, since those may be private
/// fields behind an accessor.
pub fn is_constant(decl: &Declaration, property: &Property, source_set: &SourceSet) -> bool {
    let raw = raw_modifiers(decl, source_set);
    raw.contains(&Modifier::Const)
        || (decl.from_java
            && raw.contains(&Modifier::Static)
            && raw.contains(&Modifier::Final)
            && !property.has_getter)
}

/// Whether any source set marks `decl` deprecated.
pub fn is_deprecated(decl: &Declaration) -> bool {
    decl.annotations.values().flatten().any(Annotation::is_deprecated)
}
