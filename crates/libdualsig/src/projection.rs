//! Conversion of type occurrences into renderable components.
//!
//! [`component_for_projection`] runs a fixed sequence of [`Stage`]s over one projection. Each
//! stage either refines the pipeline state or finishes the conversion, wrapper types finishing by
//! recursing on their inner type. The stage order matters: generic arguments are read from the
//! projection as written, before the dialect rewrite can replace it with a primitive or array.
#![allow(clippy::missing_docs_in_private_items)]

use tracing::trace;

use crate::{
    annotation_converter::annotation_components,
    annotations::{
        Annotation, distinct_by_identifier, in_source_set, partition_by_placement,
        projection_annotations,
    },
    components::{
        LambdaComponent, Link, MappedComponent, ParameterComponent, TypeComponent,
        TypeParameterComponent, TypeProjectionComponent,
    },
    context::RenderContext,
    error::{DualsigError, Result},
    mapped::mutable_counterpart,
    model::{ConstructorKind, Dri, Parameter, Projection, SourceSet, TypeParameterDecl},
    modifiers::{ElementKind, HintFlags, ModifierHints, modifiers_for},
    nullability::{Nullability, nullability},
    rewrite::{JavaRewrite, as_kotlin, is_lambda, is_suspend, rewrite_for_java},
};

/// Name given to an unnamed receiver rendered as a Java parameter.
const RECEIVER_NAME: &str = "receiver";

/// One request to [`component_for_projection`].
#[derive(Debug, Clone)]
pub struct ProjectionRequest<'a> {
    /// The type occurrence.
    pub projection: &'a Projection,
    /// Whether the enclosing declaration was written in Java.
    pub is_java_source: bool,
    /// Source set whose annotations apply.
    pub source_set: &'a SourceSet,
    /// Annotations moved onto this type from its declaration.
    pub propagated_annotations: Vec<Annotation>,
    /// Annotations already shown on the declaration.
    pub removed_annotations: Vec<Annotation>,
    /// Whether this is a return type.
    pub is_return: bool,
    /// Nullability forced by the enclosing element.
    pub propagated_nullability: Option<Nullability>,
    /// Whether a Java primitive here must be boxed.
    pub must_box: bool,
}

impl<'a> ProjectionRequest<'a> {
    /// A request with no propagated state.
    pub fn new(projection: &'a Projection, is_java_source: bool, source_set: &'a SourceSet) -> Self {
        Self {
            projection,
            is_java_source,
            source_set,
            propagated_annotations: Vec::new(),
            removed_annotations: Vec::new(),
            is_return: false,
            propagated_nullability: None,
            must_box: false,
        }
    }

    /// Set the annotations moved onto this type.
    pub fn with_propagated_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.propagated_annotations = annotations;
        self
    }

    /// Set the annotations that must not be shown again.
    pub fn with_removed_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.removed_annotations = annotations;
        self
    }

    /// Mark as a return type.
    pub fn with_return(mut self, is_return: bool) -> Self {
        self.is_return = is_return;
        self
    }

    /// Force a nullability from the enclosing element.
    pub fn with_propagated_nullability(mut self, nullability: Nullability) -> Self {
        self.propagated_nullability = Some(nullability);
        self
    }

    /// Require boxing of Java primitives.
    pub fn with_must_box(mut self, must_box: bool) -> Self {
        self.must_box = must_box;
        self
    }

    /// The same request for another projection, keeping the propagated state.
    fn for_inner<'b>(&self, projection: &'b Projection) -> ProjectionRequest<'b>
    where
        'a: 'b,
    {
        ProjectionRequest {
            projection,
            is_java_source: self.is_java_source,
            source_set: self.source_set,
            propagated_annotations: self.propagated_annotations.clone(),
            removed_annotations: self.removed_annotations.clone(),
            is_return: self.is_return,
            propagated_nullability: self.propagated_nullability,
            must_box: self.must_box,
        }
    }
}

/// Steps of a projection conversion, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Convert generic arguments of the projection as written.
    Generics,
    /// Rewrite the projection for the display dialect.
    Rewrite,
    /// Drop generics of Java arrays, which are now part of the name.
    HoistArray,
    /// Recurse through nullable, variance and alias wrappers.
    Unwrap,
    /// Collect annotations and resolve nullability.
    Annotate,
    /// Build the plain, lambda or mapped component.
    Dispatch,
}

impl Stage {
    /// Every stage in execution order.
    pub const ORDER: [Self; 6] = [
        Self::Generics,
        Self::Rewrite,
        Self::HoistArray,
        Self::Unwrap,
        Self::Annotate,
        Self::Dispatch,
    ];

    /// Name used in traces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Generics => "generics",
            Self::Rewrite => "rewrite",
            Self::HoistArray => "hoist-array",
            Self::Unwrap => "unwrap",
            Self::Annotate => "annotate",
            Self::Dispatch => "dispatch",
        }
    }
}

/// Result of running one stage.
enum Step {
    /// Continue with the next stage.
    Next,
    /// The conversion is complete.
    Done(TypeProjectionComponent),
}

/// State carried between stages.
struct Pipeline<'c, 'r, 'a> {
    ctx: &'c RenderContext,
    req: &'r ProjectionRequest<'a>,
    generics: Vec<TypeProjectionComponent>,
    rewritten: Projection,
    annotations: Vec<Annotation>,
    nullability: Nullability,
}

impl<'c, 'r, 'a> Pipeline<'c, 'r, 'a> {
    fn new(ctx: &'c RenderContext, req: &'r ProjectionRequest<'a>) -> Self {
        Self {
            ctx,
            req,
            generics: Vec::new(),
            rewritten: req.projection.clone(),
            annotations: Vec::new(),
            nullability: Nullability::DontCare,
        }
    }

    fn run(mut self) -> Result<TypeProjectionComponent> {
        for stage in Stage::ORDER {
            trace!(stage = stage.label(), shape = self.rewritten.shape(), "projection stage");
            let step = match stage {
                Stage::Generics => self.generics()?,
                Stage::Rewrite => self.rewrite()?,
                Stage::HoistArray => self.hoist_array(),
                Stage::Unwrap => self.unwrap()?,
                Stage::Annotate => self.annotate(),
                Stage::Dispatch => return self.dispatch(),
            };
            if let Step::Done(component) = step {
                return Ok(component);
            }
        }
        Err(DualsigError::unsupported("pipeline", self.rewritten.shape()))
    }

    fn generics(&mut self) -> Result<Step> {
        self.generics = generic_arguments(self.req.projection)
            .iter()
            .map(|arg| {
                let req = ProjectionRequest::new(arg, self.req.is_java_source, self.req.source_set)
                    .with_must_box(true);
                component_for_projection(self.ctx, &req)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Step::Next)
    }

    fn rewrite(&mut self) -> Result<Step> {
        self.rewritten = if self.ctx.is_java() {
            let flags = JavaRewrite {
                is_return: self.req.is_return,
                must_box: self.req.must_box,
                qualified: self.ctx.config().qualified_array_names,
            };
            rewrite_for_java(self.req.projection, flags)?
        } else {
            as_kotlin(self.req.projection, self.ctx.kotlin_cache())
        };
        Ok(Step::Next)
    }

    fn hoist_array(&mut self) -> Step {
        if let Projection::Primitive { name } = &self.rewritten
            && name.ends_with("[]")
        {
            self.generics.clear();
        }
        Step::Next
    }

    fn unwrap(&self) -> Result<Step> {
        let component = match &self.rewritten {
            Projection::Nullable { inner } => {
                let mut req = self.req.for_inner(inner).with_return(false);
                req.propagated_nullability =
                    Some(Nullability::KotlinNullable.or(self.req.propagated_nullability));
                component_for_projection(self.ctx, &req)?
            }
            Projection::Variance { inner, .. } => {
                let req = self.req.for_inner(inner).with_return(false);
                component_for_projection(self.ctx, &req)?
            }
            Projection::TypeAliased { inner, .. } => {
                component_for_projection(self.ctx, &self.req.for_inner(inner))?
            }
            _ => return Ok(Step::Next),
        };
        Ok(Step::Done(component))
    }

    fn annotate(&mut self) -> Step {
        let mut annotations = self.req.propagated_annotations.clone();
        annotations.extend(projection_annotations(self.req.projection, self.req.source_set));
        annotations.retain(|a| !self.req.removed_annotations.contains(a));
        self.nullability = nullability(
            &self.rewritten,
            self.ctx.language(),
            Some(self.req.is_java_source),
            &self.req.propagated_annotations,
        )
        .or(self.req.propagated_nullability);
        self.annotations = annotations;
        Step::Next
    }

    fn dispatch(self) -> Result<TypeProjectionComponent> {
        // `?` takes no annotation of its own.
        let shown = match self.rewritten {
            Projection::Star => Nullability::DontCare,
            _ => self.nullability,
        };
        let annotations = annotation_components(self.ctx, &self.annotations, shown)?;
        let language = self.ctx.language();
        if self.ctx.is_java() {
            return Ok(TypeProjectionComponent::Plain(TypeComponent {
                link: to_link(self.ctx, &self.rewritten, "")?,
                nullability: self.nullability,
                language,
                generics: self.generics,
                annotations,
            }));
        }

        if is_lambda(&self.rewritten)? {
            return lambda_component(self.ctx, self.req, &self.rewritten, &self.annotations, self.nullability)
                .map(TypeProjectionComponent::Lambda);
        }

        let base = TypeComponent {
            link: to_link(self.ctx, &self.rewritten, "")?,
            nullability: self.nullability,
            language,
            generics: self.generics,
            annotations,
        };
        if let Some(tc) = self.rewritten.as_constructor()
            && self.req.is_java_source
            && tc.kind == ConstructorKind::Generic
            && let Some(mutable) = mutable_counterpart(&tc.dri)
        {
            return Ok(TypeProjectionComponent::Mapped(MappedComponent {
                base,
                alternative_prefix: Link {
                    name: "Mutable".to_string(),
                    url: self.ctx.link_for(&mutable).url,
                },
            }));
        }
        Ok(TypeProjectionComponent::Plain(base))
    }
}

/// Generic arguments of `projection` as written, looking through wrappers.
fn generic_arguments(projection: &Projection) -> &[Projection] {
    match projection {
        Projection::TypeConstructor(tc) => &tc.projections,
        Projection::Nullable { inner }
        | Projection::Variance { inner, .. }
        | Projection::TypeAliased { inner, .. }
        | Projection::DefinitelyNonNull { inner } => generic_arguments(inner),
        _ => &[],
    }
}

/// Convert one type occurrence.
pub fn component_for_projection(
    ctx: &RenderContext,
    req: &ProjectionRequest<'_>,
) -> Result<TypeProjectionComponent> {
    Pipeline::new(ctx, req).run()
}

/// The displayed name and target of a rewritten leaf projection.
///
/// `suffix` is appended to type parameter names, for `T?` inside a nullable wrapper.
pub fn to_link(ctx: &RenderContext, projection: &Projection, suffix: &str) -> Result<Link> {
    let java = ctx.is_java();
    Ok(match projection {
        Projection::TypeConstructor(tc) => ctx.link_for(&tc.dri),
        Projection::TypeParameter(tp) => {
            let name = tp.presentable_name.as_deref().unwrap_or(&tp.name);
            Link::unlinked(format!("{name}{suffix}"))
        }
        Projection::Star => Link::unlinked(if java { "?" } else { "*" }),
        Projection::Void if java => Link::unlinked("void"),
        Projection::Void => ctx.link_for(&Dri::new("kotlin", "Unit")),
        Projection::JavaObject { .. } if java => ctx.link_for(&Dri::new("java.lang", "Object")),
        Projection::JavaObject { .. } => ctx.link_for(&Dri::new("kotlin", "Any")),
        Projection::Primitive { name } if java => Link::unlinked(name.clone()),
        Projection::Primitive { name } => ctx.link_for(&Dri::new("kotlin", capitalize(name))),
        Projection::UnresolvedBound { name } => Link::unlinked(name.clone()),
        Projection::Nullable { inner } => to_link(ctx, inner, "?")?,
        Projection::DefinitelyNonNull { inner } => to_link(ctx, inner, "")?,
        Projection::Dynamic | Projection::TypeAliased { .. } | Projection::Variance { .. } => {
            return Err(DualsigError::unsupported("to_link", projection.shape()));
        }
    })
}

/// `int` to `Int`.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build a Kotlin function type component.
fn lambda_component(
    ctx: &RenderContext,
    req: &ProjectionRequest<'_>,
    lambda: &Projection,
    annotations: &[Annotation],
    own_nullability: Nullability,
) -> Result<LambdaComponent> {
    let tc = lambda
        .without_definitely_non_null()
        .as_constructor()
        .ok_or_else(|| DualsigError::unsupported("lambda", lambda.shape()))?;
    let Some((return_type, rest)) = tc.projections.split_last() else {
        return Err(DualsigError::unsupported("lambda", "TypeConstructor"));
    };
    let is_extension = matches!(tc.kind, ConstructorKind::Functional { is_extension: true, .. });
    let (receiver, parameters) = match rest.split_first() {
        Some((receiver, parameters)) if is_extension => (Some(receiver), parameters),
        _ => (None, rest),
    };

    let language = ctx.language();
    let return_req = ProjectionRequest::new(return_type, false, req.source_set)
        .with_propagated_nullability(nullability(lambda, language, None, &[]));
    let receiver = receiver
        .map(|r| {
            component_for_projection(ctx, &ProjectionRequest::new(r, false, req.source_set)).map(Box::new)
        })
        .transpose()?;
    let parameters = parameters
        .iter()
        .map(|p| component_for_lambda_parameter(ctx, p, false, req.source_set))
        .collect::<Result<Vec<_>>>()?;
    let shown = nullability(lambda, language, Some(false), annotations).or(Some(own_nullability));

    Ok(LambdaComponent {
        return_type: Box::new(component_for_projection(ctx, &return_req)?),
        nullability: own_nullability,
        language,
        modifiers: if is_suspend(lambda)? {
            vec!["suspend".to_string()]
        } else {
            Vec::new()
        },
        parameters,
        receiver,
        annotations: annotation_components(ctx, annotations, shown)?,
    })
}

/// Convert one parameter of a function type.
///
/// Annotations on the projection are split: type-bound ones stay on the type, the rest are shown
/// on the parameter and removed from the type.
pub fn component_for_lambda_parameter(
    ctx: &RenderContext,
    projection: &Projection,
    is_from_java: bool,
    source_set: &SourceSet,
) -> Result<ParameterComponent> {
    let (on_type, on_parameter) = partition_by_placement(&projection_annotations(projection, source_set));
    let on_parameter = distinct_by_identifier(on_parameter);
    let req = ProjectionRequest::new(projection, is_from_java, source_set)
        .with_propagated_annotations(on_type)
        .with_removed_annotations(on_parameter.clone());
    let ty = component_for_projection(ctx, &req)?;
    let name = projection
        .as_constructor()
        .and_then(|tc| tc.presentable_name.clone())
        .unwrap_or_default();
    let annotations = annotation_components(
        ctx,
        &on_parameter,
        nullability(projection, ctx.language(), Some(is_from_java), &[]),
    )?;
    Ok(ParameterComponent {
        name,
        ty,
        default_value: None,
        modifiers: Default::default(),
        annotations,
        language: ctx.language(),
    })
}

/// Convert a function parameter or receiver.
///
/// Annotations and default values are read for `source_set`. Default values are omitted from
/// summaries and from Java, which has none. The enclosing element of a parameter is a function,
/// so its hints carry no container.
pub fn component_for_parameter(
    ctx: &RenderContext,
    param: &Parameter,
    is_summary: bool,
    is_from_java: bool,
    source_set: &SourceSet,
) -> Result<ParameterComponent> {
    let (on_type, on_parameter) = partition_by_placement(&in_source_set(&param.annotations, source_set));
    let language = ctx.language();
    let mut flags = HintFlags::empty();
    flags.set(HintFlags::FROM_JAVA, is_from_java);
    let modifiers = modifiers_for(
        &param.modifiers,
        &ModifierHints::new(language, ElementKind::Parameter, None).with_flags(flags),
    )?;

    if ctx.is_java() {
        let declared = param.annotations.first().cloned().unwrap_or_default();
        let resolved = nullability(&param.ty, language, Some(is_from_java), &declared);
        let req = ProjectionRequest::new(&param.ty, is_from_java, source_set)
            .with_propagated_annotations(on_type)
            .with_propagated_nullability(resolved);
        return Ok(ParameterComponent {
            name: param.name.clone().unwrap_or_else(|| RECEIVER_NAME.to_string()),
            ty: component_for_projection(ctx, &req)?,
            default_value: None,
            modifiers,
            annotations: annotation_components(ctx, &on_parameter, Nullability::DontCare)?,
            language,
        });
    }

    let kotlin_type = as_kotlin(&param.ty, ctx.kotlin_cache());
    let req = ProjectionRequest::new(&kotlin_type, is_from_java, source_set)
        .with_propagated_annotations(on_type);
    let mut name = param.name.clone().unwrap_or_default();
    if name.is_empty() && is_lambda(&kotlin_type)? {
        name = kotlin_type
            .as_constructor()
            .and_then(|tc| tc.presentable_name.clone())
            .unwrap_or_default();
    }
    Ok(ParameterComponent {
        name,
        ty: component_for_projection(ctx, &req)?,
        default_value: if is_summary {
            None
        } else {
            param.default_value.get(source_set).cloned()
        },
        modifiers,
        annotations: annotation_components(ctx, &on_parameter, Nullability::DontCare)?,
        language,
    })
}

/// Convert a declared type parameter and its bounds.
///
/// Java hides bound nullability; Kotlin resolves it against the parameter's own annotations.
pub fn component_for_type_parameter(
    ctx: &RenderContext,
    decl: &TypeParameterDecl,
    is_from_java: bool,
    source_set: &SourceSet,
) -> Result<TypeParameterComponent> {
    let declared = decl.annotations.first().cloned().unwrap_or_default();
    let bounds = decl
        .bounds
        .iter()
        .map(|bound| {
            let propagated = if ctx.is_java() {
                Nullability::DontCare
            } else {
                nullability(bound, ctx.language(), Some(is_from_java), &declared)
            };
            let req = ProjectionRequest::new(bound, is_from_java, source_set)
                .with_propagated_nullability(propagated);
            component_for_projection(ctx, &req)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TypeParameterComponent {
        name: decl.name.clone(),
        bounds,
        language: ctx.language(),
    })
}
