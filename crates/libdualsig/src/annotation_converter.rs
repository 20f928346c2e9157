//! Converts model annotations to displayed annotation components.

use tracing::warn;

use crate::{
    annotations::{Annotation, AnnotationValue, distinct_by_identifier},
    components::{AnnotationComponent, AnnotationParameter},
    context::RenderContext,
    error::{DualsigError, Result},
    nullability::Nullability,
};

/// Displayed annotations for an element with `nullability`.
///
/// Platform-internal nullability annotations are swapped for their public equivalents, and Java
/// output gains an `@NonNull` where the element is non-null but carries no explicit annotation.
pub fn annotation_components(
    ctx: &RenderContext,
    annotations: &[Annotation],
    nullability: Nullability,
) -> Result<Vec<AnnotationComponent>> {
    let mut fixed = annotations
        .iter()
        .cloned()
        .map(Annotation::public_equivalent)
        .collect::<Vec<_>>();

    for annotation in &fixed {
        if annotation.is_nullability()
            && !ctx
                .config()
                .is_valid_nullability_annotation(&annotation.full_name())
        {
            warn!(annotation = %annotation.full_name(), "rejecting nullability annotation");
            return Err(DualsigError::InvalidNullabilityAnnotation(
                annotation.full_name(),
            ));
        }
    }

    if ctx.is_java() && !fixed.iter().any(Annotation::is_nullability) {
        fixed.extend(nullability.java_annotation());
    }

    distinct_by_identifier(fixed)
        .iter()
        .filter(|a| should_document(ctx, a, nullability))
        .map(|a| annotation_component(ctx, a))
        .collect()
}

/// Whether `annotation` is worth showing to a reader.
fn should_document(ctx: &RenderContext, annotation: &Annotation, nullability: Nullability) -> bool {
    let full_name = annotation.full_name();
    if annotation.is_suppress()
        || annotation.is_kotlin_jvm()
        || annotation.is_deprecated()
        || ctx.config().is_not_displayed(&full_name, ctx.language())
        || ctx.config().is_hidden(&full_name)
    {
        return false;
    }
    // Kotlin shows nullability with `?` instead.
    !(annotation.is_nullability() && (nullability == Nullability::DontCare || !ctx.is_java()))
}

/// Convert one annotation with its parameters.
pub fn annotation_component(ctx: &RenderContext, annotation: &Annotation) -> Result<AnnotationComponent> {
    let parameters = annotation
        .params
        .iter()
        .map(|arg| parameter(ctx, &arg.name, &arg.value))
        .collect::<Result<Vec<_>>>()?;
    Ok(AnnotationComponent {
        link: ctx.link_for(&annotation.dri),
        parameters,
    })
}

/// Convert one parameter value.
fn parameter(ctx: &RenderContext, name: &str, value: &AnnotationValue) -> Result<AnnotationParameter> {
    let name = name.to_string();
    Ok(match value {
        AnnotationValue::String(_)
        | AnnotationValue::Literal(_)
        | AnnotationValue::Enum(_)
        | AnnotationValue::Class(_) => AnnotationParameter::Value {
            name,
            value: value.to_string(),
        },
        AnnotationValue::Array(values) => AnnotationParameter::Array {
            name,
            values: values
                .iter()
                .map(|v| parameter(ctx, "", v))
                .collect::<Result<Vec<_>>>()?,
        },
        AnnotationValue::Annotation(nested) => AnnotationParameter::Annotation {
            name,
            annotation: annotation_component(ctx, nested)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        annotations::{AT_NON_NULL, AT_NULLABLE},
        config::DualsigConfig,
        model::Language,
    };

    fn names(components: &[AnnotationComponent]) -> Vec<String> {
        components.iter().map(|c| c.link.name.clone()).collect()
    }

    fn java() -> RenderContext {
        RenderContext::new(Language::Java, DualsigConfig::default())
    }

    #[test]
    fn java_injects_non_null_only_when_absent() {
        let ctx = java();
        let out = annotation_components(&ctx, &[], Nullability::KotlinDefault).unwrap();
        assert_eq!(names(&out), vec!["NonNull"]);

        let explicit = [Annotation::from_qualified(AT_NULLABLE)];
        let out = annotation_components(&ctx, &explicit, Nullability::KotlinDefault).unwrap();
        assert_eq!(names(&out), vec!["Nullable"]);

        let out = annotation_components(&ctx, &[], Nullability::KotlinNullable).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn kotlin_and_dont_care_hide_nullability() {
        let kotlin = RenderContext::new(Language::Kotlin, DualsigConfig::default());
        let explicit = [Annotation::from_qualified(AT_NON_NULL)];
        assert!(annotation_components(&kotlin, &explicit, Nullability::KotlinDefault)
            .unwrap()
            .is_empty());
        assert!(annotation_components(&java(), &explicit, Nullability::DontCare)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn android_annotations_become_androidx() {
        let ctx = java();
        let internal = [Annotation::new("android.annotation", "NonNull")];
        let out = annotation_components(&ctx, &internal, Nullability::JavaAnnotatedNotNull).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].link.url,
            "reference/java/androidx/annotation/NonNull.html"
        );
    }

    #[test]
    fn invalid_nullability_annotation_is_an_error() {
        let bad = [Annotation::new("javax.annotation", "Nullable")];
        let err = annotation_components(&java(), &bad, Nullability::JavaAnnotatedNullable).unwrap_err();
        assert!(matches!(
            err,
            DualsigError::InvalidNullabilityAnnotation(name) if name == "javax.annotation.Nullable"
        ));
    }

    #[test]
    fn filters_noise() {
        let config = DualsigConfig {
            annotations_not_to_display: vec!["java.lang.Override".into()],
            hidden_annotations: vec!["com.example.Internal".into()],
            ..DualsigConfig::default()
        };
        let ctx = RenderContext::new(Language::Kotlin, config);
        let input = [
            Annotation::new("kotlin", "Suppress"),
            Annotation::new("kotlin.jvm", "JvmName")
                .with_param("name", AnnotationValue::String("x".into())),
            Annotation::new("kotlin", "Deprecated"),
            Annotation::new("java.lang", "Override"),
            Annotation::new("com.example", "Internal"),
            Annotation::new("androidx.annotation", "UiThread"),
            Annotation::new("androidx.annotation", "UiThread"),
        ];
        let out = annotation_components(&ctx, &input, Nullability::KotlinDefault).unwrap();
        assert_eq!(names(&out), vec!["UiThread"]);
    }

    #[test]
    fn parameters() {
        let ctx = java();
        let annotation = Annotation::new("androidx.annotation", "RequiresPermission")
            .with_param(
                "anyOf",
                AnnotationValue::Array(vec![
                    AnnotationValue::String("a".into()),
                    AnnotationValue::Enum("Perm.B".into()),
                ]),
            )
            .with_param(
                "conditional",
                AnnotationValue::Annotation(Box::new(Annotation::new("androidx.annotation", "Px"))),
            );
        let out = annotation_component(&ctx, &annotation).unwrap();
        assert_eq!(
            out.to_string(),
            "@RequiresPermission(anyOf = {\"a\", Perm.B}, conditional = @Px)"
        );
    }
}
