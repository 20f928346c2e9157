use libdualsig::{
    Dualsig, Language,
    annotations::AnnotationValue,
    kmp::expect_or_common,
    model::{ContainerKind, Platform, SourceSet},
    modifiers::Modifier::*,
};
use pretty_assertions::assert_eq;
mod utils;
use utils::*;

fn common() -> SourceSet {
    SourceSet::new("commonMain", Platform::Common)
}

fn jvm() -> SourceSet {
    SourceSet::new("jvmMain", Platform::Jvm)
}

fn js() -> SourceSet {
    SourceSet::new("jsMain", Platform::Js)
}

fn ios() -> SourceSet {
    SourceSet::new("iosMain", Platform::Native)
}

fn now() -> Decl {
    Decl::function("now")
        .container(ContainerKind::Package)
        .returns(class("kotlin.Long"))
}

fn kotlin() -> Dualsig {
    Dualsig::new().with_display_language(Language::Kotlin)
}

#[test]
fn expect_and_actuals_form_two_groups() {
    let decl = now()
        .source_sets(vec![js(), jvm(), common()])
        .expect_in("commonMain")
        .modifiers_in("commonMain", &[Public, Expect])
        .modifiers_in("jvmMain", &[Public, Actual])
        .modifiers_in("jsMain", &[Public, Actual])
        .build();

    let rendered = kotlin().render_declaration(&decl).unwrap();
    let groups = rendered.signatures.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].source_sets, vec![common()]);
    assert_eq!(groups[1].source_sets, vec![jvm(), js()]);
    assert_eq!(rendered.signatures.primary_index(), 0);
    assert_eq!(
        rendered.to_string(),
        "expect fun now(): Long\n    [Cmn] expect fun now(): Long\n    [A, JS] actual fun now(): Long"
    );
}

#[test]
fn primary_group_contains_the_expect_source_set() {
    let decl = now()
        .source_sets(vec![common(), jvm(), js()])
        .expect_in("jvmMain")
        .modifiers_in("commonMain", &[Expect])
        .modifiers_in("jvmMain", &[Expect])
        .modifiers_in("jsMain", &[Actual])
        .build();

    let rendered = kotlin().render_declaration(&decl).unwrap();
    assert_eq!(rendered.signatures.groups().len(), 2);
    let primary = rendered.signatures.primary();
    assert_eq!(primary.source_sets, vec![common(), jvm()]);
    assert_eq!(primary.signature.to_string(), "expect fun now(): Long");
}

#[test]
fn jvm_only_annotations_do_not_split_groups() {
    let jvm_name = annotation("kotlin.jvm.JvmName")
        .with_param("name", AnnotationValue::String("currentTime".to_string()));
    let decl = now()
        .source_sets(vec![jvm(), js()])
        .annotated_in("jvmMain", vec![jvm_name])
        .build();

    for language in [Language::Kotlin, Language::Java] {
        let rendered = Dualsig::new()
            .with_display_language(language)
            .render_declaration(&decl)
            .unwrap();
        assert!(rendered.signatures.is_uniform(), "{language} rendering split");
        assert_eq!(rendered.signatures.primary().source_sets, vec![jvm(), js()]);
    }
}

#[test]
fn lowest_group_is_primary_without_a_common_source_set() {
    let decl = now()
        .source_sets(vec![js(), ios()])
        .modifiers_in("jsMain", &[Actual])
        .build();

    let rendered = kotlin().render_declaration(&decl).unwrap();
    assert_eq!(rendered.signatures.primary_index(), 0);
    assert_eq!(rendered.signatures.primary().source_sets, vec![ios()]);
    assert_eq!(rendered.signatures.primary().signature.to_string(), "fun now(): Long");
}

#[test]
fn primary_group_ignores_the_jvm_fallback() {
    let android = SourceSet::new("androidMain", Platform::Jvm);
    let decl = now()
        .source_sets(vec![jvm(), android.clone()])
        .modifiers_in("jvmMain", &[Actual])
        .build();

    assert_eq!(expect_or_common(&decl).unwrap(), &jvm());
    let rendered = kotlin().render_declaration(&decl).unwrap();
    assert_eq!(rendered.signatures.groups().len(), 2);
    assert_eq!(rendered.signatures.primary().source_sets, vec![android]);
    assert_eq!(rendered.signatures.primary().signature.to_string(), "fun now(): Long");
}

#[test]
fn grouping_is_independent_of_source_set_order() {
    let forward = now()
        .source_sets(vec![common(), jvm(), js(), ios()])
        .modifiers_in("jsMain", &[Actual])
        .modifiers_in("iosMain", &[Actual])
        .build();
    let mut backward = forward.clone();
    backward.source_sets.reverse();

    let dualsig = kotlin();
    assert_eq!(
        dualsig.render_declaration(&forward).unwrap(),
        dualsig.render_declaration(&backward).unwrap()
    );
}

#[test]
fn missing_source_sets_name_the_declaration() {
    let decl = now().source_sets(Vec::new()).build();
    let err = kotlin().render_declaration(&decl).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to render now (com.example/Widget/now): No source sets for com.example/Widget/now"
    );
}
