use libdualsig::{
    Dualsig, Language,
    annotations::AnnotationValue,
    model::{ContainerKind, Parameter, SourceSetMap},
    modifiers::Modifier::*,
};
mod utils;
use utils::*;

gen_tests! {
    functions, {
        rt {
            unit_function: {
                input: Decl::function("reset").modifiers(&[Public, Final]),
                java: "public final void reset()",
                kotlin: "fun reset(): Unit"
            }
        }
        rt {
            defaults_and_nullable_parameters: {
                input: Decl::function("draw")
                    .modifiers(&[Public, Final])
                    .param_with(Parameter {
                        default_value: SourceSetMap::new().with(JVM, "1".to_string()),
                        ..Parameter::new("times", class("kotlin.Int"))
                    })
                    .param("label", class("kotlin.String").nullable())
                    .returns(class("kotlin.Boolean")),
                java: "public final boolean draw(int times, String label)",
                kotlin: "fun draw(times: Int = 1, label: String?): Boolean"
            }
        }
        rt {
            generic_function: {
                input: Decl::function("first")
                    .modifiers(&[Public])
                    .type_param("T", vec![class("kotlin.Any")])
                    .param("items", generic("kotlin.collections.List", vec![type_param("T")]))
                    .returns(type_param("T").nullable()),
                java: "public <T extends Object> T first(@NonNull List<@NonNull T> items)",
                kotlin: "fun <T : Any> first(items: List<T>): T?"
            }
        }
        rt {
            suspend_extension_with_lambda: {
                input: Decl::function("collect")
                    .container(ContainerKind::Package)
                    .modifiers(&[Public, Suspend])
                    .type_param("T", vec![])
                    .receiver(generic("kotlinx.coroutines.flow.Flow", vec![type_param("T")]))
                    .param("action", lambda(vec![type_param("T"), class("kotlin.Unit")], false, true)),
                java: "public static <T> void collect(@NonNull Flow<@NonNull T> receiver, \
                       @NonNull Function1<@NonNull T, Unit> action)",
                kotlin: "suspend fun <T> Flow<T>.collect(action: suspend (T) -> Unit): Unit"
            }
        }
        rt {
            definitely_non_null_lambda_parameter: {
                input: Decl::function("each")
                    .modifiers(&[Public])
                    .type_param("T", vec![])
                    .param(
                        "action",
                        lambda(vec![type_param("T"), class("kotlin.Unit")], false, false)
                            .definitely_non_null(),
                    ),
                java: "public <T> void each(@NonNull Function1<@NonNull T, Unit> action)",
                kotlin: "fun <T> each(action: (T) -> Unit): Unit"
            }
        }
        rt {
            java_platform_types: {
                input: Decl::function("getItems")
                    .from_java()
                    .modifiers(&[Public])
                    .param("key", class("java.lang.String"))
                    .returns(generic("java.util.List", vec![class("java.lang.String")])),
                java: "public List<String> getItems(String key)",
                kotlin: "fun getItems(key: String!): (Mutable)List<String!>!"
            }
        }
        rt {
            java_annotated_nullability: {
                input: Decl::function("find")
                    .from_java()
                    .modifiers(&[Public])
                    .annotated(vec![annotation("androidx.annotation.Nullable")])
                    .param_with(Parameter {
                        annotations: SourceSetMap::new()
                            .with(JVM, vec![annotation("androidx.annotation.NonNull")]),
                        ..Parameter::new("id", class("java.lang.String"))
                    })
                    .returns(class("java.lang.Object")),
                java: "public @Nullable Object find(@NonNull String id)",
                kotlin: "fun find(id: String): Any?"
            }
        }
        rt {
            constructor: {
                input: Decl::constructor()
                    .modifiers(&[Public, Final])
                    .param("size", class("kotlin.Int")),
                java: "public Widget(int size)",
                kotlin: "constructor(size: Int)"
            }
        }
        rt {
            interface_default_method: {
                input: Decl::function("describe")
                    .container(ContainerKind::Interface)
                    .modifiers(&[Public, Open])
                    .returns(class("kotlin.String")),
                java: "default @NonNull String describe()",
                kotlin: "open fun describe(): String"
            }
        }
        rt {
            companion_member_is_static: {
                input: Decl::function("create")
                    .container(ContainerKind::Companion)
                    .modifiers(&[Public, Final])
                    .returns(class("com.example.Widget")),
                java: "public static final @NonNull Widget create()",
                kotlin: "fun create(): Widget"
            }
        }
        rt {
            vararg_parameter: {
                input: Decl::function("sum")
                    .modifiers(&[Public])
                    .param_with(Parameter {
                        modifiers: vec![Vararg],
                        ..Parameter::new("values", class("kotlin.Int"))
                    })
                    .returns(class("kotlin.Int")),
                java: "public int sum(int... values)",
                kotlin: "fun sum(vararg values: Int): Int"
            }
        }
        rt {
            kotlin_only_modifiers_stay_in_kotlin: {
                input: Decl::function("plus")
                    .modifiers(&[Public, Final, Operator, Inline])
                    .param("other", class("com.example.Widget"))
                    .returns(class("com.example.Widget")),
                java: "public final @NonNull Widget plus(@NonNull Widget other)",
                kotlin: "inline operator fun plus(other: Widget): Widget"
            }
        }
        rt {
            declaration_annotations: {
                input: Decl::function("open")
                    .modifiers(&[Public])
                    .annotated(vec![
                        annotation("androidx.annotation.RequiresApi")
                            .with_param("api", AnnotationValue::Literal("26".to_string())),
                        annotation("kotlin.jvm.JvmStatic"),
                        annotation("kotlin.Suppress"),
                    ]),
                java: "@RequiresApi(api = 26) public void open()",
                kotlin: "@RequiresApi(api = 26) fun open(): Unit"
            }
        }
        rt {
            deprecated_annotation_is_not_shown: {
                input: Decl::function("old")
                    .modifiers(&[Public])
                    .annotated(vec![annotation("kotlin.Deprecated")]),
                java: "public void old()",
                kotlin: "fun old(): Unit"
            }
        }
        rt {
            type_annotations_move_to_the_return_type: {
                input: Decl::function("icon")
                    .modifiers(&[Public])
                    .annotated(vec![annotation("androidx.annotation.DrawableRes")])
                    .returns(class("kotlin.Int")),
                java: "public @DrawableRes int icon()",
                kotlin: "fun icon(): @DrawableRes Int"
            }
        }
        rt {
            where_clause_for_several_bounds: {
                input: Decl::function("pick")
                    .modifiers(&[Public])
                    .type_param(
                        "T",
                        vec![class("kotlin.CharSequence"), generic("kotlin.Comparable", vec![type_param("T")])],
                    )
                    .param("a", type_param("T"))
                    .returns(type_param("T")),
                java: "public <T extends CharSequence & Comparable<@NonNull T>> @NonNull T pick(@NonNull T a)",
                kotlin: "fun <T : CharSequence> pick(a: T): T where T : Comparable<T>"
            }
        }
        rt_custom {
            summary_hides_defaults: {
                dualsig: Dualsig::new().with_display_language(Language::Kotlin).with_summary(true),
                input: Decl::function("draw")
                    .modifiers(&[Public, Final])
                    .param_with(Parameter {
                        default_value: SourceSetMap::new().with(JVM, "1".to_string()),
                        ..Parameter::new("times", class("kotlin.Int"))
                    }),
                output: "fun draw(times: Int): Unit"
            }
        }
        rt_custom {
            summary_hides_visibility: {
                dualsig: Dualsig::new().with_display_language(Language::Java).with_summary(true),
                input: Decl::function("draw").modifiers(&[Public, Final]),
                output: "final void draw()"
            }
        }
        rt_custom {
            qualified_array_names: {
                dualsig: Dualsig::new()
                    .with_display_language(Language::Java)
                    .with_qualified_array_names(true),
                input: Decl::function("names")
                    .modifiers(&[Public])
                    .returns(generic("kotlin.Array", vec![class("kotlin.String")])),
                output: "public @NonNull java.lang.String[] names()"
            }
        }
        rt_err {
            dynamic_return_in_java: {
                language: Language::Java,
                input: Decl::function("js").returns(libdualsig::model::Projection::Dynamic),
                error: "Failed to render js (com.example/Widget/js): Unsupported projection in to_link: Dynamic"
            }
        }
        rt_err {
            error_carries_the_location: {
                language: Language::Java,
                input: Decl::function("js")
                    .located("Widget.kt:12")
                    .returns(libdualsig::model::Projection::Dynamic),
                error: "Failed to render js (com.example/Widget/js) at Widget.kt:12: \
                        Unsupported projection in to_link: Dynamic"
            }
        }
        rt_err {
            const_function: {
                language: Language::Java,
                input: Decl::function("f").modifiers(&[Const]),
                error: "Failed to render f (com.example/Widget/f): 'const' on function?"
            }
        }
        rt_err {
            unknown_nullability_annotation: {
                language: Language::Kotlin,
                input: Decl::function("g")
                    .annotated(vec![annotation("javax.annotation.Nullable")])
                    .returns(class("kotlin.String")),
                error: "Failed to render g (com.example/Widget/g): Nullability annotation \
                        javax.annotation.Nullable is not one of the configured valid annotations"
            }
        }
    }
}
