// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use libdualsig::{
    Dualsig, Language,
    annotations::Annotation,
    model::{
        ContainerKind, Declaration, DeclarationKind, Dri, Function, Parameter, Platform, Projection, Property,
        SourceSet, SourceSetMap, TypeParameterDecl,
    },
    modifiers::Modifier,
};
use pretty_assertions::assert_eq;

/// Name of the source set fixtures are declared in unless stated otherwise.
pub const JVM: &str = "jvmMain";

/// Split `a.b.Outer.Inner` at the first capitalized segment.
fn split_qualified(qualified: &str) -> Dri {
    let segments: Vec<&str> = qualified.split('.').collect();
    let at = segments
        .iter()
        .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
        .unwrap_or(segments.len() - 1);
    Dri::new(segments[..at].join("."), segments[at..].join("."))
}

/// A class reference without arguments.
pub fn class(qualified: &str) -> Projection {
    Projection::class(split_qualified(qualified), Vec::new())
}

/// A class reference with generic arguments.
pub fn generic(qualified: &str, args: Vec<Projection>) -> Projection {
    Projection::class(split_qualified(qualified), args)
}

/// A reference to type parameter `name` of the fixture's owner.
pub fn type_param(name: &str) -> Projection {
    Projection::type_parameter(Dri::new("com.example", "Widget"), name)
}

/// A use of type alias `qualified` expanding to `inner`.
pub fn alias(qualified: &str, inner: Projection) -> Projection {
    Projection::TypeAliased {
        alias: Box::new(class(qualified)),
        inner: Box::new(inner),
    }
}

/// `kotlin.FunctionN` over `args`, the last being the return type.
pub fn lambda(args: Vec<Projection>, is_extension: bool, is_suspend: bool) -> Projection {
    let arity = args.len().saturating_sub(1);
    Projection::function(
        Dri::new("kotlin", format!("Function{arity}")),
        args,
        is_extension,
        is_suspend,
    )
}

/// An annotation by qualified name.
pub fn annotation(qualified: &str) -> Annotation {
    Annotation::from_qualified(qualified)
}

/// Builder for declaration fixtures.
pub struct Decl {
    decl: Declaration,
}

impl Decl {
    fn new(name: &str, kind: DeclarationKind) -> Self {
        Self {
            decl: Declaration {
                dri: Dri::new("com.example", "Widget").with_callable(name),
                name: name.to_string(),
                source_sets: vec![SourceSet::new(JVM, Platform::Jvm)],
                expect_present_in: None,
                from_java: false,
                container: ContainerKind::Class,
                inject_static: false,
                annotations: SourceSetMap::new(),
                modifiers: SourceSetMap::new(),
                location: None,
                kind,
            },
        }
    }

    /// A function returning `Unit`.
    pub fn function(name: &str) -> Self {
        Self::new(
            name,
            DeclarationKind::Function(Function {
                receiver: None,
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                return_type: class("kotlin.Unit"),
                is_constructor: false,
            }),
        )
    }

    /// A constructor of the fixture's owner.
    pub fn constructor() -> Self {
        let mut out = Self::function("Widget");
        out.function_mut().is_constructor = true;
        out.function_mut().return_type = class("com.example.Widget");
        out
    }

    /// A `val` of type `ty`.
    pub fn property(name: &str, ty: Projection) -> Self {
        Self::new(
            name,
            DeclarationKind::Property(Property {
                receiver: None,
                ty,
                is_mutable: false,
                constant_value: None,
                has_getter: false,
            }),
        )
    }

    fn function_mut(&mut self) -> &mut Function {
        match &mut self.decl.kind {
            DeclarationKind::Function(f) => f,
            DeclarationKind::Property(_) => panic!("not a function fixture"),
        }
    }

    fn property_mut(&mut self) -> &mut Property {
        match &mut self.decl.kind {
            DeclarationKind::Property(p) => p,
            DeclarationKind::Function(_) => panic!("not a property fixture"),
        }
    }

    pub fn returns(mut self, ty: Projection) -> Self {
        self.function_mut().return_type = ty;
        self
    }

    pub fn param(mut self, name: &str, ty: Projection) -> Self {
        self.function_mut().parameters.push(Parameter::new(name, ty));
        self
    }

    pub fn param_with(mut self, param: Parameter) -> Self {
        self.function_mut().parameters.push(param);
        self
    }

    pub fn receiver(mut self, ty: Projection) -> Self {
        let receiver = Parameter {
            name: None,
            ..Parameter::new("", ty)
        };
        match &mut self.decl.kind {
            DeclarationKind::Function(f) => f.receiver = Some(receiver),
            DeclarationKind::Property(p) => p.receiver = Some(receiver),
        }
        self
    }

    pub fn type_param(mut self, name: &str, bounds: Vec<Projection>) -> Self {
        self.function_mut().type_parameters.push(TypeParameterDecl {
            name: name.to_string(),
            bounds,
            annotations: SourceSetMap::new(),
        });
        self
    }

    pub fn mutable(mut self) -> Self {
        self.property_mut().is_mutable = true;
        self
    }

    pub fn constant(mut self, value: &str) -> Self {
        self.property_mut().constant_value = Some(value.to_string());
        self
    }

    pub fn with_getter(mut self) -> Self {
        self.property_mut().has_getter = true;
        self
    }

    pub fn modifiers(self, modifiers: &[Modifier]) -> Self {
        self.modifiers_in(JVM, modifiers)
    }

    pub fn modifiers_in(mut self, source_set: &str, modifiers: &[Modifier]) -> Self {
        self.decl.modifiers.insert(source_set, modifiers.to_vec());
        self
    }

    pub fn annotated(self, annotations: Vec<Annotation>) -> Self {
        self.annotated_in(JVM, annotations)
    }

    pub fn annotated_in(mut self, source_set: &str, annotations: Vec<Annotation>) -> Self {
        self.decl.annotations.insert(source_set, annotations);
        self
    }

    pub fn from_java(mut self) -> Self {
        self.decl.from_java = true;
        self
    }

    pub fn container(mut self, container: ContainerKind) -> Self {
        self.decl.container = container;
        self
    }

    pub fn inject_static(mut self) -> Self {
        self.decl.inject_static = true;
        self
    }

    pub fn source_sets(mut self, source_sets: Vec<SourceSet>) -> Self {
        self.decl.source_sets = source_sets;
        self
    }

    pub fn expect_in(mut self, source_set: &str) -> Self {
        self.decl.expect_present_in = Some(source_set.to_string());
        self
    }

    pub fn located(mut self, location: &str) -> Self {
        self.decl.location = Some(location.to_string());
        self
    }

    pub fn build(self) -> Declaration {
        self.decl
    }
}

impl From<Decl> for Declaration {
    fn from(builder: Decl) -> Self {
        builder.build()
    }
}

/// Render the primary signature of `decl` in `language`.
pub fn render_with(dualsig: &Dualsig, decl: &Declaration) -> String {
    dualsig
        .render_declaration(decl)
        .unwrap()
        .signatures
        .primary()
        .signature
        .to_string()
}

/// Render the primary signature of `decl` in `language` with default options.
pub fn render(language: Language, decl: &Declaration) -> String {
    render_with(&Dualsig::new().with_display_language(language), decl)
}

/// Check the rendering in both dialects.
pub fn rt(decl: impl Into<Declaration>, java: &str, kotlin: &str) {
    let decl = decl.into();
    assert_eq!(render(Language::Java, &decl), java, "java rendering");
    assert_eq!(render(Language::Kotlin, &decl), kotlin, "kotlin rendering");
}

/// Check the rendering in one dialect with a custom facade.
pub fn rt_custom(dualsig: Dualsig, decl: impl Into<Declaration>, expected: &str) {
    assert_eq!(render_with(&dualsig, &decl.into()), expected);
}

/// Check that rendering in `language` fails with `expected_error`.
pub fn render_err(language: Language, decl: impl Into<Declaration>, expected_error: &str) {
    let result = Dualsig::new()
        .with_display_language(language)
        .render_declaration(&decl.into());

    assert!(
        result.is_err(),
        "Expected an error, but rendering succeeded"
    );
    let error_string = result.unwrap_err().to_string();

    assert_eq!(
        error_string, expected_error,
        "Error mismatch.\nExpected: {}\nGot: {}",
        expected_error, error_string
    );
}

#[macro_export]
macro_rules! gen_tests {
    ($prefix:ident, {
        $(rt {
            $rt_name:ident: {
                input: $rt_input:expr,
                java: $rt_java:expr,
                kotlin: $rt_kotlin:expr
            }
        })*
        $(rt_custom {
            $rt_custom_name:ident: {
                dualsig: $rt_custom_dualsig:expr,
                input: $rt_custom_input:expr,
                output: $rt_custom_output:expr
            }
        })*
        $(rt_err {
            $rt_err_name:ident: {
                language: $rt_err_language:expr,
                input: $rt_err_input:expr,
                error: $rt_err_error:expr
            }
        })*
    }) => {
        mod $prefix {
            use super::*;

            $(
                #[test]
                fn $rt_name() {
                    rt($rt_input, $rt_java, $rt_kotlin);
                }
            )*

            $(
                #[test]
                fn $rt_custom_name() {
                    rt_custom($rt_custom_dualsig, $rt_custom_input, $rt_custom_output);
                }
            )*

            $(
                #[test]
                fn $rt_err_name() {
                    render_err($rt_err_language, $rt_err_input, $rt_err_error);
                }
            )*
        }
    };
}
