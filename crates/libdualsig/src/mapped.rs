//! Mapping between Kotlin and Java standard library identities.
//!
//! See <https://kotlinlang.org/docs/java-interop.html#mapped-types>.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::Dri;

/// Kotlin primitive class names in package `kotlin`.
pub const KOTLIN_PRIMITIVES: &[&str] =
    &["Boolean", "Byte", "Char", "Short", "Int", "Long", "Float", "Double"];

/// Java primitive name to the matching Kotlin primitive array class.
pub const JAVA_PRIMITIVE_ARRAYS: &[(&str, &str)] = &[
    ("int", "IntArray"),
    ("boolean", "BooleanArray"),
    ("byte", "ByteArray"),
    ("char", "CharArray"),
    ("short", "ShortArray"),
    ("long", "LongArray"),
    ("float", "FloatArray"),
    ("double", "DoubleArray"),
];

/// Highest arity of `kotlin.FunctionN` with a JVM counterpart.
const MAX_FUNCTION_ARITY: usize = 22;

/// Kotlin types that map to the same simple name in `java.lang`.
const SAME_NAME_JAVA_LANG: &[&str] = &[
    "String",
    "CharSequence",
    "Throwable",
    "Cloneable",
    "Number",
    "Comparable",
    "Enum",
    "Deprecated",
];

/// `kotlin.collections` read-only interfaces and their Java counterparts.
const COLLECTIONS: &[(&str, &str, &str)] = &[
    ("Iterator", "java.util", "Iterator"),
    ("Iterable", "java.lang", "Iterable"),
    ("Collection", "java.util", "Collection"),
    ("Set", "java.util", "Set"),
    ("List", "java.util", "List"),
    ("ListIterator", "java.util", "ListIterator"),
    ("Map", "java.util", "Map"),
    ("Map.Entry", "java.util", "Map.Entry"),
];

/// Boxed Java primitives and their Kotlin class names.
const BOXED: &[(&str, &str)] = &[
    ("Boolean", "Boolean"),
    ("Byte", "Byte"),
    ("Character", "Char"),
    ("Short", "Short"),
    ("Integer", "Int"),
    ("Long", "Long"),
    ("Float", "Float"),
    ("Double", "Double"),
];

/// Package of the Kotlin collection interfaces.
const KOTLIN_COLLECTIONS: &str = "kotlin.collections";

/// Tables for both directions, keyed by `(package, class_names)`.
struct MappedTypes {
    /// Kotlin identity to Java identity.
    to_java: HashMap<(String, String), (String, String)>,
    /// Java identity to Kotlin identity.
    to_kotlin: HashMap<(String, String), (String, String)>,
}

impl MappedTypes {
    /// Build the tables.
    fn build() -> Self {
        let mut tables = Self {
            to_java: HashMap::new(),
            to_kotlin: HashMap::new(),
        };
        tables.both(("kotlin", "Any"), ("java.lang", "Object"));
        for &name in SAME_NAME_JAVA_LANG {
            tables.both(("kotlin", name), ("java.lang", name));
        }
        tables.both(("kotlin", "Annotation"), ("java.lang.annotation", "Annotation"));
        for &(kotlin, package, java) in COLLECTIONS {
            tables.both((KOTLIN_COLLECTIONS, kotlin), (package, java));
            let mutable = mutable_name(kotlin);
            tables.one_way((KOTLIN_COLLECTIONS, &mutable), (package, java));
        }
        for &(java, kotlin) in BOXED {
            tables.both(("kotlin", kotlin), ("java.lang", java));
        }
        tables.one_way(("kotlin", "Nothing"), ("java.lang", "Void"));
        for arity in 0..=MAX_FUNCTION_ARITY {
            let name = format!("Function{arity}");
            tables.both(("kotlin", &name), ("kotlin.jvm.functions", &name));
        }
        tables
    }

    /// Register a mapping in both directions.
    fn both(&mut self, kotlin: (&str, &str), java: (&str, &str)) {
        self.one_way(kotlin, java);
        self.to_kotlin.insert(owned(java), owned(kotlin));
    }

    /// Register a Kotlin to Java mapping only.
    fn one_way(&mut self, kotlin: (&str, &str), java: (&str, &str)) {
        self.to_java.insert(owned(kotlin), owned(java));
    }
}

/// Owned copy of a table key.
fn owned((package, class): (&str, &str)) -> (String, String) {
    (package.to_string(), class.to_string())
}

/// `List` to `MutableList`, `Map.Entry` to `MutableMap.MutableEntry`.
fn mutable_name(class_names: &str) -> String {
    class_names
        .split('.')
        .map(|part| format!("Mutable{part}"))
        .collect::<Vec<_>>()
        .join(".")
}

/// Both mapping tables, built once.
static MAPPED_TYPES: Lazy<MappedTypes> = Lazy::new(MappedTypes::build);

/// Look up `dri` in `table`, keeping its callable qualifier. Unmapped identities are returned
/// unchanged.
fn lookup(table: &HashMap<(String, String), (String, String)>, dri: &Dri) -> Dri {
    let Some(class_names) = &dri.class_names else {
        return dri.clone();
    };
    match table.get(&(dri.package.clone(), class_names.clone())) {
        Some((package, class_names)) => Dri {
            package: package.clone(),
            class_names: Some(class_names.clone()),
            callable: dri.callable.clone(),
        },
        None => dri.clone(),
    }
}

/// Java identity of a Kotlin standard library type, or `dri` itself.
pub fn to_java(dri: &Dri) -> Dri {
    lookup(&MAPPED_TYPES.to_java, dri)
}

/// Kotlin identity of a Java standard library type, or `dri` itself.
pub fn to_kotlin(dri: &Dri) -> Dri {
    lookup(&MAPPED_TYPES.to_kotlin, dri)
}

/// The mutable Kotlin counterpart of a read-only collection interface that Java sees as both.
///
/// Applies to `kotlin.collections` identities only; returns `None` for anything else.
pub fn mutable_counterpart(dri: &Dri) -> Option<Dri> {
    if dri.package != KOTLIN_COLLECTIONS {
        return None;
    }
    let class_names = dri.class_names.as_deref()?;
    COLLECTIONS
        .iter()
        .any(|(kotlin, _, _)| *kotlin == class_names)
        .then(|| Dri::new(KOTLIN_COLLECTIONS, mutable_name(class_names)))
}

/// Kotlin primitive array class for a Java primitive name, e.g. `int` to `IntArray`.
pub fn kotlin_array_for(java_primitive: &str) -> Option<&'static str> {
    JAVA_PRIMITIVE_ARRAYS
        .iter()
        .find(|(java, _)| *java == java_primitive)
        .map(|(_, kotlin)| *kotlin)
}

/// Whether `class_names` is a Kotlin primitive array class such as `IntArray`.
pub fn is_kotlin_primitive_array(class_names: &str) -> bool {
    JAVA_PRIMITIVE_ARRAYS
        .iter()
        .any(|(_, kotlin)| *kotlin == class_names)
}

/// Whether `class_names` is a Kotlin primitive such as `Int`.
pub fn is_kotlin_primitive(class_names: &str) -> bool {
    KOTLIN_PRIMITIVES.contains(&class_names)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn maps_common_types_both_ways() {
        let any = Dri::new("kotlin", "Any");
        assert_eq!(to_java(&any), Dri::new("java.lang", "Object"));
        assert_eq!(to_kotlin(&Dri::new("java.lang", "Object")), any);
        assert_eq!(
            to_kotlin(&Dri::new("java.util", "Map.Entry")),
            Dri::new("kotlin.collections", "Map.Entry")
        );
        assert_eq!(
            to_kotlin(&Dri::new("java.lang", "Integer")),
            Dri::new("kotlin", "Int")
        );
        assert_eq!(
            to_java(&Dri::new("kotlin", "Function2")),
            Dri::new("kotlin.jvm.functions", "Function2")
        );
    }

    #[test]
    fn mutable_collections_map_one_way() {
        let mutable = Dri::new("kotlin.collections", "MutableList");
        assert_eq!(to_java(&mutable), Dri::new("java.util", "List"));
        assert_eq!(
            to_kotlin(&Dri::new("java.util", "List")),
            Dri::new("kotlin.collections", "List")
        );
        let nothing = Dri::new("kotlin", "Nothing");
        assert_eq!(to_java(&nothing), Dri::new("java.lang", "Void"));
        assert_eq!(
            to_kotlin(&Dri::new("java.lang", "Void")),
            Dri::new("java.lang", "Void")
        );
    }

    #[test]
    fn keeps_callable_and_unmapped_identities() {
        let member = Dri::new("kotlin", "String").with_callable("length");
        assert_eq!(
            to_java(&member),
            Dri::new("java.lang", "String").with_callable("length")
        );
        let custom = Dri::new("com.example", "Widget");
        assert_eq!(to_java(&custom), custom);
        assert_eq!(to_kotlin(&Dri::package("java.util")), Dri::package("java.util"));
    }

    #[test]
    fn mapped_collections_round_trip() {
        for (kotlin, _, _) in COLLECTIONS {
            let dri = Dri::new(KOTLIN_COLLECTIONS, *kotlin);
            assert_eq!(to_kotlin(&to_java(&dri)), dri, "{kotlin}");
            let mutable = mutable_counterpart(&dri).expect("mapped collection");
            assert_eq!(to_java(&mutable), to_java(&dri));
        }
        assert_eq!(
            mutable_counterpart(&Dri::new(KOTLIN_COLLECTIONS, "Map.Entry")),
            Some(Dri::new(KOTLIN_COLLECTIONS, "MutableMap.MutableEntry"))
        );
        assert_eq!(mutable_counterpart(&Dri::new(KOTLIN_COLLECTIONS, "Sequence")), None);
    }

    #[test]
    fn primitive_tables() {
        assert_eq!(kotlin_array_for("char"), Some("CharArray"));
        assert_eq!(kotlin_array_for("void"), None);
        assert!(is_kotlin_primitive_array("DoubleArray"));
        assert!(is_kotlin_primitive("Char"));
        assert!(!is_kotlin_primitive("String"));
    }
}
