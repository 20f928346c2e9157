//! Link targets for identities.

use crate::{
    components::Link,
    model::{Dri, Language},
};

/// Prefixes of synthetic types that have no documentation page.
const NON_DOCUMENTABLE_PREFIXES: &[&str] = &["kotlin.jvm.functions", "kotlin.coroutines.SuspendFunction"];

/// Page name used for package identities.
const PACKAGE_SUMMARY: &str = "package-summary";

/// Resolves identities to links. The engine only needs names and URLs; page layout is the
/// provider's business.
pub trait LinkProvider: Send + Sync {
    /// The link for `dri`.
    fn link_for(&self, dri: &Dri) -> Link;
}

/// Devsite-style reference paths: `<root>/<language>/<package/path>/<Class>.html#member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevsitePaths {
    /// Prefix of every URL.
    root_path: String,
    /// Language segment of every URL.
    language: Language,
}

impl DevsitePaths {
    /// Paths rooted at `root_path` for docs displayed in `language`.
    pub fn new(root_path: impl Into<String>, language: Language) -> Self {
        Self {
            root_path: root_path.into(),
            language,
        }
    }

    /// URL of the page for a type (or `package-summary`) in `package`.
    fn for_type(&self, package: &str, name: &str) -> String {
        let package_path = package.replace('.', "/");
        let root = self.root_path.trim_end_matches('/');
        format!("{root}/{}/{package_path}/{name}.html", self.language)
    }
}

impl LinkProvider for DevsitePaths {
    fn link_for(&self, dri: &Dri) -> Link {
        let package = if dri.package.is_empty() {
            "[JVM root]"
        } else {
            dri.package.as_str()
        };

        let full_name = format!("{package}.{}", dri.class_names());
        if NON_DOCUMENTABLE_PREFIXES
            .iter()
            .any(|prefix| full_name.starts_with(prefix))
        {
            return Link::unlinked(dri.class_names.as_deref().unwrap_or(package));
        }

        let (type_name, type_url) = match &dri.class_names {
            Some(class_names) => (class_names.as_str(), self.for_type(package, class_names)),
            None => (package, self.for_type(package, PACKAGE_SUMMARY)),
        };

        match &dri.callable {
            Some(callable) => Link {
                name: callable.clone(),
                url: format!("{type_url}#{callable}"),
            },
            None => Link {
                name: type_name.to_string(),
                url: type_url,
            },
        }
    }
}
