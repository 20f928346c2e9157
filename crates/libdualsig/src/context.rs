//! Per-run state shared by the converters.

use dashmap::DashMap;
use tracing::trace;

use crate::{
    components::Link,
    config::DualsigConfig,
    model::{Dri, Language, Projection},
    paths::{DevsitePaths, LinkProvider},
};

/// Memo of Java-to-Kotlin projection conversions.
///
/// Keys are immutable projections, so concurrent inserts of the same key always store equal
/// values.
#[derive(Debug, Default)]
pub struct KotlinCache {
    /// Converted projections by their original.
    entries: DashMap<Projection, Projection>,
}

impl KotlinCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached conversion of `projection`, computing it with `convert` on a miss.
    pub fn get_or_insert_with(
        &self,
        projection: &Projection,
        convert: impl FnOnce(&Projection) -> Projection,
    ) -> Projection {
        if let Some(hit) = self.entries.get(projection) {
            return hit.value().clone();
        }
        let converted = convert(projection);
        trace!(shape = projection.shape(), "caching kotlin conversion");
        self.entries
            .entry(projection.clone())
            .or_insert(converted)
            .value()
            .clone()
    }

    /// Number of cached conversions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a conversion needs: the dialect, the configuration, link resolution and the memo
/// cache. One context serves one rendering run and may be shared across threads.
pub struct RenderContext {
    /// Dialect being rendered.
    language: Language,
    /// Rendering options.
    config: DualsigConfig,
    /// Link resolution.
    links: Box<dyn LinkProvider>,
    /// Java-to-Kotlin conversion memo.
    kotlin_cache: KotlinCache,
}

impl RenderContext {
    /// A context for `language` with devsite links under the configured root.
    pub fn new(language: Language, config: DualsigConfig) -> Self {
        let links = Box::new(DevsitePaths::new(config.doc_root_path.clone(), language));
        Self::with_links(language, config, links)
    }

    /// A context with a custom link provider.
    pub fn with_links(language: Language, config: DualsigConfig, links: Box<dyn LinkProvider>) -> Self {
        Self {
            language,
            config,
            links,
            kotlin_cache: KotlinCache::new(),
        }
    }

    /// Dialect being rendered.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether the dialect is Java.
    pub fn is_java(&self) -> bool {
        self.language == Language::Java
    }

    /// Rendering options.
    pub fn config(&self) -> &DualsigConfig {
        &self.config
    }

    /// The link for `dri`.
    pub fn link_for(&self, dri: &Dri) -> Link {
        self.links.link_for(dri)
    }

    /// The shared conversion memo.
    pub fn kotlin_cache(&self) -> &KotlinCache {
        &self.kotlin_cache
    }
}
