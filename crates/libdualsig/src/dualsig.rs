use std::{
    fmt::{self, Display},
    fs,
    path::Path,
};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::{
    config::DualsigConfig,
    context::RenderContext,
    error::*,
    kmp::{KmpSignatures, consolidate},
    model::{Declaration, Dri, Language, Module},
    paths::LinkProvider,
};

/// Dualsig renders the signatures of documented declarations in one display dialect.
///
/// Each declaration is rendered once per source set it appears in; source sets that produce the
/// same signature are grouped. A run owns one [`RenderContext`], so conversions memoized while
/// rendering one declaration are reused for the rest of the module.
#[derive(Debug, Clone)]
pub struct Dualsig {
    /// Rendering options.
    config: DualsigConfig,

    /// Whether to render summary rows rather than detail blocks.
    summary: bool,
}

impl Default for Dualsig {
    fn default() -> Self {
        Self::new()
    }
}

impl Dualsig {
    /// Creates a new Dualsig instance rendering Kotlin with the default configuration.
    pub fn new() -> Self {
        Self {
            config: DualsigConfig::default(),
            summary: false,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: DualsigConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the dialect signatures are displayed in.
    pub fn with_display_language(mut self, language: Language) -> Self {
        self.config.display_language = language;
        self
    }

    /// Sets the prefix of every generated link.
    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.config.doc_root_path = root_path.into();
        self
    }

    /// Enables or disables summary mode, which hides default values and visibility.
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Enables or disables fully qualified names for Java array element types.
    pub fn with_qualified_array_names(mut self, qualified: bool) -> Self {
        self.config.qualified_array_names = qualified;
        self
    }

    /// The configuration in effect.
    pub fn config(&self) -> &DualsigConfig {
        &self.config
    }

    /// A fresh context for one run with the default link layout.
    pub fn context(&self) -> RenderContext {
        RenderContext::new(self.config.display_language, self.config.clone())
    }

    /// A fresh context for one run with custom links.
    pub fn context_with_links(&self, links: Box<dyn LinkProvider>) -> RenderContext {
        RenderContext::with_links(self.config.display_language, self.config.clone(), links)
    }

    /// Render one declaration in its own run.
    pub fn render_declaration(&self, decl: &Declaration) -> Result<RenderedDeclaration> {
        self.render_in(&self.context(), decl)
    }

    /// Render one declaration within an existing run.
    ///
    /// Errors are wrapped with the declaration's name, identity and location.
    pub fn render_in(&self, ctx: &RenderContext, decl: &Declaration) -> Result<RenderedDeclaration> {
        let signatures = consolidate(ctx, decl, self.summary).map_err(|source| DualsigError::Symbol {
            name: decl.name.clone(),
            dri: decl.dri.clone(),
            location: decl.location.clone(),
            source: Box::new(source),
        })?;
        Ok(RenderedDeclaration {
            name: decl.name.clone(),
            dri: decl.dri.clone(),
            signatures,
        })
    }

    /// Render every declaration of `module` in parallel, preserving declaration order.
    ///
    /// The first failing declaration aborts the run.
    pub fn render_module(&self, module: &Module) -> Result<Vec<RenderedDeclaration>> {
        let ctx = self.context();
        info!(
            module = %module.name,
            declarations = module.declarations.len(),
            language = %self.config.display_language,
            "rendering module"
        );
        let rendered = module
            .declarations
            .par_iter()
            .map(|decl| self.render_in(&ctx, decl))
            .collect::<Result<Vec<_>>>()?;
        debug!(cached = ctx.kotlin_cache().len(), "module rendered");
        Ok(rendered)
    }

    /// Parse a module from its JSON form.
    pub fn parse_module(json: &str) -> Result<Module> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a module from a JSON file.
    pub fn load_module(path: impl AsRef<Path>) -> Result<Module> {
        let json = fs::read_to_string(path)?;
        Self::parse_module(&json)
    }

    /// Load and render a module file, returning the text form of every declaration.
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let module = Self::load_module(path)?;
        let rendered = self.render_module(&module)?;
        Ok(rendered
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// The rendered signatures of one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDeclaration {
    /// Simple name.
    pub name: String,
    /// Identity.
    pub dri: Dri,
    /// Signatures grouped by source set.
    pub signatures: KmpSignatures,
}

impl Display for RenderedDeclaration {
    /// The primary signature; declarations that render differently across source sets list each
    /// group on its own indented line, tagged with its platforms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signatures.primary().signature)?;
        if self.signatures.is_uniform() {
            return Ok(());
        }
        for group in self.signatures.groups() {
            let platforms = group
                .source_sets
                .iter()
                .map(|ss| ss.platform.short_name())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "\n    [{platforms}] {}", group.signature)?;
        }
        Ok(())
    }
}
