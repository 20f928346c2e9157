//! Multiplatform consolidation.
//!
//! A declaration present in several source sets gets one signature per source set. Equal
//! signatures are merged into groups, and one group is chosen as the primary rendering.

use std::collections::BTreeSet;

use dashmap::DashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    components::DeclarationSignature,
    context::RenderContext,
    error::{DualsigError, Result},
    model::{Declaration, Platform, SourceSet},
    signature::signature_for,
};

/// Source set names tried, in order, when nothing marks a common source set.
const FALLBACK_SOURCE_SETS: &[&str] = &["jvmMain", "androidMain", "desktopMain"];

/// Source sets sharing one rendered signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureGroup {
    /// The shared signature.
    pub signature: DeclarationSignature,
    /// Source sets producing it, sorted.
    pub source_sets: Vec<SourceSet>,
}

/// All distinct signatures of a declaration.
///
/// Only [`consolidate`] builds these, so there is always a primary group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KmpSignatures {
    /// Index into `groups` of the default rendering.
    primary: usize,
    /// Every group, primary included, sorted by source sets.
    groups: Vec<SignatureGroup>,
}

impl KmpSignatures {
    /// The default rendering.
    pub fn primary(&self) -> &SignatureGroup {
        &self.groups[self.primary]
    }

    /// Position of the primary group in [`groups`](Self::groups).
    pub fn primary_index(&self) -> usize {
        self.primary
    }

    /// Every group, primary included, sorted by source sets.
    pub fn groups(&self) -> &[SignatureGroup] {
        &self.groups
    }

    /// Whether every source set renders the same way.
    pub fn is_uniform(&self) -> bool {
        self.groups.len() == 1
    }
}

/// The source set marked common, if any: the `expect` source set, the single common-platform
/// source set, or one named `common`/`commonMain`.
pub fn common_source_set(decl: &Declaration) -> Option<&SourceSet> {
    if let Some(expect) = &decl.expect_present_in
        && let Some(found) = decl.source_sets.iter().find(|ss| &ss.name == expect)
    {
        return Some(found);
    }
    let mut common = decl
        .source_sets
        .iter()
        .filter(|ss| ss.platform == Platform::Common);
    if let (Some(only), None) = (common.next(), common.next()) {
        return Some(only);
    }
    decl.source_sets.iter().find(|ss| {
        ss.name.eq_ignore_ascii_case("common") || ss.name.eq_ignore_ascii_case("commonMain")
    })
}

/// The source set whose view of `decl` is rendered by default.
pub fn expect_or_common(decl: &Declaration) -> Result<&SourceSet> {
    if let [only] = decl.source_sets.as_slice() {
        return Ok(only);
    }
    if let Some(common) = common_source_set(decl) {
        return Ok(common);
    }
    FALLBACK_SOURCE_SETS
        .iter()
        .find_map(|name| decl.source_sets.iter().find(|ss| ss.name == *name))
        .or_else(|| decl.source_sets.first())
        .ok_or_else(|| DualsigError::NoSourceSets(decl.dri.to_string()))
}

/// Render `decl` in every source set and group equal signatures.
///
/// The primary group is the one containing the common source set, or the group of the lowest
/// source set when there is none. The result does not depend on the order in which source sets
/// finish rendering.
pub fn consolidate(ctx: &RenderContext, decl: &Declaration, is_summary: bool) -> Result<KmpSignatures> {
    if decl.source_sets.is_empty() {
        return Err(DualsigError::NoSourceSets(decl.dri.to_string()));
    }

    let variants: DashMap<DeclarationSignature, BTreeSet<SourceSet>> = DashMap::new();
    decl.source_sets.par_iter().try_for_each(|source_set| {
        let signature = signature_for(ctx, decl, source_set, is_summary)?;
        variants.entry(signature).or_default().insert(source_set.clone());
        Ok::<_, DualsigError>(())
    })?;

    let mut groups = variants
        .into_iter()
        .map(|(signature, source_sets)| SignatureGroup {
            signature,
            source_sets: source_sets.into_iter().collect(),
        })
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| a.source_sets.cmp(&b.source_sets));

    let primary = common_source_set(decl)
        .and_then(|common| groups.iter().position(|g| g.source_sets.contains(common)))
        .unwrap_or(0);
    debug!(
        declaration = %decl.dri,
        source_sets = decl.source_sets.len(),
        groups = groups.len(),
        "consolidated signatures"
    );
    Ok(KmpSignatures { primary, groups })
}
