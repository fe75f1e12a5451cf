use rustc_hash::FxHashSet;

use crate::host::RayHit;

use super::conduits::LinearConduit;

/// Reduces raw ray hits to the walls a conduit actually passes through.
///
/// Hits outside `[0, length]` are dropped: the conduit ends before reaching
/// them. The remaining hits are deduplicated by wall identity (link
/// qualifier and element id), keeping the first occurrence of each wall in
/// input order. The result is independent of hit order apart from which
/// occurrence of a wall survives.
#[must_use]
pub fn resolve_hits(conduit: &LinearConduit, hits: &[RayHit]) -> Vec<RayHit> {
    let length = conduit.length();
    let mut seen = FxHashSet::default();

    let resolved: Vec<RayHit> = hits
        .iter()
        .filter(|hit| (0.0..=length).contains(&hit.proximity))
        .filter(|hit| seen.insert(hit.key))
        .copied()
        .collect();

    tracing::debug!(
        conduit = ?conduit.id(),
        raw = hits.len(),
        resolved = resolved.len(),
        "resolved hits"
    );
    resolved
}
