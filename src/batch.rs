//! Applying one boolean operation across many solids.

use crate::float_types::Real;
use crate::mesh::{BooleanOp, Mesh};
use crate::traits::CSG;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Uniform scale applied to each cutter when [`BatchOptions::fix_coplanar`] is set.
pub const COPLANAR_NUDGE: Real = 1.00001;

/// Options for folding cutters into targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Scale every cutter by [`COPLANAR_NUDGE`] about the origin before it is
    /// applied, so faces lying exactly on a target face are pushed off it.
    pub fix_coplanar: bool,
}

/// Fold every cutter into `target` in order with `op`.
///
/// Each cutter's tags are shifted past those already in the accumulator, so
/// provenance from different cutters never collides. Pairs where either side
/// is empty are skipped.
pub fn apply_cutters(target: &Mesh, cutters: &[Mesh], op: BooleanOp) -> Mesh {
    apply_cutters_with(target, cutters, op, &BatchOptions::default())
}

/// [`apply_cutters`] with explicit [`BatchOptions`].
pub fn apply_cutters_with(
    target: &Mesh,
    cutters: &[Mesh],
    op: BooleanOp,
    options: &BatchOptions,
) -> Mesh {
    let mut result = target.clone();

    for (index, cutter) in cutters.iter().enumerate() {
        if result.is_empty() || cutter.is_empty() {
            log::debug!(
                "{op}: skipping cutter {index} ({} vs {} polygons)",
                result.polygons.len(),
                cutter.polygons.len()
            );
            continue;
        }

        let mut cutter = cutter.with_tag_offset(result.next_free_tag());
        if options.fix_coplanar {
            cutter = cutter.scale(COPLANAR_NUDGE, COPLANAR_NUDGE, COPLANAR_NUDGE);
        }
        result = result.boolean(&cutter, op);
    }

    result
}

/// Run [`apply_cutters`] independently for each target.
pub fn apply_to_targets(targets: &[Mesh], cutters: &[Mesh], op: BooleanOp) -> Vec<Mesh> {
    apply_to_targets_with(targets, cutters, op, &BatchOptions::default())
}

/// Run [`apply_cutters_with`] independently for each target.
///
/// With the `parallel` feature each target is folded on the rayon pool.
#[cfg(feature = "parallel")]
pub fn apply_to_targets_with(
    targets: &[Mesh],
    cutters: &[Mesh],
    op: BooleanOp,
    options: &BatchOptions,
) -> Vec<Mesh> {
    targets
        .par_iter()
        .map(|target| apply_cutters_with(target, cutters, op, options))
        .collect()
}

/// Run [`apply_cutters_with`] independently for each target.
#[cfg(not(feature = "parallel"))]
pub fn apply_to_targets_with(
    targets: &[Mesh],
    cutters: &[Mesh],
    op: BooleanOp,
    options: &BatchOptions,
) -> Vec<Mesh> {
    targets
        .iter()
        .map(|target| apply_cutters_with(target, cutters, op, options))
        .collect()
}
