//! Post-processing of variability scores before plotting.
//!
//! Box plots of the experiment show one value per rigid body rather than per
//! channel, normalised to the largest score in the set, and then one
//! whole-body value per trial and participant.

use ndarray::{Array, Array2, ArrayView, ArrayView2, Axis, Dimension};

use crate::error::{Result, VariabilityError};

/// Sum consecutive channel groups into one row per rigid body.
///
/// `scores` is indexed `[channel, trial]`, as returned by
/// [`compute_variability`](crate::compute_variability). For a rotation or
/// position subset `dof_per_group` is 3; for the full channel set it is the
/// per-body channel count.
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if `dof_per_group` is zero.
/// - [`VariabilityError::InvalidShape`] if the channel count is not a multiple
///   of `dof_per_group`.
pub fn sum_per_rigid_body(scores: ArrayView2<'_, f64>, dof_per_group: usize) -> Result<Array2<f64>> {
    if dof_per_group == 0 {
        return Err(VariabilityError::invalid_config(
            "dof_per_group must be at least 1",
        ));
    }

    let (channels, trials) = scores.dim();
    if channels % dof_per_group != 0 {
        return Err(VariabilityError::invalid_shape(format!(
            "{channels} channels cannot be grouped by {dof_per_group}"
        )));
    }

    let mut bodies = Array2::<f64>::zeros((channels / dof_per_group, trials));
    for (mut row, group) in bodies
        .outer_iter_mut()
        .zip(scores.axis_chunks_iter(Axis(0), dof_per_group))
    {
        row.assign(&group.sum_axis(Axis(0)));
    }
    Ok(bodies)
}

/// Sum over rigid bodies and split the columns into `[trial, participant]`.
///
/// `scores` is indexed `[body, column]` where columns are laid out trial-major:
/// column `t * participants + p` holds trial `t` of participant `p`. The result
/// is the whole-body score per trial and participant.
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if `trial_count` is zero.
/// - [`VariabilityError::InvalidShape`] if the column count is not a multiple
///   of `trial_count`.
pub fn sum_across_bodies(scores: ArrayView2<'_, f64>, trial_count: usize) -> Result<Array2<f64>> {
    if trial_count == 0 {
        return Err(VariabilityError::invalid_config(
            "trial_count must be at least 1",
        ));
    }

    let columns = scores.ncols();
    if columns % trial_count != 0 {
        return Err(VariabilityError::invalid_shape(format!(
            "{columns} columns cannot be split into {trial_count} trials"
        )));
    }

    let participants = columns / trial_count;
    let totals = scores.sum_axis(Axis(0));
    Ok(Array2::from_shape_fn((trial_count, participants), |(t, p)| {
        totals[t * participants + p]
    }))
}

/// Divide every score by the largest one.
///
/// # Errors
///
/// Returns [`VariabilityError::InvalidInput`] if the array is empty, holds a
/// non-finite value, or its maximum is not positive.
pub fn normalize_by_max<D: Dimension>(scores: ArrayView<'_, f64, D>) -> Result<Array<f64, D>> {
    if scores.is_empty() {
        return Err(VariabilityError::invalid_input("cannot normalise an empty array"));
    }
    if scores.iter().any(|v| !v.is_finite()) {
        return Err(VariabilityError::invalid_input(
            "cannot normalise scores containing NaN or infinity",
        ));
    }

    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return Err(VariabilityError::invalid_input(format!(
            "maximum score {max} is not positive"
        )));
    }

    Ok(scores.mapv(|v| v / max))
}
