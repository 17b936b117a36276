//! Root-mean-square reduction over time.

use ndarray::{Array2, ArrayView3, Axis};

use crate::error::{Result, VariabilityError};

/// Reduce a `[time, channel, trial]` array to per-channel, per-trial RMS.
///
/// Squares each sample, averages over the time axis and takes the square
/// root. No windowing or weighting. Output is `[channel, trial]`.
///
/// # Errors
///
/// Returns [`VariabilityError::InvalidShape`] if the time axis is empty.
pub fn rms_over_time(data: ArrayView3<'_, f64>) -> Result<Array2<f64>> {
    let mean_square = data
        .mapv(|v| v * v)
        .mean_axis(Axis(0))
        .ok_or_else(|| VariabilityError::invalid_shape("cannot take RMS over an empty time axis"))?;

    Ok(mean_square.mapv_into(f64::sqrt))
}
