//! Central-difference differentiation along the time axis.
//!
//! Input arrays are indexed `[time, channel, trial]`. Interior frames use a
//! symmetric difference over `points` frames on either side; the first and last
//! `points` frames fall back to forward and backward differences so that every
//! frame receives an estimate.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::error::{Result, VariabilityError};

/// Time derivative with the same `[time, channel, trial]` shape as its input.
pub type DerivativeSeries = Array3<f64>;

/// Differentiate every channel of every trial over time.
///
/// For frame `i` of an `m`-frame series and half-window `p`:
///
/// | Frames | Estimate |
/// |--------|----------|
/// | `[0, p)` | `(x[i+p] - x[i]) / p` |
/// | `[p, m-p)` | `(x[i+p] - x[i-p]) / 2p` |
/// | `[m-p, m)` | `(x[i] - x[i-p]) / p` |
///
/// Derivatives are per frame, not per second. NaN and infinite samples
/// propagate unchanged.
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if `points` is zero.
/// - [`VariabilityError::InvalidShape`] if the series has `2 * points` frames
///   or fewer, where the edge and interior windows would overlap.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use pose_variability::math::central_difference;
///
/// let ramp = Array3::from_shape_fn((12, 1, 1), |(t, _, _)| 2.0 * t as f64);
/// let derivative = central_difference(ramp.view(), 2)?;
/// assert!(derivative.iter().all(|&d| d == 2.0));
/// # Ok::<(), pose_variability::VariabilityError>(())
/// ```
pub fn central_difference(data: ArrayView3<'_, f64>, points: usize) -> Result<DerivativeSeries> {
    if points == 0 {
        return Err(VariabilityError::invalid_config(
            "derivative half-window must be at least 1",
        ));
    }

    let frames = data.len_of(Axis(0));
    if frames <= points.saturating_mul(2) {
        return Err(VariabilityError::invalid_shape(format!(
            "{frames} frames is too short for a half-window of {points}"
        )));
    }

    let span = points as f64;
    let mut derivative = Array3::<f64>::zeros(data.raw_dim());

    for (i, frame) in derivative.axis_iter_mut(Axis(0)).enumerate() {
        let (ahead, behind, denom) = if i < points {
            (i + points, i, span)
        } else if i < frames - points {
            (i + points, i - points, 2.0 * span)
        } else {
            (i, i - points, span)
        };

        Zip::from(frame)
            .and(data.index_axis(Axis(0), ahead))
            .and(data.index_axis(Axis(0), behind))
            .for_each(|d, &hi, &lo| *d = (hi - lo) / denom);
    }

    Ok(derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_series(frames: usize, slope: f64, intercept: f64) -> Array3<f64> {
        Array3::from_shape_fn((frames, 3, 2), |(t, c, k)| {
            slope * t as f64 + intercept + (c * 10 + k) as f64
        })
    }

    #[test]
    fn test_constant_input_has_zero_derivative() {
        let data = Array3::from_elem((25, 4, 3), 7.5);
        let derivative = central_difference(data.view(), 5).unwrap();
        assert_eq!(derivative.dim(), (25, 4, 3));
        assert!(derivative.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_linear_input_recovers_slope_everywhere() {
        let data = linear_series(30, 3.0, -4.0);
        for points in [1, 5, 10, 14] {
            let derivative = central_difference(data.view(), points).unwrap();
            for &d in &derivative {
                assert_eq!(d, 3.0, "points = {points}");
            }
        }
    }

    #[test]
    fn test_edge_and_interior_rules() {
        // x = t^2 on 7 frames, p = 2
        let data = Array3::from_shape_fn((7, 1, 1), |(t, _, _)| (t * t) as f64);
        let derivative = central_difference(data.view(), 2).unwrap();
        let d: Vec<f64> = derivative.iter().copied().collect();

        // forward: (x[i+2] - x[i]) / 2
        assert_relative_eq!(d[0], (4.0 - 0.0) / 2.0);
        assert_relative_eq!(d[1], (9.0 - 1.0) / 2.0);
        // central: (x[i+2] - x[i-2]) / 4
        assert_relative_eq!(d[2], (16.0 - 0.0) / 4.0);
        assert_relative_eq!(d[4], (36.0 - 4.0) / 4.0);
        // backward: (x[i] - x[i-2]) / 2
        assert_relative_eq!(d[5], (25.0 - 9.0) / 2.0);
        assert_relative_eq!(d[6], (36.0 - 16.0) / 2.0);
    }

    #[test]
    fn test_short_series_rejected() {
        let data = Array3::<f64>::zeros((10, 1, 1));
        let err = central_difference(data.view(), 5).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidShape { .. }));

        assert!(central_difference(data.view(), 4).is_ok());
    }

    #[test]
    fn test_huge_window_rejected_without_overflow() {
        let data = Array3::<f64>::zeros((40, 2, 1));
        let err = central_difference(data.view(), usize::MAX).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidShape { .. }));

        let err = central_difference(data.view(), usize::MAX / 2 + 1).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidShape { .. }));
    }

    #[test]
    fn test_zero_points_rejected() {
        let data = Array3::<f64>::zeros((10, 1, 1));
        let err = central_difference(data.view(), 0).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidConfig(_)));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data = linear_series(20, 1.5, 0.0);
        let before = data.clone();
        let _ = central_difference(data.view(), 3).unwrap();
        assert_eq!(data, before);
    }
}
