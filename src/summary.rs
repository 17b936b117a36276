//! Mean and error-bar summaries for bar charts.
//!
//! Input arrays are `[datapoint, parameter]`: one column per bar.

use ndarray::{Array1, ArrayView2, Axis};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{SpreadMeasure, SummaryConfig};
use crate::error::{Result, VariabilityError};

/// Per-column bar heights and error extents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorBarSummary {
    /// Column means (bar heights).
    pub means: Vec<f64>,
    /// Standard deviation or standard error per column.
    pub spread: Vec<f64>,
    /// Extent below each bar; zero when only the top half is drawn.
    pub lower_errors: Vec<f64>,
    /// Extent above each bar.
    pub upper_errors: Vec<f64>,
}

impl ErrorBarSummary {
    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Whether there are no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Tip of each error bar.
    #[must_use]
    pub fn upper_bounds(&self) -> Vec<f64> {
        self.means
            .iter()
            .zip(&self.upper_errors)
            .map(|(m, e)| m + e)
            .collect()
    }

    /// Foot of each error bar.
    #[must_use]
    pub fn lower_bounds(&self) -> Vec<f64> {
        self.means
            .iter()
            .zip(&self.lower_errors)
            .map(|(m, e)| m - e)
            .collect()
    }
}

/// Summaries of two conditions over the same parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairedSummary {
    /// First condition.
    pub first: ErrorBarSummary,
    /// Second condition.
    pub second: ErrorBarSummary,
}

impl PairedSummary {
    /// Change in mean from the first to the second condition.
    #[must_use]
    pub fn mean_change(&self) -> Vec<f64> {
        self.first
            .means
            .iter()
            .zip(&self.second.means)
            .map(|(a, b)| b - a)
            .collect()
    }
}

/// Summarise each column of `data` as a mean with an error bar.
///
/// The spread is the sample standard deviation (ddof = 1), divided by
/// `sqrt(config.sem_sample_count)` for [`SpreadMeasure::StandardError`].
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if the configuration is invalid.
/// - [`VariabilityError::InvalidInput`] if there are fewer than two rows, no
///   columns, or any NaN or infinite value.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pose_variability::{summarize_columns, SummaryConfig};
///
/// let data = array![[1.0, 2.0], [3.0, 6.0]];
/// let summary = summarize_columns(data.view(), &SummaryConfig::standard_deviation())?;
/// assert_eq!(summary.means, vec![2.0, 4.0]);
/// # Ok::<(), pose_variability::VariabilityError>(())
/// ```
pub fn summarize_columns(
    data: ArrayView2<'_, f64>,
    config: &SummaryConfig,
) -> Result<ErrorBarSummary> {
    config.validate()?;

    let (rows, columns) = data.dim();
    if rows < 2 {
        return Err(VariabilityError::invalid_input(format!(
            "need at least 2 datapoints per column, got {rows}"
        )));
    }
    if columns == 0 {
        return Err(VariabilityError::invalid_input("no columns to summarise"));
    }
    if let Some(((row, column), value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(VariabilityError::invalid_input(format!(
            "non-finite value {value} at row {row}, column {column}"
        )));
    }

    let means: Array1<f64> = data
        .mean_axis(Axis(0))
        .ok_or_else(|| VariabilityError::invalid_input("no datapoints to summarise"))?;
    let std = data.std_axis(Axis(0), 1.0);

    let spread = match config.spread {
        SpreadMeasure::StandardError => std / (config.sem_sample_count as f64).sqrt(),
        SpreadMeasure::StandardDeviation => std,
    };

    let lower_errors = if config.top_error_only {
        vec![0.0; columns]
    } else {
        spread.to_vec()
    };

    debug!(rows, columns, spread = ?config.spread, "summarised columns");
    Ok(ErrorBarSummary {
        means: means.to_vec(),
        upper_errors: spread.to_vec(),
        spread: spread.to_vec(),
        lower_errors,
    })
}

/// Summarise two conditions that share the same parameter columns.
///
/// # Errors
///
/// - [`VariabilityError::DimensionMismatch`] if the column counts differ.
/// - Any error from [`summarize_columns`].
pub fn summarize_pair(
    first: ArrayView2<'_, f64>,
    second: ArrayView2<'_, f64>,
    config: &SummaryConfig,
) -> Result<PairedSummary> {
    let (expected, actual) = (first.ncols(), second.ncols());
    if expected != actual {
        return Err(VariabilityError::dimension_mismatch(
            "parameter",
            expected,
            actual,
        ));
    }

    Ok(PairedSummary {
        first: summarize_columns(first, config)?,
        second: summarize_columns(second, config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_standard_error_uses_configured_count() {
        let data = array![[1.0, 2.0], [3.0, 6.0]];
        let summary = summarize_columns(data.view(), &SummaryConfig::default()).unwrap();

        assert_eq!(summary.len(), 2);
        assert_relative_eq!(summary.means[0], 2.0);
        assert_relative_eq!(summary.spread[0], 2.0_f64.sqrt() / 11.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(summary.spread[1], 8.0_f64.sqrt() / 11.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(summary.lower_errors, vec![0.0, 0.0]);
        assert_eq!(summary.upper_errors, summary.spread);
    }

    #[test]
    fn test_symmetric_standard_deviation() {
        let data = array![[1.0], [3.0], [5.0]];
        let summary =
            summarize_columns(data.view(), &SummaryConfig::standard_deviation()).unwrap();
        assert_relative_eq!(summary.spread[0], 2.0, epsilon = 1e-12);
        assert_eq!(summary.lower_errors, summary.upper_errors);
        assert_relative_eq!(summary.lower_bounds()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(summary.upper_bounds()[0], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_rows() {
        let data = Array2::<f64>::ones((1, 3));
        assert!(matches!(
            summarize_columns(data.view(), &SummaryConfig::default()),
            Err(VariabilityError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let data = array![[f64::NAN, 1.0], [2.0, 1.0], [4.0, 1.0]];
        let err = summarize_columns(data.view(), &SummaryConfig::default()).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidInput(_)));
        assert!(err.to_string().contains("row 0, column 0"));

        let data = array![[1.0, 1.0], [2.0, f64::INFINITY]];
        assert!(summarize_columns(data.view(), &SummaryConfig::default()).is_err());
    }

    #[test]
    fn test_pair_requires_matching_columns() {
        let a = Array2::<f64>::ones((4, 3));
        let b = Array2::<f64>::ones((4, 2));
        let err = summarize_pair(a.view(), b.view(), &SummaryConfig::default()).unwrap_err();
        assert_eq!(err, VariabilityError::dimension_mismatch("parameter", 3, 2));
    }

    #[test]
    fn test_pair_mean_change() {
        let a = array![[1.0, 2.0], [3.0, 2.0]];
        let b = array![[2.0, 1.0], [4.0, 1.0], [3.0, 1.0]];
        let pair = summarize_pair(a.view(), b.view(), &SummaryConfig::default()).unwrap();
        let change = pair.mean_change();
        assert_relative_eq!(change[0], 1.0);
        assert_relative_eq!(change[1], -1.0);
    }
}
