//! Configuration for variability analysis.
//!
//! The experiment-specific constants (rigid body layout, derivative window
//! radii, segment and decoder counts, SEM sample size, display geometry) live
//! here as named, overridable parameters.
//!
//! # Example
//!
//! ```
//! use pose_variability::VariabilityConfig;
//!
//! let config = VariabilityConfig::default();
//! assert_eq!(config.channel_count(), 114);
//!
//! let pilot = VariabilityConfig::default().with_decoder_count(3);
//! assert!(pilot.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VariabilityError};

/// Position values per rigid body, followed by the same number of rotation values.
pub const TRIPLET: usize = 3;

/// Configuration for the variability pipelines.
///
/// # Channel Layout
///
/// - `dof_per_body`: consecutive channels per rigid body (3 position + 3 rotation).
/// - `rigid_body_count`: number of tracked bodies (19 in the experiment).
///
/// # Derivative Windows
///
/// The central-difference half-window differs per analysis mode. The whole-trial
/// pipeline smooths subsets over 10 frames and the full channel set over 5;
/// the segmented pipeline always uses 5.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariabilityConfig {
    /// Channels per rigid body.
    pub dof_per_body: usize,

    /// Number of tracked rigid bodies.
    pub rigid_body_count: usize,

    /// Half-window for the whole-trial pipeline when every channel is used.
    pub full_channel_points: usize,

    /// Half-window for the whole-trial pipeline on a rotation or position subset.
    pub subset_channel_points: usize,

    /// Half-window for the segmented pipeline, regardless of selection.
    pub segmented_points: usize,

    /// Number of contiguous segments a trial is split into.
    pub segment_count: usize,

    /// Number of decoders expected on the decoder axis.
    pub decoder_count: usize,

    /// Expected participant count, if it should be enforced.
    pub participant_count: Option<usize>,
}

impl Default for VariabilityConfig {
    fn default() -> Self {
        Self {
            dof_per_body: 6,
            rigid_body_count: 19,
            full_channel_points: 5,
            subset_channel_points: 10,
            segmented_points: 5,
            segment_count: 5,
            decoder_count: 7,
            participant_count: None,
        }
    }
}

impl VariabilityConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of channels on the channel axis.
    #[must_use]
    pub const fn channel_count(&self) -> usize {
        self.dof_per_body * self.rigid_body_count
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.dof_per_body < 2 * TRIPLET {
            return Err(VariabilityError::invalid_config(format!(
                "dof_per_body must be at least {}",
                2 * TRIPLET
            )));
        }
        if self.rigid_body_count == 0 {
            return Err(VariabilityError::invalid_config(
                "rigid_body_count must be at least 1",
            ));
        }
        if self.full_channel_points == 0
            || self.subset_channel_points == 0
            || self.segmented_points == 0
        {
            return Err(VariabilityError::invalid_config(
                "derivative half-windows must be at least 1",
            ));
        }
        if self.segment_count == 0 {
            return Err(VariabilityError::invalid_config(
                "segment_count must be at least 1",
            ));
        }
        if self.decoder_count == 0 {
            return Err(VariabilityError::invalid_config(
                "decoder_count must be at least 1",
            ));
        }
        if self.participant_count == Some(0) {
            return Err(VariabilityError::invalid_config(
                "participant_count must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Set the number of decoders.
    #[must_use]
    pub const fn with_decoder_count(mut self, count: usize) -> Self {
        self.decoder_count = count;
        self
    }

    /// Set the number of segments.
    #[must_use]
    pub const fn with_segment_count(mut self, count: usize) -> Self {
        self.segment_count = count;
        self
    }

    /// Require a fixed participant count.
    #[must_use]
    pub const fn with_participant_count(mut self, count: usize) -> Self {
        self.participant_count = Some(count);
        self
    }

    /// Set the number of rigid bodies.
    #[must_use]
    pub const fn with_rigid_body_count(mut self, count: usize) -> Self {
        self.rigid_body_count = count;
        self
    }

    /// Use the same half-window in every mode.
    #[must_use]
    pub const fn with_uniform_points(mut self, points: usize) -> Self {
        self.full_channel_points = points;
        self.subset_channel_points = points;
        self.segmented_points = points;
        self
    }
}

/// Spread shown by error bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpreadMeasure {
    /// Sample standard deviation divided by `sqrt(sem_sample_count)`.
    #[default]
    StandardError,
    /// Sample standard deviation (ddof = 1).
    StandardDeviation,
}

/// Configuration for mean/error-bar summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SummaryConfig {
    /// Spread measure.
    pub spread: SpreadMeasure,

    /// Sample size in the standard error denominator.
    /// Fixed by the experiment's participant count rather than the row count.
    pub sem_sample_count: usize,

    /// Only draw the upper half of each error bar.
    pub top_error_only: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            spread: SpreadMeasure::StandardError,
            sem_sample_count: 11,
            top_error_only: true,
        }
    }
}

impl SummaryConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the SEM sample count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.spread == SpreadMeasure::StandardError && self.sem_sample_count == 0 {
            return Err(VariabilityError::invalid_config(
                "sem_sample_count must be at least 1",
            ));
        }
        Ok(())
    }

    /// Preset with symmetric standard-deviation bars.
    #[must_use]
    pub fn standard_deviation() -> Self {
        Self {
            spread: SpreadMeasure::StandardDeviation,
            top_error_only: false,
            ..Self::default()
        }
    }

    /// Set the SEM sample count.
    #[must_use]
    pub const fn with_sem_sample_count(mut self, count: usize) -> Self {
        self.sem_sample_count = count;
        self
    }

    /// Choose between one-sided and symmetric bars.
    #[must_use]
    pub const fn with_top_error_only(mut self, top_only: bool) -> Self {
        self.top_error_only = top_only;
        self
    }
}

/// Screen geometry used to lay out target-acquisition plots.
///
/// Widths are in screen pixels. The cursor width used to centre the path and
/// the width of the drawn cursor box are separate parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayGeometry {
    /// Cursor width used to offset the path to the cursor centre.
    pub path_cursor_width: f64,

    /// Side of the drawn cursor box.
    pub cursor_width: f64,

    /// Side of the drawn target box.
    pub target_width: f64,

    /// Rendering tolerance added around boxes.
    pub tolerance: f64,

    /// Visible x range.
    pub x_bounds: [f64; 2],

    /// Visible y range.
    pub y_bounds: [f64; 2],
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            path_cursor_width: 30.0,
            cursor_width: 35.0,
            target_width: 60.0,
            tolerance: 10.0,
            x_bounds: [-20.0, 1920.0],
            y_bounds: [-20.0, 1045.0],
        }
    }
}

impl DisplayGeometry {
    /// Validate the geometry.
    ///
    /// # Errors
    ///
    /// Returns an error for negative widths or inverted bounds.
    pub fn validate(&self) -> Result<()> {
        if self.path_cursor_width < 0.0
            || self.cursor_width <= 0.0
            || self.target_width <= 0.0
            || self.tolerance < 0.0
        {
            return Err(VariabilityError::invalid_config(
                "box widths must be positive and tolerance non-negative",
            ));
        }
        if self.x_bounds[0] >= self.x_bounds[1] || self.y_bounds[0] >= self.y_bounds[1] {
            return Err(VariabilityError::invalid_config(
                "display bounds must be increasing",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VariabilityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.channel_count(), 114);
        assert_eq!(config.full_channel_points, 5);
        assert_eq!(config.subset_channel_points, 10);
        assert_eq!(config.decoder_count, 7);
    }

    #[test]
    fn test_validation() {
        let mut config = VariabilityConfig::default();

        config.dof_per_body = 5;
        assert!(config.validate().is_err());

        config.dof_per_body = 6;
        config.segmented_points = 0;
        assert!(config.validate().is_err());

        config.segmented_points = 5;
        config.decoder_count = 0;
        assert!(config.validate().is_err());

        config.decoder_count = 7;
        config.participant_count = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = VariabilityConfig::new()
            .with_decoder_count(2)
            .with_segment_count(4)
            .with_participant_count(11)
            .with_uniform_points(3);
        assert_eq!(config.decoder_count, 2);
        assert_eq!(config.segment_count, 4);
        assert_eq!(config.participant_count, Some(11));
        assert_eq!(config.subset_channel_points, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_summary_presets() {
        let config = SummaryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sem_sample_count, 11);
        assert!(config.top_error_only);

        let sd = SummaryConfig::standard_deviation();
        assert_eq!(sd.spread, SpreadMeasure::StandardDeviation);
        assert!(!sd.top_error_only);

        assert!(SummaryConfig::default()
            .with_sem_sample_count(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_display_geometry() {
        let geometry = DisplayGeometry::default();
        assert!(geometry.validate().is_ok());

        let inverted = DisplayGeometry {
            x_bounds: [10.0, -10.0],
            ..DisplayGeometry::default()
        };
        assert!(inverted.validate().is_err());
    }
}
