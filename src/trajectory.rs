//! Target-acquisition geometry.
//!
//! Turns the cursor log of a trial into the pieces a trajectory plot draws:
//! the cursor path between go cue and target arrival, the target box, and
//! the cursor box at both ends of the path. Screen coordinates are pixels with
//! boxes anchored at their lower-left corner.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DisplayGeometry;
use crate::error::{Result, VariabilityError};

/// Axis-aligned square box anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Lower-left corner.
    pub origin: [f64; 2],
    /// Side length.
    pub side: f64,
}

impl Rect {
    /// Corners in counter-clockwise order from the lower-left.
    #[must_use]
    pub fn corners(&self) -> [[f64; 2]; 4] {
        let [x, y] = self.origin;
        [
            [x, y],
            [x + self.side, y],
            [x + self.side, y + self.side],
            [x, y + self.side],
        ]
    }

    /// Whether `point` lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: [f64; 2]) -> bool {
        let [x, y] = self.origin;
        (x..=x + self.side).contains(&point[0]) && (y..=y + self.side).contains(&point[1])
    }
}

/// Whether an acquisition reached its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AcquisitionOutcome {
    /// Target reached within the time limit.
    Successful,
    /// Trial timed out before the target was reached.
    Failed,
}

/// Frame indices and target locations for one class of acquisitions.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcquisitionRecord {
    /// Frame of each go cue.
    pub go_cues: Vec<usize>,
    /// Frame at which each acquisition ended.
    pub target_reached: Vec<usize>,
    /// Lower-left corner of each target box.
    pub target_box_locations: Vec<[f64; 2]>,
}

impl AcquisitionRecord {
    /// Number of acquisitions in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.go_cues.len()
    }

    /// Whether the record holds no acquisitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.go_cues.is_empty()
    }

    fn validate(&self) -> Result<()> {
        let n = self.go_cues.len();
        if self.target_reached.len() != n || self.target_box_locations.len() != n {
            return Err(VariabilityError::invalid_input(format!(
                "acquisition record has {n} go cues, {} arrivals and {} target boxes",
                self.target_reached.len(),
                self.target_box_locations.len()
            )));
        }
        Ok(())
    }
}

/// Cursor log and acquisition records of a single trial.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialInformation {
    /// Lower-left cursor corner per frame.
    pub cursor_positions: Vec<[f64; 2]>,
    /// Acquisitions that reached their target.
    pub successful: AcquisitionRecord,
    /// Acquisitions that timed out.
    pub failed: AcquisitionRecord,
}

impl TrialInformation {
    /// Record for the given outcome.
    #[must_use]
    pub const fn record(&self, outcome: AcquisitionOutcome) -> &AcquisitionRecord {
        match outcome {
            AcquisitionOutcome::Successful => &self.successful,
            AcquisitionOutcome::Failed => &self.failed,
        }
    }
}

/// Everything needed to draw one acquisition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcquisitionPath {
    /// Cursor-centre path from go cue to the end of the acquisition.
    pub path: Vec<[f64; 2]>,
    /// Target box.
    pub target: Rect,
    /// Cursor box at the go cue.
    pub start_cursor: Rect,
    /// Cursor box at the last frame of the path.
    pub end_cursor: Rect,
    /// Visible x range.
    pub x_bounds: [f64; 2],
    /// Visible y range.
    pub y_bounds: [f64; 2],
}

/// Box drawn around a target whose lower-left corner is `location`.
///
/// The box is widened by the tolerance, shifted left by the full tolerance and
/// down by half of it.
#[must_use]
pub fn target_rect(location: [f64; 2], geometry: &DisplayGeometry) -> Rect {
    let tol = geometry.tolerance;
    Rect {
        origin: [location[0] - tol, location[1] - (tol / 2.0).floor()],
        side: geometry.target_width + tol,
    }
}

/// Box drawn around the cursor whose lower-left corner is `location`.
#[must_use]
pub fn cursor_rect(location: [f64; 2], geometry: &DisplayGeometry) -> Rect {
    let half_tol = (geometry.tolerance / 2.0).floor();
    Rect {
        origin: [location[0] - half_tol, location[1] - half_tol],
        side: geometry.cursor_width + geometry.tolerance,
    }
}

/// Extract the path and boxes of acquisition `target_no`.
///
/// The path runs from the go cue up to, but excluding, the arrival frame. For
/// failed acquisitions the logged arrival frame is one past the timeout, so the
/// path stops one frame earlier. Positions are shifted by half the cursor width
/// so the path follows the cursor centre.
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if the geometry is invalid.
/// - [`VariabilityError::InvalidInput`] if `target_no` is out of range or the
///   record's vectors differ in length.
/// - [`VariabilityError::InvalidShape`] if the frame window is empty or runs
///   past the cursor log.
pub fn acquisition_path(
    trial: &TrialInformation,
    outcome: AcquisitionOutcome,
    target_no: usize,
    geometry: &DisplayGeometry,
) -> Result<AcquisitionPath> {
    geometry.validate()?;

    let record = trial.record(outcome);
    record.validate()?;
    if target_no >= record.len() {
        return Err(VariabilityError::invalid_input(format!(
            "target {target_no} out of range for {} {outcome:?} acquisitions",
            record.len()
        )));
    }

    let start = record.go_cues[target_no];
    let reached = record.target_reached[target_no];
    let end = match outcome {
        AcquisitionOutcome::Successful => reached,
        AcquisitionOutcome::Failed => reached.saturating_sub(1),
    };

    let frames = trial.cursor_positions.len();
    if end <= start || end > frames {
        return Err(VariabilityError::invalid_shape(format!(
            "acquisition window [{start}, {end}) is empty or exceeds {frames} logged frames"
        )));
    }

    let offset = (geometry.path_cursor_width / 2.0).floor();
    let window = &trial.cursor_positions[start..end];
    let path: Vec<[f64; 2]> = window.iter().map(|p| [p[0] + offset, p[1] + offset]).collect();

    debug!(?outcome, target_no, start, end, "extracted acquisition path");
    Ok(AcquisitionPath {
        path,
        target: target_rect(record.target_box_locations[target_no], geometry),
        start_cursor: cursor_rect(window[0], geometry),
        end_cursor: cursor_rect(window[window.len() - 1], geometry),
        x_bounds: geometry.x_bounds,
        y_bounds: geometry.y_bounds,
    })
}
