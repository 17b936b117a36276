//! Pose Variability Library
//!
//! Movement variability scores from rigid-body pose time series.
//!
//! Motion capture of a participant steering a cursor yields, per frame, six
//! channels per rigid body (three position, three rotation). This library
//! turns those series into a per-channel variability score: the RMS of the
//! time derivative, computed with a central-difference scheme that also covers
//! the first and last frames.
//!
//! # Features
//!
//! - **Channel selection**: rotation-only (default), position-only or all channels
//! - **Whole-trial scores**: `[channel, trial]` RMS of the derivative
//! - **Segmented scores**: per decoder and per fixed time segment
//! - **Plot preparation**: per-body sums, normalisation, mean/SEM bars and
//!   target-acquisition geometry
//!
//! # Quick Start
//!
//! ```
//! use ndarray::Array3;
//! use pose_variability::{compute_variability, ChannelSelection, VariabilityConfig};
//!
//! let config = VariabilityConfig::default();
//!
//! // 100 frames, 114 channels, 2 trials; every channel drifts at 0.5 per frame
//! let data = Array3::from_shape_fn((100, config.channel_count(), 2), |(t, _, _)| 0.5 * t as f64);
//!
//! let scores = compute_variability(data.view(), ChannelSelection::RotationOnly, &config)?;
//! assert_eq!(scores.dim(), (57, 2));
//! assert!(scores.iter().all(|&s| (s - 0.5).abs() < 1e-12));
//! # Ok::<(), pose_variability::VariabilityError>(())
//! ```
//!
//! # Array Layouts
//!
//! | Input / output | Axes |
//! |----------------|------|
//! | Whole-trial input | `[time, channel, trial]` |
//! | Segmented input | `[time, channel, decoder, participant]` |
//! | [`VarianceScore`] | `[channel, trial]` |
//! | [`SegmentedVarianceScore`] | `[segment, channel, decoder, participant]` |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregate;
pub mod channels;
pub mod config;
pub mod error;
pub mod math;
pub mod summary;
pub mod trajectory;
pub mod variability;

// Re-exports for convenient access
pub use aggregate::{normalize_by_max, sum_across_bodies, sum_per_rigid_body};
pub use channels::ChannelSelection;
pub use config::{DisplayGeometry, SpreadMeasure, SummaryConfig, VariabilityConfig};
pub use error::{Result, VariabilityError};
pub use summary::{summarize_columns, summarize_pair, ErrorBarSummary, PairedSummary};
pub use trajectory::{
    acquisition_path, cursor_rect, target_rect, AcquisitionOutcome, AcquisitionPath,
    AcquisitionRecord, Rect, TrialInformation,
};
pub use variability::{
    compute_segmented_variability, compute_segmented_variability_scores, compute_variability,
    compute_variability_scores, SegmentedVarianceScore, VarianceScore,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
