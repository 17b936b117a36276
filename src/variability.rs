//! Variability pipelines: select channels, differentiate, reduce to RMS.
//!
//! # Pipeline Overview
//!
//! 1. Validate the input shape against the configuration
//! 2. Select rotation, position or all channels
//! 3. Central-difference time derivative
//! 4. RMS over time
//!
//! The segmented form repeats steps 2-4 for every decoder and every fixed
//! time segment of the trial.

use ndarray::{s, Array2, Array4, ArrayView3, ArrayView4, Axis, CowArray, Ix4};
use tracing::{debug, trace};

use crate::channels::ChannelSelection;
use crate::config::VariabilityConfig;
use crate::error::{Result, VariabilityError};
use crate::math::{central_difference, rms_over_time};

/// Per-channel RMS of the derivative, indexed `[channel, trial]`.
pub type VarianceScore = Array2<f64>;

/// Segmented scores, indexed `[segment, channel, decoder, participant]`.
pub type SegmentedVarianceScore = Array4<f64>;

/// Compute whole-trial variability scores.
///
/// `data` is indexed `[time, channel, trial]` and must carry
/// `config.channel_count()` channels. The full channel set is differentiated
/// with `config.full_channel_points`; a rotation or position subset with
/// `config.subset_channel_points`.
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if the configuration is invalid.
/// - [`VariabilityError::InvalidShape`] if the channel axis has the wrong
///   length or the trial is too short for the derivative window.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use pose_variability::{compute_variability, ChannelSelection, VariabilityConfig};
///
/// let config = VariabilityConfig::default();
/// let data = Array3::<f64>::zeros((50, config.channel_count(), 3));
///
/// let scores = compute_variability(data.view(), ChannelSelection::RotationOnly, &config)?;
/// assert_eq!(scores.dim(), (57, 3));
/// # Ok::<(), pose_variability::VariabilityError>(())
/// ```
pub fn compute_variability(
    data: ArrayView3<'_, f64>,
    selection: ChannelSelection,
    config: &VariabilityConfig,
) -> Result<VarianceScore> {
    config.validate()?;
    validate_channel_axis(data.len_of(Axis(1)), config)?;

    let scores = if selection.is_subset() {
        let indices = selection.indices(data.len_of(Axis(1)), config.dof_per_body)?;
        let subset = data.select(Axis(1), &indices);
        let derivative = central_difference(subset.view(), config.subset_channel_points)?;
        rms_over_time(derivative.view())?
    } else {
        let derivative = central_difference(data, config.full_channel_points)?;
        rms_over_time(derivative.view())?
    };

    debug!(
        shape = ?data.shape(),
        ?selection,
        output = ?scores.shape(),
        "computed variability scores"
    );
    Ok(scores)
}

/// Flag-based form of [`compute_variability`] using the default configuration.
///
/// `positions_only` is ignored when `include_positions` is set.
///
/// # Errors
///
/// See [`compute_variability`].
pub fn compute_variability_scores(
    data: ArrayView3<'_, f64>,
    include_positions: bool,
    positions_only: bool,
) -> Result<VarianceScore> {
    compute_variability(
        data,
        ChannelSelection::from_flags(include_positions, positions_only),
        &VariabilityConfig::default(),
    )
}

/// Compute variability scores per time segment and decoder.
///
/// `data` is indexed `[time, channel, decoder, participant]`. The time axis is
/// cut into `config.segment_count` contiguous windows of
/// `floor(frames / segment_count)` frames starting at frame 0. Frames past the
/// last full window are not analysed. Every window is differentiated with
/// `config.segmented_points`.
///
/// # Errors
///
/// - [`VariabilityError::InvalidConfig`] if the configuration is invalid.
/// - [`VariabilityError::InvalidShape`] if the channel axis has the wrong
///   length or a segment is too short for the derivative window.
/// - [`VariabilityError::DimensionMismatch`] if the decoder axis differs from
///   `config.decoder_count`, or the participant axis from
///   `config.participant_count` when one is set.
pub fn compute_segmented_variability(
    data: ArrayView4<'_, f64>,
    selection: ChannelSelection,
    config: &VariabilityConfig,
) -> Result<SegmentedVarianceScore> {
    config.validate()?;

    let (frames, channels, decoders, participants) = data.dim();
    validate_channel_axis(channels, config)?;

    if decoders != config.decoder_count {
        return Err(VariabilityError::dimension_mismatch(
            "decoder",
            config.decoder_count,
            decoders,
        ));
    }
    if let Some(expected) = config.participant_count {
        if participants != expected {
            return Err(VariabilityError::dimension_mismatch(
                "participant",
                expected,
                participants,
            ));
        }
    }

    let segment_length = frames / config.segment_count;
    if segment_length <= config.segmented_points.saturating_mul(2) {
        return Err(VariabilityError::invalid_shape(format!(
            "{frames} frames split into {} segments gives {segment_length} frames per segment, \
             too short for a half-window of {}",
            config.segment_count, config.segmented_points
        )));
    }

    let selected: CowArray<'_, f64, Ix4> = if selection.is_subset() {
        let indices = selection.indices(channels, config.dof_per_body)?;
        data.select(Axis(1), &indices).into()
    } else {
        data.into()
    };

    let mut output = Array4::<f64>::zeros((
        config.segment_count,
        selected.len_of(Axis(1)),
        config.decoder_count,
        participants,
    ));

    for decoder in 0..config.decoder_count {
        for segment in 0..config.segment_count {
            let start = segment * segment_length;
            let end = start + segment_length;

            let window = selected.slice(s![start..end, .., decoder, ..]);
            let derivative = central_difference(window, config.segmented_points)?;
            let rms = rms_over_time(derivative.view())?;

            trace!(decoder, segment, start, end, "segment variability");
            output.slice_mut(s![segment, .., decoder, ..]).assign(&rms);
        }
    }

    debug!(
        shape = ?data.shape(),
        ?selection,
        segment_length,
        dropped_frames = frames - segment_length * config.segment_count,
        output = ?output.shape(),
        "computed segmented variability scores"
    );
    Ok(output)
}

/// Flag-based form of [`compute_segmented_variability`] using the default configuration.
///
/// # Errors
///
/// See [`compute_segmented_variability`].
pub fn compute_segmented_variability_scores(
    data: ArrayView4<'_, f64>,
    include_positions: bool,
) -> Result<SegmentedVarianceScore> {
    compute_segmented_variability(
        data,
        ChannelSelection::from_flags(include_positions, false),
        &VariabilityConfig::default(),
    )
}

fn validate_channel_axis(channels: usize, config: &VariabilityConfig) -> Result<()> {
    if channels % config.dof_per_body != 0 {
        return Err(VariabilityError::invalid_shape(format!(
            "channel axis of length {channels} is not a multiple of {}",
            config.dof_per_body
        )));
    }
    if channels != config.channel_count() {
        return Err(VariabilityError::invalid_shape(format!(
            "expected {} channels ({} rigid bodies x {}), got {channels}",
            config.channel_count(),
            config.rigid_body_count,
            config.dof_per_body
        )));
    }
    Ok(())
}
