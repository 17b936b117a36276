//! Channel selection over the rigid-body channel axis.
//!
//! Each rigid body occupies `dof_per_body` consecutive channels: three
//! position values followed by three rotation values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::TRIPLET;
use crate::error::{Result, VariabilityError};

/// Which channels of each rigid body enter the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelSelection {
    /// Every channel, positions and rotations.
    All,
    /// Rotation triplets only (`3,4,5, 9,10,11, ...`).
    #[default]
    RotationOnly,
    /// Position triplets only (`0,1,2, 6,7,8, ...`).
    PositionOnly,
}

impl ChannelSelection {
    /// Build a selection from the analysis flags.
    ///
    /// `positions_only` is ignored when `include_positions` is set.
    #[must_use]
    pub const fn from_flags(include_positions: bool, positions_only: bool) -> Self {
        if include_positions {
            Self::All
        } else if positions_only {
            Self::PositionOnly
        } else {
            Self::RotationOnly
        }
    }

    /// Offset of the selected triplet inside each rigid body, or `None` for all channels.
    #[must_use]
    pub const fn group_offset(self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::RotationOnly => Some(TRIPLET),
            Self::PositionOnly => Some(0),
        }
    }

    /// Whether this selection restricts the channel axis.
    #[must_use]
    pub const fn is_subset(self) -> bool {
        self.group_offset().is_some()
    }

    /// Ordered channel indices for an axis of `channel_count` channels.
    ///
    /// # Errors
    ///
    /// Returns [`VariabilityError::InvalidShape`] if a subset is requested and
    /// `channel_count` is not a multiple of `dof_per_body`, and
    /// [`VariabilityError::InvalidConfig`] if a body cannot hold both triplets.
    pub fn indices(self, channel_count: usize, dof_per_body: usize) -> Result<Vec<usize>> {
        let Some(offset) = self.group_offset() else {
            return Ok((0..channel_count).collect());
        };

        if dof_per_body < 2 * TRIPLET {
            return Err(VariabilityError::invalid_config(format!(
                "dof_per_body must be at least {}",
                2 * TRIPLET
            )));
        }
        if channel_count % dof_per_body != 0 {
            return Err(VariabilityError::invalid_shape(format!(
                "channel axis of length {channel_count} is not a multiple of {dof_per_body}"
            )));
        }

        let indices = (offset..channel_count)
            .step_by(dof_per_body)
            .flat_map(|i| i..i + TRIPLET)
            .collect();
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_from_flags() {
        assert_eq!(ChannelSelection::from_flags(false, false), ChannelSelection::RotationOnly);
        assert_eq!(ChannelSelection::from_flags(false, true), ChannelSelection::PositionOnly);
        assert_eq!(ChannelSelection::from_flags(true, false), ChannelSelection::All);
        assert_eq!(ChannelSelection::from_flags(true, true), ChannelSelection::All);
    }

    #[test]
    fn test_rotation_indices() {
        let idx = ChannelSelection::RotationOnly.indices(114, 6).unwrap();
        assert_eq!(idx.len(), 57);
        assert_eq!(&idx[..6], &[3, 4, 5, 9, 10, 11]);
        assert_eq!(*idx.last().unwrap(), 113);
        assert!(idx.iter().all(|&i| i % 6 >= 3));
    }

    #[test]
    fn test_position_indices() {
        let idx = ChannelSelection::PositionOnly.indices(114, 6).unwrap();
        assert_eq!(idx.len(), 57);
        assert_eq!(&idx[..6], &[0, 1, 2, 6, 7, 8]);
        assert!(idx.iter().all(|&i| i % 6 < 3));
    }

    #[test]
    fn test_selections_partition_axis() {
        let rot: BTreeSet<usize> = ChannelSelection::RotationOnly
            .indices(114, 6)
            .unwrap()
            .into_iter()
            .collect();
        let pos: BTreeSet<usize> = ChannelSelection::PositionOnly
            .indices(114, 6)
            .unwrap()
            .into_iter()
            .collect();

        assert!(rot.is_disjoint(&pos));
        let union: Vec<usize> = rot.union(&pos).copied().collect();
        assert_eq!(union, ChannelSelection::All.indices(114, 6).unwrap());
    }

    #[test]
    fn test_ragged_axis_rejected() {
        let err = ChannelSelection::RotationOnly.indices(113, 6).unwrap_err();
        assert!(matches!(err, VariabilityError::InvalidShape { .. }));

        // The full selection does not care about grouping.
        assert_eq!(ChannelSelection::All.indices(113, 6).unwrap().len(), 113);
    }

    #[test]
    fn test_zero_group_size_rejected() {
        for selection in [ChannelSelection::RotationOnly, ChannelSelection::PositionOnly] {
            let err = selection.indices(114, 0).unwrap_err();
            assert!(matches!(err, VariabilityError::InvalidConfig(_)));
        }
    }
}
