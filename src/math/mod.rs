//! Numerical kernels for variability analysis.
//!
//! This module provides:
//! - [`difference`]: central-difference time derivative with one-sided edges
//! - [`rms`]: root-mean-square reduction over the time axis

pub mod difference;
pub mod rms;

pub use difference::{central_difference, DerivativeSeries};
pub use rms::rms_over_time;
