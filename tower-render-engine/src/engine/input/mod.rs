//! Scroll navigation input.
//!
//! Device readers translate wheel, touch and mouse events into deltas for the
//! aggregator, which owns the discrete floor target and the eased progress.

/// Floor target, cooldown and progress easing.
pub mod input_aggregator;

/// Per-device accumulator and threshold.
pub mod input_channel;

/// Wheel, touch and mouse readers plus tap detection.
pub mod pointer;
