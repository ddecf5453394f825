//! Shared configuration for the tower navigation engine.
//!
//! Plain values only: building dimensions, camera defaults, input thresholds
//! and the timings of the scripted room transitions. Runtime overrides come
//! from the tower manifest loaded by the engine.

/// Camera projection and smoothing defaults.
pub mod camera;

/// Gesture thresholds, cooldown and progress smoothing for scroll navigation.
pub mod navigation;

/// Building dimensions and floor layout defaults.
pub mod tower;

/// Choreography of the scripted room entry, exit and elevator moves.
pub mod transitions;
