//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, the per-frame
//! navigation ordering and plugin initialisation for both native and WASM
//! targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app and the headless-capable navigation plugin.
pub mod app_setup;

/// Application states and the chained navigation system sets.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
