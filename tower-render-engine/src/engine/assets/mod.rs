//! Tower description assets.
//!
//! The manifest is loaded from JSON at startup and turned into a
//! [`tower_layout::TowerLayout`] resource that the navigation core, the
//! stand-in scene and the UI bridge all read from.

/// Runtime tower layout: floor table, dimensions and derived heights.
pub mod tower_layout;

/// JSON manifest asset with per-floor metadata and dimension overrides.
pub mod tower_manifest;
