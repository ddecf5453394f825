//! Tower manifest loading.
//!
//! The manifest is requested at startup; once it resolves (or fails) the
//! navigation resources are rebuilt from the resulting layout and the app
//! moves to `Running`.

/// Manifest handle tracking, validation and layout installation.
pub mod manifest_loader;
