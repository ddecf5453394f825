//! Stand-in tower scene and the pick volumes used for room entry.

/// Placeholder floor slabs and hit target spawning.
pub mod building;
