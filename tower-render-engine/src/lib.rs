//! Scroll-driven tower navigation.
//!
//! A camera orbits a building on a helical path driven by wheel, touch and
//! drag gestures that step between floors. Clicking a floor plays a scripted
//! move into that room; an elevator moves between rooms and an exit plays the
//! camera back out to where exploration left off.

pub mod engine;
pub mod rooms;
pub mod rpc;

pub use engine::core::app_setup::{NavigationPlugin, create_app};
