use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Per-frame navigation stages, chained in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSet {
    /// Raw wheel, touch, mouse and keyboard input.
    Input,
    /// Picks and page requests reach the room state machine.
    Interaction,
    /// Scroll progress easing.
    Progress,
    Shake,
    /// Path follower writes the pose while exploring.
    Camera,
    /// Scripted transition writes the pose while a room move runs.
    Script,
    /// Pose reaches the bevy camera.
    Apply,
    /// Outgoing notifications.
    Notify,
}
