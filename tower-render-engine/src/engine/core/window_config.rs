use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Tower".into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            // The page scrolls nothing itself; wheel and touch belong to the tower.
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Tower".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
