use super::web_rpc::WebRpcInterface;
use crate::engine::assets::tower_layout::{FloorIndex, TowerLayout};
use crate::engine::camera::spiral_path::SpiralPath;
use crate::engine::input::input_aggregator::InputAggregator;
use crate::rooms::events::{ActiveFloorChanged, HoverChanged, RoomEntered, RoomExited};
use bevy::prelude::*;
use constants::navigation::PROGRESS_NOTIFY_INTERVAL_SECS;

/// Rate limiter for `progress_update`. Sends at most once per interval and
/// only when the value moved since the last send.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressThrottle {
    last_sent: Option<(f32, f32)>,
}

impl ProgressThrottle {
    pub fn should_send(&mut self, now: f32, progress: f32) -> bool {
        let due = match self.last_sent {
            None => true,
            Some((sent_at, sent_progress)) => {
                now - sent_at >= PROGRESS_NOTIFY_INTERVAL_SECS
                    && (progress - sent_progress).abs() > f32::EPSILON
            }
        };
        if due {
            self.last_sent = Some((now, progress));
        }
        due
    }
}

fn floor_payload(layout: &TowerLayout, floor: FloorIndex) -> serde_json::Value {
    match layout.floor(floor) {
        Some(info) => serde_json::json!({
            "floor": floor,
            "name": info.name,
            "label": info.label,
            "accent_color": info.accent_color
        }),
        None => serde_json::json!({ "floor": floor }),
    }
}

/// Forward room state machine events to the page.
pub fn notify_room_events(
    layout: Res<TowerLayout>,
    mut entered: EventReader<RoomEntered>,
    mut exited: EventReader<RoomExited>,
    mut floor_changed: EventReader<ActiveFloorChanged>,
    mut hover: EventReader<HoverChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in entered.read() {
        rpc_interface.send_notification("room_entered", floor_payload(&layout, event.floor));
    }
    for _ in exited.read() {
        rpc_interface.send_notification("room_exited", serde_json::json!({}));
    }
    for event in floor_changed.read() {
        rpc_interface.send_notification(
            "active_floor_changed",
            floor_payload(&layout, event.floor),
        );
    }
    for event in hover.read() {
        rpc_interface.send_notification("hover_changed", serde_json::json!({ "floor": event.floor }));
    }
}

/// Throttled scroll progress plus the highlighted floor whenever it changes.
pub fn notify_progress(
    time: Res<Time>,
    input: Res<InputAggregator>,
    path: Res<SpiralPath>,
    layout: Res<TowerLayout>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut throttle: Local<ProgressThrottle>,
    mut highlighted: Local<Option<FloorIndex>>,
) {
    let progress = input.displayed_progress();

    if throttle.should_send(time.elapsed_secs(), progress) {
        rpc_interface.send_notification("progress_update", serde_json::json!({ "progress": progress }));
    }

    let floor = path.floor_at_progress(progress);
    if *highlighted != Some(floor) {
        *highlighted = Some(floor);
        rpc_interface.send_notification("floor_highlight_changed", floor_payload(&layout, floor));
    }
}
