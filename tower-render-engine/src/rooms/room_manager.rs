use super::camera_script::{CameraScript, ScriptKind};
use super::error::NavigationError;
use super::transitions::{floor_transition_script, room_entry_script, room_exit_script};
use crate::engine::assets::tower_layout::{FloorIndex, TowerLayout};
use crate::engine::camera::camera_pose::CameraPose;
use crate::engine::camera::camera_rig::{CameraRig, SavedCameraState};
use crate::engine::input::input_aggregator::InputAggregator;
use crate::engine::scene::hit_test::{HitTarget, nearest_hit};
use bevy::prelude::*;
use constants::camera::CAMERA_FOV_DEGREES;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoomState {
    #[default]
    Exploring,
    Approaching,
    Inside,
    Exiting,
}

impl RoomState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exploring => "EXPLORING",
            Self::Approaching => "APPROACHING",
            Self::Inside => "INSIDE",
            Self::Exiting => "EXITING",
        }
    }
}

/// Outgoing notifications, drained once per frame into bevy events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomNotice {
    Entered(FloorIndex),
    Exited,
    ActiveFloorChanged(FloorIndex),
}

/// Exploration scroll plus camera follower, the two systems a room visit
/// suspends.
pub struct Explorer<'a> {
    pub rig: &'a mut CameraRig,
    pub input: &'a mut InputAggregator,
}

impl Explorer<'_> {
    fn suspend(&mut self) {
        self.rig.disable();
        self.input.disable();
    }

    fn resume(&mut self) {
        self.rig.enable();
        self.input.enable();
    }
}

/// Room visit state machine.
///
/// Owns the camera whenever it is not exploring: entering saves and
/// suspends the follower and the scroll input, plays the entry script and
/// only hands control back once the exit script has reported completion.
#[derive(Resource, Debug, Default)]
pub struct RoomManager {
    state: RoomState,
    active_floor: Option<FloorIndex>,
    pending_floor: Option<FloorIndex>,
    saved_camera: Option<SavedCameraState>,
    pre_entry_position: Option<Vec3>,
    script: Option<CameraScript>,
    notices: Vec<RoomNotice>,
}

impl RoomManager {
    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn active_floor(&self) -> Option<FloorIndex> {
        self.active_floor
    }

    pub fn is_exploring(&self) -> bool {
        self.state == RoomState::Exploring
    }

    pub fn is_inside(&self) -> bool {
        self.state == RoomState::Inside
    }

    /// True while an elevator ride is running.
    pub fn is_transitioning(&self) -> bool {
        self.pending_floor.is_some()
    }

    pub fn script(&self) -> Option<&CameraScript> {
        self.script.as_ref()
    }

    pub fn can_change_floor(&self) -> bool {
        self.is_inside() && !self.is_transitioning()
    }

    pub fn can_exit(&self) -> bool {
        self.can_change_floor()
    }

    /// Validate a floor link without applying it.
    pub fn check_go_to_floor(
        &self,
        floor: isize,
        layout: &TowerLayout,
    ) -> Result<FloorIndex, NavigationError> {
        if !self.is_exploring() {
            return Err(NavigationError::NotExploring { state: self.state });
        }
        Ok(layout.clamp_floor(floor))
    }

    /// Validate an elevator request. Returns the `(from, to)` floors.
    pub fn check_floor_change(
        &self,
        floor: isize,
        layout: &TowerLayout,
    ) -> Result<(FloorIndex, FloorIndex), NavigationError> {
        if !self.is_inside() {
            return Err(NavigationError::NotInside { state: self.state });
        }
        if self.is_transitioning() {
            return Err(NavigationError::TransitionInFlight);
        }

        let to = layout.clamp_floor(floor);
        let Some(from) = self.active_floor else {
            return Err(NavigationError::NotInside { state: self.state });
        };
        if from == to {
            return Err(NavigationError::SameFloor { floor: to });
        }
        Ok((from, to))
    }

    pub fn check_exit(&self) -> Result<(), NavigationError> {
        if !self.is_inside() {
            return Err(NavigationError::NotInside { state: self.state });
        }
        if self.is_transitioning() {
            return Err(NavigationError::TransitionInFlight);
        }
        Ok(())
    }

    /// Ray-test the floor volumes and enter whatever is hit first. A miss
    /// is `Ok(None)`.
    pub fn handle_pick<'a>(
        &mut self,
        ray: Ray3d,
        targets: impl IntoIterator<Item = (&'a HitTarget, &'a GlobalTransform)>,
        layout: &TowerLayout,
        explorer: Explorer<'_>,
        pose: &CameraPose,
    ) -> Result<Option<FloorIndex>, NavigationError> {
        if !self.is_exploring() {
            return Err(NavigationError::NotExploring { state: self.state });
        }

        let Some(hit) = nearest_hit(ray, targets) else {
            return Ok(None);
        };
        self.enter_room(hit.floor, layout, explorer, pose)?;
        Ok(Some(hit.floor))
    }

    pub fn enter_room(
        &mut self,
        floor: FloorIndex,
        layout: &TowerLayout,
        mut explorer: Explorer<'_>,
        pose: &CameraPose,
    ) -> Result<(), NavigationError> {
        if !self.is_exploring() {
            return Err(NavigationError::NotExploring { state: self.state });
        }
        if !layout.contains(floor) {
            return Err(NavigationError::UnknownFloor { floor });
        }

        self.saved_camera = Some(explorer.rig.save_state(pose));
        self.pre_entry_position = Some(pose.position);
        explorer.suspend();

        self.script = Some(room_entry_script(layout, floor));
        self.active_floor = Some(floor);
        self.state = RoomState::Approaching;
        info!("EXPLORING -> APPROACHING floor {}", floor);
        Ok(())
    }

    /// Scroll the exploration camera to a floor, e.g. from a navigation link.
    /// Only honoured while exploring; out-of-range floors clamp.
    pub fn go_to_floor(
        &self,
        floor: isize,
        layout: &TowerLayout,
        input: &mut InputAggregator,
    ) -> Result<FloorIndex, NavigationError> {
        let floor = self.check_go_to_floor(floor, layout)?;
        input.set_progress_directly(layout.progress_for_floor(floor));
        info!("Navigating to floor {}", floor);
        Ok(floor)
    }

    /// Elevator ride to another room. Out-of-range floors clamp.
    pub fn request_floor_change(
        &mut self,
        floor: isize,
        layout: &TowerLayout,
        pose: &CameraPose,
    ) -> Result<FloorIndex, NavigationError> {
        let (from, to) = self.check_floor_change(floor, layout)?;

        self.script = Some(floor_transition_script(layout, from, to, pose.position));
        self.pending_floor = Some(to);
        info!("Elevator {} -> {}", from, to);
        Ok(to)
    }

    /// Leave the room. Without a stored pre-entry position the exit
    /// completes on the spot.
    pub fn request_exit(&mut self, explorer: Explorer<'_>) -> Result<(), NavigationError> {
        self.check_exit()?;

        self.state = RoomState::Exiting;
        self.notices.push(RoomNotice::Exited);
        info!("INSIDE -> EXITING");

        match self.pre_entry_position {
            Some(position) => {
                let fov = self
                    .saved_camera
                    .map_or(CAMERA_FOV_DEGREES, |saved| saved.fov_degrees);
                self.script = Some(room_exit_script(position, fov));
            }
            None => {
                warn!("Exit requested without a stored entry pose, resuming exploration");
                self.finish_exit(explorer);
            }
        }
        Ok(())
    }

    /// Step the running script. Returns its kind on the tick it finishes.
    pub fn advance_script(&mut self, dt: f32, pose: &mut CameraPose) -> Option<ScriptKind> {
        let script = self.script.as_mut()?;
        if !script.advance(dt, pose) {
            return None;
        }
        let kind = script.kind;
        self.script = None;
        Some(kind)
    }

    /// Apply the transition that a finished script completes.
    pub fn on_script_finished(&mut self, kind: ScriptKind, explorer: Explorer<'_>) {
        match (kind, self.state) {
            (ScriptKind::RoomEntry, RoomState::Approaching) => {
                self.state = RoomState::Inside;
                if let Some(floor) = self.active_floor {
                    self.notices.push(RoomNotice::Entered(floor));
                    info!("APPROACHING -> INSIDE floor {}", floor);
                }
            }
            (ScriptKind::FloorTransition, RoomState::Inside) => {
                if let Some(floor) = self.pending_floor.take() {
                    self.active_floor = Some(floor);
                    self.notices.push(RoomNotice::ActiveFloorChanged(floor));
                    info!("Elevator arrived at floor {}", floor);
                }
            }
            (ScriptKind::RoomExit, RoomState::Exiting) => self.finish_exit(explorer),
            (kind, state) => {
                warn!("Ignoring stale {:?} completion in state {:?}", kind, state);
            }
        }
    }

    /// Convenience for driving the machine without an ECS schedule.
    pub fn tick(
        &mut self,
        dt: f32,
        pose: &mut CameraPose,
        explorer: Explorer<'_>,
    ) -> Option<ScriptKind> {
        let kind = self.advance_script(dt, pose)?;
        self.on_script_finished(kind, explorer);
        Some(kind)
    }

    pub fn drain_notices(&mut self) -> Vec<RoomNotice> {
        std::mem::take(&mut self.notices)
    }

    fn finish_exit(&mut self, mut explorer: Explorer<'_>) {
        if let Some(saved) = self.saved_camera.take() {
            explorer.rig.restore_state(&saved);
        }
        self.pre_entry_position = None;
        self.active_floor = None;
        self.pending_floor = None;
        self.script = None;
        self.state = RoomState::Exploring;
        explorer.resume();
        info!("EXITING -> EXPLORING");
    }
}
