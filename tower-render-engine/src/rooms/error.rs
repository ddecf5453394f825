use super::room_manager::RoomState;
use crate::engine::assets::tower_layout::FloorIndex;
use thiserror::Error;

/// Why a navigation request was turned down. These never abort anything:
/// callers log them and carry on in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("request needs an open room, current state is {state:?}")]
    NotInside { state: RoomState },
    #[error("request needs free exploration, current state is {state:?}")]
    NotExploring { state: RoomState },
    #[error("a camera transition is already running")]
    TransitionInFlight,
    #[error("already on floor {floor}")]
    SameFloor { floor: FloorIndex },
    #[error("floor {floor} does not exist in this tower")]
    UnknownFloor { floor: FloorIndex },
}
