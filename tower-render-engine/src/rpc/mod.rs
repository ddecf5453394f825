//! JSON-RPC 2.0 communication layer between the tower engine and its host page.
//!
//! Implements bidirectional messaging between the Bevy engine running in an
//! iframe and the surrounding page via postMessage, supporting both
//! request-response and notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Page (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Validate against room state
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Accepted navigation requests become the same bevy events native code uses
//! (`GoToFloorRequest`, `FloorChangeRequest`, `ExitRoomRequest`), so the page
//! and the engine share one code path.
//!
//! ## Methods
//!
//! - `go_to_floor {floor}`: scroll to a floor while exploring (clamped)
//! - `request_floor_change {floor}`: elevator ride while a room is open
//! - `request_exit {}`: leave the open room
//! - `get_navigation_state {}`: state, progress, current and active floor
//! - `get_floors {}`: floor table from the manifest
//!
//! ## Notifications
//!
//! - `room_entered`, `room_exited`, `active_floor_changed`
//! - `floor_highlight_changed` when the nearest floor to the progress changes
//! - `progress_update`, throttled
//! - `hover_changed` while the pointer moves over floor volumes
//!
//! ## Error Handling
//!
//! - `-32000`: Request rejected by the current navigation state
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Engine to page notifications derived from navigation events.
pub mod notifications;

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
