use crate::engine::assets::tower_layout::TowerLayout;
use crate::engine::core::app_state::NavigationSet;
use crate::engine::input::input_aggregator::InputAggregator;
use crate::rooms::error::NavigationError;
use crate::rooms::events::{ExitRoomRequest, FloorChangeRequest, GoToFloorRequest};
use crate::rooms::room_manager::RoomManager;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .before(NavigationSet::Input),
            )
            .add_systems(
                Update,
                (
                    super::notifications::notify_room_events,
                    super::notifications::notify_progress,
                )
                    .in_set(NavigationSet::Notify)
                    .after(crate::rooms::systems::publish_room_notices),
            )
            .add_systems(
                Update,
                send_outgoing_messages.after(NavigationSet::Notify),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw JSON-RPC text from the page. Native hosts can write these directly.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Navigation state the request handlers read.
pub struct NavigationView<'a> {
    pub room: &'a RoomManager,
    pub layout: &'a TowerLayout,
    pub input: &'a InputAggregator,
}

/// Accepted request, forwarded as a bevy event once parsing is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    GoToFloor(isize),
    FloorChange(isize),
    Exit,
}

#[derive(SystemParam)]
struct NavigationWriters<'w> {
    go_to: EventWriter<'w, GoToFloorRequest>,
    floor_changes: EventWriter<'w, FloorChangeRequest>,
    exits: EventWriter<'w, ExitRoomRequest>,
}

impl NavigationWriters<'_> {
    fn dispatch(&mut self, command: NavigationCommand) {
        match command {
            NavigationCommand::GoToFloor(floor) => {
                self.go_to.write(GoToFloorRequest { floor });
            }
            NavigationCommand::FloorChange(floor) => {
                self.floor_changes.write(FloorChangeRequest { floor });
            }
            NavigationCommand::Exit => {
                self.exits.write(ExitRoomRequest);
            }
        }
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    room: Res<RoomManager>,
    layout: Res<TowerLayout>,
    input: Res<InputAggregator>,
    mut writers: NavigationWriters,
) {
    let view = NavigationView {
        room: &room,
        layout: &layout,
        input: &input,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut commands = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &view, &mut commands) {
                    rpc_interface.queue_response(response);
                }
                for command in commands {
                    writers.dispatch(command);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
/// Accepted navigation requests are pushed onto `commands`.
pub fn handle_rpc_request(
    request: &RpcRequest,
    view: &NavigationView,
    commands: &mut Vec<NavigationCommand>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "go_to_floor" => handle_go_to_floor(&request.params, view, commands),
        "request_floor_change" => handle_request_floor_change(&request.params, view, commands),
        "request_exit" => handle_request_exit(view, commands),
        "get_navigation_state" => Ok(navigation_state(view)),
        "get_floors" => Ok(floor_table(view.layout)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

#[derive(Deserialize)]
struct FloorParams {
    floor: i64,
}

fn parse_floor(params: &serde_json::Value) -> Result<isize, RpcError> {
    let parsed = serde_json::from_value::<FloorParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected integer 'floor' parameter"))?;
    Ok(parsed.floor.clamp(isize::MIN as i64, isize::MAX as i64) as isize)
}

fn handle_go_to_floor(
    params: &serde_json::Value,
    view: &NavigationView,
    commands: &mut Vec<NavigationCommand>,
) -> Result<serde_json::Value, RpcError> {
    let requested = parse_floor(params)?;
    let floor = view.room.check_go_to_floor(requested, view.layout)?;

    commands.push(NavigationCommand::GoToFloor(requested));
    info!("RPC go_to_floor {}", floor);

    Ok(serde_json::json!({
        "success": true,
        "floor": floor
    }))
}

fn handle_request_floor_change(
    params: &serde_json::Value,
    view: &NavigationView,
    commands: &mut Vec<NavigationCommand>,
) -> Result<serde_json::Value, RpcError> {
    let requested = parse_floor(params)?;
    let (from, to) = view.room.check_floor_change(requested, view.layout)?;

    commands.push(NavigationCommand::FloorChange(requested));
    info!("RPC elevator request {} -> {}", from, to);

    Ok(serde_json::json!({
        "success": true,
        "from": from,
        "floor": to
    }))
}

fn handle_request_exit(
    view: &NavigationView,
    commands: &mut Vec<NavigationCommand>,
) -> Result<serde_json::Value, RpcError> {
    view.room.check_exit()?;

    commands.push(NavigationCommand::Exit);
    info!("RPC exit request");

    Ok(serde_json::json!({ "success": true }))
}

fn navigation_state(view: &NavigationView) -> serde_json::Value {
    serde_json::json!({
        "state": view.room.state().as_str(),
        "progress": view.input.displayed_progress(),
        "floor": view.input.current_floor(),
        "target_floor": view.input.target_floor(),
        "active_floor": view.room.active_floor(),
        "can_change_floor": view.room.can_change_floor(),
        "can_exit": view.room.can_exit()
    })
}

fn floor_table(layout: &TowerLayout) -> serde_json::Value {
    let floors: Vec<serde_json::Value> = layout
        .floors()
        .iter()
        .enumerate()
        .map(|(index, floor)| {
            serde_json::json!({
                "index": index,
                "name": floor.name,
                "label": floor.label,
                "accent_color": floor.accent_color,
                "category": floor.category
            })
        })
        .collect();

    serde_json::json!({ "floors": floors })
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    /// Well-formed request the navigation state currently refuses.
    pub fn rejected(reason: &NavigationError) -> Self {
        Self {
            code: -32000,
            message: "Request rejected".to_string(),
            data: Some(serde_json::json!({ "reason": reason.to_string() })),
        }
    }
}

impl From<NavigationError> for RpcError {
    fn from(err: NavigationError) -> Self {
        debug!("Navigation request rejected: {}", err);
        Self::rejected(&err)
    }
}
