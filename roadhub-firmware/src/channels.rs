//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use roadhub_protocol::{TouchSample, TransportEvent};

use crate::bridge::BridgeRequest;
use crate::display::StatusBar;

/// Channel capacity for touch samples from the panel
const TOUCH_CHANNEL_SIZE: usize = 8;

/// Channel capacity for session events from the bridge
const BRIDGE_EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for requests to the bridge
const BRIDGE_REQUEST_CHANNEL_SIZE: usize = 4;

/// Timestamped touch samples from the panel
pub static TOUCH_CHANNEL: Channel<CriticalSectionRawMutex, TouchSample, TOUCH_CHANNEL_SIZE> =
    Channel::new();

/// Session events from the bridge, drained by the link manager
pub static BRIDGE_EVENTS: Channel<CriticalSectionRawMutex, TransportEvent, BRIDGE_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Join/connect/send requests for the bridge TX task
pub static BRIDGE_REQUESTS: Channel<
    CriticalSectionRawMutex,
    BridgeRequest,
    BRIDGE_REQUEST_CHANNEL_SIZE,
> = Channel::new();

/// Network association as last reported by the bridge
pub static NETWORK_UP: AtomicBool = AtomicBool::new(false);

/// Signal that a page update is ready to be sent
pub static PAGE_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest status bar content, sent on its own
pub static STATUS_UPDATE: Signal<CriticalSectionRawMutex, StatusBar> = Signal::new();

/// Signal that a heartbeat (PING) was received from the panel
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Panel liveness for the controller (repaint after a panel restart)
pub static PANEL_SEEN: Signal<CriticalSectionRawMutex, ()> = Signal::new();
