//! RoadHub link protocols
//!
//! The hub controller talks to two peripheral MCUs over UART:
//!
//! - the **panel** (touch controller + TFT), a dumb terminal that reports
//!   touch samples and draws whatever the hub tells it to;
//! - the **network bridge**, which owns the radio, joins the network and
//!   keeps a WebSocket session to the metrics server.
//!
//! Both links share the same binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Text carried by the bridge (WebSocket frames) is JSON; [`telemetry`]
//! decodes the sparse metrics updates and holds the fixed control payloads.

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod frame;
pub mod panel;
pub mod telemetry;
pub mod touch;

pub use bridge::{BridgeCommand, BridgeEvent, TextPayload, TransportEvent};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use panel::{PanelCommand, PanelMessage};
pub use telemetry::{decode_update, DecodeError, TelemetryUpdate};
pub use touch::{TouchReport, TouchSample};
