//! Touch panel communication
//!
//! Handles UART communication with the panel MCU.
//!
//! The panel acts as a "dumb terminal" - it reports touch samples and draws
//! what it is told. Layout decisions for the body text, notification
//! banners and the status bar are made here on the hub.
//!
//! # Protocol Overview
//!
//! Communication uses the shared frame format over UART at 115200 baud:
//! - Panel → Hub: touch reports, heartbeats
//! - Hub → Panel: page commands (clear, header, text rows, notices, navbar),
//!   status bar, heartbeat responses
//!
//! The panel sends periodic PING messages and expects a PONG back.

pub mod protocol;
pub mod renderer;

pub use renderer::{Page, PanelRenderer, StatusBar};
