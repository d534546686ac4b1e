//! Board-agnostic control logic for the RoadHub touch console
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Screen set and the navigation state machine
//! - Touch gesture recognition
//! - Bounded notification queue with expiry
//! - Telemetry snapshot with sparse remote merge and local simulation
//! - Link lifecycle (network join, session, request cadence, retry)
//! - Collaborator traits (renderer, transport, network interface)
//! - Configuration types and the `hub.toml` parser
//! - The [`Hub`] context that ties everything into one control loop

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod format;
pub mod gesture;
pub mod hub;
pub mod link;
pub mod notify;
pub mod screen;
pub mod telemetry;
pub mod traits;

pub use hub::Hub;
