//! Server link lifecycle
//!
//! The [`LinkManager`] joins the network, opens the telemetry session, keeps
//! the metrics cadence while the session is up and falls back to local
//! simulation while it is down. It never blocks: every retry is gated on
//! elapsed time and driven by [`LinkManager::poll`].

pub mod manager;
pub mod state;

pub use manager::{LinkManager, MAX_EVENTS_PER_POLL};
pub use state::{LinkNote, LinkReport, LinkState, LinkStatus};
