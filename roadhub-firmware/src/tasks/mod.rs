//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod bridge_rx;
pub mod bridge_tx;
pub mod controller;
pub mod panel_rx;
pub mod panel_tx;
pub mod tick;

pub use bridge_rx::bridge_rx_task;
pub use bridge_tx::bridge_tx_task;
pub use controller::controller_task;
pub use panel_rx::panel_rx_task;
pub use panel_tx::panel_tx_task;
pub use tick::tick_task;
