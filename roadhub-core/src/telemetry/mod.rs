//! Displayed metrics
//!
//! [`TelemetryStore`] holds the one snapshot every screen reads from. It is
//! fed by sparse remote updates while the server session is up and by a
//! local simulator otherwise.

pub mod snapshot;
pub mod store;

pub use snapshot::{percent_from_f32, TelemetrySnapshot};
pub use store::TelemetryStore;
