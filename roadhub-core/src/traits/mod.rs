//! Collaborator traits
//!
//! These traits define the interface between the control logic and the
//! devices it drives. The firmware implements them over its UART links;
//! tests implement them with in-memory mocks.

pub mod network;
pub mod renderer;
pub mod transport;

pub use network::NetworkInterface;
pub use renderer::Renderer;
pub use transport::{Transport, TransportError};
