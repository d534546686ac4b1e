//! Screens and navigation
//!
//! The console shows exactly one of a fixed, ordered set of screens. The
//! controller is explicit, finite, and deterministic: the active screen is
//! a function of the previous screen and a navigation event.

pub mod catalog;
pub mod controller;
pub mod events;

pub use catalog::{Screen, ScreenInfo, StudioEntry, STUDIOS};
pub use controller::{ScreenController, Transition};
pub use events::NavigationEvent;
