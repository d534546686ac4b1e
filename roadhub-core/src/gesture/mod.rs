//! Touch gesture recognition
//!
//! Turns the raw sample stream from the panel into navigation events.

pub mod recognizer;

pub use recognizer::{GestureRecognizer, GestureState};
