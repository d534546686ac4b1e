//! Screen navigation state machine
//!
//! Owns the active screen. Every accepted transition records the screen it
//! left and marks the controller dirty so the renderer repaints the header,
//! body and navigation bar. A transition to the screen already showing is a
//! no-op and never asks for a redraw.

use super::catalog::Screen;
use super::events::NavigationEvent;

/// Outcome of applying a navigation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Active screen after the event
    pub screen: Screen,
    /// Whether the active screen changed
    pub changed: bool,
}

/// Finite-state machine over [`Screen`]
#[derive(Debug, Clone)]
pub struct ScreenController {
    current: Screen,
    previous: Screen,
    dirty: bool,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenController {
    /// Start on the home screen with a redraw pending
    pub const fn new() -> Self {
        Self {
            current: Screen::Home,
            previous: Screen::Home,
            dirty: true,
        }
    }

    /// Currently active screen
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Screen shown before the last accepted transition
    pub fn previous(&self) -> Screen {
        self.previous
    }

    /// Target screen for an event, before filtering no-ops
    fn target(&self, event: NavigationEvent) -> Option<Screen> {
        match event {
            NavigationEvent::TapButton(index) => Screen::from_index(index),
            NavigationEvent::SwipeLeft => Some(self.current.next()),
            NavigationEvent::SwipeRight => Some(self.current.previous()),
        }
    }

    /// Process an event and return the resulting screen
    ///
    /// Out-of-range taps and taps on the active screen leave everything as
    /// it was.
    pub fn apply(&mut self, event: NavigationEvent) -> Transition {
        match self.target(event) {
            Some(next) if next != self.current => {
                self.previous = self.current;
                self.current = next;
                self.dirty = true;
                Transition {
                    screen: next,
                    changed: true,
                }
            }
            _ => Transition {
                screen: self.current,
                changed: false,
            },
        }
    }

    /// Check if the screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Force a full redraw (e.g. after the panel reconnects)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let controller = ScreenController::new();
        assert_eq!(controller.current(), Screen::Home);
        assert!(controller.is_dirty());
    }

    #[test]
    fn test_tap_switches_screen() {
        let mut controller = ScreenController::new();
        controller.take_dirty();

        let t = controller.apply(NavigationEvent::TapButton(3));
        assert_eq!(
            t,
            Transition {
                screen: Screen::Finance,
                changed: true
            }
        );
        assert_eq!(controller.previous(), Screen::Home);
        assert!(controller.take_dirty());
        assert!(!controller.is_dirty());
    }

    #[test]
    fn test_tap_same_screen_is_noop() {
        let mut controller = ScreenController::new();
        controller.take_dirty();

        let t = controller.apply(NavigationEvent::TapButton(0));
        assert!(!t.changed);
        assert_eq!(t.screen, Screen::Home);
        assert!(!controller.is_dirty());
    }

    #[test]
    fn test_tap_out_of_range_is_noop() {
        let mut controller = ScreenController::new();
        controller.apply(NavigationEvent::TapButton(2));
        controller.take_dirty();

        let t = controller.apply(NavigationEvent::TapButton(6));
        assert!(!t.changed);
        assert_eq!(controller.current(), Screen::Ai);
        assert_eq!(controller.previous(), Screen::Home);
        assert!(!controller.is_dirty());
    }

    #[test]
    fn test_swipes_wrap_around() {
        let mut controller = ScreenController::new();

        let t = controller.apply(NavigationEvent::SwipeRight);
        assert_eq!(t.screen, Screen::Settings);

        let t = controller.apply(NavigationEvent::SwipeLeft);
        assert_eq!(t.screen, Screen::Home);
        assert_eq!(controller.previous(), Screen::Settings);
    }

    #[test]
    fn test_swipe_left_full_cycle() {
        let mut controller = ScreenController::new();
        for _ in 0..Screen::COUNT {
            assert!(controller.apply(NavigationEvent::SwipeLeft).changed);
        }
        assert_eq!(controller.current(), Screen::Home);
    }

    #[test]
    fn test_swipe_inverse_from_every_screen() {
        for screen in Screen::ALL {
            let mut controller = ScreenController::new();
            controller.apply(NavigationEvent::TapButton(screen.index()));

            controller.apply(NavigationEvent::SwipeLeft);
            controller.apply(NavigationEvent::SwipeRight);
            assert_eq!(controller.current(), screen);
        }
    }
}
