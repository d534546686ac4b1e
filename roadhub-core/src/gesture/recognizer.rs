//! Debounced tap and swipe detection

use roadhub_protocol::TouchSample;

use crate::config::GestureConfig;
use crate::screen::{NavigationEvent, Screen};

/// Recognizer memory between samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureState {
    /// Timestamp of the last accepted press sample
    pub last_accepted_ms: Option<u32>,
    /// Where the current swipe started
    pub origin_x: u16,
    pub origin_y: u16,
    /// A press outside the navigation bar is being tracked
    pub swipe_active: bool,
}

/// Converts touch samples into [`NavigationEvent`]s
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    state: GestureState,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::default(),
        }
    }

    /// Current recognizer memory
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Feed one sample
    ///
    /// Press samples closer than `debounce_ms` to the last accepted one are
    /// dropped. Release samples bypass the debounce so a quick flick still
    /// completes, and they leave the debounce reference where it was.
    pub fn on_sample(&mut self, sample: TouchSample) -> Option<NavigationEvent> {
        if sample.pressed {
            self.on_press(sample)
        } else {
            self.on_release(sample)
        }
    }

    fn on_press(&mut self, sample: TouchSample) -> Option<NavigationEvent> {
        if let Some(last) = self.state.last_accepted_ms {
            if sample.timestamp_ms.wrapping_sub(last) < self.config.debounce_ms {
                return None;
            }
        }
        self.state.last_accepted_ms = Some(sample.timestamp_ms);

        if sample.y >= self.config.navbar_top_px {
            let index = sample.x / self.config.nav_button_width_px.max(1);
            return u8::try_from(index)
                .ok()
                .and_then(Screen::from_index)
                .map(|screen| NavigationEvent::TapButton(screen.index()));
        }

        if !self.state.swipe_active {
            self.state.origin_x = sample.x;
            self.state.origin_y = sample.y;
            self.state.swipe_active = true;
        }
        None
    }

    fn on_release(&mut self, sample: TouchSample) -> Option<NavigationEvent> {
        if !self.state.swipe_active {
            return None;
        }
        self.state.swipe_active = false;

        let dx = i32::from(sample.x) - i32::from(self.state.origin_x);
        let dy = i32::from(sample.y) - i32::from(self.state.origin_y);
        let (adx, ady) = (dx.unsigned_abs(), dy.unsigned_abs());

        if adx > u32::from(self.config.swipe_threshold_px) && adx > ady {
            if dx > 0 {
                Some(NavigationEvent::SwipeRight)
            } else {
                Some(NavigationEvent::SwipeLeft)
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::new(GestureConfig::default())
    }

    fn swipe(r: &mut GestureRecognizer, from: (u16, u16), to: (u16, u16)) -> Option<NavigationEvent> {
        assert_eq!(r.on_sample(TouchSample::press(from.0, from.1, 1000)), None);
        r.on_sample(TouchSample::release(to.0, to.1, 1100))
    }

    #[test]
    fn test_swipe_directions() {
        let mut r = recognizer();
        assert_eq!(
            swipe(&mut r, (50, 150), (200, 160)),
            Some(NavigationEvent::SwipeRight)
        );

        let mut r = recognizer();
        assert_eq!(
            swipe(&mut r, (200, 150), (50, 140)),
            Some(NavigationEvent::SwipeLeft)
        );
    }

    #[test]
    fn test_swipe_threshold_is_strict() {
        let mut r = recognizer();
        assert_eq!(swipe(&mut r, (100, 150), (180, 150)), None);

        let mut r = recognizer();
        assert_eq!(
            swipe(&mut r, (100, 150), (181, 150)),
            Some(NavigationEvent::SwipeRight)
        );
    }

    #[test]
    fn test_diagonal_is_not_a_swipe() {
        let mut r = recognizer();
        assert_eq!(swipe(&mut r, (100, 50), (200, 150)), None);
        assert!(!r.state().swipe_active);
    }

    #[test]
    fn test_swipe_from_origin_corner() {
        let mut r = recognizer();
        assert_eq!(
            swipe(&mut r, (0, 0), (120, 10)),
            Some(NavigationEvent::SwipeRight)
        );
    }

    #[test]
    fn test_navbar_tap() {
        let mut r = recognizer();
        assert_eq!(
            r.on_sample(TouchSample::press(125, 300, 0)),
            Some(NavigationEvent::TapButton(3))
        );
        assert!(!r.state().swipe_active);
        assert_eq!(r.on_sample(TouchSample::release(125, 300, 50)), None);
    }

    #[test]
    fn test_navbar_tap_beyond_last_button() {
        let mut r = recognizer();
        assert_eq!(
            r.on_sample(TouchSample::press(239, 300, 0)),
            Some(NavigationEvent::TapButton(5))
        );
        assert_eq!(r.on_sample(TouchSample::press(240, 300, 250)), None);
        assert_eq!(r.on_sample(TouchSample::press(400, 300, 500)), None);
    }

    #[test]
    fn test_press_debounce() {
        let mut r = recognizer();
        assert_eq!(
            r.on_sample(TouchSample::press(10, 300, 1000)),
            Some(NavigationEvent::TapButton(0))
        );
        // Inside the window: ignored
        assert_eq!(r.on_sample(TouchSample::press(90, 300, 1150)), None);
        // Window measured from the accepted sample, not the ignored one
        assert_eq!(
            r.on_sample(TouchSample::press(90, 300, 1200)),
            Some(NavigationEvent::TapButton(2))
        );
    }

    #[test]
    fn test_release_not_debounced() {
        let mut r = recognizer();
        r.on_sample(TouchSample::press(20, 100, 5000));
        assert_eq!(
            r.on_sample(TouchSample::release(200, 100, 5050)),
            Some(NavigationEvent::SwipeRight)
        );
        // The release did not move the debounce reference
        assert_eq!(
            r.on_sample(TouchSample::press(10, 300, 5200)),
            Some(NavigationEvent::TapButton(0))
        );
    }

    #[test]
    fn test_origin_kept_while_dragging() {
        let mut r = recognizer();
        r.on_sample(TouchSample::press(220, 100, 0));
        r.on_sample(TouchSample::press(150, 100, 300));
        r.on_sample(TouchSample::press(100, 100, 600));
        assert_eq!(r.state().origin_x, 220);
        assert_eq!(
            r.on_sample(TouchSample::release(100, 100, 700)),
            Some(NavigationEvent::SwipeLeft)
        );
    }

    #[test]
    fn test_release_without_press() {
        let mut r = recognizer();
        assert_eq!(r.on_sample(TouchSample::release(0, 0, 0)), None);
    }

    #[test]
    fn test_debounce_across_timer_wrap() {
        let mut r = recognizer();
        r.on_sample(TouchSample::press(10, 300, u32::MAX - 50));
        assert_eq!(r.on_sample(TouchSample::press(10, 300, 100)), None);
        assert_eq!(
            r.on_sample(TouchSample::press(10, 300, 200)),
            Some(NavigationEvent::TapButton(0))
        );
    }
}
