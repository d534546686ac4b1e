//! Events that trigger screen transitions

/// Navigation events produced by the gesture recognizer
///
/// Ephemeral: produced and consumed within one control-loop step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    /// Navigation bar button tapped (button index, left to right)
    TapButton(u8),
    /// Finger moved right-to-left: advance to the next screen
    SwipeLeft,
    /// Finger moved left-to-right: go back to the previous screen
    SwipeRight,
}

impl NavigationEvent {
    /// Check if this event came from a swipe
    pub fn is_swipe(&self) -> bool {
        matches!(self, NavigationEvent::SwipeLeft | NavigationEvent::SwipeRight)
    }

    /// Check if this event came from the navigation bar
    pub fn is_tap(&self) -> bool {
        matches!(self, NavigationEvent::TapButton(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kinds() {
        assert!(NavigationEvent::SwipeLeft.is_swipe());
        assert!(NavigationEvent::SwipeRight.is_swipe());
        assert!(!NavigationEvent::TapButton(2).is_swipe());
        assert!(NavigationEvent::TapButton(0).is_tap());
        assert!(!NavigationEvent::SwipeLeft.is_tap());
    }
}
