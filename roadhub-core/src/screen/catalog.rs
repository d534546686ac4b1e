//! The closed set of screens and their static metadata

use crate::color::Rgb565;

/// Screens, in navigation-bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// System overview
    #[default]
    Home,
    /// Project dashboard
    Projects,
    /// Agent status
    Ai,
    /// RoadCoin and portfolio
    Finance,
    /// Creator studios
    Studio,
    /// Device and link settings
    Settings,
}

/// Static per-screen metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    /// Header title
    pub title: &'static str,
    /// Navigation bar label (fits a 40 px button)
    pub nav_label: &'static str,
    /// Accent used for the header and highlighted nav button
    pub accent: Rgb565,
}

impl Screen {
    /// Number of screens
    pub const COUNT: usize = 6;

    /// All screens in order
    pub const ALL: [Screen; Self::COUNT] = [
        Screen::Home,
        Screen::Projects,
        Screen::Ai,
        Screen::Finance,
        Screen::Studio,
        Screen::Settings,
    ];

    /// Position in navigation order
    pub const fn index(self) -> u8 {
        match self {
            Screen::Home => 0,
            Screen::Projects => 1,
            Screen::Ai => 2,
            Screen::Finance => 3,
            Screen::Studio => 4,
            Screen::Settings => 5,
        }
    }

    /// Screen at a navigation position, if any
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Screen::Home),
            1 => Some(Screen::Projects),
            2 => Some(Screen::Ai),
            3 => Some(Screen::Finance),
            4 => Some(Screen::Studio),
            5 => Some(Screen::Settings),
            _ => None,
        }
    }

    /// Next screen in cyclic order
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % Self::COUNT]
    }

    /// Previous screen in cyclic order
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() as usize + Self::COUNT - 1) % Self::COUNT]
    }

    /// Static metadata for this screen
    pub const fn info(self) -> ScreenInfo {
        match self {
            Screen::Home => ScreenInfo {
                title: "HOME",
                nav_label: "Home",
                accent: Rgb565::HOT_PINK,
            },
            Screen::Projects => ScreenInfo {
                title: "PROJECTS",
                nav_label: "Proj",
                accent: Rgb565::ELECTRIC_BLUE,
            },
            Screen::Ai => ScreenInfo {
                title: "AI",
                nav_label: "AI",
                accent: Rgb565::VIOLET,
            },
            Screen::Finance => ScreenInfo {
                title: "FINANCE",
                nav_label: "Fin",
                accent: Rgb565::AMBER,
            },
            Screen::Studio => ScreenInfo {
                title: "STUDIO",
                nav_label: "Stu",
                accent: Rgb565::HOT_PINK,
            },
            Screen::Settings => ScreenInfo {
                title: "SETTINGS",
                nav_label: "Set",
                accent: Rgb565::LIGHT_GRAY,
            },
        }
    }
}

/// One row of the studio screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudioEntry {
    pub name: &'static str,
    pub kind: &'static str,
    pub color: Rgb565,
}

/// Creator studios shown on [`Screen::Studio`]
pub const STUDIOS: [StudioEntry; 7] = [
    StudioEntry {
        name: "Canvas Studio",
        kind: "Design",
        color: Rgb565::VIOLET,
    },
    StudioEntry {
        name: "Video Studio",
        kind: "Film",
        color: Rgb565::ELECTRIC_BLUE,
    },
    StudioEntry {
        name: "Writing Studio",
        kind: "Docs",
        color: Rgb565::AMBER,
    },
    StudioEntry {
        name: "Cadence",
        kind: "Music",
        color: Rgb565::HOT_PINK,
    },
    StudioEntry {
        name: "Genesis Road",
        kind: "Games",
        color: Rgb565::GREEN,
    },
    StudioEntry {
        name: "RoadView",
        kind: "Publish",
        color: Rgb565::VIOLET,
    },
    StudioEntry {
        name: "BackRoad",
        kind: "Social",
        color: Rgb565::ELECTRIC_BLUE,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping_is_consistent() {
        for (i, screen) in Screen::ALL.iter().enumerate() {
            assert_eq!(screen.index() as usize, i);
            assert_eq!(Screen::from_index(i as u8), Some(*screen));
        }
        assert_eq!(Screen::from_index(Screen::COUNT as u8), None);
        assert_eq!(Screen::from_index(255), None);
    }

    #[test]
    fn test_cyclic_neighbours() {
        assert_eq!(Screen::Home.next(), Screen::Projects);
        assert_eq!(Screen::Settings.next(), Screen::Home);
        assert_eq!(Screen::Home.previous(), Screen::Settings);
        assert_eq!(Screen::Finance.previous(), Screen::Ai);
    }

    #[test]
    fn test_metadata() {
        assert_eq!(Screen::Finance.info().title, "FINANCE");
        assert_eq!(Screen::Home.info().accent, Rgb565::HOT_PINK);
        for screen in Screen::ALL {
            assert!(screen.info().nav_label.len() <= 4);
        }
    }

    #[test]
    fn test_studio_colors_are_typed() {
        assert_eq!(STUDIOS[4].name, "Genesis Road");
        assert_eq!(STUDIOS[4].color, Rgb565::GREEN);
        assert_eq!(STUDIOS[3].color, Rgb565::HOT_PINK);
    }
}
