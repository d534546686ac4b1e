//! Typed RGB565 colors
//!
//! Colors travel to the panel as raw 16-bit values; keeping them typed on
//! the hub side means tables carry the color itself rather than a name to
//! be looked up later.

/// 16-bit 5-6-5 color as understood by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    // Brand palette
    pub const HOT_PINK: Self = Self(0xF8B6);
    pub const AMBER: Self = Self(0xFD20);
    pub const ELECTRIC_BLUE: Self = Self(0x24DF);
    pub const VIOLET: Self = Self(0x9136);

    // Neutrals and signal colors
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const DARK_GRAY: Self = Self(0x2104);
    pub const LIGHT_GRAY: Self = Self(0x7BEF);
    pub const GREEN: Self = Self(0x07E0);
    pub const RED: Self = Self(0xF800);

    /// Pack 8-bit channels into 5-6-5
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Raw value for the wire
    pub const fn raw(self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb888() {
        assert_eq!(Rgb565::from_rgb888(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::from_rgb888(0, 0, 0), Rgb565::BLACK);
        assert_eq!(Rgb565::from_rgb888(255, 0, 0), Rgb565::RED);
        assert_eq!(Rgb565::from_rgb888(0, 255, 0), Rgb565::GREEN);
    }
}
