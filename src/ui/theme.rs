//! Theme system for the player surfaces
//! Supports both dark and light modes with consistent color palette

use crate::features::UiMode;

/// RGBA color, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

// Dark mode colors
mod dark {
    use super::Color;
    pub const SURFACE_VARIANT: Color = Color::from_hex(0x333333);
}

// Light mode colors
mod light {
    use super::Color;
    pub const SURFACE_VARIANT: Color = Color::from_hex(0xe0e0e0);
}

/// Whether a UI mode renders dark. `System` follows the dark default.
pub fn is_dark(mode: UiMode) -> bool {
    !matches!(mode, UiMode::Light)
}

/// Sheet and card background
pub fn surface_variant(mode: UiMode) -> Color {
    if is_dark(mode) {
        dark::SURFACE_VARIANT
    } else {
        light::SURFACE_VARIANT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_components() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn system_mode_uses_dark_palette() {
        assert_eq!(surface_variant(UiMode::System), surface_variant(UiMode::Dark));
        assert_ne!(surface_variant(UiMode::Light), surface_variant(UiMode::Dark));
        assert!(!is_dark(UiMode::Light));
    }
}
