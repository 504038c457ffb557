//! Draw-surface abstraction
//!
//! The simulation draws through the `Surface` trait so it never touches the
//! platform directly. The web build implements it over a Canvas 2D context;
//! tests and the native smoke run use `NullSurface`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Entity colors, kept symbolic so the surface decides the actual encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    White,
    /// HSL hue at full saturation / 50% lightness (enemy palette)
    Hue(f32),
}

impl Color {
    /// CSS color string for canvas-style backends.
    pub fn to_css(self) -> String {
        match self {
            Color::Cyan => "cyan".to_string(),
            Color::White => "#fff".to_string(),
            Color::Hue(h) => format!("hsl({h:.0}, 100%, 50%)"),
        }
    }
}

/// A 2D raster surface with the primitives the simulation needs.
pub trait Surface {
    /// Partial-opacity rectangle over the whole viewport (motion-trail effect).
    fn clear_fade(&mut self, alpha: f32);

    /// Filled circle. `alpha` is global opacity, `glow` > 0 adds a soft bloom
    /// of roughly that pixel radius.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32);
}

/// Surface that draws nothing. Used by tests and the headless native run.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear_fade(&mut self, _alpha: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _alpha: f32, _glow: f32) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::Cyan.to_css(), "cyan");
        assert_eq!(Color::White.to_css(), "#fff");
        assert_eq!(Color::Hue(120.0).to_css(), "hsl(120, 100%, 50%)");
    }
}
