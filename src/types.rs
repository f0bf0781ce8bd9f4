//! Shared boundary types for celpad.
//!
//! This module defines the two key data contracts:
//! - Cel → Surface: `PaintStyle` overrides merged over a surface's `Paint`
//! - Canvas → Terminal: `Cell`s painted on a fixed-size grid

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Paint-style overrides applied by `Cel::render_frame`.
///
/// Unset options keep whatever the surface currently uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl PaintStyle {
    /// Ghost style used to preview the previous frame before drawing the next.
    pub fn onion() -> Self {
        PaintStyle {
            stroke: Some(Color::Named(NamedColor::Red)),
            alpha: Some(0.5),
        }
    }
}

/// Effective paint state of a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// `None` paints with the terminal's default foreground.
    pub stroke: Option<Color>,
    /// Clamped to `[0, 1]` when merged.
    pub alpha: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Paint {
            stroke: None,
            alpha: 1.0,
        }
    }
}

impl Paint {
    /// Merge `style` over this paint, returning the result.
    pub fn merged(&self, style: &PaintStyle) -> Paint {
        Paint {
            stroke: style.stroke.clone().or_else(|| self.stroke.clone()),
            alpha: style.alpha.map_or(self.alpha, |a| a.clamp(0.0, 1.0)),
        }
    }

    /// A fully transparent paint leaves no mark.
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

// ---------------------------------------------------------------------------
// Canvas → Terminal boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Option<Color>,
    /// Terminals have no opacity; partial alpha renders dimmed.
    pub dim: bool,
}

impl From<&Paint> for CellStyle {
    fn from(paint: &Paint) -> Self {
        CellStyle {
            fg: paint.stroke.clone(),
            dim: paint.alpha < 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unset_options() {
        let base = Paint {
            stroke: Some(Color::Named(NamedColor::Blue)),
            alpha: 0.8,
        };
        let merged = base.merged(&PaintStyle {
            stroke: None,
            alpha: Some(0.5),
        });
        assert_eq!(merged.stroke, Some(Color::Named(NamedColor::Blue)));
        assert_eq!(merged.alpha, 0.5);
    }

    #[test]
    fn merge_clamps_alpha() {
        let merged = Paint::default().merged(&PaintStyle {
            stroke: None,
            alpha: Some(3.0),
        });
        assert_eq!(merged.alpha, 1.0);
    }

    #[test]
    fn partial_alpha_renders_dim() {
        let paint = Paint::default().merged(&PaintStyle::onion());
        let style = CellStyle::from(&paint);
        assert!(style.dim);
        assert_eq!(style.fg, Some(Color::Named(NamedColor::Red)));
    }

    #[test]
    fn style_config_round_trips_named_and_rgb() {
        let json = r#"{"stroke":{"r":1,"g":2,"b":3},"alpha":0.25}"#;
        let style: PaintStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.stroke, Some(Color::Rgb { r: 1, g: 2, b: 3 }));

        let named: PaintStyle = serde_json::from_str(r#"{"stroke":"cyan"}"#).unwrap();
        assert_eq!(named.stroke, Some(Color::Named(NamedColor::Cyan)));
        assert_eq!(named.alpha, None);
    }
}
