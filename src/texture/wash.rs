//! Translucent light panels scattered over the background.

use crate::model::CanvasSize;
use crate::random::{FloatRange, IntRange, Srg};
use crate::style::Color;
use serde::{Deserialize, Serialize};

/// A rotated, translucent rectangle. `x`/`y` is the unrotated top-left corner;
/// rotation is about the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashPanel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub outline: Option<Outline>,
    pub rotation_degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashParams {
    pub count: IntRange,
    /// Margin kept from the top/left edge.
    pub near_inset: f64,
    /// Margin kept from the bottom/right edge.
    pub far_inset: f64,
    pub width: FloatRange,
    pub height: FloatRange,
    pub fills: Vec<Color>,
    pub outline_probability: f64,
    pub outline: Outline,
    pub rotation: FloatRange,
}

impl Default for WashParams {
    fn default() -> Self {
        Self {
            count: IntRange::new(23, 28),
            near_inset: 50.0,
            far_inset: 150.0,
            width: FloatRange::new(40.0, 200.0),
            height: FloatRange::new(30.0, 120.0),
            fills: vec![
                Color::rgba8(255, 255, 255, 25), // white
                Color::rgba8(255, 255, 240, 30), // ivory
                Color::rgba8(240, 248, 255, 25), // alice blue
                Color::rgba8(255, 250, 240, 28), // floral white
                Color::rgba8(245, 245, 220, 22), // beige
            ],
            outline_probability: 0.4,
            outline: Outline {
                color: Color::rgba8(255, 255, 255, 40),
                width: 0.5,
            },
            rotation: FloatRange::new(-3.0, 3.0),
        }
    }
}

impl WashParams {
    /// Draw order per panel: x, y, width, height, fill, outline, rotation.
    pub fn generate(&self, canvas: CanvasSize, rng: &mut Srg) -> Vec<WashPanel> {
        let count = rng.in_int_range(self.count).max(0);
        let mut panels = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let x = rng.next_float(self.near_inset, canvas.width - self.far_inset);
            let y = rng.next_float(self.near_inset, canvas.height - self.far_inset);
            let width = rng.in_range(self.width);
            let height = rng.in_range(self.height);
            let fill = rng
                .choice(&self.fills)
                .copied()
                .unwrap_or(Color::rgba8(255, 255, 255, 25));
            let outline = rng.chance(self.outline_probability).then_some(self.outline);
            let rotation_degrees = rng.in_range(self.rotation);
            panels.push(WashPanel {
                x,
                y,
                width,
                height,
                fill,
                outline,
                rotation_degrees,
            });
        }
        panels
    }
}
