//! # Background Texture
//!
//! Scattered line strokes over the whole canvas, in two tiers:
//!
//! - **structural** lines run most of the way across the page, vertical
//!   ones first, then horizontal ones;
//! - **accent** lines are short dashes, randomly vertical or horizontal.
//!
//! Segments come out in generation order, which is also their stacking order.
//! The [`wash`] module adds the translucent panels painted underneath.

pub mod wash;

pub use wash::{WashPanel, WashParams};

use crate::model::CanvasSize;
use crate::random::{FloatRange, IntRange, Srg};
use crate::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTier {
    Structural,
    Accent,
}

/// One stroke of the background texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub tier: LineTier,
}

/// Counts, spans and strokes of the line texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTextureParams {
    pub vertical_count: IntRange,
    pub horizontal_count: IntRange,
    /// Distance kept from the canvas edge on the axis a structural line sits on.
    pub edge_inset: f64,
    /// Structural lines start within this fraction of the span...
    pub start_fraction: f64,
    /// ...and end beyond this one.
    pub end_fraction: f64,
    pub structural_stroke: Color,
    pub structural_width: f64,
    pub accent_count: IntRange,
    pub accent_length: FloatRange,
    pub accent_vertical_probability: f64,
    pub accent_stroke: Color,
    pub accent_width: f64,
}

impl Default for LineTextureParams {
    fn default() -> Self {
        Self {
            vertical_count: IntRange::new(80, 115),
            horizontal_count: IntRange::new(60, 112),
            edge_inset: 20.0,
            start_fraction: 0.3,
            end_fraction: 0.7,
            structural_stroke: Color::rgba8(0, 0, 0, 60),
            structural_width: 0.5,
            accent_count: IntRange::new(15, 25),
            accent_length: FloatRange::new(10.0, 30.0),
            accent_vertical_probability: 0.5,
            accent_stroke: Color::rgba8(0, 0, 0, 30),
            accent_width: 0.3,
        }
    }
}

impl LineTextureParams {
    /// Generate the full texture for a canvas.
    pub fn generate(&self, canvas: CanvasSize, rng: &mut Srg) -> Vec<LineSegment> {
        let (w, h) = (canvas.width, canvas.height);
        let mut segments = Vec::new();

        let structural = |x1, y1, x2, y2| LineSegment {
            x1,
            y1,
            x2,
            y2,
            stroke: self.structural_stroke,
            stroke_width: self.structural_width,
            tier: LineTier::Structural,
        };

        let vertical = rng.in_int_range(self.vertical_count).max(0);
        for _ in 0..vertical {
            let x = rng.next_float(self.edge_inset, w - self.edge_inset);
            let start = rng.next_float(0.0, h * self.start_fraction);
            let end = rng.next_float(h * self.end_fraction, h);
            segments.push(structural(x, start, x, end));
        }

        let horizontal = rng.in_int_range(self.horizontal_count).max(0);
        for _ in 0..horizontal {
            let y = rng.next_float(self.edge_inset, h - self.edge_inset);
            let start = rng.next_float(0.0, w * self.start_fraction);
            let end = rng.next_float(w * self.end_fraction, w);
            segments.push(structural(start, y, end, y));
        }

        let accents = rng.in_int_range(self.accent_count).max(0);
        for _ in 0..accents {
            let is_vertical = rng.chance(self.accent_vertical_probability);
            let x = rng.next_float(0.0, w);
            let y = rng.next_float(0.0, h);
            let length = rng.in_range(self.accent_length);
            let (x2, y2) = if is_vertical { (x, y + length) } else { (x + length, y) };
            segments.push(LineSegment {
                x1: x,
                y1: y,
                x2,
                y2,
                stroke: self.accent_stroke,
                stroke_width: self.accent_width,
                tier: LineTier::Accent,
            });
        }

        tracing::debug!(vertical, horizontal, accents, "generated line texture");
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize {
        width: 1200.0,
        height: 800.0,
    };

    #[test]
    fn counts_fall_in_configured_ranges() {
        let params = LineTextureParams::default();
        for seed in 0..50 {
            let lines = params.generate(CANVAS, &mut Srg::new(seed));
            let structural = lines.iter().filter(|l| l.tier == LineTier::Structural).count();
            let accents = lines.len() - structural;
            assert!((140..225).contains(&structural), "structural = {}", structural);
            assert!((15..25).contains(&accents), "accents = {}", accents);
        }
    }

    #[test]
    fn structural_lines_span_the_page() {
        let params = LineTextureParams::default();
        let lines = params.generate(CANVAS, &mut Srg::new(42));
        for l in lines.iter().filter(|l| l.tier == LineTier::Structural) {
            if l.x1 == l.x2 {
                assert!(l.x1 >= 20.0 && l.x1 < 1180.0);
                assert!(l.y1 < 800.0 * 0.3 && l.y2 >= 800.0 * 0.7);
            } else {
                assert_eq!(l.y1, l.y2);
                assert!(l.x1 < 1200.0 * 0.3 && l.x2 >= 1200.0 * 0.7);
            }
        }
    }

    #[test]
    fn accents_are_short_axis_aligned_dashes() {
        let params = LineTextureParams::default();
        let lines = params.generate(CANVAS, &mut Srg::new(5));
        for l in lines.iter().filter(|l| l.tier == LineTier::Accent) {
            let len = (l.x2 - l.x1) + (l.y2 - l.y1);
            assert!(l.x1 == l.x2 || l.y1 == l.y2);
            assert!((10.0..30.0).contains(&len));
            assert_eq!(l.stroke_width, 0.3);
        }
    }

    #[test]
    fn vertical_lines_come_first() {
        let params = LineTextureParams::default();
        let lines = params.generate(CANVAS, &mut Srg::new(1));
        assert_eq!(lines[0].x1, lines[0].x2);
    }

    #[test]
    fn same_seed_same_texture() {
        let params = LineTextureParams::default();
        assert_eq!(
            params.generate(CANVAS, &mut Srg::new(77)),
            params.generate(CANVAS, &mut Srg::new(77))
        );
    }
}
