//! Layered line-grid textures for decorative blocks.
//!
//! A texture is a list of [`GridLayer`]s, two per grid set (vertical, then
//! horizontal). Layer 0 is the topmost, the way a CSS `background-image`
//! list stacks, and surfaces must keep that order.

use crate::random::{FloatRange, IntRange, Srg};
use crate::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Gradient angle of the un-jittered stripes, CSS convention.
    pub fn canonical_degrees(self) -> f64 {
        match self {
            Orientation::Vertical => 90.0,
            Orientation::Horizontal => 0.0,
        }
    }
}

/// One repeating stripe pattern: a `stroke_width` line every `spacing` px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayer {
    pub orientation: Orientation,
    pub spacing: f64,
    pub opacity: f64,
    pub stroke_width: f64,
    /// Gradient angle in CSS degrees (0 = toward the top, clockwise).
    pub rotation_degrees: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridParams {
    pub set_count: IntRange,
    pub spacing: FloatRange,
    pub opacity: FloatRange,
    pub stroke_width: FloatRange,
    /// Jitter added to the canonical 90°/0° angles.
    pub rotation_jitter: FloatRange,
    pub palette: Vec<Color>,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            set_count: IntRange::new(1, 4),
            spacing: FloatRange::new(3.0, 15.0),
            opacity: FloatRange::new(0.05, 0.2),
            stroke_width: FloatRange::new(0.3, 1.2),
            rotation_jitter: FloatRange::new(-1.0, 1.0),
            palette: vec![
                Color::rgb(64, 64, 64),
                Color::rgb(96, 96, 96),
                Color::rgb(32, 32, 32),
                Color::rgb(13, 71, 161),
                Color::rgb(21, 101, 192),
                Color::rgb(25, 118, 210),
            ],
        }
    }
}

impl GridParams {
    /// Synthesize one block's texture.
    ///
    /// Per set the draws are: vertical spacing, horizontal spacing, opacity,
    /// stroke width, vertical jitter, horizontal jitter, vertical color,
    /// horizontal color. Opacity and stroke width are shared by the pair.
    pub fn synthesize(&self, rng: &mut Srg) -> Vec<GridLayer> {
        let sets = rng.in_int_range(self.set_count).max(0);
        let mut layers = Vec::with_capacity(sets as usize * 2);
        for _ in 0..sets {
            let vertical_spacing = rng.in_range(self.spacing);
            let horizontal_spacing = rng.in_range(self.spacing);
            let opacity = rng.in_range(self.opacity);
            let stroke_width = rng.in_range(self.stroke_width);
            let vertical_rotation =
                Orientation::Vertical.canonical_degrees() + rng.in_range(self.rotation_jitter);
            let horizontal_rotation =
                Orientation::Horizontal.canonical_degrees() + rng.in_range(self.rotation_jitter);
            let vertical_color = self.pick_color(rng);
            let horizontal_color = self.pick_color(rng);

            layers.push(GridLayer {
                orientation: Orientation::Vertical,
                spacing: vertical_spacing,
                opacity,
                stroke_width,
                rotation_degrees: vertical_rotation,
                color: vertical_color,
            });
            layers.push(GridLayer {
                orientation: Orientation::Horizontal,
                spacing: horizontal_spacing,
                opacity,
                stroke_width,
                rotation_degrees: horizontal_rotation,
                color: horizontal_color,
            });
        }
        layers
    }

    fn pick_color(&self, rng: &mut Srg) -> Color {
        match rng.choice(&self.palette) {
            Some(c) => *c,
            None => {
                rng.next_unit();
                Color::rgb(64, 64, 64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_to_six_layers_in_pairs() {
        let params = GridParams::default();
        for seed in 0..200 {
            let layers = params.synthesize(&mut Srg::new(seed));
            assert!((2..=6).contains(&layers.len()), "{} layers", layers.len());
            for pair in layers.chunks(2) {
                assert_eq!(pair[0].orientation, Orientation::Vertical);
                assert_eq!(pair[1].orientation, Orientation::Horizontal);
                assert_eq!(pair[0].opacity, pair[1].opacity);
                assert_eq!(pair[0].stroke_width, pair[1].stroke_width);
            }
        }
    }

    #[test]
    fn angles_jitter_around_axes() {
        let params = GridParams::default();
        let layers = params.synthesize(&mut Srg::new(11));
        for layer in layers {
            let base = layer.orientation.canonical_degrees();
            assert!(layer.rotation_degrees >= base - 1.0 && layer.rotation_degrees < base + 1.0);
            assert!(params.palette.contains(&layer.color));
        }
    }

    #[test]
    fn draw_count_per_set() {
        let params = GridParams::default();
        let mut rng = Srg::new(3);
        let layers = params.synthesize(&mut rng);
        assert_eq!(rng.draws(), 1 + 8 * (layers.len() as u64 / 2));
    }
}
