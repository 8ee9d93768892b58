//! # Decorative Blocks
//!
//! A row of tall "ink blocks" sitting on a common baseline, each with its own
//! layered grid texture ([`grid`]).
//!
//! Placement walks a cursor left to right. Every block advances the cursor by
//! its width plus a negative overlap, so neighbours overlap; once more than
//! `loosen_after` blocks are down the overlap creeps toward zero and the row
//! loosens toward its right end. The run stops at `target_count` blocks or
//! `max_attempts` iterations, whichever comes first.
//!
//! Unlike the column fill, nothing here is measured against the page bounds.
//! A wide enough row simply runs off the canvas.

pub mod grid;

pub use grid::{GridLayer, GridParams, Orientation};

use crate::model::CanvasSize;
use crate::random::{FloatRange, IntRange, Srg};
use crate::style::Color;
use serde::{Deserialize, Serialize};

/// A placed block. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorativeBlock {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub base_color: Color,
    /// Compositing order; index 0 is on top.
    pub texture: Vec<GridLayer>,
}

/// Where the row is anchored horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "side", content = "offset", rename_all = "lowercase")]
pub enum BlockAnchor {
    /// The first block starts `offset` px from the left edge.
    Left(f64),
    /// The row is shifted so its right edge sits `offset` px from the right edge.
    Right(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockParams {
    pub target_count: usize,
    pub max_attempts: usize,
    pub width: FloatRange,
    pub height: FloatRange,
    pub red: IntRange,
    pub green: IntRange,
    pub blue: IntRange,
    /// Cursor adjustment after each block; negative overlaps.
    pub initial_overlap: f64,
    pub loosen_after: usize,
    pub loosen_step: f64,
    pub anchor: BlockAnchor,
    /// Distance from the canvas bottom to the shared baseline.
    pub baseline_offset: f64,
    pub grid: GridParams,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            target_count: 15,
            max_attempts: 50,
            width: FloatRange::new(25.0, 85.0),
            height: FloatRange::new(120.0, 280.0),
            red: IntRange::new(5, 15),
            green: IntRange::new(8, 20),
            blue: IntRange::new(40, 80),
            initial_overlap: -8.0,
            loosen_after: 10,
            loosen_step: 0.3,
            anchor: BlockAnchor::Right(10.0),
            baseline_offset: 10.0,
            grid: GridParams::default(),
        }
    }
}

impl BlockParams {
    /// Place the row of blocks.
    ///
    /// Each attempt draws width and height first and only then checks the
    /// target count, so the attempt that stops the run still consumes two
    /// draws.
    pub fn place(&self, canvas: CanvasSize, rng: &mut Srg) -> Vec<DecorativeBlock> {
        let mut blocks: Vec<DecorativeBlock> = Vec::new();
        let mut overlap = self.initial_overlap;
        let mut cursor = match self.anchor {
            BlockAnchor::Left(offset) => offset,
            BlockAnchor::Right(_) => 0.0,
        };
        let baseline = canvas.height - self.baseline_offset;

        for _ in 0..self.max_attempts {
            let width = rng.in_range(self.width);
            let height = rng.in_range(self.height);

            if blocks.len() >= self.target_count {
                tracing::debug!(placed = blocks.len(), "block target reached");
                break;
            }

            let base_color = Color::rgb(
                channel(rng.in_int_range(self.red)),
                channel(rng.in_int_range(self.green)),
                channel(rng.in_int_range(self.blue)),
            );
            let texture = self.grid.synthesize(rng);

            blocks.push(DecorativeBlock {
                x: cursor,
                y: baseline - height,
                width,
                height,
                base_color,
                texture,
            });

            cursor += width + overlap;
            if blocks.len() > self.loosen_after {
                overlap = (overlap + self.loosen_step).min(0.0);
            }
        }

        if let BlockAnchor::Right(offset) = self.anchor {
            let right_edge = blocks
                .iter()
                .map(|b| b.x + b.width)
                .fold(f64::NEG_INFINITY, f64::max);
            if right_edge.is_finite() {
                let shift = canvas.width - offset - right_edge;
                for block in &mut blocks {
                    block.x += shift;
                }
            }
        }

        tracing::info!(count = blocks.len(), "placed decorative blocks");
        blocks
    }
}

fn channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}
