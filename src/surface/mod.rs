//! # Drawing Surfaces
//!
//! A [`Canvas`] receives a composition piece by piece, in paint order:
//!
//! ```text
//! background → wash panels → texture lines → text → frame → colophon → blocks
//! ```
//!
//! [`paint`] walks a [`Composition`] in that order. The SVG and PDF writers
//! implement the trait; neither decides anything about placement.

use crate::blocks::DecorativeBlock;
use crate::compose::Composition;
use crate::error::Result;
use crate::font::FontMetrics;
use crate::layout::columns::fragment_centre;
use crate::layout::{PlacedLine, StyledVerse};
use crate::model::{CanvasSize, Metadata};
use crate::style::{Background, Color, FrameStyle};
use crate::texture::{LineSegment, WashPanel};

/// The part of a verse that sits in one column.
#[derive(Debug, Clone, Copy)]
pub struct TextFragment<'a> {
    pub verse: &'a StyledVerse,
    pub lines: &'a [PlacedLine],
    pub color: Color,
    pub highlight: Color,
    pub font_size: f64,
    pub font_family: &'a str,
    /// Rotation pivot.
    pub centre: (f64, f64),
}

/// The technical details box inside the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Colophon {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub font_size: f64,
    pub line_advance: f64,
    /// Label and value per line, e.g. `("SEED:", "42")`.
    pub entries: Vec<(&'static str, String)>,
    pub text: Color,
    pub label: Color,
    pub fill: Color,
    pub border: Color,
}

const COLOPHON_MARGIN: f64 = 20.0;
const UNKNOWN: &str = "-";

impl Colophon {
    /// Lay the box out in the top-right corner of the frame.
    pub fn new(canvas: CanvasSize, frame: &FrameStyle, metadata: &Metadata, seed: i64) -> Self {
        let value = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let mut entries = vec![
            ("SOURCE:", value(&metadata.source)),
            ("AUTHOR:", value(&metadata.author)),
            ("SEED:", seed.to_string()),
            ("TOOLS:", value(&metadata.tools)),
        ];
        if let Some(date) = &metadata.date {
            entries.push(("DATE:", date.clone()));
        }

        let font_size = frame.colophon_font_size;
        let padding = font_size;
        let line_advance = font_size * 1.5;
        let metrics = FontMetrics::standard();
        let space = metrics.char_width(' ', font_size, false);
        let text_width = entries
            .iter()
            .map(|(label, value)| {
                metrics.text_width(label, font_size, true)
                    + space
                    + metrics.text_width(value, font_size, false)
            })
            .fold(0.0, f64::max);

        let width = text_width + 2.0 * padding;
        let height = entries.len() as f64 * line_advance + 2.0 * padding;
        Self {
            x: canvas.width - frame.inset - COLOPHON_MARGIN - width,
            y: frame.inset + COLOPHON_MARGIN,
            width,
            height,
            padding,
            font_size,
            line_advance,
            entries,
            text: frame.colophon_text,
            label: frame.colophon_label,
            fill: frame.colophon_fill,
            border: frame.stroke,
        }
    }

    /// Baseline of entry `index`.
    pub fn baseline(&self, index: usize) -> f64 {
        self.y + self.padding + index as f64 * self.line_advance + self.font_size
    }
}

/// A drawing target.
pub trait Canvas {
    type Output;

    fn fill_background(&mut self, canvas: CanvasSize, background: &Background) -> Result<()>;
    fn draw_wash(&mut self, panel: &WashPanel) -> Result<()>;
    fn draw_line(&mut self, segment: &LineSegment) -> Result<()>;
    fn draw_text(&mut self, fragment: &TextFragment<'_>) -> Result<()>;
    fn draw_frame(&mut self, canvas: CanvasSize, frame: &FrameStyle) -> Result<()>;
    fn draw_colophon(&mut self, colophon: &Colophon) -> Result<()>;
    /// Draw a decorative block with its grid texture.
    fn draw_rect(&mut self, block: &DecorativeBlock) -> Result<()>;
    fn finish(self) -> Result<Self::Output>;
}

/// Every text fragment of a composition, in placement order.
pub fn text_fragments(composition: &Composition) -> Vec<TextFragment<'_>> {
    let theme = &composition.theme;
    composition
        .layout
        .accepted
        .iter()
        .zip(&composition.placements)
        .flat_map(|(verse, placement)| {
            let color = theme.verse.color_of(&verse.style);
            placement
                .column_fragments()
                .into_iter()
                .map(move |lines| TextFragment {
                    verse,
                    lines,
                    color,
                    highlight: theme.highlight,
                    font_size: composition.typography.font_size,
                    font_family: &composition.typography.font_family,
                    centre: fragment_centre(lines),
                })
        })
        .collect()
}

/// Paint a composition onto `canvas`.
pub fn paint<C: Canvas>(composition: &Composition, canvas: &mut C) -> Result<()> {
    canvas.fill_background(composition.canvas, &composition.theme.background)?;
    for panel in &composition.washes {
        canvas.draw_wash(panel)?;
    }
    for segment in &composition.lines {
        canvas.draw_line(segment)?;
    }
    for fragment in text_fragments(composition) {
        canvas.draw_text(&fragment)?;
    }
    if let Some(frame) = &composition.theme.frame {
        canvas.draw_frame(composition.canvas, frame)?;
        let colophon = Colophon::new(
            composition.canvas,
            frame,
            &composition.metadata,
            composition.seed,
        );
        canvas.draw_colophon(&colophon)?;
    }
    for block in &composition.blocks {
        canvas.draw_rect(block)?;
    }
    Ok(())
}
