//! One generation session, end to end.
//!
//! A session owns a single [`Srg`] and calls into it in a fixed order:
//! shuffle, verse styles (inside the column fill), wash panels, texture
//! lines, blocks. The result is a plain, serializable [`Composition`] that
//! any surface can paint.

use crate::blocks::DecorativeBlock;
use crate::error::Result;
use crate::font::FontMetrics;
use crate::layout::{ColumnFill, ColumnFlow, LayoutResult, VersePlacement};
use crate::model::{CanvasSize, ContainerGeometry, Metadata, PageConfig, Typography};
use crate::random::{shuffle, Srg};
use crate::style::Theme;
use crate::text::segment;
use crate::texture::{LineSegment, WashPanel};
use serde::{Deserialize, Serialize};

/// Everything one session produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub seed: i64,
    pub theme: Theme,
    pub canvas: CanvasSize,
    pub geometry: ContainerGeometry,
    pub typography: Typography,
    pub metadata: Metadata,
    pub layout: LayoutResult,
    /// Line positions of each accepted verse, index-aligned with
    /// `layout.accepted`.
    pub placements: Vec<VersePlacement>,
    pub washes: Vec<WashPanel>,
    pub lines: Vec<LineSegment>,
    pub blocks: Vec<DecorativeBlock>,
}

/// Run a session.
///
/// Fails only on configuration errors. Empty text and measurement
/// failures still produce a composition, with the halt reason recorded in
/// `layout`.
pub fn compose(config: &PageConfig, text: &str, metrics: &FontMetrics) -> Result<Composition> {
    let page = config.resolve()?;
    let mut rng = Srg::new(page.seed);

    let mut verses = segment(text);
    tracing::debug!(verses = verses.len(), seed = page.seed, "segmented source text");
    shuffle(&mut verses, &mut rng);

    let mut flow = ColumnFlow::new(page.geometry, page.typography.clone(), metrics);
    let layout = ColumnFill::new(&page.theme.verse).run(verses, &mut rng, &mut flow);
    let placements = flow.into_placements();

    let washes = match &page.theme.washes {
        Some(params) => params.generate(page.canvas, &mut rng),
        None => Vec::new(),
    };
    let lines = page.theme.lines.generate(page.canvas, &mut rng);
    let blocks = match &page.theme.blocks {
        Some(params) => params.place(page.canvas, &mut rng),
        None => Vec::new(),
    };

    tracing::debug!(draws = rng.draws(), "session complete");

    Ok(Composition {
        seed: page.seed,
        theme: page.theme,
        canvas: page.canvas,
        geometry: page.geometry,
        typography: page.typography,
        metadata: page.metadata,
        layout,
        placements,
        washes,
        lines,
        blocks,
    })
}
