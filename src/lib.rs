//! # Verso
//!
//! A deterministic generative page composer.
//!
//! Given a source text and a seed, Verso builds one stylized page: verses
//! poured into a fixed multi-column container with randomized per-verse
//! styling, a scatter of texture strokes and translucent wash panels behind
//! them, and a row of gridded "ink blocks" along the bottom edge.
//!
//! The container is the hard constraint. Verses are appended one at a time
//! and measured; the first one that does not fit ends the fill. Nothing is
//! laid out on an unbounded canvas and trimmed afterwards.
//!
//! ## Architecture
//!
//! ```text
//! text + config
//!       ↓
//!   [text]     — segment into verses, find keyword highlights
//!       ↓
//!   [random]   — one seeded generator per session; shuffle
//!       ↓
//!   [layout]   — column fill against a measurement port
//!       ↓
//!   [texture] [blocks] — washes, strokes, gridded blocks
//!       ↓
//!   [surface]  — paint order; [svg] / [pdf] writers
//! ```
//!
//! The same seed, text and configuration always give byte-identical output.

pub mod blocks;
pub mod compose;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod random;
pub mod style;
pub mod surface;
pub mod svg;
pub mod text;
pub mod texture;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use compose::{compose, Composition};
pub use error::{Result, VersoError};
pub use font::FontMetrics;
pub use model::PageConfig;

use pdf::PdfWriter;
use surface::{paint, Canvas};
use svg::SvgWriter;

/// Paint a composition as an SVG document.
pub fn render_svg(composition: &Composition) -> Result<String> {
    let mut writer = SvgWriter::new(composition.canvas)?;
    paint(composition, &mut writer)?;
    writer.finish()
}

/// Paint a composition as a single-page PDF.
pub fn render_pdf(composition: &Composition) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(composition.canvas, &composition.metadata);
    paint(composition, &mut writer)?;
    writer.finish()
}

/// The composition as pretty-printed JSON.
pub fn render_json(composition: &Composition) -> Result<String> {
    serde_json::to_string_pretty(composition)
        .map_err(|e| VersoError::Render(format!("JSON serialization failed: {}", e)))
}

/// Compose and render to SVG from a JSON configuration string.
pub fn render_svg_from_json(text: &str, config_json: &str) -> Result<String> {
    let config = PageConfig::from_json(config_json)?;
    let composition = compose(&config, text, &FontMetrics::standard())?;
    render_svg(&composition)
}
