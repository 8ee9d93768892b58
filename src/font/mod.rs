//! # Font Metrics
//!
//! Advance widths used by the column flow to decide what fits.
//!
//! By default the composer measures with the standard Helvetica faces, which
//! is also what the PDF writer references. A TrueType/OpenType file can be
//! supplied instead; its widths are read with ttf-parser. Custom fonts have a
//! single face, so bold text is measured with the regular advances.

pub mod metrics;

use crate::error::{Result, VersoError};
use std::collections::HashMap;
use std::path::Path;
use unicode_script::{Script, UnicodeScript};

/// Metrics source for measurement.
#[derive(Debug, Clone)]
pub enum FontMetrics {
    /// Built-in Helvetica / Helvetica-Bold widths.
    Standard,
    /// Widths parsed from a font file.
    Custom(CustomFontMetrics),
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::standard()
    }
}

impl FontMetrics {
    pub fn standard() -> Self {
        FontMetrics::Standard
    }

    /// Load metrics from a TrueType/OpenType file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_font_data(&data)
            .map_err(|e| VersoError::Font(format!("{}: {}", path.display(), e)))
    }

    /// Parse metrics from raw font bytes.
    pub fn from_font_data(data: &[u8]) -> Result<Self> {
        CustomFontMetrics::from_font_data(data)
            .map(FontMetrics::Custom)
            .ok_or_else(|| VersoError::Font("not a parsable TrueType/OpenType face".into()))
    }

    /// Width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64, bold: bool) -> f64 {
        match self {
            FontMetrics::Standard => {
                let units = metrics::helvetica_width(ch, bold, is_full_width(ch));
                units as f64 / 1000.0 * font_size
            }
            FontMetrics::Custom(custom) => custom.char_width(ch, font_size),
        }
    }

    /// Ascender height as a fraction of the font size.
    pub fn ascent_ratio(&self) -> f64 {
        match self {
            FontMetrics::Standard => metrics::HELVETICA_ASCENDER as f64 / 1000.0,
            FontMetrics::Custom(custom) => {
                custom.ascender as f64 / custom.units_per_em.max(1) as f64
            }
        }
    }

    /// Width of a whole string in points, without letter spacing.
    pub fn text_width(&self, text: &str, font_size: f64, bold: bool) -> f64 {
        text.chars()
            .map(|ch| self.char_width(ch, font_size, bold))
            .sum()
    }
}

/// Scripts set on a full em, regardless of face.
fn is_full_width(ch: char) -> bool {
    matches!(
        ch.script(),
        Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul | Script::Bopomofo
    )
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
    pub ascender: i16,
    pub descender: i16,
}

impl CustomFontMetrics {
    /// Get the advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // The Basic Multilingual Plane covers every script the keyword list uses.
        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Some(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
            ascender: face.ascender(),
            descender: face.descender(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_widths_scale_with_size() {
        let m = FontMetrics::standard();
        assert!((m.char_width('A', 10.0, false) - 6.67).abs() < 1e-9);
        assert!((m.char_width('A', 20.0, false) - 13.34).abs() < 1e-9);
    }

    #[test]
    fn japanese_is_full_width() {
        let m = FontMetrics::standard();
        assert!((m.char_width('ロ', 12.0, false) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn text_width_sums_chars() {
        let m = FontMetrics::standard();
        let w = m.text_width("ab", 10.0, false);
        assert!((w - 11.12).abs() < 1e-9);
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        let err = FontMetrics::from_font_data(b"definitely not a font").unwrap_err();
        assert!(matches!(err, VersoError::Font(_)));
    }

    #[test]
    fn custom_metrics_fall_back_to_default_advance() {
        let custom = CustomFontMetrics {
            units_per_em: 1000,
            advance_widths: HashMap::from([('a', 500)]),
            default_advance: 250,
            ascender: 800,
            descender: -200,
        };
        assert!((custom.char_width('a', 10.0) - 5.0).abs() < 1e-9);
        assert!((custom.char_width('z', 10.0) - 2.5).abs() < 1e-9);
    }
}
