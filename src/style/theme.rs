//! Visual themes.
//!
//! A theme is plain data: every palette, range and probability the generators
//! draw from, plus the page defaults that go with the look. Swapping themes
//! never changes *how* values are drawn, only *from what*.

use super::{Color, VerseStyleParams};
use crate::blocks::BlockParams;
use crate::random::FloatRange;
use crate::texture::{LineTextureParams, WashParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Dark ink on old paper.
    Paper,
    /// Light ink on a blue gradient, with blocks and a frame.
    #[default]
    Blueprint,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paper" => Ok(ThemeName::Paper),
            "blueprint" => Ok(ThemeName::Blueprint),
            other => Err(format!("unknown theme '{}' (expected paper or blueprint)", other)),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Paper => write!(f, "paper"),
            ThemeName::Blueprint => write!(f, "blueprint"),
        }
    }
}

/// Page background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    Solid { color: Color },
    /// Top-to-bottom linear gradient.
    VerticalGradient { top: Color, bottom: Color },
}

/// Border inset and colophon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStyle {
    pub inset: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub colophon_text: Color,
    pub colophon_label: Color,
    pub colophon_fill: Color,
    pub colophon_font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: ThemeName,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub column_count: u32,
    pub font_size: f64,
    pub background: Background,
    pub verse: VerseStyleParams,
    pub highlight: Color,
    pub lines: LineTextureParams,
    pub washes: Option<WashParams>,
    pub blocks: Option<BlockParams>,
    pub frame: Option<FrameStyle>,
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Paper => Self::paper(),
            ThemeName::Blueprint => Self::blueprint(),
        }
    }

    pub fn paper() -> Self {
        Self {
            name: ThemeName::Paper,
            canvas_width: 1200.0,
            canvas_height: 800.0,
            column_count: 5,
            font_size: 11.0,
            background: Background::Solid {
                color: Color::rgb(0xed, 0xd8, 0xb9),
            },
            verse: VerseStyleParams {
                letter_spacing: FloatRange::new(-0.9, 0.5),
                rotation: FloatRange::new(-1.0, 1.0),
                bold_probability: 0.3,
                italic_probability: 0.3,
                palette: vec![
                    Color::rgb(0x0a, 0x0e, 0x1a), // almost black blue
                    Color::rgb(0x0f, 0x14, 0x19), // very dark blue
                    Color::rgb(0x12, 0x18, 0x20), // dark blue-grey
                    Color::rgb(0x0d, 0x11, 0x17), // dark slate
                    Color::rgb(0x1a, 0x0a, 0x0a), // almost black brown
                    Color::rgb(0x2d, 0x1b, 0x0e), // very dark brown
                    Color::rgb(0x25, 0x1a, 0x0f), // dark chocolate
                    Color::rgb(0x1a, 0x1a, 0x1a), // almost black grey
                    Color::rgb(0x24, 0x24, 0x24), // very dark grey
                    Color::rgb(0x2f, 0x2f, 0x2f), // dark grey
                ],
            },
            highlight: Color::rgb(0x8b, 0x1a, 0x1a),
            lines: LineTextureParams::default(),
            washes: None,
            blocks: None,
            frame: None,
        }
    }

    pub fn blueprint() -> Self {
        Self {
            name: ThemeName::Blueprint,
            canvas_width: 3200.0,
            canvas_height: 2400.0,
            column_count: 3,
            font_size: 18.0,
            background: Background::VerticalGradient {
                top: Color::rgb(0x0d, 0x47, 0xa1),
                bottom: Color::rgb(0x19, 0x76, 0xd2),
            },
            verse: VerseStyleParams {
                letter_spacing: FloatRange::new(-0.9, 0.5),
                rotation: FloatRange::new(-1.0, 1.0),
                bold_probability: 0.3,
                italic_probability: 0.3,
                palette: vec![
                    Color::rgb(0xff, 0xff, 0xff), // white
                    Color::rgb(0xf8, 0xf9, 0xfa), // very light grey
                    Color::rgb(0xe9, 0xec, 0xef), // light grey
                    Color::rgb(0xde, 0xe2, 0xe6), // darker light grey
                    Color::rgb(0xce, 0xd4, 0xda), // medium light grey
                    Color::rgb(0xf0, 0xf8, 0xff), // alice blue
                    Color::rgb(0xe6, 0xf3, 0xff), // very light blue
                    Color::rgb(0xcc, 0xdd, 0xff), // light blue tint
                    Color::rgb(0xb3, 0xd9, 0xff), // saturated light blue
                    Color::rgb(0xe0, 0xe0, 0xe0), // light grey
                ],
            },
            highlight: Color::rgb(0xff, 0xd5, 0x4f),
            lines: LineTextureParams {
                structural_stroke: Color::rgba8(255, 255, 230, 50),
                accent_stroke: Color::rgba8(255, 255, 200, 30),
                ..LineTextureParams::default()
            },
            washes: Some(WashParams::default()),
            blocks: Some(BlockParams::default()),
            frame: Some(FrameStyle {
                inset: 30.0,
                stroke: Color::rgba8(255, 255, 255, 200),
                stroke_width: 2.0,
                colophon_text: Color::rgb(0xe6, 0xf3, 0xff),
                colophon_label: Color::rgb(0xff, 0xd5, 0x4f),
                colophon_fill: Color::rgba8(13, 71, 161, 220),
                colophon_font_size: 16.0,
            }),
        }
    }
}
