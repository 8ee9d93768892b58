//! # Style System
//!
//! Colors, per-verse style parameters, and the visual themes that bundle
//! every palette and range the generators draw from.

pub mod theme;

pub use theme::{Background, FrameStyle, Theme, ThemeName};

use crate::random::{FloatRange, Srg};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// An sRGB color with straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Alpha given on the 0-255 scale.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: a as f64 / 255.0,
        }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba8(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS form: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            return self.to_hex();
        }
        let mut s = String::new();
        let _ = write!(s, "rgba({}, {}, {}, {})", self.r, self.g, self.b, fmt_num(self.a));
        s
    }

    /// Channels scaled to [0, 1], for PDF operators.
    pub fn unit_rgb(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// Format a number compactly: at most three decimals, no trailing zeros.
pub fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Randomized attributes of one verse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseStyle {
    /// Extra advance per character, in px.
    pub letter_spacing: f64,
    /// Rotation about the verse's centre, in degrees.
    pub rotation_degrees: f64,
    pub bold: bool,
    pub italic: bool,
    /// Index into the theme's text palette.
    pub color: usize,
}

/// Ranges, probabilities and palette the verse styles are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseStyleParams {
    pub letter_spacing: FloatRange,
    pub rotation: FloatRange,
    pub bold_probability: f64,
    pub italic_probability: f64,
    pub palette: Vec<Color>,
}

impl VerseStyleParams {
    /// Draw one verse style: letter spacing, rotation, bold, italic, color.
    ///
    /// Always consumes five draws, whether or not the verse ends up accepted.
    pub fn generate(&self, rng: &mut Srg) -> VerseStyle {
        let letter_spacing = rng.in_range(self.letter_spacing);
        let rotation_degrees = rng.in_range(self.rotation);
        let bold = rng.chance(self.bold_probability);
        let italic = rng.chance(self.italic_probability);
        let color = if self.palette.is_empty() {
            rng.next_unit();
            0
        } else {
            rng.choice_index(self.palette.len())
        };
        VerseStyle {
            letter_spacing,
            rotation_degrees,
            bold,
            italic,
            color,
        }
    }

    /// Resolve a style's palette index.
    pub fn color_of(&self, style: &VerseStyle) -> Color {
        self.palette
            .get(style.color)
            .copied()
            .unwrap_or(Color::rgb(0, 0, 0))
    }
}
