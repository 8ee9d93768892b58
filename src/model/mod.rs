//! # Page Model
//!
//! The input configuration for one session, and the validated geometry the
//! engine works against.
//!
//! Every field of [`PageConfig`] is optional. Missing values come from the
//! selected theme, so `{}` is a complete configuration: blueprint theme,
//! seed 42.

use crate::error::{Result, VersoError};
use crate::style::{Theme, ThemeName};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: i64 = 42;
pub const DEFAULT_MARGIN: f64 = 20.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.25;
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// Session configuration as read from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    /// Seed for every randomized decision. Wrapped to 32 bits.
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub theme: Option<ThemeName>,
    #[serde(default)]
    pub canvas_width: Option<f64>,
    #[serde(default)]
    pub canvas_height: Option<f64>,
    /// Space between the canvas edge and the text container.
    #[serde(default)]
    pub margin: Option<f64>,
    #[serde(default)]
    pub column_count: Option<u32>,
    /// Gap between columns. Defaults to one em.
    #[serde(default)]
    pub column_gap: Option<f64>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    /// Line height as a multiplier of font size.
    #[serde(default)]
    pub line_height: Option<f64>,
    /// Space after each verse. Defaults to half an em.
    #[serde(default)]
    pub paragraph_spacing: Option<f64>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Colophon details. Only printed, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    /// Already-formatted date string supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// The multi-column text container, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub column_count: u32,
    pub column_gap: f64,
}

impl ContainerGeometry {
    pub fn column_width(&self) -> f64 {
        let gaps = self.column_gap * (self.column_count.saturating_sub(1)) as f64;
        (self.width - gaps) / self.column_count.max(1) as f64
    }

    /// Left edge of column `index`, in canvas coordinates.
    pub fn column_x(&self, index: usize) -> f64 {
        self.x + index as f64 * (self.column_width() + self.column_gap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: f64,
    pub line_height: f64,
    pub paragraph_spacing: f64,
}

impl Typography {
    /// Vertical advance of one line.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }
}

/// A configuration with every default applied and every value checked.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub seed: i64,
    pub theme: Theme,
    pub canvas: CanvasSize,
    pub geometry: ContainerGeometry,
    pub typography: Typography,
    pub metadata: Metadata,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply theme defaults and validate.
    ///
    /// Any geometry that cannot hold at least one column of text is a
    /// configuration error; nothing is generated from it.
    pub fn resolve(&self) -> Result<ResolvedPage> {
        let theme = Theme::named(self.theme.unwrap_or_default());

        let canvas = CanvasSize {
            width: self.canvas_width.unwrap_or(theme.canvas_width),
            height: self.canvas_height.unwrap_or(theme.canvas_height),
        };
        positive("canvasWidth", canvas.width)?;
        positive("canvasHeight", canvas.height)?;

        let margin = self.margin.unwrap_or(DEFAULT_MARGIN);
        non_negative("margin", margin)?;

        let font_size = self.font_size.unwrap_or(theme.font_size);
        positive("fontSize", font_size)?;
        let line_height = self.line_height.unwrap_or(DEFAULT_LINE_HEIGHT);
        positive("lineHeight", line_height)?;
        let paragraph_spacing = self.paragraph_spacing.unwrap_or(font_size * 0.5);
        non_negative("paragraphSpacing", paragraph_spacing)?;

        let column_count = self.column_count.unwrap_or(theme.column_count);
        if column_count == 0 {
            return Err(VersoError::Config("columnCount must be at least 1".into()));
        }
        let column_gap = self.column_gap.unwrap_or(font_size);
        non_negative("columnGap", column_gap)?;

        let geometry = ContainerGeometry {
            x: margin,
            y: margin,
            width: canvas.width - 2.0 * margin,
            height: canvas.height - 2.0 * margin,
            column_count,
            column_gap,
        };
        if geometry.width <= 0.0 || geometry.height <= 0.0 {
            return Err(VersoError::Config(format!(
                "margin {} leaves no room on a {}x{} canvas",
                margin, canvas.width, canvas.height
            )));
        }
        if geometry.column_width() <= 0.0 {
            return Err(VersoError::Config(format!(
                "{} columns with a {} gap do not fit in {}",
                column_count, column_gap, geometry.width
            )));
        }

        let font_family = self
            .font_family
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());

        Ok(ResolvedPage {
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            theme,
            canvas,
            geometry,
            typography: Typography {
                font_family,
                font_size,
                line_height,
                paragraph_spacing,
            },
            metadata: self.metadata.clone(),
        })
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(VersoError::Config(format!("{} must be a positive number, got {}", name, v)))
    }
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(VersoError::Config(format!("{} must not be negative, got {}", name, v)))
    }
}
