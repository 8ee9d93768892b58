//! Line-granular multi-column flow.
//!
//! [`ColumnFlow`] is the production [`MeasurementPort`]. Each appended verse
//! is broken into lines at the column width and the lines are stacked down
//! the current column. A line that does not fit the remaining height starts
//! the next column. The container overflows when a line is taller than a
//! whole column (vertical), or when the text needs a column past the last
//! one or a line is wider than its column (horizontal).
//!
//! Rotation is a paint-time effect and does not take part in the flow.

use super::{ContainerHandle, MeasurementPort, MeasurementUnavailable, Overflow, StyledVerse};
use crate::font::FontMetrics;
use crate::model::{ContainerGeometry, Typography};
use crate::text::{RunStyle, TextLayout};
use serde::{Deserialize, Serialize};
use std::ops::Range;

const WIDTH_EPSILON: f64 = 1e-6;

/// One line of a verse at its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedLine {
    pub column: usize,
    /// Left edge of the column.
    pub x: f64,
    /// Top of the line box.
    pub top: f64,
    pub baseline: f64,
    /// Natural width, letter spacing included.
    pub width: f64,
    /// Width of the column the line sits in.
    pub available: f64,
    /// Line box height.
    pub height: f64,
    /// Byte range into the verse text.
    pub range: Range<usize>,
    pub spaces: usize,
    /// Stretched to the column width. False for a verse's last line.
    pub justify: bool,
}

impl PlacedLine {
    /// Extra advance per inter-word space when justified.
    pub fn word_spacing(&self) -> f64 {
        if self.justify && self.spaces > 0 {
            ((self.available - self.width) / self.spaces as f64).max(0.0)
        } else {
            0.0
        }
    }
}

/// Where one verse's lines ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersePlacement {
    pub lines: Vec<PlacedLine>,
    pub overflow: Overflow,
}

impl VersePlacement {
    /// The verse's lines grouped by column, in order.
    pub fn column_fragments(&self) -> Vec<&[PlacedLine]> {
        let mut fragments = Vec::new();
        let mut start = 0;
        for i in 1..=self.lines.len() {
            if i == self.lines.len() || self.lines[i].column != self.lines[start].column {
                fragments.push(&self.lines[start..i]);
                start = i;
            }
        }
        fragments
    }
}

/// Centre of a column fragment: the pivot a verse rotates about.
pub fn fragment_centre(lines: &[PlacedLine]) -> (f64, f64) {
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => (
            first.x + first.available / 2.0,
            (first.top + last.top + last.height) / 2.0,
        ),
        _ => (0.0, 0.0),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ColumnCursor {
    column: usize,
    /// Offset from the container top.
    y: f64,
}

/// The multi-column container.
pub struct ColumnFlow<'m> {
    geometry: ContainerGeometry,
    typography: Typography,
    metrics: &'m FontMetrics,
    text_layout: TextLayout,
    cursor: ColumnCursor,
    /// Cursor before each placed verse, for removal.
    history: Vec<ColumnCursor>,
    placements: Vec<VersePlacement>,
    generation: u64,
    current: Option<ContainerHandle>,
}

impl<'m> ColumnFlow<'m> {
    pub fn new(geometry: ContainerGeometry, typography: Typography, metrics: &'m FontMetrics) -> Self {
        Self {
            geometry,
            typography,
            metrics,
            text_layout: TextLayout::new(),
            cursor: ColumnCursor::default(),
            history: Vec::new(),
            placements: Vec::new(),
            generation: 0,
            current: None,
        }
    }

    pub fn placements(&self) -> &[VersePlacement] {
        &self.placements
    }

    pub fn into_placements(self) -> Vec<VersePlacement> {
        self.placements
    }

    /// Number of columns holding at least one line.
    pub fn columns_used(&self) -> usize {
        self.placements
            .iter()
            .flat_map(|p| p.lines.last())
            .map(|l| l.column + 1)
            .max()
            .unwrap_or(0)
    }

    fn flow(&mut self, styled: &StyledVerse) -> VersePlacement {
        let column_width = self.geometry.column_width();
        let column_count = self.geometry.column_count as usize;
        let font_size = self.typography.font_size;
        let advance = self.typography.line_advance();
        let ascent = self.metrics.ascent_ratio() * font_size;
        let half_leading = (advance - font_size) / 2.0;

        let run = RunStyle {
            font_size,
            bold: styled.style.bold,
            letter_spacing: styled.style.letter_spacing,
        };
        let broken =
            self.text_layout
                .break_into_lines(self.metrics, styled.verse.text(), column_width, run);

        let mut overflow = Overflow::default();
        let last = broken.len().saturating_sub(1);
        let mut lines = Vec::with_capacity(broken.len());

        for (i, line) in broken.into_iter().enumerate() {
            if advance > self.geometry.height {
                overflow.vertical = true;
            } else if self.cursor.y > 0.0 && self.cursor.y + advance > self.geometry.height {
                self.cursor.column += 1;
                self.cursor.y = 0.0;
            }
            if self.cursor.column >= column_count || line.width > column_width + WIDTH_EPSILON {
                overflow.horizontal = true;
            }

            let top = self.geometry.y + self.cursor.y;
            lines.push(PlacedLine {
                column: self.cursor.column,
                x: self.geometry.column_x(self.cursor.column),
                top,
                baseline: top + half_leading + ascent,
                width: line.width,
                available: column_width,
                height: advance,
                range: line.range,
                spaces: line.spaces,
                justify: i < last,
            });
            self.cursor.y += advance;
        }

        self.cursor.y += self.typography.paragraph_spacing;
        VersePlacement { lines, overflow }
    }
}

impl MeasurementPort for ColumnFlow<'_> {
    fn append_styled_text(&mut self, verse: &StyledVerse) -> ContainerHandle {
        self.history.push(self.cursor);
        let placement = self.flow(verse);
        tracing::trace!(
            lines = placement.lines.len(),
            column = self.cursor.column,
            "appended verse"
        );
        self.placements.push(placement);
        self.generation += 1;
        let handle = ContainerHandle::new(self.generation);
        self.current = Some(handle);
        handle
    }

    fn measure_overflow(&self, handle: ContainerHandle) -> Result<Overflow, MeasurementUnavailable> {
        if self.current != Some(handle) {
            return Err(MeasurementUnavailable);
        }
        Ok(self
            .placements
            .iter()
            .fold(Overflow::default(), |acc, p| Overflow {
                vertical: acc.vertical || p.overflow.vertical,
                horizontal: acc.horizontal || p.overflow.horizontal,
            }))
    }

    fn remove_last(&mut self, handle: ContainerHandle) {
        if self.current != Some(handle) {
            tracing::warn!(generation = handle.generation(), "ignoring removal with a stale handle");
            return;
        }
        self.placements.pop();
        if let Some(previous) = self.history.pop() {
            self.cursor = previous;
        }
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::VerseStyle;
    use crate::text::Verse;

    fn geometry(width: f64, height: f64, columns: u32) -> ContainerGeometry {
        ContainerGeometry {
            x: 10.0,
            y: 10.0,
            width,
            height,
            column_count: columns,
            column_gap: 10.0,
        }
    }

    fn typography() -> Typography {
        Typography {
            font_family: "Helvetica".into(),
            font_size: 10.0,
            line_height: 1.2,
            paragraph_spacing: 0.0,
        }
    }

    fn styled(text: &str) -> StyledVerse {
        StyledVerse {
            verse: Verse::new(text),
            style: VerseStyle {
                letter_spacing: 0.0,
                rotation_degrees: 0.0,
                bold: false,
                italic: false,
                color: 0,
            },
        }
    }

    const LONG: &str = "the quick brown fox jumps over the lazy dog and keeps on running \
                        through fields of wheat until the sun goes down behind the hills";

    #[test]
    fn short_verse_fits_first_column() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(410.0, 100.0, 2), typography(), &metrics);
        let h = flow.append_styled_text(&styled("a robot wrote this"));
        assert_eq!(flow.measure_overflow(h), Ok(Overflow::default()));
        let line = &flow.placements()[0].lines[0];
        assert_eq!(line.column, 0);
        assert_eq!(line.x, 10.0);
        assert_eq!(line.top, 10.0);
        assert!(!line.justify);
        assert_eq!(flow.columns_used(), 1);
    }

    #[test]
    fn lines_continue_in_the_next_column() {
        let metrics = FontMetrics::standard();
        // 3 lines per column, 100px columns.
        let mut flow = ColumnFlow::new(geometry(210.0, 36.0, 2), typography(), &metrics);
        let h = flow.append_styled_text(&styled(&LONG[..80]));
        assert_eq!(flow.measure_overflow(h), Ok(Overflow::default()));
        let placement = &flow.placements()[0];
        assert!(placement.lines.len() > 3);
        assert_eq!(placement.lines[3].column, 1);
        assert_eq!(placement.lines[3].x, 120.0);
        assert_eq!(placement.lines[3].top, 10.0);
        assert_eq!(placement.column_fragments().len(), 2);
    }

    #[test]
    fn running_out_of_columns_is_horizontal_overflow() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(100.0, 24.0, 1), typography(), &metrics);
        let h = flow.append_styled_text(&styled(LONG));
        let overflow = flow.measure_overflow(h).unwrap();
        assert!(overflow.horizontal);
        assert!(!overflow.vertical);
    }

    #[test]
    fn line_taller_than_column_is_vertical_overflow() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(100.0, 8.0, 1), typography(), &metrics);
        let h = flow.append_styled_text(&styled("hi"));
        assert!(flow.measure_overflow(h).unwrap().vertical);
    }

    #[test]
    fn removal_restores_the_cursor() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(210.0, 36.0, 2), typography(), &metrics);
        let first = flow.append_styled_text(&styled("one"));
        assert!(flow.measure_overflow(first).is_ok());
        let before = flow.cursor;
        let second = flow.append_styled_text(&styled(LONG));
        assert!(flow.measure_overflow(second).unwrap().any());
        flow.remove_last(second);
        assert_eq!(flow.cursor, before);
        assert_eq!(flow.placements().len(), 1);

        let third = flow.append_styled_text(&styled("two"));
        assert_eq!(flow.measure_overflow(third), Ok(Overflow::default()));
        assert_eq!(flow.placements()[1].lines[0].top, 22.0);
    }

    #[test]
    fn stale_handles_are_unavailable() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(210.0, 100.0, 2), typography(), &metrics);
        let first = flow.append_styled_text(&styled("one"));
        let _second = flow.append_styled_text(&styled("two"));
        assert_eq!(flow.measure_overflow(first), Err(MeasurementUnavailable));
        assert_eq!(
            flow.measure_overflow(ContainerHandle::new(99)),
            Err(MeasurementUnavailable)
        );
    }

    #[test]
    fn only_inner_lines_are_justified() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(410.0, 400.0, 2), typography(), &metrics);
        flow.append_styled_text(&styled(LONG));
        let lines = &flow.placements()[0].lines;
        assert!(lines.len() > 2);
        for line in &lines[..lines.len() - 1] {
            assert!(line.justify);
            assert!(line.word_spacing() >= 0.0);
            assert!(line.width + line.word_spacing() * line.spaces as f64 <= line.available + 1e-6);
        }
        let last = lines.last().unwrap();
        assert!(!last.justify);
        assert_eq!(last.word_spacing(), 0.0);
    }

    #[test]
    fn paragraph_spacing_separates_verses() {
        let metrics = FontMetrics::standard();
        let typo = Typography {
            paragraph_spacing: 5.0,
            ..typography()
        };
        let mut flow = ColumnFlow::new(geometry(410.0, 400.0, 2), typo, &metrics);
        flow.append_styled_text(&styled("one"));
        flow.append_styled_text(&styled("two"));
        assert_eq!(flow.placements()[1].lines[0].top, 10.0 + 12.0 + 5.0);
    }

    #[test]
    fn fragment_centre_is_mid_column() {
        let metrics = FontMetrics::standard();
        let mut flow = ColumnFlow::new(geometry(210.0, 100.0, 2), typography(), &metrics);
        flow.append_styled_text(&styled("one"));
        let (cx, cy) = fragment_centre(&flow.placements()[0].lines);
        assert_eq!(cx, 60.0);
        assert_eq!(cy, 16.0);
    }
}
