//! # Text Layout
//!
//! Verse segmentation and line breaking.
//!
//! Breaking is greedy over UAX#14 break opportunities. It is only as precise
//! as the font metrics behind it: good enough to decide how many verses fit a
//! page, not a typesetter.

pub mod segment;

pub use segment::{segment, Fragment, Verse};

use crate::font::FontMetrics;
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking, as a byte range into its source.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    /// Byte range of the line, trailing spaces excluded.
    pub range: Range<usize>,
    /// Width of the line without trailing spaces.
    pub width: f64,
    /// Number of inter-word spaces inside the line.
    pub spaces: usize,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Each entry is the break
/// opportunity *before* that character position. Index 0 is always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields byte offsets of the start of the next segment.
    let mut byte_to_char = vec![0usize; text.len() + 1];
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        byte_to_char[byte_idx] = char_idx;
    }
    byte_to_char[text.len()] = char_count;

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

/// Parameters of one run of text being broken.
#[derive(Debug, Clone, Copy)]
pub struct RunStyle {
    pub font_size: f64,
    pub bold: bool,
    /// Extra advance after every character, in points. May be negative.
    pub letter_spacing: f64,
}

pub struct TextLayout;

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Advance of each character, letter spacing included.
    pub fn measure_chars(&self, metrics: &FontMetrics, text: &str, run: RunStyle) -> Vec<f64> {
        text.chars()
            .map(|ch| metrics.char_width(ch, run.font_size, run.bold) + run.letter_spacing)
            .collect()
    }

    /// Break `text` into lines no wider than `max_width`.
    ///
    /// A line ends at the last break opportunity that fits. A word wider than
    /// the line is force-broken at the overflowing character.
    pub fn break_into_lines(
        &self,
        metrics: &FontMetrics,
        text: &str,
        max_width: f64,
        run: RunStyle,
    ) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![BrokenLine {
                range: 0..0,
                width: 0.0,
                spaces: 0,
            }];
        }

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let widths = self.measure_chars(metrics, text, run);
        let break_opps = compute_break_opportunities(text);

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for i in 0..chars.len() {
            let ch = chars[i].1;
            let char_width = widths[i];

            if i > 0 {
                match break_opps[i] {
                    Some(BreakOpportunity::Mandatory) => {
                        let end = if is_newline(chars[i - 1].1) { i - 1 } else { i };
                        lines.push(make_line(text, &chars, &widths, line_start, end));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    Some(BreakOpportunity::Allowed) => {
                        last_break_point = Some(i - 1);
                    }
                    None => {}
                }
            }

            if is_newline(ch) {
                continue;
            }

            if line_width + char_width > max_width && line_start < i {
                if let Some(bp) = last_break_point.filter(|bp| *bp >= line_start) {
                    lines.push(make_line(text, &chars, &widths, line_start, bp + 1));
                    line_start = bp + 1;
                    line_width = widths[line_start..=i].iter().sum();
                    last_break_point = None;
                    continue;
                }

                // No break point on this line: force a break here.
                lines.push(make_line(text, &chars, &widths, line_start, i));
                line_start = i;
                line_width = char_width;
                last_break_point = None;
                continue;
            }

            line_width += char_width;
        }

        if line_start < chars.len() {
            lines.push(make_line(text, &chars, &widths, line_start, chars.len()));
        }

        lines
    }
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Build a line from char indices `[start, end)`, trimming trailing spaces.
fn make_line(
    text: &str,
    chars: &[(usize, char)],
    widths: &[f64],
    start: usize,
    end: usize,
) -> BrokenLine {
    let mut trimmed_end = end;
    while trimmed_end > start && chars[trimmed_end - 1].1 == ' ' {
        trimmed_end -= 1;
    }

    let width: f64 = widths[start..trimmed_end].iter().sum();
    let spaces = chars[start..trimmed_end]
        .iter()
        .filter(|(_, c)| *c == ' ')
        .count();

    let byte_start = chars.get(start).map(|(b, _)| *b).unwrap_or(text.len());
    let byte_end = chars
        .get(trimmed_end)
        .map(|(b, _)| *b)
        .unwrap_or(text.len());

    BrokenLine {
        range: byte_start..byte_end.max(byte_start),
        width,
        spaces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(font_size: f64) -> RunStyle {
        RunStyle {
            font_size,
            bold: false,
            letter_spacing: 0.0,
        }
    }

    fn texts<'a>(text: &'a str, lines: &[BrokenLine]) -> Vec<&'a str> {
        lines.iter().map(|l| &text[l.range.clone()]).collect()
    }

    #[test]
    fn short_text_is_one_line() {
        let metrics = FontMetrics::standard();
        let tl = TextLayout::new();
        let lines = tl.break_into_lines(&metrics, "Hello world", 500.0, run(12.0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spaces, 1);
    }

    #[test]
    fn wraps_at_spaces() {
        let metrics = FontMetrics::standard();
        let tl = TextLayout::new();
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let lines = tl.break_into_lines(&metrics, text, 80.0, run(12.0));
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 80.0 + 1e-9, "line too wide: {:?}", line);
            let s = &text[line.range.clone()];
            assert!(!s.ends_with(' '));
            assert!(!s.starts_with(' '));
        }
        assert_eq!(texts(text, &lines).join(" "), text);
    }

    #[test]
    fn force_breaks_long_words() {
        let metrics = FontMetrics::standard();
        let tl = TextLayout::new();
        let text = "Supercalifragilisticexpialidocious";
        let lines = tl.break_into_lines(&metrics, text, 40.0, run(12.0));
        assert!(lines.len() > 2);
        assert_eq!(texts(text, &lines).concat(), text);
    }

    #[test]
    fn letter_spacing_widens_lines() {
        let metrics = FontMetrics::standard();
        let tl = TextLayout::new();
        let text = "spacing matters here";
        let tight = tl.break_into_lines(&metrics, text, 1000.0, run(12.0));
        let loose = tl.break_into_lines(
            &metrics,
            text,
            1000.0,
            RunStyle {
                letter_spacing: 0.5,
                ..run(12.0)
            },
        );
        assert!(loose[0].width > tight[0].width);
    }

    #[test]
    fn bold_is_wider() {
        let metrics = FontMetrics::standard();
        let tl = TextLayout::new();
        let regular = tl.break_into_lines(&metrics, "bold test", 1000.0, run(12.0));
        let bold = tl.break_into_lines(
            &metrics,
            "bold test",
            1000.0,
            RunStyle {
                bold: true,
                ..run(12.0)
            },
        );
        assert!(bold[0].width > regular[0].width);
    }

    #[test]
    fn multibyte_ranges_are_char_aligned() {
        let metrics = FontMetrics::standard();
        let tl = TextLayout::new();
        let text = "робот роботы роботов роботам роботами";
        let lines = tl.break_into_lines(&metrics, text, 60.0, run(12.0));
        for line in &lines {
            assert!(text.is_char_boundary(line.range.start));
            assert!(text.is_char_boundary(line.range.end));
        }
    }
}
