//! # Verse Segmentation
//!
//! Splits source prose into verses and annotates robot keywords.
//!
//! Keyword matching is whole-word and case-sensitive with ASCII word-boundary
//! rules: a boundary exists between two positions when exactly one side is
//! `[A-Za-z0-9_]`, and the text edges count as non-word. That is fine for the
//! Latin keywords, but a Cyrillic, Greek or Japanese keyword only matches where
//! one of its edges touches an ASCII word character. A standalone `робот` is
//! therefore *not* highlighted.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Robot keywords, grouped by language. Order is the scan order.
pub const ROBOT_WORDS: &[&str] = &[
    // English
    "robot", "robots", "Robot", "Robots", "ROBOT", "ROBOTS",
    // Russian
    "робот", "роботы", "роботов", "роботам", "роботами", "роботах",
    "Робот", "Роботы", "Роботов", "Роботам", "Роботами", "Роботах",
    // Japanese
    "ロボット",
    // Greek
    "ρομπότ",
    // German
    "roboter", "Roboter", "ROBOTER",
    // Czech, and its Cyrillic transliteration
    "robota", "робота",
];

/// One paragraph-like unit of source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    text: String,
    /// Byte ranges of highlighted keywords, sorted and non-overlapping.
    highlights: Vec<Range<usize>>,
}

/// A piece of a verse's decorated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Plain(&'a str),
    Highlight(&'a str),
}

impl Verse {
    /// Build a verse from already-normalized text and scan it for keywords.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let highlights = find_highlights(&text);
        Self { text, highlights }
    }

    /// The plain text, used for measurement.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn highlights(&self) -> &[Range<usize>] {
        &self.highlights
    }

    /// The decorated form: the text cut into plain and highlighted pieces.
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        fragments_in(&self.text, 0..self.text.len(), &self.highlights)
    }

    /// Decorated form of a byte sub-range, e.g. one broken line.
    pub fn fragments_in(&self, range: Range<usize>) -> Vec<Fragment<'_>> {
        fragments_in(&self.text, range, &self.highlights)
    }

    /// Decorated form as markup, highlights wrapped in a `robot-highlight` span.
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for fragment in self.fragments() {
            match fragment {
                Fragment::Plain(s) => out.push_str(s),
                Fragment::Highlight(s) => {
                    out.push_str("<span class=\"robot-highlight\">");
                    out.push_str(s);
                    out.push_str("</span>");
                }
            }
        }
        out
    }
}

/// Split raw text into verses.
///
/// Verses are separated by two or more consecutive newlines. Each candidate
/// is trimmed and its internal whitespace runs collapse to one space, the way
/// a text surface would render them; empty candidates are dropped.
pub fn segment(raw: &str) -> Vec<Verse> {
    let normalized = raw.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter_map(|piece| {
            let collapsed = piece.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() {
                None
            } else {
                Some(Verse::new(collapsed))
            }
        })
        .collect()
}

fn is_ascii_word(ch: Option<char>) -> bool {
    matches!(ch, Some(c) if c.is_ascii_alphanumeric() || c == '_')
}

/// Find every whole-word keyword match as a byte range.
pub fn find_highlights(text: &str) -> Vec<Range<usize>> {
    let mut found: Vec<Range<usize>> = Vec::new();

    for word in ROBOT_WORDS {
        let first = word.chars().next();
        let last = word.chars().next_back();
        for (start, _) in text.match_indices(word) {
            let end = start + word.len();
            let before = text[..start].chars().next_back();
            let after = text[end..].chars().next();
            let opens = is_ascii_word(before) != is_ascii_word(first);
            let closes = is_ascii_word(last) != is_ascii_word(after);
            if opens && closes {
                found.push(start..end);
            }
        }
    }

    found.sort_by_key(|r| (r.start, std::cmp::Reverse(r.end)));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(found.len());
    for r in found {
        match merged.last() {
            Some(prev) if r.start < prev.end => {}
            _ => merged.push(r),
        }
    }
    merged
}

fn fragments_in<'a>(
    text: &'a str,
    range: Range<usize>,
    highlights: &[Range<usize>],
) -> Vec<Fragment<'a>> {
    let mut out = Vec::new();
    let mut pos = range.start;
    for h in highlights {
        if h.end <= range.start || h.start >= range.end {
            continue;
        }
        let start = h.start.max(range.start);
        let end = h.end.min(range.end);
        if start > pos {
            out.push(Fragment::Plain(&text[pos..start]));
        }
        out.push(Fragment::Highlight(&text[start..end]));
        pos = end;
    }
    if pos < range.end {
        out.push(Fragment::Plain(&text[pos..range.end]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(text: &str) -> Vec<&str> {
        find_highlights(text)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn splits_on_blank_lines() {
        let verses = segment("Alpha beta.\n\nRobot says hi.\n\nGamma delta.");
        assert_eq!(verses.len(), 3);
        assert_eq!(verses[0].text(), "Alpha beta.");
        assert_eq!(verses[1].text(), "Robot says hi.");
        assert_eq!(verses[2].text(), "Gamma delta.");
    }

    #[test]
    fn drops_empty_and_whitespace_only_verses() {
        let verses = segment("\n\n  one  \n\n\n\n   \n\ntwo\r\n\r\nthree\n");
        let texts: Vec<&str> = verses.iter().map(|v| v.text()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn single_newlines_stay_inside_a_verse() {
        let verses = segment("first line\nsecond   line");
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].text(), "first line second line");
    }

    #[test]
    fn empty_input_has_no_verses() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n\n").is_empty());
    }

    #[test]
    fn whole_word_only() {
        assert_eq!(marked("a robot and robotics"), vec!["robot"]);
        assert_eq!(marked("robots, ROBOT!"), vec!["robots", "ROBOT"]);
        assert!(marked("Robotnik").is_empty());
    }

    #[test]
    fn german_and_czech_words_match() {
        assert_eq!(marked("Der Roboter kommt."), vec!["Roboter"]);
        assert_eq!(marked("robota means drudgery"), vec!["robota"]);
    }

    #[test]
    fn case_sensitive() {
        assert!(marked("rObOt").is_empty());
    }

    #[test]
    fn non_latin_keywords_need_an_ascii_neighbour() {
        // Documented limitation of ASCII word boundaries.
        assert!(marked("это робот").is_empty());
        assert!(marked("ロボット").is_empty());
        assert_eq!(marked("xロボットy"), vec!["ロボット"]);
    }

    #[test]
    fn markup_wraps_highlights() {
        let verse = Verse::new("Robot says hi.");
        assert_eq!(
            verse.to_markup(),
            "<span class=\"robot-highlight\">Robot</span> says hi."
        );
        assert_eq!(verse.text(), "Robot says hi.");
    }

    #[test]
    fn fragments_of_a_sub_range() {
        let verse = Verse::new("the robot is a robot");
        let frags = verse.fragments_in(6..13);
        assert_eq!(
            frags,
            vec![Fragment::Highlight("bot"), Fragment::Plain(" is ")]
        );
    }
}
