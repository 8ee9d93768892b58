//! # Column Fill Engine
//!
//! Pours verses into a fixed multi-column container, one at a time, and stops
//! at the first verse that does not fit.
//!
//! The container never grows. The loop is:
//!
//! 1. Take the next verse in shuffle order.
//! 2. Draw its style. This happens *before* anything is known about fit, so
//!    the rejected verse consumes its five draws like every accepted one.
//! 3. Append it to the container and measure both axes.
//! 4. No overflow: keep it and continue. Overflow: take it back out and stop.
//!
//! There is no backtracking. A shorter verse later in the order that would
//! still have fit is never tried, so the accepted verses are always a prefix
//! of the shuffled sequence.
//!
//! Measurement is behind [`MeasurementPort`], so the engine runs against the
//! line-granular [`ColumnFlow`] in production and against scripted doubles in
//! tests.

pub mod columns;

pub use columns::{ColumnFlow, PlacedLine, VersePlacement};

use crate::random::Srg;
use crate::style::{VerseStyle, VerseStyleParams};
use crate::text::Verse;
use serde::{Deserialize, Serialize};

/// A verse together with the style drawn for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledVerse {
    pub verse: Verse,
    pub style: VerseStyle,
}

/// Opaque reference to the container state produced by one append.
///
/// A handle is only good until the next append or removal; measuring with
/// an older one reports [`MeasurementUnavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerHandle(u64);

impl ContainerHandle {
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Overflow state of the whole container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overflow {
    /// Content taller than a column.
    pub vertical: bool,
    /// Content needing more columns than the container has.
    pub horizontal: bool,
}

impl Overflow {
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

/// The surface could not produce a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("container measurement unavailable")]
pub struct MeasurementUnavailable;

/// The measurement surface the fill engine drives.
pub trait MeasurementPort {
    /// Append a verse at the end of the container.
    fn append_styled_text(&mut self, verse: &StyledVerse) -> ContainerHandle;

    /// Overflow of the container as of `handle`.
    fn measure_overflow(&self, handle: ContainerHandle) -> Result<Overflow, MeasurementUnavailable>;

    /// Remove the verse appended under `handle`.
    fn remove_last(&mut self, handle: ContainerHandle);
}

/// Why the fill stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum HaltReason {
    /// Every verse fit.
    Exhausted,
    /// The verse at shuffle index `rejected` overflowed.
    Overflow { rejected: usize },
    /// There was nothing to place.
    EmptyInput,
    /// Measuring the verse at shuffle index `at` failed.
    MeasurementUnavailable { at: usize },
}

/// The accepted verses, in placement order, and why the fill stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub accepted: Vec<StyledVerse>,
    pub halt: HaltReason,
}

impl LayoutResult {
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// The fill state machine.
pub struct ColumnFill<'a> {
    styles: &'a VerseStyleParams,
}

impl<'a> ColumnFill<'a> {
    pub fn new(styles: &'a VerseStyleParams) -> Self {
        Self { styles }
    }

    /// Fill `port` with `verses`, already in shuffle order.
    pub fn run<P: MeasurementPort>(
        &self,
        verses: Vec<Verse>,
        rng: &mut Srg,
        port: &mut P,
    ) -> LayoutResult {
        if verses.is_empty() {
            tracing::info!("no verses to place");
            return LayoutResult {
                accepted: Vec::new(),
                halt: HaltReason::EmptyInput,
            };
        }

        let total = verses.len();
        let mut accepted: Vec<StyledVerse> = Vec::with_capacity(total);

        for (index, verse) in verses.into_iter().enumerate() {
            let style = self.styles.generate(rng);
            let candidate = StyledVerse { verse, style };
            let handle = port.append_styled_text(&candidate);

            match port.measure_overflow(handle) {
                Ok(overflow) if overflow.any() => {
                    port.remove_last(handle);
                    tracing::info!(
                        accepted = accepted.len(),
                        total,
                        rejected = index,
                        vertical = overflow.vertical,
                        horizontal = overflow.horizontal,
                        "column fill stopped at overflow"
                    );
                    return LayoutResult {
                        accepted,
                        halt: HaltReason::Overflow { rejected: index },
                    };
                }
                Ok(_) => accepted.push(candidate),
                Err(e) => {
                    port.remove_last(handle);
                    tracing::warn!(
                        accepted = accepted.len(),
                        at = index,
                        "{}; keeping verses placed so far",
                        e
                    );
                    return LayoutResult {
                        accepted,
                        halt: HaltReason::MeasurementUnavailable { at: index },
                    };
                }
            }
        }

        tracing::info!(accepted = accepted.len(), "every verse fit");
        LayoutResult {
            accepted,
            halt: HaltReason::Exhausted,
        }
    }
}
