use core::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bidi::class::{BidiClass, is_bidi_control};
use crate::bidi::levels::{Level, ResolvedLevels};
use crate::bidi::mirror::mirrored_glyph;
use crate::error::{Error, Result};

/// A run of text with a single BiDi embedding level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    /// Character range in the logical text.
    pub range: Range<usize>,
    /// Embedding level for this run.
    pub level: Level,
}

impl BidiRun {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn is_rtl(&self) -> bool {
        self.level.is_rtl()
    }
}

/// Output-side switches for the reorder writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderOptions {
    /// Substitute mirror-image glyphs for characters at odd levels.
    pub mirroring: bool,
    /// Drop bidi control characters from the output.
    pub remove_controls: bool,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            mirroring: true,
            remove_controls: true,
        }
    }
}

/// Rule L1: per-line levels with separators and trailing whitespace reset.
///
/// Segment and paragraph separators go back to the paragraph level, along
/// with any whitespace, isolate formatting or removed characters directly
/// before them or at the end of the text.
pub fn line_levels(resolved: &ResolvedLevels) -> Vec<Level> {
    let mut levels = resolved.levels.clone();
    let paragraph = resolved.paragraph_level;
    // Start of the current trailing whitespace sequence, if any.
    let mut trailing: Option<usize> = None;

    for (i, class) in resolved.classes.iter().enumerate() {
        match class {
            BidiClass::S | BidiClass::B => {
                let start = trailing.take().unwrap_or(i);
                levels[start..=i].fill(paragraph);
            }
            class if resets_before_separator(*class) => {
                trailing.get_or_insert(i);
            }
            _ => trailing = None,
        }
    }
    if let Some(start) = trailing {
        levels[start..].fill(paragraph);
    }
    levels
}

fn resets_before_separator(class: BidiClass) -> bool {
    matches!(
        class,
        BidiClass::WS | BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI
    ) || class.is_removed_by_x9()
}

/// Split a leveled sequence into maximal same-level runs, in logical order.
pub fn level_runs(levels: &[Level]) -> Vec<BidiRun> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=levels.len() {
        if i == levels.len() || levels[i] != levels[start] {
            if i > start {
                runs.push(BidiRun {
                    range: start..i,
                    level: levels[start],
                });
            }
            start = i;
        }
    }
    runs
}

/// Rule L2: visual-to-logical index map.
///
/// `map[v]` is the logical index of the character shown at visual
/// position `v`. From the highest level down to the lowest odd level,
/// every maximal span at or above that level is reversed.
pub fn visual_order(levels: &[Level]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();
    let Some(highest) = levels.iter().map(|level| level.number()).max() else {
        return order;
    };
    let lowest = levels.iter().map(|level| level.number()).min().unwrap_or(0);
    let lowest_odd = if lowest % 2 == 1 { lowest } else { lowest + 1 };

    for threshold in (lowest_odd..=highest).rev() {
        let mut v = 0;
        while v < order.len() {
            if levels[order[v]].number() < threshold {
                v += 1;
                continue;
            }
            let start = v;
            while v < order.len() && levels[order[v]].number() >= threshold {
                v += 1;
            }
            order[start..v].reverse();
        }
    }
    order
}

/// Level runs in the order they are displayed, left to right.
pub fn visual_runs(levels: &[Level]) -> Vec<BidiRun> {
    let mut runs = level_runs(levels);
    if runs.len() < 2 {
        return runs;
    }
    let highest = runs.iter().map(|run| run.level.number()).max().unwrap_or(0);
    let lowest = runs.iter().map(|run| run.level.number()).min().unwrap_or(0);
    let lowest_odd = if lowest % 2 == 1 { lowest } else { lowest + 1 };

    for threshold in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < runs.len() {
            if runs[i].level.number() < threshold {
                i += 1;
                continue;
            }
            let start = i;
            while i < runs.len() && runs[i].level.number() >= threshold {
                i += 1;
            }
            runs[start..i].reverse();
        }
    }
    runs
}

/// Writes one scope of leveled text in visual order.
///
/// Construction does all of the reordering work, so [`VisualWriter::measure`]
/// is exact and [`VisualWriter::write_into`] only copies.
#[derive(Debug, Clone)]
pub struct VisualWriter {
    text: Vec<char>,
    levels: Vec<Level>,
    order: Vec<usize>,
    options: ReorderOptions,
}

impl VisualWriter {
    /// Prepare `text` (already shaped, logical order) for output.
    ///
    /// `resolved` must come from resolving the same `text`; a length
    /// mismatch is rejected.
    pub fn new(
        text: Vec<char>,
        resolved: &ResolvedLevels,
        options: ReorderOptions,
    ) -> Result<Self> {
        if text.len() != resolved.len() {
            return Err(Error::configuration(format!(
                "text has {} characters but levels were resolved for {}",
                text.len(),
                resolved.len()
            )));
        }
        let levels = line_levels(resolved);
        let order = visual_order(&levels);
        debug!(
            chars = text.len(),
            runs = level_runs(&levels).len(),
            max_level = resolved.max_level().number(),
            "computed visual order"
        );
        Ok(Self {
            text,
            levels,
            order,
            options,
        })
    }

    pub fn options(&self) -> ReorderOptions {
        self.options
    }

    /// Levels after rule L1, in logical order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Visual-to-logical index map, before control removal.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn runs(&self) -> Vec<BidiRun> {
        visual_runs(&self.levels)
    }

    fn is_dropped(&self, ch: char) -> bool {
        self.options.remove_controls && is_bidi_control(ch)
    }

    fn visual_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.order.iter().filter_map(move |&logical| {
            let ch = self.text[logical];
            if self.is_dropped(ch) {
                return None;
            }
            if self.options.mirroring && self.levels[logical].is_rtl() {
                Some(mirrored_glyph(ch))
            } else {
                Some(ch)
            }
        })
    }

    /// Exact number of characters [`VisualWriter::write_into`] produces.
    pub fn measure(&self) -> usize {
        if self.options.remove_controls {
            self.text.iter().filter(|&&ch| !is_bidi_control(ch)).count()
        } else {
            self.text.len()
        }
    }

    /// Write the visual sequence into `out`, returning the count written.
    pub fn write_into(&self, out: &mut [char]) -> Result<usize> {
        let required = self.measure();
        Error::check_capacity(required, out.len())?;
        for (slot, ch) in out.iter_mut().zip(self.visual_chars()) {
            *slot = ch;
        }
        Ok(required)
    }

    pub fn into_vec(self) -> Vec<char> {
        self.visual_chars().collect()
    }
}
