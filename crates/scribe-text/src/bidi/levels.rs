use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bidi::class::{BidiClass, classify_all};
use crate::bidi::{explicit, implicit};
use crate::error::{Error, Result};

/// Maximum explicit embedding depth (UAX-9 `max_depth`).
pub const MAX_DEPTH: u8 = 125;

/// Embedding level of a single character.
///
/// Even levels are left-to-right, odd levels right-to-left. Explicit
/// levels never exceed [`MAX_DEPTH`]; implicit resolution can lift a
/// character at most one level above that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

impl Level {
    pub const LTR: Level = Level(0);
    pub const RTL: Level = Level(1);

    /// Build a level from a raw number, rejecting anything past the
    /// implicit maximum.
    pub fn new(number: u8) -> Option<Level> {
        (number <= MAX_DEPTH + 1).then_some(Level(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_rtl(self) -> bool {
        self.0 % 2 == 1
    }

    pub fn is_ltr(self) -> bool {
        !self.is_rtl()
    }

    /// Strong class matching this level's direction (L or R).
    pub fn direction(self) -> BidiClass {
        if self.is_rtl() {
            BidiClass::R
        } else {
            BidiClass::L
        }
    }

    /// Least odd level greater than this one, if it is a valid explicit level.
    pub fn next_rtl(self) -> Option<Level> {
        let next = if self.is_rtl() { self.0 + 2 } else { self.0 + 1 };
        (next <= MAX_DEPTH).then_some(Level(next))
    }

    /// Least even level greater than this one, if it is a valid explicit level.
    pub fn next_ltr(self) -> Option<Level> {
        let next = if self.is_rtl() { self.0 + 1 } else { self.0 + 2 };
        (next <= MAX_DEPTH).then_some(Level(next))
    }

    pub(crate) fn raise(&mut self, amount: u8) {
        self.0 += amount;
    }
}

/// Base direction policy for one scope of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphDirection {
    /// Force a left-to-right paragraph.
    Ltr,
    /// Force a right-to-left paragraph.
    Rtl,
    /// Detect from the first strong character, LTR when there is none.
    #[default]
    AutoDefaultLtr,
    /// Detect from the first strong character, RTL when there is none.
    AutoDefaultRtl,
}

impl ParagraphDirection {
    /// Level forced by this policy, `None` for auto-detection.
    pub fn explicit_level(self) -> Option<Level> {
        match self {
            ParagraphDirection::Ltr => Some(Level::LTR),
            ParagraphDirection::Rtl => Some(Level::RTL),
            ParagraphDirection::AutoDefaultLtr | ParagraphDirection::AutoDefaultRtl => None,
        }
    }

    fn fallback_level(self) -> Level {
        match self {
            ParagraphDirection::Rtl | ParagraphDirection::AutoDefaultRtl => Level::RTL,
            ParagraphDirection::Ltr | ParagraphDirection::AutoDefaultLtr => Level::LTR,
        }
    }
}

/// Record of embeddings or isolates dropped because the stack was full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestingOverflow {
    /// Index of the first formatting character that could not be pushed.
    pub first_index: usize,
    /// Number of initiators (embeddings, overrides, isolates) dropped.
    pub dropped: usize,
}

impl From<NestingOverflow> for Error {
    fn from(overflow: NestingOverflow) -> Self {
        Error::NestingOverflow {
            index: overflow.first_index,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Output of the level resolver for one scope of text.
#[derive(Debug, Clone)]
pub struct ResolvedLevels {
    /// Original bidi classes, parallel to the input.
    pub classes: Vec<BidiClass>,
    /// Resolved embedding levels (through rule I2), parallel to the input.
    pub levels: Vec<Level>,
    /// Paragraph embedding level chosen by rules P2/P3 or the caller.
    pub paragraph_level: Level,
    /// Set when explicit nesting went past [`MAX_DEPTH`].
    pub overflow: Option<NestingOverflow>,
}

impl ResolvedLevels {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest resolved level, or the paragraph level for empty input.
    pub fn max_level(&self) -> Level {
        self.levels
            .iter()
            .copied()
            .max()
            .unwrap_or(self.paragraph_level)
    }

    /// `true` when nothing needs to be reversed.
    pub fn is_pure_ltr(&self) -> bool {
        self.levels.iter().all(|level| level.number() == 0)
    }

    /// Turn a recorded nesting overflow into an error.
    pub fn check_nesting(&self) -> Result<()> {
        match self.overflow {
            Some(overflow) => Err(overflow.into()),
            None => Ok(()),
        }
    }
}

/// Rules P2/P3: paragraph level from the first strong character.
///
/// Characters between an isolate initiator and its matching PDI are
/// skipped. Returns the explicit level when the policy forces one.
pub fn paragraph_level(text: &[char], direction: ParagraphDirection) -> Level {
    if let Some(level) = direction.explicit_level() {
        return level;
    }
    let classes = classify_all(text);
    let matching = explicit::matching_pdis(&classes);
    detect_level(&classes, &matching, direction)
}

fn detect_level(
    classes: &[BidiClass],
    matching: &[Option<usize>],
    direction: ParagraphDirection,
) -> Level {
    if let Some(level) = direction.explicit_level() {
        return level;
    }
    match explicit::first_strong(classes, matching, 0, classes.len()) {
        Some(BidiClass::L) => Level::LTR,
        Some(_) => Level::RTL,
        None => direction.fallback_level(),
    }
}

/// Resolve embedding levels for `text` (UAX-9 phases P, X, W, N and I).
///
/// Excess nesting is not fatal: the overflowing formatting characters are
/// ignored, a warning is logged and the event is recorded on the result.
pub fn resolve_levels(text: &[char], direction: ParagraphDirection) -> ResolvedLevels {
    let classes = classify_all(text);
    let matching = explicit::matching_pdis(&classes);
    let paragraph_level = detect_level(&classes, &matching, direction);

    let explicit::Explicit {
        mut levels,
        mut processing,
        overflow,
    } = explicit::compute(&classes, &matching, paragraph_level);

    let sequences = implicit::isolating_run_sequences(paragraph_level, &classes, &levels, &matching);
    for sequence in &sequences {
        implicit::resolve_weak(sequence, &mut processing);
        implicit::resolve_brackets(text, sequence, &classes, &mut processing);
        implicit::resolve_neutral(sequence, &mut processing);
        implicit::resolve_implicit_levels(sequence, &processing, &mut levels);
    }
    implicit::assign_removed_levels(&classes, paragraph_level, &mut levels);

    debug!(
        chars = text.len(),
        paragraph_level = paragraph_level.number(),
        sequences = sequences.len(),
        "resolved bidi levels"
    );

    ResolvedLevels {
        classes,
        levels,
        paragraph_level,
        overflow,
    }
}
