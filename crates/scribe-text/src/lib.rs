//! scribe-text: Arabic shaping and bidirectional reordering.
//!
//! Turns logical-order text mixing right-to-left and left-to-right scripts
//! into the code point sequence to lay out left to right:
//! - classification of bidi classes
//! - contextual Arabic shaping and digit substitution
//! - UAX-9 level resolution (explicit, weak, neutral, implicit)
//! - line-level reset, reordering, mirroring and control removal
//!
//! Each stage is usable on its own; [`Pipeline`] runs them in order.

pub mod bidi;
pub mod error;
pub mod pipeline;
pub mod shaping;
pub mod unicode;

pub use bidi::{
    BidiClass, BidiRun, Level, NestingOverflow, ParagraphDirection, ReorderOptions,
    ResolvedLevels, VisualWriter, classify, resolve_levels,
};
pub use error::{Error, Result};
pub use pipeline::{ParagraphOptions, Pipeline, PipelineConfig, Plan};
pub use shaping::{
    ArabicShaper, DigitConversion, DigitShaping, LetterShaping, ShapingOptions, TextDirection,
};
