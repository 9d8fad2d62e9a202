//! Bidirectional (BiDi) text support following UAX-9.
//!
//! - Character classification
//! - Paragraph direction detection and embedding level resolution
//! - Line-level reset, visual reordering and glyph mirroring

pub mod brackets;
pub mod class;
pub(crate) mod explicit;
pub(crate) mod implicit;
pub mod levels;
pub mod mirror;
pub mod reorder;

pub use class::{BidiClass, classify, classify_all, is_bidi_control, is_strong_rtl};
pub use levels::{
    Level, MAX_DEPTH, NestingOverflow, ParagraphDirection, ResolvedLevels, paragraph_level,
    resolve_levels,
};
pub use mirror::{mirror_of, mirrored_glyph};
pub use reorder::{
    BidiRun, ReorderOptions, VisualWriter, level_runs, line_levels, visual_order, visual_runs,
};
