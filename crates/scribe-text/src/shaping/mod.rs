//! Arabic contextual shaping, syllable reordering and digit substitution.
//!
//! Shaping works on logical-order code points and never changes the
//! length of the text: each character maps to exactly one output character,
//! and syllable reordering only permutes characters within a syllable.

pub mod arabic;
pub mod digits;
pub mod shaper;
pub mod syllables;

use serde::{Deserialize, Serialize};

pub use arabic::{Form, JoiningType, joining_type, nominal_letter, presentation_form};
pub use shaper::ArabicShaper;

/// Letter shaping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterShaping {
    /// Leave letters as they are.
    None,
    /// Replace nominal letters with positional presentation forms and
    /// move pre-base vowels and medials in front of their base.
    #[default]
    Shape,
    /// Replace presentation forms with their nominal letters. Syllable
    /// order is left as it is.
    Unshape,
}

/// Digit set used for Arabic-Indic digit substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitShaping {
    /// No digit substitution.
    #[default]
    None,
    /// U+0660..U+0669.
    ArabicIndic,
    /// U+06F0..U+06F9 (Persian, Urdu).
    ArabicIndicExtended,
}

impl DigitShaping {
    /// Code point of the zero digit in this set.
    pub fn zero(self) -> Option<char> {
        match self {
            DigitShaping::None => None,
            DigitShaping::ArabicIndic => Some('\u{0660}'),
            DigitShaping::ArabicIndicExtended => Some('\u{06F0}'),
        }
    }
}

/// Which digits get converted, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitConversion {
    /// European to Arabic-Indic, or the reverse when unshaping letters.
    #[default]
    Auto,
    EuropeanToArabic,
    ArabicToEuropean,
    /// European digits become Arabic-Indic only after Arabic letters.
    /// The start of the text counts as left-to-right context.
    ContextualLtr,
    /// Like `ContextualLtr`, but the start of the text counts as Arabic.
    ContextualArabic,
}

impl DigitConversion {
    pub fn is_contextual(self) -> bool {
        matches!(
            self,
            DigitConversion::ContextualLtr | DigitConversion::ContextualArabic
        )
    }
}

/// Ordering of the text handed to the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    /// Logical (reading) order.
    #[default]
    Logical,
    /// Already reordered for left-to-right display.
    VisualLtr,
}

/// Options for the Arabic shaping stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingOptions {
    pub letters: LetterShaping,
    pub digits: DigitShaping,
    pub digit_conversion: DigitConversion,
    pub direction_assumption: TextDirection,
}
