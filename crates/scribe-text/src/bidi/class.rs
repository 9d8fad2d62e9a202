//! Bidirectional character classes (UAX-9 `Bidi_Class`).
//!
//! Lookup is delegated to the hardcoded Unicode tables shipped with
//! `unicode-bidi`; everything above the lookup is implemented here.

use unicode_bidi::BidiClass as DataClass;

/// Directional category of a code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidiClass {
    // Strong
    L,
    R,
    AL,
    // Weak
    EN,
    ES,
    ET,
    AN,
    CS,
    NSM,
    BN,
    // Neutral
    B,
    S,
    WS,
    ON,
    // Explicit formatting
    LRE,
    LRO,
    RLE,
    RLO,
    PDF,
    LRI,
    RLI,
    FSI,
    PDI,
}

impl BidiClass {
    /// L, R or AL.
    pub fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    /// LRI, RLI or FSI.
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
    }

    /// Characters removed from resolution by rule X9.
    pub fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            BidiClass::LRE
                | BidiClass::RLE
                | BidiClass::LRO
                | BidiClass::RLO
                | BidiClass::PDF
                | BidiClass::BN
        )
    }

    /// Neutral or isolate formatting class ("NI" in UAX-9).
    pub fn is_neutral_or_isolate(self) -> bool {
        matches!(
            self,
            BidiClass::B
                | BidiClass::S
                | BidiClass::WS
                | BidiClass::ON
                | BidiClass::LRI
                | BidiClass::RLI
                | BidiClass::FSI
                | BidiClass::PDI
        )
    }
}

impl From<DataClass> for BidiClass {
    fn from(class: DataClass) -> Self {
        match class {
            DataClass::L => BidiClass::L,
            DataClass::R => BidiClass::R,
            DataClass::AL => BidiClass::AL,
            DataClass::EN => BidiClass::EN,
            DataClass::ES => BidiClass::ES,
            DataClass::ET => BidiClass::ET,
            DataClass::AN => BidiClass::AN,
            DataClass::CS => BidiClass::CS,
            DataClass::NSM => BidiClass::NSM,
            DataClass::BN => BidiClass::BN,
            DataClass::B => BidiClass::B,
            DataClass::S => BidiClass::S,
            DataClass::WS => BidiClass::WS,
            DataClass::ON => BidiClass::ON,
            DataClass::LRE => BidiClass::LRE,
            DataClass::LRO => BidiClass::LRO,
            DataClass::RLE => BidiClass::RLE,
            DataClass::RLO => BidiClass::RLO,
            DataClass::PDF => BidiClass::PDF,
            DataClass::LRI => BidiClass::LRI,
            DataClass::RLI => BidiClass::RLI,
            DataClass::FSI => BidiClass::FSI,
            DataClass::PDI => BidiClass::PDI,
        }
    }
}

/// Bidi class of a single code point.
pub fn classify(ch: char) -> BidiClass {
    unicode_bidi::bidi_class(ch).into()
}

/// Bidi classes for a whole sequence, parallel to `text`.
pub fn classify_all(text: &[char]) -> Vec<BidiClass> {
    text.iter().copied().map(classify).collect()
}

/// Returns `true` for unambiguously right-to-left characters (R or AL).
pub fn is_strong_rtl(ch: char) -> bool {
    matches!(classify(ch), BidiClass::R | BidiClass::AL)
}

/// Returns `true` for characters stripped when control removal is on.
///
/// Covers the embedding/override/isolate controls plus the zero-width
/// joiners and implicit marks (ZWNJ, ZWJ, LRM, RLM, ALM).
pub fn is_bidi_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{061C}' | '\u{200C}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}
