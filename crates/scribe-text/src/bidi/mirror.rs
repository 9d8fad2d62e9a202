//! Glyph mirroring for characters displayed in right-to-left runs (rule L4).
//!
//! Backed by the `Bidi_Mirroring_Glyph` property data compiled into
//! `icu_properties`. Mirrored characters without a mirror-image
//! counterpart in Unicode are left unchanged.

use icu_properties::CodePointMapData;
use icu_properties::props::BidiMirroringGlyph;

/// Mirror-image counterpart of `ch`, if it has one.
pub fn mirror_of(ch: char) -> Option<char> {
    CodePointMapData::<BidiMirroringGlyph>::new()
        .get(ch)
        .mirroring_glyph
}

/// Return the mirrored glyph for `ch`, or `ch` itself when it has none.
pub fn mirrored_glyph(ch: char) -> char {
    mirror_of(ch).unwrap_or(ch)
}
