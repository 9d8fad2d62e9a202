//! Paired bracket data (`Bidi_Paired_Bracket`, `Bidi_Paired_Bracket_Type`).
//!
//! Backed by the tables shipped with `unicode-bidi`, which already fold
//! canonically equivalent brackets onto a single opening character.

use unicode_bidi::{BidiDataSource, HardcodedBidiData};

/// Whether a paired bracket opens or closes a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

/// A paired bracket, identified by the canonical opening character of its pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub opening: char,
    pub kind: BracketKind,
}

/// Paired-bracket properties of `ch`, if it is a paired bracket.
pub fn bracket(ch: char) -> Option<Bracket> {
    HardcodedBidiData
        .bidi_matched_opening_bracket(ch)
        .map(|matched| Bracket {
            opening: matched.opening,
            kind: if matched.is_open {
                BracketKind::Open
            } else {
                BracketKind::Close
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_ascii_brackets() {
        assert_eq!(
            bracket('('),
            Some(Bracket {
                opening: '(',
                kind: BracketKind::Open
            })
        );
        assert_eq!(
            bracket(']'),
            Some(Bracket {
                opening: '[',
                kind: BracketKind::Close
            })
        );
        assert_eq!(bracket('<'), None);
        assert_eq!(bracket('a'), None);
    }

    #[test]
    fn angle_brackets_share_canonical_opening() {
        let legacy = bracket('\u{232A}').unwrap();
        let cjk = bracket('\u{3009}').unwrap();
        assert_eq!(legacy.opening, cjk.opening);
        assert_eq!(bracket('\u{2329}').unwrap().opening, '\u{3008}');
    }

    #[test]
    fn recognizes_math_and_supplemental_brackets() {
        assert_eq!(
            bracket('\u{2991}'),
            Some(Bracket {
                opening: '\u{2991}',
                kind: BracketKind::Open
            })
        );
        assert_eq!(
            bracket('\u{2992}'),
            Some(Bracket {
                opening: '\u{2991}',
                kind: BracketKind::Close
            })
        );
        assert_eq!(bracket('\u{29D9}').map(|b| b.opening), Some('\u{29D8}'));
        assert_eq!(bracket('\u{2E5C}').map(|b| b.kind), Some(BracketKind::Close));
    }
}
