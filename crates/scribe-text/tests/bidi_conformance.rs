//! Cross-checks resolved line levels against the `unicode-bidi` reference
//! resolver on generated mixed-direction text.

use scribe_text::bidi::{BidiClass, ParagraphDirection, classify, line_levels, resolve_levels};
use unicode_bidi::BidiInfo;

const POOL: &[char] = &[
    'a', 'b', 'א', 'ב', 'س', 'ل', '1', '2', '\u{0663}', '+', '-', '$', '%', ',', '.', ':',
    '\u{0301}', ' ', '\t', '!', '"', '(', ')', '[', ']', '\u{2991}', '\u{2992}', '\u{2329}',
    '\u{3009}', '\u{200B}', '\u{200E}', '\u{200F}', '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}',
    '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
];

fn reference_direction(direction: ParagraphDirection) -> Option<unicode_bidi::Level> {
    match direction {
        ParagraphDirection::Ltr => Some(unicode_bidi::Level::ltr()),
        ParagraphDirection::Rtl => Some(unicode_bidi::Level::rtl()),
        _ => None,
    }
}

/// Levels of characters kept after X9, from our resolver and the reference.
fn compare(text: &[char], direction: ParagraphDirection) -> (Vec<u8>, Vec<u8>) {
    let resolved = resolve_levels(text, direction);
    let ours = line_levels(&resolved);

    let string: String = text.iter().collect();
    let info = BidiInfo::new(&string, reference_direction(direction));
    assert_eq!(info.paragraphs.len(), 1, "{string:?} split into paragraphs");
    let paragraph = &info.paragraphs[0];
    let reference = info.reordered_levels_per_char(paragraph, paragraph.range.clone());
    assert_eq!(reference.len(), text.len());

    let kept = |i: &usize| !is_removed(classify(text[*i]));
    let ours = (0..text.len())
        .filter(kept)
        .map(|i| ours[i].number())
        .collect();
    let reference = (0..text.len())
        .filter(kept)
        .map(|i| reference[i].number())
        .collect();
    (ours, reference)
}

fn is_removed(class: BidiClass) -> bool {
    matches!(
        class,
        BidiClass::BN
            | BidiClass::LRE
            | BidiClass::RLE
            | BidiClass::LRO
            | BidiClass::RLO
            | BidiClass::PDF
    )
}

#[test]
fn matches_reference_on_generated_text() {
    let mut rng = fastrand::Rng::with_seed(0x5C21_BE00);
    let directions = [
        ParagraphDirection::Ltr,
        ParagraphDirection::Rtl,
        ParagraphDirection::AutoDefaultLtr,
    ];

    for iteration in 0..5_000 {
        let len = rng.usize(1..=24);
        let text: Vec<char> = (0..len).map(|_| POOL[rng.usize(..POOL.len())]).collect();
        let direction = directions[iteration % directions.len()];
        let (ours, reference) = compare(&text, direction);
        assert_eq!(
            ours, reference,
            "iteration {iteration}: {:?} ({direction:?})",
            text.iter().collect::<String>()
        );
    }
}

#[test]
fn bracket_pairs_beyond_ascii() {
    for text in ["a(b)א", "a\u{2991}b\u{2992}א", "a\u{29D8}b\u{29D9}א", "a\u{2329}b\u{3009}א"] {
        let chars: Vec<char> = text.chars().collect();
        let (ours, reference) = compare(&chars, ParagraphDirection::Rtl);
        assert_eq!(ours, vec![2, 2, 2, 2, 1], "{text:?}");
        assert_eq!(ours, reference, "{text:?}");
    }
}
