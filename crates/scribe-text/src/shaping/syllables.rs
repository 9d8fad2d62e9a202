//! Syllable reordering for scripts whose dependent vowels and medials are
//! typed after their base but displayed in front of it.
//!
//! Each syllable is a base (consonant, independent vowel or generic base),
//! any bases stacked onto it with a halant, and the marks that follow.
//! Reordering is a permutation of the syllable, so the text keeps its
//! length. Syllables without a base are left as they are.

/// Script with a reordering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Buginese,
    Javanese,
    Khmer,
    Myanmar,
    Tamil,
    Tibetan,
}

/// Role of a character inside a syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    /// Starts a syllable, or continues one after a halant.
    Base,
    /// Links the following base into the current syllable.
    Halant,
    /// Dependent vowel displayed before the base.
    PreBase,
    /// Medial consonant displayed before the base.
    MedialRa,
    BelowVowel,
    Anusvara,
    Joiner,
    /// Any other mark attached to the syllable.
    Mark,
    /// Ends the syllable.
    Other,
}

const KHMER_COENG: char = '\u{17D2}';
const KHMER_RO: char = '\u{179A}';
const MYANMAR_ASAT: char = '\u{103A}';
const MYANMAR_VIRAMA: char = '\u{1039}';

/// Script of `ch`, if it belongs to one with a reordering pass.
pub fn script_of(ch: char) -> Option<Script> {
    match ch as u32 {
        0x0B80..=0x0BFF => Some(Script::Tamil),
        0x0F00..=0x0FFF => Some(Script::Tibetan),
        0x1000..=0x109F | 0xA9E0..=0xA9FF | 0xAA60..=0xAA7F => Some(Script::Myanmar),
        0x1780..=0x17FF | 0x19E0..=0x19FF => Some(Script::Khmer),
        0x1A00..=0x1A1F => Some(Script::Buginese),
        0xA980..=0xA9DF => Some(Script::Javanese),
        _ => None,
    }
}

fn is_generic_base(ch: char) -> bool {
    matches!(
        ch as u32,
        0x00A0 | 0x00D7 | 0x2012..=0x2015 | 0x2022 | 0x25CC | 0x25FB..=0x25FE
    )
}

fn category(script: Script, ch: char) -> Category {
    let code = ch as u32;
    if matches!(code, 0x200D | 0x034F) {
        return Category::Joiner;
    }
    if (0xFE00..=0xFE0F).contains(&code) {
        return Category::Mark;
    }
    if script_of(ch) != Some(script) {
        return if is_generic_base(ch) {
            Category::Base
        } else {
            Category::Other
        };
    }
    match script {
        Script::Buginese => match code {
            0x1A00..=0x1A16 => Category::Base,
            0x1A19 => Category::PreBase,
            0x1A17 | 0x1A18 | 0x1A1A | 0x1A1B => Category::Mark,
            _ => Category::Other,
        },
        Script::Javanese => match code {
            0xA984..=0xA9B2 => Category::Base,
            0xA9C0 => Category::Halant,
            0xA9BA | 0xA9BB => Category::PreBase,
            0xA980..=0xA983 | 0xA9B3..=0xA9BF => Category::Mark,
            _ => Category::Other,
        },
        Script::Khmer => match code {
            0x1780..=0x17B3 => Category::Base,
            0x17D2 => Category::Halant,
            0x17C1..=0x17C3 => Category::PreBase,
            0x17B4..=0x17D1 | 0x17D3 | 0x17DD => Category::Mark,
            _ => Category::Other,
        },
        Script::Myanmar => match code {
            0x1000..=0x102A
            | 0x103F..=0x1049
            | 0x104E
            | 0x1050..=0x1055
            | 0x105A..=0x105D
            | 0x1061
            | 0x1065
            | 0x1066
            | 0x106E..=0x1070
            | 0x1075..=0x1081
            | 0x108E
            | 0x1090..=0x1099
            | 0xAA60..=0xAA6F
            | 0xAA71..=0xAA76
            | 0xAA7A => Category::Base,
            0x1039 => Category::Halant,
            0x1031 | 0x1084 => Category::PreBase,
            0x103C => Category::MedialRa,
            0x102F | 0x1030 | 0x1058 | 0x1059 => Category::BelowVowel,
            0x1032 | 0x1036 => Category::Anusvara,
            0x104A..=0x104D | 0x104F | 0x109E | 0x109F | 0xAA70 | 0xAA77..=0xAA79 => {
                Category::Other
            }
            0xA9E0..=0xA9FF | 0xAA7C..=0xAA7F => Category::Other,
            _ => Category::Mark,
        },
        // The pulli stays visible, so it closes the syllable instead of
        // stacking the next consonant.
        Script::Tamil => match code {
            0x0B85..=0x0BB9 => Category::Base,
            0x0BC6..=0x0BC8 => Category::PreBase,
            0x0B82 | 0x0B83 | 0x0BBE..=0x0BC2 | 0x0BCA..=0x0BCD | 0x0BD7 => Category::Mark,
            _ => Category::Other,
        },
        // Vowel signs of every position are placed before the head letter.
        Script::Tibetan => match code {
            0x0F40..=0x0F6C | 0x0F88..=0x0F8C => Category::Base,
            0x0F71..=0x0F7D | 0x0F80 | 0x0F81 => Category::PreBase,
            0x0F35 | 0x0F37 | 0x0F39 | 0x0F7E | 0x0F7F | 0x0F82..=0x0F87 => Category::Mark,
            0x0F8D..=0x0FBC | 0x0FC6 => Category::Mark,
            _ => Category::Other,
        },
    }
}

/// Reorder every syllable of a supported script in `text`, in place.
pub fn reorder(text: &mut [char]) {
    let mut start = 0;
    while start < text.len() {
        let Some(script) = syllable_script(text, start) else {
            start += 1;
            continue;
        };
        let end = syllable_end(script, text, start);
        if category(script, text[start]) == Category::Base {
            reorder_syllable(script, &mut text[start..end]);
        }
        start = end;
    }
}

/// Script of a syllable starting at `start`. A generic base takes the
/// script of the mark that follows it.
fn syllable_script(text: &[char], start: usize) -> Option<Script> {
    let ch = text[start];
    if is_generic_base(ch) {
        return text.get(start + 1).copied().and_then(script_of);
    }
    script_of(ch)
}

fn syllable_end(script: Script, text: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end < text.len() {
        match category(script, text[end]) {
            Category::Other => break,
            Category::Base if category(script, text[end - 1]) != Category::Halant => break,
            _ => end += 1,
        }
    }
    end
}

/// Length of a Myanmar kinzi (nga, asat, virama) heading the syllable.
fn kinzi_len(script: Script, syllable: &[char]) -> usize {
    match syllable {
        [first, MYANMAR_ASAT, MYANMAR_VIRAMA, base, ..]
            if script == Script::Myanmar
                && matches!(*first, '\u{1004}' | '\u{101B}' | '\u{105A}')
                && category(script, *base) == Category::Base =>
        {
            3
        }
        _ => 0,
    }
}

/// Length of a pre-base medial starting at `syllable[k]`.
fn medial_len(script: Script, syllable: &[char], k: usize) -> usize {
    match (script, &syllable[k..]) {
        (Script::Khmer, [KHMER_COENG, KHMER_RO, ..]) => 2,
        (_, [ch, ..]) if category(script, *ch) == Category::MedialRa => 1,
        _ => 0,
    }
}

fn reorder_syllable(script: Script, syllable: &mut [char]) {
    let kinzi = kinzi_len(script, syllable);
    let base = kinzi;

    let mut pre_base = Vec::new();
    let mut medials = Vec::new();
    let mut rest: Vec<char> = Vec::new();
    let mut k = base + 1;
    while k < syllable.len() {
        let ch = syllable[k];
        if category(script, ch) == Category::PreBase {
            pre_base.push(ch);
            k += 1;
            while k < syllable.len() && category(script, syllable[k]) == Category::Joiner {
                pre_base.push(syllable[k]);
                k += 1;
            }
            continue;
        }
        let medial = medial_len(script, syllable, k);
        if medial > 0 {
            medials.extend_from_slice(&syllable[k..k + medial]);
            k += medial;
            continue;
        }
        rest.push(ch);
        k += 1;
    }
    raise_anusvara(script, &mut rest);

    let mut reordered = Vec::with_capacity(syllable.len());
    reordered.extend(pre_base);
    reordered.extend(medials);
    reordered.push(syllable[base]);
    reordered.extend_from_slice(&syllable[..kinzi]);
    reordered.extend(rest);
    syllable.copy_from_slice(&reordered);
}

/// An anusvara directly after below-base vowels moves in front of them.
fn raise_anusvara(script: Script, marks: &mut [char]) {
    for i in 1..marks.len() {
        if category(script, marks[i]) != Category::Anusvara {
            continue;
        }
        let mut first = i;
        while first > 0 && category(script, marks[first - 1]) == Category::BelowVowel {
            first -= 1;
        }
        if first < i {
            marks[first..=i].rotate_right(1);
        }
    }
}
