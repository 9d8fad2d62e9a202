//! Arabic joining properties and presentation-form tables.
//!
//! Forms are stored the way Unicode lays them out in the Presentation
//! Forms-A and -B blocks: isolated, final, initial, medial, contiguous
//! from the isolated form. Right-joining letters only have the first two.

use icu_properties::CodePointMapData;
use icu_properties::props::GeneralCategory;

/// Arabic joining type (`Joining_Type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoiningType {
    /// Joins the preceding character only.
    Right,
    /// Joins the following character only.
    Left,
    Dual,
    /// Tatweel and ZWJ: joins on both sides without changing form itself.
    Causing,
    NonJoining,
    /// Combining marks, skipped when looking for neighbors.
    Transparent,
}

impl JoiningType {
    /// Can connect to the logically preceding character.
    pub fn joins_backward(self) -> bool {
        matches!(
            self,
            JoiningType::Right | JoiningType::Dual | JoiningType::Causing
        )
    }

    /// Can connect to the logically following character.
    pub fn joins_forward(self) -> bool {
        matches!(
            self,
            JoiningType::Left | JoiningType::Dual | JoiningType::Causing
        )
    }
}

/// Positional form of a joining letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Isolated,
    Final,
    Initial,
    Medial,
}

impl Form {
    /// Form taken by a letter given which of its neighbors it connects to.
    pub fn select(joins_previous: bool, joins_next: bool) -> Form {
        match (joins_previous, joins_next) {
            (false, false) => Form::Isolated,
            (true, false) => Form::Final,
            (false, true) => Form::Initial,
            (true, true) => Form::Medial,
        }
    }

    fn offset(self) -> u32 {
        match self {
            Form::Isolated => 0,
            Form::Final => 1,
            Form::Initial => 2,
            Form::Medial => 3,
        }
    }

    fn from_offset(offset: u32) -> Option<Form> {
        match offset {
            0 => Some(Form::Isolated),
            1 => Some(Form::Final),
            2 => Some(Form::Initial),
            3 => Some(Form::Medial),
            _ => None,
        }
    }

    /// How a character already in this form connects to its neighbors.
    fn joining_type(self) -> JoiningType {
        match self {
            Form::Isolated => JoiningType::NonJoining,
            Form::Final => JoiningType::Right,
            Form::Initial => JoiningType::Left,
            Form::Medial => JoiningType::Dual,
        }
    }
}

struct Letter {
    nominal: char,
    isolated: u32,
    forms: u32,
}

const fn letter(nominal: char, isolated: u32, forms: u32) -> Letter {
    Letter {
        nominal,
        isolated,
        forms,
    }
}

// Nominal letter, isolated form, number of forms.
const LETTERS: &[Letter] = &[
    letter('\u{0621}', 0xFE80, 1),
    letter('\u{0622}', 0xFE81, 2),
    letter('\u{0623}', 0xFE83, 2),
    letter('\u{0624}', 0xFE85, 2),
    letter('\u{0625}', 0xFE87, 2),
    letter('\u{0626}', 0xFE89, 4),
    letter('\u{0627}', 0xFE8D, 2),
    letter('\u{0628}', 0xFE8F, 4),
    letter('\u{0629}', 0xFE93, 2),
    letter('\u{062A}', 0xFE95, 4),
    letter('\u{062B}', 0xFE99, 4),
    letter('\u{062C}', 0xFE9D, 4),
    letter('\u{062D}', 0xFEA1, 4),
    letter('\u{062E}', 0xFEA5, 4),
    letter('\u{062F}', 0xFEA9, 2),
    letter('\u{0630}', 0xFEAB, 2),
    letter('\u{0631}', 0xFEAD, 2),
    letter('\u{0632}', 0xFEAF, 2),
    letter('\u{0633}', 0xFEB1, 4),
    letter('\u{0634}', 0xFEB5, 4),
    letter('\u{0635}', 0xFEB9, 4),
    letter('\u{0636}', 0xFEBD, 4),
    letter('\u{0637}', 0xFEC1, 4),
    letter('\u{0638}', 0xFEC5, 4),
    letter('\u{0639}', 0xFEC9, 4),
    letter('\u{063A}', 0xFECD, 4),
    letter('\u{0641}', 0xFED1, 4),
    letter('\u{0642}', 0xFED5, 4),
    letter('\u{0643}', 0xFED9, 4),
    letter('\u{0644}', 0xFEDD, 4),
    letter('\u{0645}', 0xFEE1, 4),
    letter('\u{0646}', 0xFEE5, 4),
    letter('\u{0647}', 0xFEE9, 4),
    letter('\u{0648}', 0xFEED, 2),
    letter('\u{0649}', 0xFEEF, 2),
    letter('\u{064A}', 0xFEF1, 4),
    letter('\u{0671}', 0xFB50, 2),
    letter('\u{0679}', 0xFB66, 4),
    letter('\u{067A}', 0xFB5E, 4),
    letter('\u{067B}', 0xFB52, 4),
    letter('\u{067E}', 0xFB56, 4),
    letter('\u{0686}', 0xFB7A, 4),
    letter('\u{0688}', 0xFB88, 2),
    letter('\u{068C}', 0xFB84, 2),
    letter('\u{068D}', 0xFB82, 2),
    letter('\u{068E}', 0xFB86, 2),
    letter('\u{0691}', 0xFB8C, 2),
    letter('\u{0698}', 0xFB8A, 2),
    letter('\u{06A4}', 0xFB6A, 4),
    letter('\u{06A9}', 0xFB8E, 4),
    letter('\u{06AF}', 0xFB92, 4),
    letter('\u{06BA}', 0xFB9E, 2),
    letter('\u{06BB}', 0xFBA0, 4),
    letter('\u{06BE}', 0xFBAA, 4),
    letter('\u{06C0}', 0xFBA4, 2),
    letter('\u{06C1}', 0xFBA6, 4),
    letter('\u{06C5}', 0xFBE0, 2),
    letter('\u{06C6}', 0xFBD9, 2),
    letter('\u{06C7}', 0xFBD7, 2),
    letter('\u{06C8}', 0xFBDB, 2),
    letter('\u{06C9}', 0xFBE2, 2),
    letter('\u{06CB}', 0xFBDE, 2),
    letter('\u{06CC}', 0xFBFC, 4),
    letter('\u{06D0}', 0xFBE4, 4),
    letter('\u{06D2}', 0xFBAE, 2),
    letter('\u{06D3}', 0xFBB0, 2),
];

// Joining types for the Arabic block, as inclusive ranges. Anything not
// listed is non-joining unless it is a mark or a format character.
const JOINING_RANGES: &[(u32, u32, JoiningType)] = &[
    (0x0600, 0x0605, JoiningType::NonJoining),
    (0x0620, 0x0620, JoiningType::Dual),
    (0x0622, 0x0625, JoiningType::Right),
    (0x0626, 0x0626, JoiningType::Dual),
    (0x0627, 0x0627, JoiningType::Right),
    (0x0628, 0x0628, JoiningType::Dual),
    (0x0629, 0x0629, JoiningType::Right),
    (0x062A, 0x062E, JoiningType::Dual),
    (0x062F, 0x0632, JoiningType::Right),
    (0x0633, 0x063F, JoiningType::Dual),
    (0x0640, 0x0640, JoiningType::Causing),
    (0x0641, 0x0647, JoiningType::Dual),
    (0x0648, 0x0649, JoiningType::Right),
    (0x064A, 0x064A, JoiningType::Dual),
    (0x066E, 0x066F, JoiningType::Dual),
    (0x0671, 0x0673, JoiningType::Right),
    (0x0675, 0x0677, JoiningType::Right),
    (0x0678, 0x0687, JoiningType::Dual),
    (0x0688, 0x0699, JoiningType::Right),
    (0x069A, 0x06B9, JoiningType::Dual),
    (0x06BA, 0x06BA, JoiningType::Right),
    (0x06BB, 0x06BF, JoiningType::Dual),
    (0x06C0, 0x06C0, JoiningType::Right),
    (0x06C1, 0x06C2, JoiningType::Dual),
    (0x06C3, 0x06CB, JoiningType::Right),
    (0x06CC, 0x06CC, JoiningType::Dual),
    (0x06CD, 0x06CD, JoiningType::Right),
    (0x06CE, 0x06CE, JoiningType::Dual),
    (0x06CF, 0x06CF, JoiningType::Right),
    (0x06D0, 0x06D1, JoiningType::Dual),
    (0x06D2, 0x06D3, JoiningType::Right),
    (0x06D5, 0x06D5, JoiningType::Right),
    (0x06DD, 0x06DD, JoiningType::NonJoining),
    (0x06EE, 0x06EF, JoiningType::Right),
    (0x06FA, 0x06FC, JoiningType::Dual),
    (0x06FF, 0x06FF, JoiningType::Dual),
    (0x200C, 0x200C, JoiningType::NonJoining),
    (0x200D, 0x200D, JoiningType::Causing),
];

const TASHKEEL_FIRST: u32 = 0x064B;
const TASHKEEL_LAST: u32 = 0x0652;
const TASHKEEL_FORMS: u32 = 0xFE70;

fn find_letter(nominal: char) -> Option<&'static Letter> {
    LETTERS
        .binary_search_by_key(&nominal, |letter| letter.nominal)
        .ok()
        .map(|i| &LETTERS[i])
}

/// Presentation form of a nominal letter in the given position.
///
/// `None` when the letter has no such form, e.g. the initial form of a
/// right-joining letter.
pub fn presentation_form(nominal: char, form: Form) -> Option<char> {
    let letter = find_letter(nominal)?;
    let offset = form.offset();
    if offset >= letter.forms {
        return None;
    }
    char::from_u32(letter.isolated + offset)
}

/// Nominal letter and position of a presentation form.
///
/// Harakat forms (U+FE70..U+FE7F) map back to their combining marks.
/// Ligatures such as Lam-Alef have no single nominal letter and return
/// `None`.
pub fn nominal_letter(ch: char) -> Option<(char, Form)> {
    let code = ch as u32;
    if let Some(mark) = tashkeel_nominal(code) {
        return Some((mark, Form::Isolated));
    }
    LETTERS.iter().find_map(|letter| {
        let offset = code.checked_sub(letter.isolated)?;
        if offset < letter.forms {
            Some((letter.nominal, Form::from_offset(offset)?))
        } else {
            None
        }
    })
}

fn tashkeel_nominal(code: u32) -> Option<char> {
    let offset = code.checked_sub(TASHKEEL_FORMS)?;
    // U+FE73 is the tail fragment and U+FE75 is unassigned.
    if offset > 0x0F || offset == 0x03 || offset == 0x05 {
        return None;
    }
    char::from_u32(TASHKEEL_FIRST + offset / 2)
}

/// `true` for the Lam-Alef ligatures U+FEF5..U+FEFC.
pub fn is_lam_alef(ch: char) -> bool {
    ('\u{FEF5}'..='\u{FEFC}').contains(&ch)
}

/// `true` for the harakat U+064B..U+0652 that have presentation forms.
pub fn is_tashkeel(ch: char) -> bool {
    (TASHKEEL_FIRST..=TASHKEEL_LAST).contains(&(ch as u32))
}

/// Spacing presentation form of a haraka.
///
/// The medial variant sits on a tatweel between two joined letters; fathatan
/// has one, dammatan and kasratan do not.
pub fn tashkeel_form(mark: char, medial: bool) -> Option<char> {
    if !is_tashkeel(mark) {
        return None;
    }
    let offset = (mark as u32 - TASHKEEL_FIRST) * 2;
    let has_medial = !matches!(mark, '\u{064C}' | '\u{064D}');
    let variant = u32::from(medial && has_medial);
    char::from_u32(TASHKEEL_FORMS + offset + variant)
}

/// Joining type of `ch`.
///
/// Presentation forms report the joining behavior implied by their
/// position, so already-shaped neighbors keep affecting the letters
/// around them.
pub fn joining_type(ch: char) -> JoiningType {
    let code = ch as u32;
    if (TASHKEEL_FORMS..=TASHKEEL_FORMS + 0x0F).contains(&code) {
        return JoiningType::Transparent;
    }
    if is_lam_alef(ch) {
        return if code % 2 == 1 {
            JoiningType::NonJoining
        } else {
            JoiningType::Right
        };
    }
    if let Some(&(_, _, joining)) = JOINING_RANGES
        .iter()
        .find(|&&(start, end, _)| (start..=end).contains(&code))
    {
        return joining;
    }
    if matches!(code, 0xFB50..=0xFDFF | 0xFE70..=0xFEFE) {
        return match nominal_letter(ch) {
            Some((_, form)) => form.joining_type(),
            None => JoiningType::NonJoining,
        };
    }
    // Unlisted marks and format characters default to transparent.
    match CodePointMapData::<GeneralCategory>::new().get(ch) {
        GeneralCategory::NonspacingMark
        | GeneralCategory::EnclosingMark
        | GeneralCategory::Format => JoiningType::Transparent,
        _ => JoiningType::NonJoining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_sorted_for_lookup() {
        assert!(LETTERS.windows(2).all(|w| w[0].nominal < w[1].nominal));
    }

    #[test]
    fn looks_up_positional_forms() {
        // Seen: isolated, final, initial, medial.
        assert_eq!(presentation_form('\u{0633}', Form::Isolated), Some('\u{FEB1}'));
        assert_eq!(presentation_form('\u{0633}', Form::Final), Some('\u{FEB2}'));
        assert_eq!(presentation_form('\u{0633}', Form::Initial), Some('\u{FEB3}'));
        assert_eq!(presentation_form('\u{0633}', Form::Medial), Some('\u{FEB4}'));
        // Alef only has isolated and final forms.
        assert_eq!(presentation_form('\u{0627}', Form::Final), Some('\u{FE8E}'));
        assert_eq!(presentation_form('\u{0627}', Form::Initial), None);
        // Persian peh lives in Presentation Forms-A.
        assert_eq!(presentation_form('\u{067E}', Form::Medial), Some('\u{FB59}'));
        assert_eq!(presentation_form('a', Form::Isolated), None);
    }

    #[test]
    fn maps_forms_back_to_letters() {
        assert_eq!(nominal_letter('\u{FEE0}'), Some(('\u{0644}', Form::Medial)));
        assert_eq!(nominal_letter('\u{FE80}'), Some(('\u{0621}', Form::Isolated)));
        assert_eq!(nominal_letter('\u{FBFF}'), Some(('\u{06CC}', Form::Medial)));
        assert_eq!(nominal_letter('\u{FE7D}'), Some(('\u{0651}', Form::Isolated)));
        assert_eq!(nominal_letter('\u{FE73}'), None);
        assert_eq!(nominal_letter('\u{FEFB}'), None);
        assert_eq!(nominal_letter('\u{0644}'), None);
    }

    #[test]
    fn every_form_round_trips() {
        for letter in LETTERS {
            for offset in 0..letter.forms {
                let form = Form::from_offset(offset).unwrap();
                let shaped = presentation_form(letter.nominal, form).unwrap();
                assert_eq!(nominal_letter(shaped), Some((letter.nominal, form)));
            }
        }
    }

    #[test]
    fn classifies_joining_types() {
        assert_eq!(joining_type('\u{0628}'), JoiningType::Dual);
        assert_eq!(joining_type('\u{0627}'), JoiningType::Right);
        assert_eq!(joining_type('\u{0649}'), JoiningType::Right);
        assert_eq!(joining_type('\u{0621}'), JoiningType::NonJoining);
        assert_eq!(joining_type('\u{0640}'), JoiningType::Causing);
        assert_eq!(joining_type('\u{200D}'), JoiningType::Causing);
        assert_eq!(joining_type('\u{064E}'), JoiningType::Transparent);
        assert_eq!(joining_type('\u{0301}'), JoiningType::Transparent);
        assert_eq!(joining_type('a'), JoiningType::NonJoining);
        assert_eq!(joining_type('\u{200C}'), JoiningType::NonJoining);
    }

    #[test]
    fn format_characters_and_selectors_are_transparent() {
        for ch in ['\u{200E}', '\u{200F}', '\u{FEFF}', '\u{FE00}', '\u{FE0F}', '\u{20DD}'] {
            assert_eq!(joining_type(ch), JoiningType::Transparent, "{ch:?}");
        }
    }

    #[test]
    fn presentation_forms_join_by_position() {
        assert_eq!(joining_type('\u{FEB3}'), JoiningType::Left);
        assert_eq!(joining_type('\u{FEE0}'), JoiningType::Dual);
        assert_eq!(joining_type('\u{FE8E}'), JoiningType::Right);
        assert_eq!(joining_type('\u{FEE1}'), JoiningType::NonJoining);
        assert_eq!(joining_type('\u{FEFB}'), JoiningType::NonJoining);
        assert_eq!(joining_type('\u{FEFC}'), JoiningType::Right);
    }

    #[test]
    fn harakat_forms() {
        assert_eq!(tashkeel_form('\u{064E}', false), Some('\u{FE76}'));
        assert_eq!(tashkeel_form('\u{064E}', true), Some('\u{FE77}'));
        assert_eq!(tashkeel_form('\u{064C}', true), Some('\u{FE72}'));
        assert_eq!(tashkeel_form('\u{0652}', true), Some('\u{FE7F}'));
        assert_eq!(tashkeel_form('\u{0653}', false), None);
    }
}
