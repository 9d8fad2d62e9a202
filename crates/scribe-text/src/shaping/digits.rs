//! European / Arabic-Indic digit substitution.

use crate::bidi::class::{BidiClass, classify};
use crate::shaping::{DigitConversion, DigitShaping, LetterShaping};

/// Conversion actually performed once `Auto` is resolved against the
/// letter shaping mode.
pub fn effective_conversion(
    conversion: DigitConversion,
    letters: LetterShaping,
) -> DigitConversion {
    match (conversion, letters) {
        (DigitConversion::Auto, LetterShaping::Unshape) => DigitConversion::ArabicToEuropean,
        (DigitConversion::Auto, _) => DigitConversion::EuropeanToArabic,
        (other, _) => other,
    }
}

fn to_arabic(ch: char, zero: char) -> char {
    match ch.to_digit(10) {
        Some(d) if ch.is_ascii_digit() => char::from_u32(zero as u32 + d).unwrap_or(ch),
        _ => ch,
    }
}

fn to_european(ch: char, zero: char) -> char {
    let offset = (ch as u32).wrapping_sub(zero as u32);
    if offset < 10 {
        char::from_u32('0' as u32 + offset).unwrap_or(ch)
    } else {
        ch
    }
}

/// Rewrite digits in `text` (logical order) in place.
///
/// Contextual conversion tracks the last strong character: European digits
/// after an Arabic letter (class AL) become Arabic-Indic, digits after L or
/// R stay European.
pub fn convert(text: &mut [char], set: DigitShaping, conversion: DigitConversion) {
    let Some(zero) = set.zero() else {
        return;
    };
    match conversion {
        DigitConversion::Auto | DigitConversion::EuropeanToArabic => {
            for ch in text.iter_mut() {
                *ch = to_arabic(*ch, zero);
            }
        }
        DigitConversion::ArabicToEuropean => {
            for ch in text.iter_mut() {
                *ch = to_european(*ch, zero);
            }
        }
        DigitConversion::ContextualLtr | DigitConversion::ContextualArabic => {
            let mut arabic = conversion == DigitConversion::ContextualArabic;
            for ch in text.iter_mut() {
                match classify(*ch) {
                    BidiClass::L | BidiClass::R => arabic = false,
                    BidiClass::AL => arabic = true,
                    _ if arabic => *ch = to_arabic(*ch, zero),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converted(text: &str, set: DigitShaping, conversion: DigitConversion) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        convert(&mut chars, set, conversion);
        chars.into_iter().collect()
    }

    #[test]
    fn european_to_arabic_indic() {
        assert_eq!(
            converted("a 2024", DigitShaping::ArabicIndic, DigitConversion::EuropeanToArabic),
            "a ٢٠٢٤"
        );
        assert_eq!(
            converted("39", DigitShaping::ArabicIndicExtended, DigitConversion::EuropeanToArabic),
            "۳۹"
        );
    }

    #[test]
    fn arabic_indic_to_european() {
        assert_eq!(
            converted("٢٠ and ۳", DigitShaping::ArabicIndic, DigitConversion::ArabicToEuropean),
            "20 and ۳"
        );
    }

    #[test]
    fn contextual_follows_last_strong_character() {
        let text = "12 سلام 34 abc 56";
        assert_eq!(
            converted(text, DigitShaping::ArabicIndic, DigitConversion::ContextualLtr),
            "12 سلام ٣٤ abc 56"
        );
        assert_eq!(
            converted(text, DigitShaping::ArabicIndic, DigitConversion::ContextualArabic),
            "١٢ سلام ٣٤ abc 56"
        );
        // Hebrew is strong R but not Arabic.
        assert_eq!(
            converted("א 7", DigitShaping::ArabicIndic, DigitConversion::ContextualArabic),
            "א 7"
        );
    }

    #[test]
    fn no_digit_set_is_a_no_op() {
        assert_eq!(
            converted("123", DigitShaping::None, DigitConversion::EuropeanToArabic),
            "123"
        );
    }

    #[test]
    fn auto_depends_on_letter_mode() {
        assert_eq!(
            effective_conversion(DigitConversion::Auto, LetterShaping::Shape),
            DigitConversion::EuropeanToArabic
        );
        assert_eq!(
            effective_conversion(DigitConversion::Auto, LetterShaping::Unshape),
            DigitConversion::ArabicToEuropean
        );
        assert_eq!(
            effective_conversion(DigitConversion::ContextualLtr, LetterShaping::Unshape),
            DigitConversion::ContextualLtr
        );
    }
}
