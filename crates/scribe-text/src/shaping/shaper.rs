use tracing::debug;

use crate::error::{Error, Result};

use super::arabic::{
    Form, JoiningType, is_tashkeel, joining_type, nominal_letter, presentation_form, tashkeel_form,
};
use super::{digits, syllables};
use super::{DigitConversion, DigitShaping, LetterShaping, ShapingOptions, TextDirection};

/// Contextual Arabic shaper over `char` sequences.
///
/// Shaping is one-to-one: no ligatures are formed and no characters are
/// inserted or removed, so the output always has the input's length.
/// Forms are chosen from logical-order neighbors only. When letters are
/// shaped, syllables of scripts with pre-base vowels are reordered too
/// (see [`syllables`](super::syllables)).
#[derive(Debug, Clone)]
pub struct ArabicShaper {
    options: ShapingOptions,
}

impl ArabicShaper {
    /// Build a shaper, rejecting option combinations that conflict.
    pub fn new(options: ShapingOptions) -> Result<Self> {
        validate(&options)?;
        Ok(Self { options })
    }

    pub fn options(&self) -> ShapingOptions {
        self.options
    }

    /// Exact output length for `input`.
    pub fn measure(&self, input: &[char]) -> usize {
        input.len()
    }

    /// Shape `input` into the front of `out`, returning the count written.
    pub fn shape_into(&self, input: &[char], out: &mut [char]) -> Result<usize> {
        let required = self.measure(input);
        Error::check_capacity(required, out.len())?;
        let out = &mut out[..required];
        out.copy_from_slice(input);
        self.fill(input, out);
        Ok(required)
    }

    /// Convenience wrapper returning a fresh vector.
    pub fn shape(&self, input: &[char]) -> Vec<char> {
        let mut out = input.to_vec();
        self.fill(input, &mut out);
        out
    }

    /// Shape in place. `out` starts as a copy of `input`.
    fn fill(&self, input: &[char], out: &mut [char]) {
        let conversion = digits::effective_conversion(
            self.options.digit_conversion,
            self.options.letters,
        );
        // Contextual digits need logical order; that pairing is rejected
        // for visual input at construction.
        digits::convert(out, self.options.digits, conversion);

        match self.options.letters {
            LetterShaping::None => {}
            LetterShaping::Shape => {
                self.shape_letters(input, out);
                syllables::reorder(out);
            }
            LetterShaping::Unshape => unshape_letters(out),
        }

        debug!(
            chars = out.len(),
            letters = ?self.options.letters,
            digits = ?self.options.digits,
            "shaped text"
        );
    }

    fn shape_letters(&self, input: &[char], out: &mut [char]) {
        let n = input.len();
        let types: Vec<JoiningType> = input.iter().map(|&ch| joining_type(ch)).collect();
        let visual = self.options.direction_assumption == TextDirection::VisualLtr;
        // Storage index of the k-th character in logical order.
        let at = |k: usize| if visual { n - 1 - k } else { k };

        let neighbor = |k: usize, forward: bool| -> Option<JoiningType> {
            let mut k = k;
            loop {
                k = if forward {
                    k.checked_add(1).filter(|&next| next < n)?
                } else {
                    k.checked_sub(1)?
                };
                let joining = types[at(k)];
                if joining != JoiningType::Transparent {
                    return Some(joining);
                }
            }
        };

        for k in 0..n {
            let i = at(k);
            let ch = input[i];
            let joining = types[i];

            if is_tashkeel(ch) {
                let medial = neighbor(k, false).is_some_and(JoiningType::joins_forward)
                    && neighbor(k, true).is_some_and(JoiningType::joins_backward);
                if let Some(form) = tashkeel_form(ch, medial) {
                    out[i] = form;
                }
                continue;
            }
            if !matches!(joining, JoiningType::Right | JoiningType::Dual) {
                continue;
            }

            let joins_previous =
                joining.joins_backward() && neighbor(k, false).is_some_and(JoiningType::joins_forward);
            let joins_next =
                joining.joins_forward() && neighbor(k, true).is_some_and(JoiningType::joins_backward);
            if let Some(shaped) = presentation_form(ch, Form::select(joins_previous, joins_next)) {
                out[i] = shaped;
            }
        }
    }
}

fn unshape_letters(out: &mut [char]) {
    for ch in out.iter_mut() {
        if let Some((nominal, _)) = nominal_letter(*ch) {
            *ch = nominal;
        }
    }
}

fn validate(options: &ShapingOptions) -> Result<()> {
    let conversion = options.digit_conversion;
    if options.digits == DigitShaping::None && conversion != DigitConversion::Auto {
        return Err(Error::configuration(format!(
            "digit conversion {conversion:?} needs a digit set"
        )));
    }
    let produces_arabic_digits = matches!(
        conversion,
        DigitConversion::EuropeanToArabic
            | DigitConversion::ContextualLtr
            | DigitConversion::ContextualArabic
    );
    if options.letters == LetterShaping::Unshape && produces_arabic_digits {
        return Err(Error::configuration(format!(
            "unshaping letters conflicts with digit conversion {conversion:?}"
        )));
    }
    if options.direction_assumption == TextDirection::VisualLtr && conversion.is_contextual() {
        return Err(Error::configuration(
            "contextual digit conversion requires logical text order",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn shaper(options: ShapingOptions) -> ArabicShaper {
        ArabicShaper::new(options).unwrap()
    }

    fn shape_only() -> ArabicShaper {
        shaper(ShapingOptions::default())
    }

    #[test]
    fn shapes_salam_by_position() {
        let out = shape_only().shape(&chars("سلام"));
        assert_eq!(out, vec!['\u{FEB3}', '\u{FEE0}', '\u{FE8E}', '\u{FEE1}']);
    }

    #[test]
    fn lone_letter_is_isolated() {
        assert_eq!(shape_only().shape(&chars("ب")), vec!['\u{FE8F}']);
        assert_eq!(shape_only().shape(&chars("ب ب")), vec!['\u{FE8F}', ' ', '\u{FE8F}']);
    }

    #[test]
    fn marks_do_not_break_joining() {
        // Beh + fatha + beh: the beh forms ignore the mark between them.
        let out = shape_only().shape(&chars("بَب"));
        assert_eq!(out, vec!['\u{FE91}', '\u{FE77}', '\u{FE90}']);
    }

    #[test]
    fn directional_marks_inside_a_word_keep_it_joined() {
        let out = shape_only().shape(&chars("س\u{200F}لام"));
        assert_eq!(
            out,
            vec!['\u{FEB3}', '\u{200F}', '\u{FEE0}', '\u{FE8E}', '\u{FEE1}']
        );
    }

    #[test]
    fn tatweel_joins_both_sides() {
        let out = shape_only().shape(&chars("بـ"));
        assert_eq!(out, vec!['\u{FE91}', '\u{0640}']);
    }

    #[test]
    fn presentation_forms_pass_through_and_still_join() {
        // An initial-form seen followed by a nominal alef: the alef joins it.
        let out = shape_only().shape(&['\u{FEB3}', '\u{0627}']);
        assert_eq!(out, vec!['\u{FEB3}', '\u{FE8E}']);
        // Lam-Alef is kept as is.
        assert_eq!(shape_only().shape(&['\u{FEFB}']), vec!['\u{FEFB}']);
    }

    #[test]
    fn visual_ltr_reads_predecessor_from_the_right() {
        let options = ShapingOptions {
            direction_assumption: TextDirection::VisualLtr,
            ..ShapingOptions::default()
        };
        let out = shaper(options).shape(&chars("مالس"));
        assert_eq!(out, vec!['\u{FEE1}', '\u{FE8E}', '\u{FEE0}', '\u{FEB3}']);
    }

    #[test]
    fn shape_then_unshape_round_trips() {
        let text = chars("مرحبا بالعالم كيف حالك");
        let shaped = shape_only().shape(&text);
        assert_ne!(shaped, text);
        let unshape = shaper(ShapingOptions {
            letters: LetterShaping::Unshape,
            ..ShapingOptions::default()
        });
        assert_eq!(unshape.shape(&shaped), text);
    }

    #[test]
    fn shapes_digits_with_letters() {
        let options = ShapingOptions {
            digits: DigitShaping::ArabicIndicExtended,
            ..ShapingOptions::default()
        };
        let out = shaper(options).shape(&chars("ب 39"));
        assert_eq!(out, vec!['\u{FE8F}', ' ', '\u{06F3}', '\u{06F9}']);
    }

    #[test]
    fn unshape_auto_restores_european_digits() {
        let options = ShapingOptions {
            letters: LetterShaping::Unshape,
            digits: DigitShaping::ArabicIndic,
            ..ShapingOptions::default()
        };
        let out = shaper(options).shape(&['\u{FE8F}', '\u{0661}']);
        assert_eq!(out, vec!['\u{0628}', '1']);
    }

    #[test]
    fn rejects_conflicting_options() {
        let conversion_without_set = ShapingOptions {
            digit_conversion: DigitConversion::EuropeanToArabic,
            ..ShapingOptions::default()
        };
        assert!(matches!(
            ArabicShaper::new(conversion_without_set),
            Err(Error::Configuration(_))
        ));

        let unshape_to_arabic = ShapingOptions {
            letters: LetterShaping::Unshape,
            digits: DigitShaping::ArabicIndic,
            digit_conversion: DigitConversion::EuropeanToArabic,
            ..ShapingOptions::default()
        };
        assert!(ArabicShaper::new(unshape_to_arabic).is_err());

        let visual_contextual = ShapingOptions {
            digits: DigitShaping::ArabicIndic,
            digit_conversion: DigitConversion::ContextualLtr,
            direction_assumption: TextDirection::VisualLtr,
            ..ShapingOptions::default()
        };
        assert!(ArabicShaper::new(visual_contextual).is_err());
    }

    #[test]
    fn shape_into_checks_capacity() {
        let input = chars("سلام");
        let shaper = shape_only();
        assert_eq!(shaper.measure(&input), 4);

        let mut small = ['\0'; 3];
        assert_eq!(
            shaper.shape_into(&input, &mut small),
            Err(Error::Capacity {
                required: 4,
                available: 3
            })
        );

        let mut large = ['\0'; 6];
        assert_eq!(shaper.shape_into(&input, &mut large), Ok(4));
        assert_eq!(large[4..], ['\0', '\0']);
    }

    #[test]
    fn reorders_pre_base_vowels_when_shaping() {
        let text = chars("မြန်မာ");
        let out = shape_only().shape(&text);
        assert_eq!(out, chars("\u{103C}\u{1019}\u{1014}\u{103A}\u{1019}\u{102C}"));

        let untouched = shaper(ShapingOptions {
            letters: LetterShaping::None,
            ..ShapingOptions::default()
        });
        assert_eq!(untouched.shape(&text), text);
    }

    #[test]
    fn letters_none_leaves_text_alone() {
        let options = ShapingOptions {
            letters: LetterShaping::None,
            ..ShapingOptions::default()
        };
        let text = chars("سلام");
        assert_eq!(shaper(options).shape(&text), text);
    }
}
