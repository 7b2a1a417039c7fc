//! Digit words and the context-sensitive forms of 1, 4 and 5.
//!
//! Vietnamese reads most digits with one fixed word, but three digits change
//! shape in the ones position depending on what precedes them:
//!
//! | digit | base  | alternate | when                               |
//! |-------|-------|-----------|------------------------------------|
//! | 1     | một   | mốt       | tens digit ≥ 2 (`21` → hai mươi mốt) |
//! | 4     | bốn   | tư        | tens digit ≥ 2 (`24` → hai mươi tư)  |
//! | 5     | năm   | lăm       | tens digit ≥ 1 (`15` → mười lăm)     |
//!
//! Whether "tư" also applies above the lowest group is a policy, see [`FourForm`].

use serde::{Deserialize, Serialize};

/// Base words for the digits `0..=9`.
pub const DIGIT_WORDS: [&str; 10] = [
    "không", "một", "hai", "ba", "bốn", "năm", "sáu", "bảy", "tám", "chín",
];

/// Word following the hundreds digit.
pub const HUNDRED_WORD: &str = "trăm";
/// "Ten" when the tens digit is exactly 1.
pub const TEN_WORD: &str = "mười";
/// Tens multiplier for tens digits 2–9.
pub const TENS_MULTIPLIER_WORD: &str = "mươi";
/// Zero-gap link word placed before a lone ones digit.
pub const GAP_WORD: &str = "lẻ";
/// Explicit "zero hundred" filler used by non-leading groups.
pub const ZERO_HUNDRED_FILLER: &str = "không trăm";
/// Rendering of the number zero.
pub const ZERO_WORD: &str = "không";

/// Where a digit sits inside a three-digit group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitPosition {
    Hundreds,
    Tens,
    Ones,
}

/// How digit 4 is read in the ones position after a tens digit ≥ 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FourForm {
    /// "tư" in every group: `34_000` → `ba mươi tư nghìn`.
    #[default]
    Tu,
    /// "tư" only in the lowest group, "bốn" in groups carrying a scale word:
    /// `34_000` → `ba mươi bốn nghìn`.
    BonAboveUnits,
}

/// The lexical exception table.
///
/// Stateless apart from its [`FourForm`] policy; copied into every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lexicon {
    four_form: FourForm,
}

impl Lexicon {
    pub fn new(four_form: FourForm) -> Self {
        Self { four_form }
    }

    pub fn four_form(&self) -> FourForm {
        self.four_form
    }

    /// Returns `true` when [`form`](Self::form) can differ between the lowest
    /// group and the groups above it.
    pub fn depends_on_group_index(&self) -> bool {
        matches!(self.four_form, FourForm::BonAboveUnits)
    }

    /// Spoken word for `digit` at `position`, given the group's `tens` digit
    /// and the group's index (0 = lowest).
    ///
    /// Digits outside `0..=9` are a caller bug; they are masked to the last
    /// decimal digit in release builds.
    pub fn form(
        &self,
        digit: u8,
        position: DigitPosition,
        tens: u8,
        group_index: usize,
    ) -> &'static str {
        debug_assert!(digit < 10, "digit out of range: {digit}");
        let digit = digit % 10;

        if position != DigitPosition::Ones {
            return DIGIT_WORDS[digit as usize];
        }

        match digit {
            1 if tens >= 2 => "mốt",
            4 if tens >= 2 => match self.four_form {
                FourForm::BonAboveUnits if group_index > 0 => DIGIT_WORDS[4],
                _ => "tư",
            },
            5 if tens >= 1 => "lăm",
            _ => DIGIT_WORDS[digit as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundreds_and_tens_always_use_base_words() {
        let lex = Lexicon::default();
        for digit in 0..10u8 {
            for tens in 0..10u8 {
                assert_eq!(
                    lex.form(digit, DigitPosition::Hundreds, tens, 0),
                    DIGIT_WORDS[digit as usize]
                );
                assert_eq!(
                    lex.form(digit, DigitPosition::Tens, tens, 3),
                    DIGIT_WORDS[digit as usize]
                );
            }
        }
    }

    #[test]
    fn ones_exceptions_follow_tens_digit() {
        let lex = Lexicon::default();
        assert_eq!(lex.form(1, DigitPosition::Ones, 0, 0), "một");
        assert_eq!(lex.form(1, DigitPosition::Ones, 1, 0), "một");
        assert_eq!(lex.form(1, DigitPosition::Ones, 2, 0), "mốt");
        assert_eq!(lex.form(4, DigitPosition::Ones, 1, 0), "bốn");
        assert_eq!(lex.form(4, DigitPosition::Ones, 9, 0), "tư");
        assert_eq!(lex.form(5, DigitPosition::Ones, 0, 0), "năm");
        assert_eq!(lex.form(5, DigitPosition::Ones, 1, 0), "lăm");
        assert_eq!(lex.form(5, DigitPosition::Ones, 7, 2), "lăm");
        assert_eq!(lex.form(7, DigitPosition::Ones, 7, 2), "bảy");
    }

    #[test]
    fn four_form_policy() {
        let tu = Lexicon::new(FourForm::Tu);
        assert_eq!(tu.form(4, DigitPosition::Ones, 3, 1), "tư");
        assert!(!tu.depends_on_group_index());

        let bon = Lexicon::new(FourForm::BonAboveUnits);
        assert_eq!(bon.form(4, DigitPosition::Ones, 3, 0), "tư");
        assert_eq!(bon.form(4, DigitPosition::Ones, 3, 1), "bốn");
        assert!(bon.depends_on_group_index());
    }

    #[test]
    fn four_form_deserializes_snake_case() {
        let form: FourForm = serde_json::from_str("\"bon_above_units\"").unwrap();
        assert_eq!(form, FourForm::BonAboveUnits);
    }
}
