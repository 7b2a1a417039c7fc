//! Three-digit group renderer.
//!
//! Turns one group value `0..=999` into its Vietnamese phrase, given whether
//! the group is the leading (most significant non-zero) group of the number
//! and the group's magnitude index.
//!
//! ```text
//!  hundreds │ tens │ ones      leading        non-leading (short)      non-leading (full)
//!  ─────────┼──────┼─────      ─────────────  ───────────────────────  ─────────────────────────
//!      1    │  0   │  5        một trăm lẻ năm một trăm lẻ năm          một trăm lẻ năm
//!      0    │  0   │  1        một            lẻ một                   không trăm lẻ một
//!      0    │  5   │  0        năm mươi       không trăm năm mươi      không trăm năm mươi
//!      0    │  2   │  1        hai mươi mốt   không trăm hai mươi mốt  không trăm hai mươi mốt
//! ```

use serde::{Deserialize, Serialize};

use crate::tables::lexicon::{
    DigitPosition, Lexicon, GAP_WORD, HUNDRED_WORD, TENS_MULTIPLIER_WORD, TEN_WORD,
    ZERO_HUNDRED_FILLER,
};
use crate::utils::push_word;

/// When a non-leading group without a hundreds digit speaks "không trăm".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerStyle {
    /// Only when the tens digit is non-zero; a lone ones digit reads
    /// `lẻ <ones>` (`1_001` → `một nghìn lẻ một`).
    #[default]
    Short,
    /// Always (`1_001` → `một nghìn không trăm lẻ một`).
    Full,
}

/// Renders three-digit groups under one lexical policy and filler style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupRenderer {
    lexicon: Lexicon,
    filler: FillerStyle,
}

impl GroupRenderer {
    pub fn new(lexicon: Lexicon, filler: FillerStyle) -> Self {
        Self { lexicon, filler }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn filler(&self) -> FillerStyle {
        self.filler
    }

    /// Renders `value` into a fresh string.
    pub fn render(&self, value: u16, is_first_group: bool, group_index: usize) -> String {
        let mut out = String::with_capacity(48);
        self.write_group(&mut out, value, is_first_group, group_index);
        out
    }

    /// Appends the phrase for `value` to `out`.
    ///
    /// Words are space-separated among themselves; nothing is inserted between
    /// existing content of `out` and the first word. A zero value writes nothing.
    pub fn write_group(&self, out: &mut String, value: u16, is_first_group: bool, group_index: usize) {
        debug_assert!(value < 1000, "group value out of range: {value}");
        let value = value % 1000;

        let hundreds = (value / 100) as u8;
        let remainder = value % 100;
        let tens = (remainder / 10) as u8;
        let ones = (remainder % 10) as u8;

        let start = out.len();
        let lex = &self.lexicon;

        let hundreds_context = if hundreds > 0 {
            push_word(out, start, lex.form(hundreds, DigitPosition::Hundreds, tens, group_index));
            push_word(out, start, HUNDRED_WORD);
            true
        } else if !is_first_group && remainder > 0 {
            if self.filler == FillerStyle::Full || tens > 0 {
                push_word(out, start, ZERO_HUNDRED_FILLER);
            }
            true
        } else {
            false
        };

        match tens {
            0 => {
                if ones > 0 {
                    if hundreds_context {
                        push_word(out, start, GAP_WORD);
                    }
                    push_word(out, start, lex.form(ones, DigitPosition::Ones, tens, group_index));
                }
            }
            1 => {
                push_word(out, start, TEN_WORD);
                if ones > 0 {
                    push_word(out, start, lex.form(ones, DigitPosition::Ones, tens, group_index));
                }
            }
            _ => {
                push_word(out, start, lex.form(tens, DigitPosition::Tens, tens, group_index));
                push_word(out, start, TENS_MULTIPLIER_WORD);
                if ones > 0 {
                    push_word(out, start, lex.form(ones, DigitPosition::Ones, tens, group_index));
                }
            }
        }
    }
}
