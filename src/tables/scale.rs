//! Magnitude words for base-1000 groups.

use std::borrow::Cow;

/// Scale words for group indices `0..=6`; index 0 carries no word.
pub const SCALE_WORDS: [&str; 7] = ["", "nghìn", "triệu", "tỷ", "nghìn tỷ", "triệu tỷ", "tỷ tỷ"];

/// Word naming the magnitude of the group at `group_index`.
///
/// Indices past [`SCALE_WORDS`] repeat the thousand/million/billion cycle with
/// one more "tỷ" per cycle: 7 → `nghìn tỷ tỷ`, 9 → `tỷ tỷ tỷ`.
pub fn scale_word(group_index: usize) -> Cow<'static, str> {
    if let Some(word) = SCALE_WORDS.get(group_index) {
        return Cow::Borrowed(word);
    }

    let billions = group_index / 3;
    let mut word = String::from(SCALE_WORDS[group_index % 3]);
    for _ in 0..billions {
        if !word.is_empty() {
            word.push(' ');
        }
        word.push_str("tỷ");
    }
    Cow::Owned(word)
}
