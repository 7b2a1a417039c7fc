/// Formats an integer with `,` thousands separators.
///
/// Used for human-facing messages such as the [`NumberTooLarge`] error text,
/// where `999999999999999` is far easier to read as `999,999,999,999,999`.
///
/// # Example
/// ```rust
/// use vi_numwords::utils::format_thousand;
///
/// assert_eq!(format_thousand(0), "0");
/// assert_eq!(format_thousand(1_001), "1,001");
/// assert_eq!(format_thousand(999_999_999_999_999), "999,999,999,999,999");
/// ```
///
/// [`NumberTooLarge`]: crate::ConvertError::NumberTooLarge
pub fn format_thousand(n: u64) -> String {
    let mut result_str = n.to_string();
    let mut offset = result_str.len() % 3;
    if offset == 0 {
        offset = 3;
    }

    while offset < result_str.len() {
        result_str.insert(offset, ',');
        offset += 4; // Including the added comma
    }
    result_str
}

/// Appends `word` to `out`, separated by a single space unless `out` holds
/// nothing past `start`.
///
/// `start` marks where the current phrase begins inside a shared buffer, so
/// callers can build one phrase after another without an intermediate
/// `Vec<&str>` + `join`.
#[inline]
pub(crate) fn push_word(out: &mut String, start: usize, word: &str) {
    if word.is_empty() {
        return;
    }
    if out.len() > start {
        out.push(' ');
    }
    out.push_str(word);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_thousand_groups_every_three_digits() {
        assert_eq!(format_thousand(7), "7");
        assert_eq!(format_thousand(999), "999");
        assert_eq!(format_thousand(1_000), "1,000");
        assert_eq!(format_thousand(123_456_789), "123,456,789");
        assert_eq!(format_thousand(12_345_678), "12,345,678");
    }

    #[test]
    fn push_word_separates_with_single_spaces() {
        let mut out = String::from("prefix");
        let start = out.len();
        push_word(&mut out, start, "một");
        push_word(&mut out, start, "");
        push_word(&mut out, start, "trăm");
        assert_eq!(out, "prefixmột trăm");
    }
}
