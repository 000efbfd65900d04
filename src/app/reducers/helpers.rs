//! Shared helper functions for sub-reducers.

pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}

pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", 0, 0)]
    #[case("abc", 2, 2)]
    #[case("abc", 9, 3)]
    #[case("日本語", 1, 3)]
    #[case("", 0, 0)]
    fn char_to_byte_index_returns_expected(
        #[case] s: &str,
        #[case] char_idx: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(char_to_byte_index(s, char_idx), expected);
    }

    #[test]
    fn char_count_counts_chars_not_bytes() {
        assert_eq!(char_count("日本語"), 3);
    }
}
