//! 文本归一化与分词

/// 与浏览器正则 `\s` 一致的空白判断：Unicode空白加上BOM，但不含U+0085
fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// 把所有连续空白折叠成一个空格，并去掉首尾空白
pub fn normalize(text: &str) -> String {
    text.split(is_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 把文本切分成单词序列
///
/// 空文本或只有空白时返回空序列，绝不会返回只含一个空字符串的序列。
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_space)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Hello \n\t world  "), "Hello world");
        assert_eq!(normalize("a\u{a0}b"), "a b");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("  a   b  "), vec!["a", "b"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
        assert!(tokenize("\u{feff}").is_empty());
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert_eq!(tokenize("a\u{85}b"), vec!["a\u{85}b"]);
        assert_eq!(normalize(" a\u{85}b \u{3000}c"), "a\u{85}b c");
    }

    #[test]
    fn test_tokenize_keeps_punctuation() {
        assert_eq!(tokenize("Hello, world!"), vec!["Hello,", "world!"]);
    }

    proptest! {
        #[test]
        fn tokenize_is_idempotent_over_normalize(text in "\\PC*") {
            prop_assert_eq!(tokenize(&normalize(&text)), tokenize(&text));
        }

        #[test]
        fn tokens_are_never_empty(text in "[ a-z\\t\\n]{0,40}") {
            prop_assert!(tokenize(&text).iter().all(|w| !w.is_empty()));
        }
    }
}
