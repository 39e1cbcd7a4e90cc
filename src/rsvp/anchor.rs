/// 单词的视觉锚点（最佳识别位置）字母下标
///
/// 按字符数计：1个字符取第0个，2-5取第1个，6-9取第2个，10-13取第3个，更长取第4个。
pub fn anchor_index(len: usize) -> usize {
    match len {
        0 | 1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// 把单词拆成 (锚点前, 锚点字母, 锚点后)
///
/// 空单词返回三个空串。
pub fn split_anchor(word: &str) -> (&str, &str, &str) {
    let len = word.chars().count();
    if len == 0 {
        return ("", "", "");
    }

    let anchor = anchor_index(len).min(len - 1);
    let mut boundaries = word.char_indices().map(|(i, _)| i).chain(std::iter::once(word.len()));
    let start = boundaries.nth(anchor).unwrap_or(0);
    let end = boundaries.next().unwrap_or(word.len());

    (&word[..start], &word[start..end], &word[end..])
}
