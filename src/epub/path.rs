//! 归档内部路径解析
//!
//! EPUB中的 `href` 都是相对于引用它的文件的，这里把它们换算成归档内的完整路径。

/// 把 `relative_path` 相对于 `base_path` 所在目录解析成归档内路径
///
/// 绝对URI（如 `http://...`）原样返回。`..` 越过根目录时不会报错，只是丢弃多余的层级。
///
/// # 示例
///
/// ```rust
/// use wordpace::epub::path::resolve;
///
/// assert_eq!(resolve("OEBPS/content.opf", "text/c1.html"), "OEBPS/text/c1.html");
/// assert_eq!(resolve("OEBPS/content.opf", "../c1.html"), "c1.html");
/// ```
pub fn resolve(base_path: &str, relative_path: &str) -> String {
    if is_absolute_uri(relative_path) {
        return relative_path.to_string();
    }

    let mut parts: Vec<&str> = base_path.split('/').collect();
    parts.pop();

    for segment in relative_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(segment),
        }
    }

    parts.join("/")
}

/// 以 `字母+:` 开头即视为带scheme的URI
fn is_absolute_uri(path: &str) -> bool {
    let scheme_len = path.bytes().take_while(u8::is_ascii_alphabetic).count();
    scheme_len > 0 && path.as_bytes().get(scheme_len) == Some(&b':')
}
