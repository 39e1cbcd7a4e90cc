pub mod book;
pub mod config;
pub mod epub;
pub mod rsvp;
pub mod text;

// === 核心API重新导出 ===

/// 整本书加载
pub use book::{Book, Chapter, ExtractOptions, assemble, load_book, normalize_titles};

/// EPUB文件读取器
pub use epub::{Epub, EntrySource};

/// 错误处理
pub use epub::{EpubError, Result};

/// 阅读会话
pub use rsvp::{PlaybackState, Session, interval_for_wpm, split_anchor};

/// 配置
pub use config::ReaderConfig;

/// 文本处理
pub use text::{normalize, tokenize};

// === 库信息 ===

/// wordpace库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// === 便捷函数 ===

/// 打开EPUB文件并加载整本书
///
/// 这是 `Epub::from_path` 加 [`load_book`] 的便捷包装函数。
///
/// # 示例
///
/// ```no_run
/// let book = wordpace::open("book.epub")?;
/// println!("共 {} 个单词, {} 章", book.words.len(), book.chapters.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Book> {
    let mut epub = Epub::from_path(path)?;
    load_book(&mut epub, ExtractOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(open("definitely/not/here.epub"), Err(EpubError::Io(_))));
    }
}
