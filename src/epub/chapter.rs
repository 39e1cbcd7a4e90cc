//! 内容文档 -> 章节单词
//!
//! 用 scraper 按HTML模式解析每个内容文档，取 `body` 的全部文本并分词，
//! 再从第一个 `h1`/`h2`/`h3` 中取章节标题。

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::epub::archive::EntrySource;
use crate::epub::opf::SpineDocument;
use crate::text::{normalize, tokenize};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("body选择器无效"));
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3").expect("标题选择器无效"));

/// 从一个内容文档中提取出的章节
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterDocument {
    pub title: String,
    pub words: Vec<String>,
}

/// `body` 下所有文本节点的拼接，没有 `body` 时为空串
pub fn body_text(document: &Html) -> String {
    document
        .select(&BODY)
        .next()
        .map(|body| body.text().collect())
        .unwrap_or_default()
}

/// 文档中第一个 `h1`/`h2`/`h3`（按文档顺序）的归一化文本
pub fn heading_title(document: &Html) -> Option<String> {
    document
        .select(&HEADING)
        .next()
        .map(|heading| normalize(&heading.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

/// 解析一段HTML，得到单词和标题
///
/// 没有任何单词时返回 `None`。没有可用标题时使用 `Chapter {chapter_number}`。
pub fn extract_chapter(html: &str, chapter_number: usize) -> Option<ChapterDocument> {
    let document = Html::parse_document(html);
    let words = tokenize(&body_text(&document));
    if words.is_empty() {
        return None;
    }

    let title = heading_title(&document).unwrap_or_else(|| format!("Chapter {}", chapter_number));
    Some(ChapterDocument { title, words })
}

/// 按脊柱顺序逐个读取内容文档并提取章节
///
/// 不存在、读不出来或者没有单词的文档都会被跳过，且不占用章节编号。
pub fn extract_chapters<S: EntrySource + ?Sized>(
    source: &mut S,
    documents: &[SpineDocument],
) -> Vec<ChapterDocument> {
    let mut chapters = Vec::new();

    for document in documents {
        let html = match source.read_entry(&document.path) {
            Ok(Some(html)) => html,
            Ok(None) => {
                warn!(path = %document.path, "内容文档不存在，已跳过");
                continue;
            }
            Err(e) => {
                warn!(path = %document.path, error = %e, "无法读取内容文档，已跳过");
                continue;
            }
        };

        match extract_chapter(&html, chapters.len() + 1) {
            Some(chapter) => {
                debug!(path = %document.path, title = %chapter.title, words = chapter.words.len(), "提取章节");
                chapters.push(chapter);
            }
            None => debug!(path = %document.path, "内容文档没有文字，已跳过"),
        }
    }

    chapters
}
