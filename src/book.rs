//! 扁平化的书：全书单词数组加上章节索引
//!
//! 加载流程: container.xml -> OPF -> 逐个内容文档提取章节 -> 拼接单词并记录章节范围 -> 标题去重。

use std::collections::HashMap;
use tracing::{debug, info};

use crate::epub::{
    ChapterDocument, EntrySource, EpubError, Result, extract_chapters, locate_package_path,
    read_package,
};

/// 章节在全书单词数组中的范围，`start_index` 与 `end_index` 都是闭区间端点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub start_index: usize,
    pub end_index: usize,
}

impl Chapter {
    /// 章节包含的单词数
    pub fn len(&self) -> usize {
        self.end_index + 1 - self.start_index
    }

    pub fn contains(&self, word_index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&word_index)
    }
}

/// 一次加载的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    /// OPF中的书名
    pub title: Option<String>,
    pub words: Vec<String>,
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// 包含该单词的章节序号，找不到时为0
    pub fn chapter_index_for(&self, word_index: usize) -> usize {
        self.chapters
            .iter()
            .position(|chapter| chapter.contains(word_index))
            .unwrap_or(0)
    }

    /// 某一章的全部单词
    pub fn chapter_words(&self, chapter_index: usize) -> Option<&[String]> {
        let chapter = self.chapters.get(chapter_index)?;
        self.words.get(chapter.start_index..=chapter.end_index)
    }
}

/// 加载选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// 是否包含 `linear="no"` 的脊柱项
    pub include_non_linear: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_non_linear: true,
        }
    }
}

/// 标题去重
///
/// 标题为空或者在全书中出现不止一次的章节，改用 `Chapter {位置}`（从1开始的最终位置）。
pub fn normalize_titles(chapters: Vec<Chapter>) -> Vec<Chapter> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for chapter in &chapters {
        *counts.entry(chapter.title.clone()).or_default() += 1;
    }

    chapters
        .into_iter()
        .enumerate()
        .map(|(index, mut chapter)| {
            if chapter.title.is_empty() || counts[&chapter.title] > 1 {
                chapter.title = format!("Chapter {}", index + 1);
            }
            chapter
        })
        .collect()
}

/// 把各章单词拼成一个数组并记录每章的起止位置，最后做标题去重
///
/// 没有单词的文档不产生章节；没有任何章节时返回空的单词和章节列表。
pub fn assemble(documents: Vec<ChapterDocument>) -> (Vec<String>, Vec<Chapter>) {
    let mut words = Vec::new();
    let mut chapters = Vec::with_capacity(documents.len());

    for document in documents {
        if document.words.is_empty() {
            continue;
        }
        let start_index = words.len();
        words.extend(document.words);
        chapters.push(Chapter {
            title: document.title,
            start_index,
            end_index: words.len() - 1,
        });
    }

    (words, normalize_titles(chapters))
}

/// 从EPUB中加载整本书
///
/// container.xml 或 OPF 出错会立即失败；单个内容文档的问题只会让它被跳过。
/// 所有文档都被跳过时返回 [`EpubError::NoReadableWords`]。
pub fn load_book<S: EntrySource + ?Sized>(source: &mut S, options: ExtractOptions) -> Result<Book> {
    let package_path = locate_package_path(source)?;
    debug!(path = %package_path, "找到OPF文件");

    let opf = read_package(source, &package_path)?;
    let documents = opf.content_documents(options.include_non_linear);
    let (words, chapters) = assemble(extract_chapters(source, &documents));

    if chapters.is_empty() {
        return Err(EpubError::NoReadableWords);
    }

    info!(words = words.len(), chapters = chapters.len(), "加载完成");
    Ok(Book {
        title: opf.title,
        words,
        chapters,
    })
}
