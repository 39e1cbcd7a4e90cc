use std::time::Duration;
use tracing::debug;

use crate::book::{Book, Chapter};

/// 最低阅读速度，低于它按它计算
const MIN_WPM: u32 = 50;
/// 每个单词的最短停留时间
const MIN_INTERVAL_MS: u64 = 40;

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// 刚加载，尚未开始
    Idle,
    Running,
    Paused,
    /// 已经读完最后一个单词
    Finished,
}

/// 按每分钟单词数计算每个单词的停留时间
pub fn interval_for_wpm(wpm: u32) -> Duration {
    let millis = (60_000.0 / f64::from(wpm.max(MIN_WPM))).round() as u64;
    Duration::from_millis(millis.max(MIN_INTERVAL_MS))
}

/// 一次阅读会话
///
/// 每次加载新书都新建一个会话。状态只由 `start`/`pause`/`reset`/`seek`/`tick`
/// 这些事件推动，定时由调用方负责：运行中每隔 [`interval_for_wpm`] 调用一次 `tick`。
#[derive(Debug, Clone)]
pub struct Session {
    book: Book,
    current_index: usize,
    state: PlaybackState,
}

impl Session {
    pub fn new(book: Book) -> Self {
        Self {
            book,
            current_index: 0,
            state: PlaybackState::Idle,
        }
    }

    /// 新建会话并定位到第 `start_word` 个单词（从1开始）
    pub fn with_start_word(book: Book, start_word: usize) -> Self {
        let mut session = Self::new(book);
        session.current_index = session.clamp(start_word.saturating_sub(1));
        session
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 当前应显示的单词，读完后为 `None`
    pub fn current_word(&self) -> Option<&str> {
        if self.state == PlaybackState::Finished {
            return None;
        }
        self.book.words.get(self.current_index).map(String::as_str)
    }

    pub fn current_chapter_index(&self) -> usize {
        self.book.chapter_index_for(self.current_index)
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.book.chapters.get(self.current_chapter_index())
    }

    /// (当前是第几个单词, 总单词数)，第几个从1开始
    pub fn progress(&self) -> (usize, usize) {
        let total = self.book.words.len();
        ((self.current_index + 1).min(total), total)
    }

    pub fn start(&mut self) {
        if self.book.words.is_empty() || self.state == PlaybackState::Running {
            return;
        }
        self.current_index = self.clamp(self.current_index);
        self.state = PlaybackState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
        }
    }

    /// 前进一个单词，返回之后的状态
    ///
    /// 只在运行中生效。越过最后一个单词时进入 `Finished`，位置停在最后一个单词上。
    pub fn tick(&mut self) -> PlaybackState {
        if self.state != PlaybackState::Running {
            return self.state;
        }

        self.current_index += 1;
        if self.current_index >= self.book.words.len() {
            self.current_index = self.clamp(self.current_index);
            self.state = PlaybackState::Finished;
            debug!(words = self.book.words.len(), "阅读结束");
        }
        self.state
    }

    /// 暂停并回到第 `start_word` 个单词（从1开始）
    pub fn reset(&mut self, start_word: usize) {
        self.seek(start_word.saturating_sub(1));
    }

    /// 暂停并跳到指定单词
    pub fn seek(&mut self, word_index: usize) {
        self.pause();
        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Paused;
        }
        self.current_index = self.clamp(word_index);
    }

    /// 暂停并跳到某一章的开头，章节不存在时返回false且不做任何事
    pub fn jump_to_chapter(&mut self, chapter_index: usize) -> bool {
        let Some(start_index) = self.book.chapters.get(chapter_index).map(|c| c.start_index) else {
            return false;
        };
        self.seek(start_index);
        true
    }

    fn clamp(&self, word_index: usize) -> usize {
        word_index.min(self.book.words.len().saturating_sub(1))
    }
}
