//! 逐词快速阅读（RSVP）的节奏控制
//!
//! 这里只有与界面无关的状态：当前位置、播放状态和每个单词的停留时间。

mod anchor;
mod session;

pub use anchor::{anchor_index, split_anchor};
pub use session::{PlaybackState, Session, interval_for_wpm};
