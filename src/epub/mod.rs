pub mod error;
pub mod archive;
pub mod path;
pub mod container;
pub mod opf;
pub mod chapter;

// 重新导出错误处理
pub use error::{EpubError, Result};

// 重新导出归档读取
pub use archive::{Epub, EntrySource};

// 重新导出容器相关
pub use container::{Container, RootFile, locate_package_path};

// 重新导出OPF相关
pub use opf::{Opf, ManifestItem, SpineItem, SpineDocument, read_package};

// 重新导出章节提取
pub use chapter::{ChapterDocument, extract_chapter, extract_chapters};
