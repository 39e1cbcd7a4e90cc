//! OPF（Open Packaging Format）包文件解析模块
//! 
//! 从包文件中取出清单（id到归档路径的映射）和脊柱（阅读顺序），
//! 并据此列出按阅读顺序排列的内容文档路径。

mod manifest;
mod spine;
mod parser;

pub use manifest::ManifestItem;
pub use spine::SpineItem;
pub use parser::{Opf, SpineDocument, read_package};
