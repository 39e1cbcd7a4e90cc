//! 清单模块
//! 
//! 提供EPUB包中文件清单的结构定义。

/// 清单项信息
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestItem {
    /// 项目ID
    pub id: String,
    /// 原始href(相对于OPF文件)
    pub href: String,
    /// 解析后的归档内完整路径
    pub resolved_path: String,
    /// 媒体类型
    pub media_type: Option<String>,
}
