//! 阅读配置模块
//!
//! 提供阅读速度等设置的配置管理功能，支持从YAML文件加载配置。

use crate::book::ExtractOptions;
use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "wordpace.yaml";

/// 阅读配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// 每分钟单词数
    pub wpm: u32,
    /// 从第几个单词开始（从1开始）
    pub start_word: usize,
    /// 是否包含 `linear="no"` 的脊柱项
    pub include_non_linear: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            start_word: 1,
            include_non_linear: true,
        }
    }
}

impl ReaderConfig {
    /// 从指定的YAML文件中加载配置
    ///
    /// 文件中缺少的字段使用默认值。
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| EpubError::Config(format!("无法读取配置文件: {}", e)))?;

        serde_yml::from_str(&content)
            .map_err(|e| EpubError::Config(format!("配置文件格式错误: {}", e)))
    }

    /// 尝试从文件加载，文件不存在时使用默认配置
    ///
    /// 文件存在但格式错误时仍然返回错误。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match fs::metadata(path.as_ref()) {
            Ok(_) => Self::from_file(path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(EpubError::Config(format!("无法读取配置文件: {}", e))),
        }
    }

    /// 把默认配置写到指定路径
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default())
            .map_err(|e| EpubError::Config(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# wordpace 阅读配置文件\n# wpm: 每分钟单词数(低于50按50计算)\n# start_word: 从第几个单词开始\n# include_non_linear: 是否朗读 linear=\"no\" 的脊柱项\n\n{}",
            yaml_content
        );

        fs::write(path, content_with_header)
            .map_err(|e| EpubError::Config(format!("写入配置文件失败: {}", e)))
    }

    /// 对应的加载选项
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_non_linear: self.include_non_linear,
        }
    }
}
