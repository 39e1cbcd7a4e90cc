use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// 加载EPUB时可能出现的错误
///
/// 除 `Io`/`Zip`/`Xml`/`Config` 外，其余变体都对应提取流程中的一个致命阶段。
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("无效的EPUB: 缺少 META-INF/container.xml")]
    MissingContainer,

    #[error("无效的EPUB: container.xml 中没有 rootfile 条目")]
    MissingRootfile,

    #[error("无效的EPUB: rootfile 路径为空")]
    EmptyRootfilePath,

    #[error("无效的EPUB: 找不到包文件 {0}")]
    MissingPackageFile(String),

    #[error("这本EPUB中没有找到可读的单词")]
    NoReadableWords,

    #[error("配置文件错误: {0}")]
    Config(String),
}

impl From<quick_xml::events::attributes::AttrError> for EpubError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        EpubError::Xml(quick_xml::Error::InvalidAttr(err))
    }
}
