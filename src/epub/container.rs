use crate::epub::archive::EntrySource;
use crate::epub::error::{EpubError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// container.xml 在归档中的固定位置
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Container.xml中的rootfile信息
#[derive(Debug, Clone, PartialEq)]
pub struct RootFile {
    pub full_path: String,
    pub media_type: Option<String>,
}

/// Container.xml的解析结果
#[derive(Debug, Clone)]
pub struct Container {
    pub rootfiles: Vec<RootFile>,
}

impl Container {
    /// 解析container.xml内容
    ///
    /// 按文档顺序收集所有 `rootfile` 元素，不要求它们位于 `rootfiles` 之下。
    /// 缺少 `full-path` 的条目以空路径保留，交给 [`Container::package_path`] 判断。
    pub fn parse_xml(xml_content: &str) -> Result<Container> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut rootfiles = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"rootfile" => {
                    let mut full_path = String::new();
                    let mut media_type = None;

                    for attr_result in e.attributes() {
                        let attr = attr_result?;
                        match attr.key.as_ref() {
                            b"full-path" => {
                                full_path = attr.unescape_value()?.into_owned();
                            }
                            b"media-type" => {
                                media_type = Some(attr.unescape_value()?.into_owned());
                            }
                            _ => {}
                        }
                    }

                    rootfiles.push(RootFile { full_path, media_type });
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Container { rootfiles })
    }

    /// 获取包文件（OPF）的路径
    ///
    /// 只看第一个 `rootfile`，路径原样返回。
    pub fn package_path(&self) -> Result<&str> {
        let rootfile = self.rootfiles.first().ok_or(EpubError::MissingRootfile)?;
        if rootfile.full_path.is_empty() {
            return Err(EpubError::EmptyRootfilePath);
        }
        Ok(&rootfile.full_path)
    }
}

/// 读取 `META-INF/container.xml` 并返回包文件路径
pub fn locate_package_path<S: EntrySource + ?Sized>(source: &mut S) -> Result<String> {
    let content = source
        .read_entry(CONTAINER_PATH)?
        .ok_or(EpubError::MissingContainer)?;
    let container = Container::parse_xml(&content)?;
    container.package_path().map(str::to_string)
}
