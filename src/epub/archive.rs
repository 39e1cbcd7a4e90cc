use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use percent_encoding::percent_decode_str;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::epub::error::Result;

/// 按归档内路径读取条目文本的能力
///
/// 提取流程只依赖这个trait，`Ok(None)` 表示条目不存在。
pub trait EntrySource {
    fn read_entry(&mut self, path: &str) -> Result<Option<String>>;
}

/// 表示一个打开的EPUB压缩包
pub struct Epub<R: Read + Seek = File> {
    archive: ZipArchive<R>,
}

impl Epub<File> {
    /// 从文件路径打开EPUB
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl Epub<Cursor<Vec<u8>>> {
    /// 从内存中的字节打开EPUB
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Epub<R> {
    /// 用任意可随机读取的数据源创建Epub实例
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Epub { archive })
    }

    /// 列出EPUB文件中的所有条目
    pub fn list_files(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// 提取指定条目的二进制内容，条目不存在时返回 `None`
    pub fn extract_binary_file(&mut self, filename: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(filename) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(Some(buffer))
    }

    /// 提取指定条目的文本内容
    ///
    /// 按UTF-8宽松解码并去掉开头的BOM。精确路径找不到且路径中含有 `%` 时，
    /// 再尝试一次百分号解码后的路径。
    pub fn extract_file(&mut self, filename: &str) -> Result<Option<String>> {
        let mut bytes = self.extract_binary_file(filename)?;
        if bytes.is_none() && filename.contains('%') {
            let decoded = percent_decode_str(filename).decode_utf8_lossy();
            if decoded != filename {
                bytes = self.extract_binary_file(&decoded)?;
            }
        }

        Ok(bytes.map(|bytes| {
            let text = String::from_utf8_lossy(&bytes);
            text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
        }))
    }
}

impl<R: Read + Seek> EntrySource for Epub<R> {
    fn read_entry(&mut self, path: &str) -> Result<Option<String>> {
        self.extract_file(path)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::FileOptions;

    pub const CONTAINER_XML: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

    /// 用给定的(路径, 内容)列表在内存中打包一个zip
    pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file(*name, FileOptions::<()>::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    /// 构造一个最小的XHTML内容文档
    pub fn xhtml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>test</title></head>
<body>{}</body>
</html>"#,
            body
        )
    }
}
