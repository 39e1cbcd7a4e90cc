//! OPF解析器模块
//!
//! 提供OPF（Open Packaging Format）文件的XML解析功能。

use crate::epub::archive::EntrySource;
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::{manifest::ManifestItem, spine::SpineItem};
use crate::epub::path::resolve;
use crate::text::normalize;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;
use tracing::debug;

/// OPF文件解析结果
#[derive(Debug, Clone)]
pub struct Opf {
    /// 包文件自身在归档中的路径
    pub path: String,
    /// `metadata > title` 中的书名
    pub title: Option<String>,
    /// 清单项，id -> 清单项
    pub manifest: HashMap<String, ManifestItem>,
    /// 脊柱(阅读顺序)
    pub spine: Vec<SpineItem>,
}

/// 脊柱中一项解析后的内容文档
#[derive(Debug, Clone, PartialEq)]
pub struct SpineDocument {
    pub idref: String,
    pub path: String,
}

impl Opf {
    /// 解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    /// * `package_path` - OPF文件在归档中的路径，清单中的href都相对于它解析
    ///
    /// 只认 `manifest > item` 与 `spine > itemref` 这样的直接父子关系。
    /// 缺少 `id` 或 `href` 的清单项、缺少 `idref` 的脊柱项都会被静默跳过。
    pub fn parse_xml(xml_content: &str, package_path: &str) -> Result<Opf> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut title = None;
        let mut manifest = HashMap::new();
        let mut spine = Vec::new();

        let mut buf = Vec::new();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut title_text: Option<String> = None;
        let mut title_depth = 0;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let local_name = e.local_name().as_ref().to_vec();
                    let parent = stack.last().map(Vec::as_slice);

                    match (parent, local_name.as_slice()) {
                        (Some(b"manifest"), b"item") => {
                            if let Some(item) = Self::parse_manifest_item(e, package_path)? {
                                manifest.insert(item.id.clone(), item);
                            }
                        }
                        (Some(b"spine"), b"itemref") => {
                            if let Some(item) = Self::parse_spine_item(e)? {
                                spine.push(item);
                            }
                        }
                        (Some(b"metadata"), b"title") if title.is_none() && title_text.is_none() => {
                            title_text = Some(String::new());
                            title_depth = stack.len();
                        }
                        _ => {}
                    }

                    stack.push(local_name);
                }
                Event::End(_) => {
                    stack.pop();
                    if title_text.is_some() && stack.len() == title_depth {
                        let text = normalize(&title_text.take().unwrap_or_default());
                        if !text.is_empty() {
                            title = Some(text);
                        }
                    }
                }
                Event::Text(e) => {
                    if let Some(text) = title_text.as_mut() {
                        text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(text) = title_text.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        debug!(
            path = package_path,
            manifest = manifest.len(),
            spine = spine.len(),
            "解析OPF完成"
        );

        Ok(Opf {
            path: package_path.to_string(),
            title,
            manifest,
            spine,
        })
    }

    /// 读取属性的值，属性名按限定名精确匹配
    fn attribute(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
        for attr_result in e.attributes() {
            let attr = attr_result?;
            if attr.key.as_ref() == name {
                return Ok(Some(attr.unescape_value()?.into_owned()));
            }
        }
        Ok(None)
    }

    /// 解析清单项，`id` 或 `href` 为空时返回 `None`
    fn parse_manifest_item(e: &BytesStart, package_path: &str) -> Result<Option<ManifestItem>> {
        let id = Self::attribute(e, b"id")?.unwrap_or_default();
        let href = Self::attribute(e, b"href")?.unwrap_or_default();
        if id.is_empty() || href.is_empty() {
            return Ok(None);
        }

        Ok(Some(ManifestItem {
            resolved_path: resolve(package_path, &href),
            media_type: Self::attribute(e, b"media-type")?,
            id,
            href,
        }))
    }

    /// 解析脊柱项，`idref` 为空时返回 `None`
    fn parse_spine_item(e: &BytesStart) -> Result<Option<SpineItem>> {
        let idref = Self::attribute(e, b"idref")?.unwrap_or_default();
        if idref.is_empty() {
            return Ok(None);
        }

        let mut item = SpineItem::new(idref);
        item.linear = Self::attribute(e, b"linear")?.as_deref() != Some("no");
        Ok(Some(item))
    }

    /// 按阅读顺序列出内容文档的归档路径
    ///
    /// 引用了不存在的清单项的脊柱项会被跳过；`include_non_linear` 为false时
    /// 同时跳过 `linear="no"` 的项。
    pub fn content_documents(&self, include_non_linear: bool) -> Vec<SpineDocument> {
        self.spine
            .iter()
            .filter(|item| include_non_linear || item.linear)
            .filter_map(|item| {
                let Some(manifest_item) = self.manifest.get(&item.idref) else {
                    debug!(idref = %item.idref, "脊柱项引用了不存在的清单项，已跳过");
                    return None;
                };
                Some(SpineDocument {
                    idref: item.idref.clone(),
                    path: manifest_item.resolved_path.clone(),
                })
            })
            .collect()
    }
}

/// 从归档中读取并解析包文件
pub fn read_package<S: EntrySource + ?Sized>(source: &mut S, package_path: &str) -> Result<Opf> {
    let content = source
        .read_entry(package_path)?
        .ok_or_else(|| EpubError::MissingPackageFile(package_path.to_string()))?;
    Opf::parse_xml(&content, package_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::archive::Epub;
    use crate::epub::archive::test_support::build_zip;

    const PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="3.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:title>  Sample
            Book </dc:title>
        <dc:title>Subtitle</dc:title>
    </metadata>
    <manifest>
        <item id="ch1" href="text/c1.html" media-type="application/xhtml+xml"/>
        <item id="ch2" href="text/c2.html" media-type="application/xhtml+xml"/>
        <item id="notes" href="../notes.html" media-type="application/xhtml+xml"/>
        <item id="nohref" media-type="application/xhtml+xml"/>
        <item href="orphan.html" media-type="application/xhtml+xml"/>
        <item id="web" href="http://example.com/x.html"/>
    </manifest>
    <spine toc="ncx">
        <itemref idref="ch2"/>
        <itemref idref="missing"/>
        <itemref/>
        <itemref idref="ch1"/>
        <itemref idref="notes" linear="no"/>
    </spine>
</package>"#;

    #[test]
    fn test_parse_manifest() {
        let opf = Opf::parse_xml(PACKAGE, "book/content.opf").unwrap();

        assert_eq!(opf.manifest.len(), 4);
        assert_eq!(opf.manifest["ch1"].resolved_path, "book/text/c1.html");
        assert_eq!(opf.manifest["ch1"].href, "text/c1.html");
        assert_eq!(opf.manifest["notes"].resolved_path, "notes.html");
        assert_eq!(opf.manifest["web"].resolved_path, "http://example.com/x.html");
        assert_eq!(opf.manifest["web"].media_type, None);
        assert!(!opf.manifest.contains_key("nohref"));
    }

    #[test]
    fn test_parse_spine_and_title() {
        let opf = Opf::parse_xml(PACKAGE, "book/content.opf").unwrap();

        let idrefs: Vec<_> = opf.spine.iter().map(|i| i.idref.as_str()).collect();
        assert_eq!(idrefs, vec!["ch2", "missing", "ch1", "notes"]);
        assert!(!opf.spine[3].linear);
        assert_eq!(opf.title.as_deref(), Some("Sample Book"));
    }

    #[test]
    fn test_content_documents_preserve_spine_order() {
        let opf = Opf::parse_xml(PACKAGE, "book/content.opf").unwrap();

        let paths: Vec<_> = opf.content_documents(true).into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["book/text/c2.html", "book/text/c1.html", "notes.html"]);

        let linear: Vec<_> = opf.content_documents(false).into_iter().map(|d| d.idref).collect();
        assert_eq!(linear, vec!["ch2", "ch1"]);
    }

    #[test]
    fn test_nested_item_is_not_manifest_item() {
        let xml = r#"<package><manifest><group><item id="a" href="a.html"/></group>
<item id="b" href="b.html"/></manifest><spine><itemref idref="a"/><itemref idref="b"/></spine></package>"#;
        let opf = Opf::parse_xml(xml, "content.opf").unwrap();

        assert_eq!(opf.manifest.len(), 1);
        assert_eq!(opf.content_documents(true).len(), 1);
    }

    #[test]
    fn test_duplicate_manifest_id_last_wins() {
        let xml = r#"<package><manifest><item id="a" href="first.html"/><item id="a" href="second.html"/></manifest>
<spine><itemref idref="a"/></spine></package>"#;
        let opf = Opf::parse_xml(xml, "content.opf").unwrap();

        assert_eq!(opf.manifest["a"].resolved_path, "second.html");
    }

    #[test]
    fn test_prefixed_elements_and_escaped_href() {
        let xml = r#"<opf:package xmlns:opf="http://www.idpf.org/2007/opf">
<opf:manifest><opf:item id="a" href="a&amp;b.html"/></opf:manifest>
<opf:spine><opf:itemref idref="a"/></opf:spine></opf:package>"#;
        let opf = Opf::parse_xml(xml, "OEBPS/content.opf").unwrap();

        assert_eq!(opf.content_documents(true)[0].path, "OEBPS/a&b.html");
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let result = Opf::parse_xml("<package><manifest></spine></package>", "content.opf");
        assert!(matches!(result, Err(EpubError::Xml(_))));
    }

    #[test]
    fn test_read_package_missing() {
        let mut epub = Epub::from_bytes(build_zip(&[("other.opf", PACKAGE)])).unwrap();

        match read_package(&mut epub, "book/content.opf") {
            Err(EpubError::MissingPackageFile(path)) => assert_eq!(path, "book/content.opf"),
            other => panic!("期望MissingPackageFile错误, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_read_package() {
        let mut epub = Epub::from_bytes(build_zip(&[("book/content.opf", PACKAGE)])).unwrap();

        let opf = read_package(&mut epub, "book/content.opf").unwrap();
        assert_eq!(opf.path, "book/content.opf");
        assert_eq!(opf.spine.len(), 4);
    }
}
