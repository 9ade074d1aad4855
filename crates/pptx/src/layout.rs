//! Slide layout discovery from PPTX templates.
//!
//! A template is a ZIP archive; each `ppt/slideLayouts/slideLayoutN.xml`
//! declares placeholders (`<p:ph>`) whose `idx` becomes the region key and
//! whose `<a:off>`/`<a:ext>` transform becomes the region geometry.

use crate::region::RegionKind;
use crate::slide::{PlaceholderSpec, SlideLayout};
use deck_core::{Error, Rect, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Reader for slide layouts in a PPTX template.
pub struct LayoutReader;

impl LayoutReader {
    /// Create a new layout reader.
    pub fn new() -> Self {
        Self
    }

    /// Read layout number `layout_number` (1-based) from a template archive.
    pub fn read<R: Read + Seek>(&self, reader: R, layout_number: usize) -> Result<SlideLayout> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;
        self.read_from_archive(&mut archive, layout_number)
    }

    /// Read layout number `layout_number` from an already opened archive.
    pub fn read_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        layout_number: usize,
    ) -> Result<SlideLayout> {
        let path = format!("ppt/slideLayouts/slideLayout{}.xml", layout_number);
        let content = read_file_from_archive(archive, &path)?;
        let layout = self.parse_layout_xml(&content)?;

        log::debug!(
            "Layout {} ('{}') has {} placeholders",
            layout_number,
            layout.name,
            layout.placeholders.len()
        );

        Ok(layout)
    }

    /// Extract the layout name and its placeholders from slide layout XML.
    pub fn parse_layout_xml(&self, xml_content: &str) -> Result<SlideLayout> {
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut name = String::new();
        let mut placeholders = Vec::new();
        let mut current_shape: Option<ShapeInfo> = None;
        let mut in_xfrm = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"cSld" => {
                            if let Some(n) = attr_value(e, b"name") {
                                name = n;
                            }
                        }
                        b"sp" | b"pic" => {
                            current_shape = Some(ShapeInfo::default());
                        }
                        b"xfrm" => {
                            in_xfrm = true;
                        }
                        _ => {
                            if let Some(shape) = current_shape.as_mut() {
                                shape.apply(e, in_xfrm);
                            }
                        }
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.apply(e, in_xfrm);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" => {
                        if let Some(shape) = current_shape.take() {
                            if let Some(spec) = shape.into_placeholder() {
                                placeholders.push(spec);
                            }
                        }
                        in_xfrm = false;
                    }
                    b"xfrm" => {
                        in_xfrm = false;
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing slide layout at {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(SlideLayout { name, placeholders })
    }
}

impl Default for LayoutReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholder information collected while walking one shape.
#[derive(Debug, Default)]
struct ShapeInfo {
    is_placeholder: bool,
    ph_type: Option<String>,
    idx: Option<u32>,
    x: Option<i64>,
    y: Option<i64>,
    cx: Option<i64>,
    cy: Option<i64>,
}

impl ShapeInfo {
    /// Record what a start or empty element inside the shape tells us.
    fn apply(&mut self, e: &BytesStart<'_>, in_xfrm: bool) {
        match local_name(e.name().as_ref()) {
            b"ph" => {
                self.is_placeholder = true;
                self.ph_type = attr_value(e, b"type");
                self.idx = attr_value(e, b"idx").and_then(|v| v.parse().ok());
            }
            b"off" if in_xfrm => {
                self.x = attr_value(e, b"x").and_then(|v| v.parse().ok());
                self.y = attr_value(e, b"y").and_then(|v| v.parse().ok());
            }
            // `a:ext` also appears in extension lists, without cx/cy.
            b"ext" if in_xfrm => {
                self.cx = attr_value(e, b"cx").and_then(|v| v.parse().ok());
                self.cy = attr_value(e, b"cy").and_then(|v| v.parse().ok());
            }
            _ => {}
        }
    }

    fn into_placeholder(self) -> Option<PlaceholderSpec> {
        if !self.is_placeholder {
            return None;
        }

        // Title placeholders usually carry no idx; they are region 0.
        let idx = self.idx.unwrap_or(0);

        match (self.x, self.y, self.cx, self.cy) {
            (Some(x), Some(y), Some(cx), Some(cy)) => Some(PlaceholderSpec {
                idx,
                kind: RegionKind::from_placeholder_type(self.ph_type.as_deref()),
                rect: Rect::new(x, y, cx, cy),
            }),
            _ => {
                log::debug!("Skipping placeholder idx {} without explicit geometry", idx);
                None
            }
        }
    }
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(Error::LayoutNotFound(path.to_string()));
        }
        Err(e) => {
            return Err(Error::ZipError(format!(
                "Failed to open '{}': {}",
                path, e
            )));
        }
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Value of attribute `key`, if present.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
