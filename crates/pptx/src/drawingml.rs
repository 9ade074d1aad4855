//! DrawingML text bodies.
//!
//! Renders a region's paragraphs as a `<p:txBody>` element, the form a
//! PPTX slide part stores shape text in. Hyperlinks become
//! `<a:hlinkClick r:id=".."/>` references; the relationship ids and their
//! targets are returned alongside so the containing part can declare them.

use crate::region::{Paragraph, Region, TextRun};
use deck_core::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// A rendered text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBody {
    pub xml: String,

    /// `(relationship id, target URL)` for every hyperlink, in order.
    pub hyperlinks: Vec<(String, String)>,
}

/// Render the text of `region` as a `<p:txBody>` element.
pub fn text_body(region: &Region) -> Result<TextBody> {
    let mut out = TextBodyWriter {
        writer: Writer::new(Cursor::new(Vec::new())),
        hyperlinks: Vec::new(),
    };

    out.start(BytesStart::new("p:txBody"))?;
    out.empty(BytesStart::new("a:bodyPr"))?;
    out.empty(BytesStart::new("a:lstStyle"))?;

    if region.paragraphs.is_empty() {
        // A text body must hold at least one paragraph.
        out.empty(BytesStart::new("a:p"))?;
    }
    for paragraph in &region.paragraphs {
        out.paragraph(paragraph)?;
    }

    out.end("p:txBody")?;

    let xml = String::from_utf8(out.writer.into_inner().into_inner())
        .map_err(|e| Error::XmlError(format!("Rendered text body is not UTF-8: {}", e)))?;

    Ok(TextBody {
        xml,
        hyperlinks: out.hyperlinks,
    })
}

struct TextBodyWriter {
    writer: Writer<Cursor<Vec<u8>>>,
    hyperlinks: Vec<(String, String)>,
}

impl TextBodyWriter {
    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<()> {
        self.start(BytesStart::new("a:p"))?;

        if paragraph.level > 0 || paragraph.space_after_pt > 0.0 {
            let mut ppr = BytesStart::new("a:pPr");
            if paragraph.level > 0 {
                ppr.push_attribute(("lvl", paragraph.level.to_string().as_str()));
            }

            if paragraph.space_after_pt > 0.0 {
                self.start(ppr)?;
                self.start(BytesStart::new("a:spcAft"))?;
                let mut pts = BytesStart::new("a:spcPts");
                pts.push_attribute(("val", hundredths(paragraph.space_after_pt).as_str()));
                self.empty(pts)?;
                self.end("a:spcAft")?;
                self.end("a:pPr")?;
            } else {
                self.empty(ppr)?;
            }
        }

        for run in &paragraph.runs {
            self.run(run)?;
        }

        self.end("a:p")
    }

    fn run(&mut self, run: &TextRun) -> Result<()> {
        self.start(BytesStart::new("a:r"))?;

        let mut rpr = BytesStart::new("a:rPr");
        rpr.push_attribute(("lang", "en-US"));
        rpr.push_attribute(("sz", hundredths(run.font.size_pt).as_str()));
        if run.bold {
            rpr.push_attribute(("b", "1"));
        }
        if run.underline {
            rpr.push_attribute(("u", "sng"));
        }
        rpr.push_attribute(("dirty", "0"));
        self.start(rpr)?;

        let mut latin = BytesStart::new("a:latin");
        latin.push_attribute(("typeface", run.font.name.as_str()));
        self.empty(latin)?;

        if let Some(target) = &run.hyperlink {
            let id = format!("rIdLink{}", self.hyperlinks.len() + 1);
            let mut link = BytesStart::new("a:hlinkClick");
            link.push_attribute(("r:id", id.as_str()));
            self.empty(link)?;
            self.hyperlinks.push((id, target.clone()));
        }

        self.end("a:rPr")?;

        self.start(BytesStart::new("a:t"))?;
        self.emit(Event::Text(BytesText::new(&run.text)))?;
        self.end("a:t")?;

        self.end("a:r")
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.emit(Event::Start(element))
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.emit(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::XmlError(format!("Failed to write text body: {}", e)))
    }
}

/// Points as DrawingML hundredths of a point.
fn hundredths(points: f32) -> String {
    ((points * 100.0).round() as i64).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionKind;
    use crate::writer::{RegionContent, RegionWriter};
    use deck_core::{LineKind, LineRecord, Rect, RegionKey, Run};

    fn region_with(content: RegionContent) -> Region {
        let mut region = Region::new(RegionKey::DESCRIPTION, RegionKind::Body, Rect::new(0, 0, 10, 10));
        RegionWriter::default().write(&mut region, content).unwrap();
        region
    }

    #[test]
    fn test_empty_region_has_one_paragraph() {
        let region = Region::new(RegionKey::TITLE, RegionKind::Title, Rect::default());
        let body = text_body(&region).unwrap();
        assert_eq!(
            body.xml,
            "<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>"
        );
        assert!(body.hyperlinks.is_empty());
    }

    #[test]
    fn test_run_styles_and_escaping() {
        let line = LineRecord::new(
            LineKind::Heading,
            0,
            vec![Run {
                text: "R&D <now>".to_string(),
                bold: true,
                underline: false,
                hyperlink: None,
            }],
            8.0,
        );
        let body = text_body(&region_with(RegionContent::Lines(vec![line]))).unwrap();

        assert!(body.xml.contains("<a:spcAft><a:spcPts val=\"800\"/></a:spcAft>"));
        assert!(body.xml.contains("sz=\"1100\" b=\"1\""));
        assert!(body.xml.contains("<a:latin typeface=\"Avenir\"/>"));
        assert!(body.xml.contains("<a:t>R&amp;D &lt;now&gt;</a:t>"));
    }

    #[test]
    fn test_levels_and_hyperlinks() {
        let lines = vec![
            LineRecord::new(LineKind::ListItem, 0, vec![Run::plain("• "), Run::plain("top")], 0.0),
            LineRecord::new(
                LineKind::ListItem,
                1,
                vec![
                    Run::plain("1. "),
                    Run {
                        text: "docs".to_string(),
                        bold: false,
                        underline: true,
                        hyperlink: Some("https://docs".to_string()),
                    },
                ],
                0.0,
            ),
        ];
        let body = text_body(&region_with(RegionContent::Lines(lines))).unwrap();

        assert!(body.xml.contains("<a:pPr lvl=\"1\"/>"));
        assert!(!body.xml.contains("lvl=\"0\""));
        assert!(body.xml.contains("u=\"sng\""));
        assert!(body.xml.contains("<a:hlinkClick r:id=\"rIdLink1\"/>"));
        assert_eq!(
            body.hyperlinks,
            vec![("rIdLink1".to_string(), "https://docs".to_string())]
        );
        assert_eq!(body.xml.matches("<a:p>").count(), 2);
    }

    #[test]
    fn test_hundredths() {
        assert_eq!(hundredths(11.0), "1100");
        assert_eq!(hundredths(10.5), "1050");
        assert_eq!(hundredths(6.0), "600");
    }
}
