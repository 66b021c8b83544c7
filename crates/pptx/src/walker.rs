//! Slide markup parsing and text recovery.
//!
//! A slide is parsed into a small typed tree holding only what text
//! extraction needs: shapes, their optional text body, paragraphs, runs,
//! and run text. Every level may be absent; absence contributes no text.
//! Markup that is not well-formed is an error rather than an empty slide.

use doctext_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// The text-bearing structure of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideTree {
    /// Shapes in document order, including shapes inside groups.
    pub shapes: Vec<Shape>,
}

/// A shape (`p:sp`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    /// The shape's text container (`p:txBody`), if it has one.
    pub text_body: Option<TextBody>,
}

/// A text container (`p:txBody`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
}

/// A paragraph (`a:p`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

/// A text run (`a:r`). Formatting-only runs have no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: Option<String>,
}

impl SlideTree {
    /// Join every run's text with single spaces and trim the result once.
    pub fn text(&self) -> String {
        let mut texts = Vec::new();
        for shape in &self.shapes {
            shape.collect_text(&mut texts);
        }
        texts.join(" ").trim().to_string()
    }
}

impl Shape {
    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(body) = &self.text_body {
            body.collect_text(out);
        }
    }
}

impl TextBody {
    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        for paragraph in &self.paragraphs {
            paragraph.collect_text(out);
        }
    }
}

impl Paragraph {
    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        for run in &self.runs {
            match run.text.as_deref() {
                Some(text) if !text.is_empty() => out.push(text),
                _ => {}
            }
        }
    }
}

/// Parse one slide part and return its text.
///
/// `entry` names the slide part in errors.
pub fn slide_text(xml: &str, entry: &str) -> Result<String> {
    Ok(parse_slide(xml, entry)?.text())
}

/// Parse slide markup into a [`SlideTree`].
///
/// Shapes are taken from the shape tree (`p:spTree`) and from group shapes
/// inside it, in document order. Of an `mc:AlternateContent` block only the
/// `mc:Choice` branch is read, so fallback copies are not counted twice.
pub fn parse_slide(xml: &str, entry: &str) -> Result<SlideTree> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let invalid = |reason: String| Error::InvalidSlideMarkup {
        entry: entry.to_string(),
        reason,
    };

    let mut builder = TreeBuilder::default();
    let mut saw_root = false;
    let mut root_closed = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            invalid(format!("{} at byte {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(_) | Event::Empty(_) if root_closed => {
                return Err(invalid("content after the root element".to_string()));
            }
            Event::Start(ref e) => {
                saw_root = true;
                builder.open(e, false);
            }
            Event::Empty(ref e) => {
                saw_root = true;
                builder.open(e, true);
                root_closed = builder.stack.is_empty();
            }
            Event::End(_) => {
                builder.close();
                root_closed = builder.stack.is_empty();
            }
            Event::Text(ref e) if builder.stack.is_empty() => {
                if !e.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(invalid("text outside the root element".to_string()));
                }
            }
            Event::CData(_) if builder.stack.is_empty() => {
                return Err(invalid("CDATA outside the root element".to_string()));
            }
            Event::Text(ref e) => {
                if builder.in_text() {
                    let text = e
                        .unescape()
                        .map_err(|e| invalid(format!("bad text content: {}", e)))?;
                    builder.push_text(&text);
                }
            }
            Event::CData(ref e) => {
                if builder.in_text() {
                    builder.push_text(&String::from_utf8_lossy(e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(invalid("document has no root element".to_string()));
    }
    if let Some(open) = builder.stack.last() {
        return Err(invalid(format!(
            "unexpected end of document inside <{}>",
            String::from_utf8_lossy(open)
        )));
    }

    let tree = builder.tree;
    log::trace!("Parsed '{}' with {} shapes", entry, tree.shapes.len());
    Ok(tree)
}

/// Incremental construction of a [`SlideTree`] from start/end events.
#[derive(Default)]
struct TreeBuilder {
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    tree: SlideTree,
    /// The open shape and the stack depth it was opened at.
    shape: Option<(Shape, usize)>,
    /// Stack depth of the open `a:t` of the current run, if any.
    text_depth: Option<usize>,
}

impl TreeBuilder {
    fn open(&mut self, element: &BytesStart<'_>, empty: bool) {
        let name = element.name();
        let local = local_name(name.as_ref());

        match local {
            b"sp" if self.shape.is_none() && self.in_shape_container() => {
                self.shape = Some((Shape::default(), self.stack.len()));
            }
            b"txBody" if self.parent_is(b"sp") => {
                if let Some((shape, _)) = self.shape.as_mut() {
                    shape.text_body = Some(TextBody::default());
                }
            }
            b"p" if self.parent_is(b"txBody") => {
                if let Some(body) = self.text_body_mut() {
                    body.paragraphs.push(Paragraph::default());
                }
            }
            b"r" if self.parent_is(b"p") && self.ancestor_is(1, b"txBody") => {
                if let Some(paragraph) = self.text_body_mut().and_then(|b| b.paragraphs.last_mut()) {
                    paragraph.runs.push(Run::default());
                }
            }
            b"t" if self.parent_is(b"r") && self.ancestor_is(1, b"p") && self.ancestor_is(2, b"txBody") => {
                if let Some(run) = self.run_mut() {
                    if run.text.is_none() {
                        run.text = Some(String::new());
                        self.text_depth = Some(self.stack.len());
                    }
                }
            }
            _ => {}
        }

        self.stack.push(local.to_vec());
        if empty {
            // Self-closing elements have no end event.
            self.close();
        }
    }

    fn close(&mut self) {
        self.stack.pop();
        let depth = self.stack.len();

        if self.text_depth == Some(depth) {
            self.text_depth = None;
        }
        if matches!(self.shape, Some((_, d)) if d == depth) {
            if let Some((shape, _)) = self.shape.take() {
                self.tree.shapes.push(shape);
            }
        }
    }

    fn in_text(&self) -> bool {
        self.text_depth.is_some()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run_text) = self.run_mut().and_then(|r| r.text.as_mut()) {
            run_text.push_str(text);
        }
    }

    fn text_body_mut(&mut self) -> Option<&mut TextBody> {
        self.shape.as_mut().and_then(|(shape, _)| shape.text_body.as_mut())
    }

    fn run_mut(&mut self) -> Option<&mut Run> {
        self.text_body_mut()
            .and_then(|b| b.paragraphs.last_mut())
            .and_then(|p| p.runs.last_mut())
    }

    fn parent_is(&self, name: &[u8]) -> bool {
        self.ancestor_is(0, name)
    }

    /// Whether the open element `level` steps above the innermost one is `name`.
    fn ancestor_is(&self, level: usize, name: &[u8]) -> bool {
        self.stack
            .len()
            .checked_sub(level + 1)
            .map_or(false, |i| self.stack[i].as_slice() == name)
    }

    /// Whether a shape opened here belongs to the slide's shape tree.
    fn in_shape_container(&self) -> bool {
        let parent_ok = self.parent_is(b"spTree")
            || self.parent_is(b"grpSp")
            || (self.parent_is(b"Choice") && self.ancestor_is(1, b"AlternateContent"));
        parent_ok && self.has_ancestor(b"spTree") && !self.has_ancestor(b"Fallback")
    }

    fn has_ancestor(&self, name: &[u8]) -> bool {
        self.stack.iter().any(|open| open.as_slice() == name)
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{slide_xml, wrap_shapes};

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_single_run() {
        let xml = slide_xml(&["Intro"]);
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "Intro");
    }

    #[test]
    fn test_runs_joined_with_single_space() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:p><a:r><a:t>Hello</a:t></a:r><a:r><a:t>world</a:t></a:r></a:p>\
             <a:p><a:r><a:t>again</a:t></a:r></a:p></p:txBody></p:sp>\
             <p:sp><p:txBody><a:p><a:r><a:t>second shape</a:t></a:r></a:p></p:txBody></p:sp>",
        );
        assert_eq!(
            slide_text(&xml, "slide1.xml").unwrap(),
            "Hello world again second shape"
        );
    }

    #[test]
    fn test_interior_whitespace_preserved_and_trimmed_once() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:p><a:r><a:t>  two  spaces</a:t></a:r>\
             <a:r><a:t>tail  </a:t></a:r></a:p></p:txBody></p:sp>",
        );
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "two  spaces tail");
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = slide_xml(&["Q&amp;A &lt;live&gt;"]);
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "Q&A <live>");
    }

    #[test]
    fn test_shape_without_text_body_skipped() {
        let xml = wrap_shapes(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"1\" name=\"Rect\"/></p:nvSpPr><p:spPr/></p:sp>\
             <p:pic><p:blipFill/></p:pic>\
             <p:sp><p:txBody><a:p><a:r><a:t>Body text</a:t></a:r></a:p></p:txBody></p:sp>",
        );
        let tree = parse_slide(&xml, "slide1.xml").unwrap();
        assert_eq!(tree.shapes.len(), 2);
        assert!(tree.shapes[0].text_body.is_none());
        assert_eq!(tree.text(), "Body text");
    }

    #[test]
    fn test_text_body_without_runs_is_empty() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang=\"en-US\"/></a:p></p:txBody></p:sp>\
             <p:sp><p:txBody/></p:sp>",
        );
        let tree = parse_slide(&xml, "slide1.xml").unwrap();
        assert_eq!(tree.shapes.len(), 2);
        assert_eq!(tree.shapes[0].text_body.as_ref().unwrap().paragraphs.len(), 1);
        assert_eq!(tree.shapes[1].text_body, Some(TextBody::default()));
        assert_eq!(tree.text(), "");
    }

    #[test]
    fn test_runs_without_text_contribute_nothing() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:p><a:r><a:rPr b=\"1\"/></a:r><a:r/><a:r><a:t/></a:r>\
             <a:r><a:t>only</a:t></a:r></a:p></p:txBody></p:sp>",
        );
        let tree = parse_slide(&xml, "slide1.xml").unwrap();
        let runs = &tree.shapes[0].text_body.as_ref().unwrap().paragraphs[0].runs;
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0].text, None);
        assert_eq!(runs[1].text, None);
        assert_eq!(tree.text(), "only");
    }

    #[test]
    fn test_grouped_shapes_in_document_order() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:p><a:r><a:t>first</a:t></a:r></a:p></p:txBody></p:sp>\
             <p:grpSp><p:nvGrpSpPr/><p:sp><p:txBody><a:p><a:r><a:t>grouped</a:t></a:r></a:p></p:txBody></p:sp></p:grpSp>\
             <p:sp><p:txBody><a:p><a:r><a:t>last</a:t></a:r></a:p></p:txBody></p:sp>",
        );
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "first grouped last");
    }

    #[test]
    fn test_alternate_content_read_once() {
        let shape = "<p:sp><p:txBody><a:p><a:r><a:t>Equation</a:t></a:r></a:p></p:txBody></p:sp>";
        let xml = wrap_shapes(&format!(
            "<mc:AlternateContent xmlns:mc=\"http://schemas.openxmlformats.org/markup-compatibility/2006\">\
             <mc:Choice Requires=\"a14\">{0}</mc:Choice><mc:Fallback>{0}</mc:Fallback></mc:AlternateContent>",
            shape
        ));
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "Equation");
    }

    #[test]
    fn test_shapes_outside_shape_tree_ignored() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:p><a:r><a:t>visible</a:t></a:r></a:p></p:txBody></p:sp>\
             <p:extLst><p:ext><p:sp><p:txBody><a:p><a:r><a:t>hidden</a:t></a:r></a:p></p:txBody></p:sp></p:ext></p:extLst>",
        );
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "visible");
    }

    #[test]
    fn test_text_outside_root_is_fatal() {
        let leading = "garbage<p:sld><p:cSld><p:spTree></p:spTree></p:cSld></p:sld>";
        let trailing = "<p:sld><p:cSld><p:spTree></p:spTree></p:cSld></p:sld>garbage";
        for xml in [leading, trailing] {
            assert!(
                matches!(slide_text(xml, "slide1.xml"), Err(Error::InvalidSlideMarkup { .. })),
                "{} should be rejected",
                xml
            );
        }
    }

    #[test]
    fn test_second_root_is_fatal() {
        let xml = format!("{}<p:sld/>", wrap_shapes(""));
        assert!(matches!(
            slide_text(&xml, "slide1.xml"),
            Err(Error::InvalidSlideMarkup { .. })
        ));
        assert!(matches!(
            slide_text("<p:sld/><p:sld/>", "slide1.xml"),
            Err(Error::InvalidSlideMarkup { .. })
        ));
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        let xml = format!("{}\n\n", slide_xml(&["ok"]));
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "ok");
    }

    #[test]
    fn test_field_and_break_elements_ignored() {
        let xml = wrap_shapes(
            "<p:sp><p:txBody><a:p><a:r><a:t>Line one</a:t></a:r><a:br/>\
             <a:fld id=\"{1}\" type=\"slidenum\"><a:t>3</a:t></a:fld></a:p></p:txBody></p:sp>",
        );
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "Line one");
    }

    #[test]
    fn test_empty_slide() {
        let xml = wrap_shapes("");
        assert_eq!(slide_text(&xml, "slide1.xml").unwrap(), "");
    }

    #[test]
    fn test_truncated_markup_is_fatal() {
        let xml = slide_xml(&["Intro"]);
        let truncated = &xml[..xml.len() - 20];
        match slide_text(truncated, "ppt/slides/slide1.xml") {
            Err(Error::InvalidSlideMarkup { entry, .. }) => assert_eq!(entry, "ppt/slides/slide1.xml"),
            other => panic!("expected InvalidSlideMarkup, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_tags_are_fatal() {
        let xml = wrap_shapes("<p:sp><p:txBody><a:p><a:r><a:t>x</a:r></a:t></a:p></p:txBody></p:sp>");
        assert!(matches!(
            slide_text(&xml, "slide1.xml"),
            Err(Error::InvalidSlideMarkup { .. })
        ));
    }

    #[test]
    fn test_empty_document_is_fatal() {
        assert!(matches!(
            slide_text("", "slide1.xml"),
            Err(Error::InvalidSlideMarkup { .. })
        ));
        assert!(matches!(
            slide_text("<?xml version=\"1.0\"?>", "slide1.xml"),
            Err(Error::InvalidSlideMarkup { .. })
        ));
    }
}
