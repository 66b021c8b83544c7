//! PPTX (Office Open XML) backend for slide-scoped text extraction.
//!
//! A .pptx file is a ZIP archive; each slide's markup lives in its own
//! entry (`ppt/slides/slideN.xml`). Slides are ordered by the number `N`,
//! and text is recovered from the shape → paragraph → run → text tree.

pub mod extractor;
pub mod package;
pub mod slides;
pub mod walker;

pub use extractor::PptxExtractor;
pub use package::Package;
pub use slides::{SlideIndex, SlideLayout, SlidePart};
pub use walker::{parse_slide, slide_text, Paragraph, Run, Shape, SlideTree, TextBody};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    /// Build an in-memory ZIP archive from `(name, contents)` pairs.
    pub fn archive<B: AsRef<[u8]>>(entries: &[(&str, B)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(contents.as_ref()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    /// Slide markup with one shape per entry, each shape holding one run.
    pub fn slide_xml(runs: &[&str]) -> String {
        let shapes: String = runs
            .iter()
            .map(|text| {
                format!(
                    "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Text\"/></p:nvSpPr>\
                     <p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>",
                    text
                )
            })
            .collect();
        wrap_shapes(&shapes)
    }

    /// Wrap raw shape markup in a slide document.
    pub fn wrap_shapes(shapes: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
             xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
             <p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>",
            shapes
        )
    }
}
