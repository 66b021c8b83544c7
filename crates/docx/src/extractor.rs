//! DOCX text extractor.

use doctext_core::{DocumentFormat, Error, Result, Source, TextExtractor};
use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

/// Text extractor for DOCX (Office Open XML) documents.
///
/// Body paragraphs and paragraphs inside table cells are emitted in
/// document order and joined by the paragraph separator.
#[derive(Debug, Clone)]
pub struct DocxExtractor {
    paragraph_separator: String,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self {
            paragraph_separator: "\n\n".to_string(),
        }
    }
}

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom separator between paragraphs.
    pub fn with_paragraph_separator(mut self, separator: impl Into<String>) -> Self {
        self.paragraph_separator = separator.into();
        self
    }

    /// Extract text from an in-memory DOCX.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<String> {
        let docx = read_docx(data).map_err(|e| Error::ExtractionError {
            format: DocumentFormat::Docx,
            message: e.to_string(),
        })?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                DocumentChild::Table(t) => collect_table(t, &mut paragraphs),
                _ => {}
            }
        }

        log::debug!("DOCX has {} paragraphs", paragraphs.len());

        Ok(paragraphs.join(&self.paragraph_separator).trim_end().to_string())
    }
}

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, source: &Source, locator: Option<i64>) -> Result<String> {
        self.check_locator(locator)?;
        source.validate(DocumentFormat::Docx)?;

        let data = source.read()?;
        self.extract_bytes(&data)
    }
}

#[allow(irrefutable_let_patterns)]
fn collect_table(table: &Table, out: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else {
            continue;
        };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => out.push(paragraph_text(p)),
                    TableCellContent::Table(t) => collect_table(t, out),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}
