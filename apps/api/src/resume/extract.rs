//! Document text extraction: PDF and Word binaries to flattened plain text.
//!
//! Extraction is lossy by nature: tables collapse into run-on text and layout is
//! not reconstructed. A document that cannot be parsed is an error, never an
//! empty string.

use std::collections::BTreeMap;
use std::panic;

use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, StructuredDataTag,
    StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild,
};
use lopdf::{Document, Object, ObjectId};
use percent_encoding::percent_decode_str;
use thiserror::Error;
use tracing::{debug, warn};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text: {0}")]
    ExtractionFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Doc,
    Docx,
}

impl DocumentType {
    pub fn from_mime(mime: &str) -> Result<Self, ExtractError> {
        match mime.trim() {
            MIME_PDF => Ok(Self::Pdf),
            MIME_DOC => Ok(Self::Doc),
            MIME_DOCX => Ok(Self::Docx),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => MIME_PDF,
            Self::Doc => MIME_DOC,
            Self::Docx => MIME_DOCX,
        }
    }

    fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            Self::Pdf => &PdfExtractor,
            Self::Doc | Self::Docx => &WordExtractor,
        }
    }
}

/// A parsing backend for one family of document formats.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Extracts plain text from `bytes` declared as `mime`.
pub fn extract_text(bytes: &[u8], mime: &str) -> Result<String, ExtractError> {
    let doc_type = DocumentType::from_mime(mime)?;
    extract_document(bytes, doc_type)
}

fn extract_document(bytes: &[u8], doc_type: DocumentType) -> Result<String, ExtractError> {
    let text = doc_type.extractor().extract(bytes)?;
    debug!(
        mime = doc_type.mime(),
        bytes = bytes.len(),
        chars = text.chars().count(),
        "Extracted document text"
    );
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// PDF
// ────────────────────────────────────────────────────────────────────────────

/// Page-by-page extraction via `lopdf`, one run per text-showing operator,
/// with `pdf-extract` as a fallback when page extraction fails or recovers
/// nothing.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractError::ExtractionFailed(format!("invalid PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(ExtractError::ExtractionFailed(
                "PDF is encrypted".to_string(),
            ));
        }

        resolve_pages(lopdf_pages(&doc), || extract_with_pdf_extract(bytes))
    }
}

type Pages = Vec<Vec<String>>;

/// Picks the `lopdf` pages when they hold any text, otherwise the fallback's.
/// A document that parsed but has no text layer yields blank pages, not an error.
fn resolve_pages(
    primary: Result<Pages, String>,
    fallback: impl FnOnce() -> Result<Pages, String>,
) -> Result<String, ExtractError> {
    if let Ok(pages) = &primary {
        if pages.is_empty() || pages.iter().any(|runs| !runs.is_empty()) {
            return Ok(join_pages(pages));
        }
    }

    match (fallback(), primary) {
        (Ok(pages), _) => {
            debug!(pages = pages.len(), "Used pdf-extract fallback");
            Ok(join_pages(&pages))
        }
        (Err(fallback_error), Err(page_error)) => Err(ExtractError::ExtractionFailed(format!(
            "{page_error}; fallback: {fallback_error}"
        ))),
        (Err(fallback_error), Ok(pages)) => {
            // Parsed fine but holds no text layer (e.g. a scanned image).
            warn!("PDF has no extractable text: {fallback_error}");
            Ok(join_pages(&pages))
        }
    }
}

fn lopdf_pages(doc: &Document) -> Result<Pages, String> {
    doc.get_pages()
        .into_iter()
        .map(|(page_num, page_id)| {
            page_runs(doc, page_id).map_err(|e| format!("page {page_num}: {e}"))
        })
        .collect()
}

/// Text runs of one page: each `Tj`, `TJ`, `'` and `"` operator is one run.
fn page_runs(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<String>> {
    let encodings: BTreeMap<Vec<u8>, &str> = doc
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut encoding = None;
    let mut runs = Vec::new();
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                encoding = operation
                    .operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|font| encodings.get(font).copied());
            }
            "Tj" | "TJ" | "'" | "\"" => {
                let mut run = String::new();
                if let Some(shown) = operation.operands.last() {
                    push_shown_text(shown, encoding, &mut run);
                }
                let run = run.trim();
                if !run.is_empty() {
                    runs.push(decode_run(run));
                }
            }
            _ => {}
        }
    }
    Ok(runs)
}

/// A `TJ` kerning offset wider than this reads as a word gap.
const TJ_WORD_GAP: f32 = -100.0;

fn push_shown_text(operand: &Object, encoding: Option<&str>, out: &mut String) {
    match operand {
        Object::String(bytes, _) => out.push_str(&Document::decode_text(encoding, bytes)),
        Object::Array(items) => {
            for item in items {
                match item {
                    Object::Integer(offset) if (*offset as f32) < TJ_WORD_GAP => out.push(' '),
                    Object::Real(offset) if *offset < TJ_WORD_GAP => out.push(' '),
                    Object::String(..) => push_shown_text(item, encoding, out),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn extract_with_pdf_extract(bytes: &[u8]) -> Result<Pages, String> {
    // pdf-extract panics on some malformed inputs.
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| "pdf-extract panicked".to_string())?
        .map_err(|e| format!("pdf-extract failed: {e}"))?;

    let pages: Pages = pages.iter().map(|page| split_runs(page)).collect();
    if pages.iter().all(Vec::is_empty) {
        return Err("pdf-extract returned empty content".to_string());
    }
    Ok(pages)
}

/// Splits laid-out page text into trimmed, non-empty, percent-decoded runs.
fn split_runs(page_text: &str) -> Vec<String> {
    page_text
        .lines()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .map(decode_run)
        .collect()
}

fn decode_run(run: &str) -> String {
    percent_decode_str(run).decode_utf8_lossy().into_owned()
}

/// Each run is followed by a single space; each page by a newline.
fn join_pages(pages: &[Vec<String>]) -> String {
    let mut text = String::new();
    for runs in pages {
        for run in runs {
            text.push_str(run);
            text.push(' ');
        }
        text.push('\n');
    }
    text
}

// ────────────────────────────────────────────────────────────────────────────
// Word
// ────────────────────────────────────────────────────────────────────────────

/// Raw text from the OOXML container: one line per paragraph, table cells
/// flattened in reading order. Content controls, hyperlinks and tracked
/// insertions are read through; tracked deletions, images and embedded objects
/// are dropped.
///
/// Legacy binary `.doc` files are not an OOXML container and fail here.
pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractError::ExtractionFailed(format!("invalid Word document: {e}")))?;

        let mut text = String::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut text),
                DocumentChild::Table(table) => push_table(table, &mut text),
                DocumentChild::StructuredDataTag(tag) => push_content_control(tag, &mut text),
                _ => {}
            }
        }
        Ok(text)
    }
}

fn push_paragraph(paragraph: &Paragraph, out: &mut String) {
    push_paragraph_children(&paragraph.children, out);
    out.push('\n');
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run(run, out);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => push_content_control(tag, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

fn push_content_control(tag: &StructuredDataTag, out: &mut String) {
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => push_run(run, out),
            StructuredDataTagChild::Paragraph(paragraph) => push_paragraph(paragraph, out),
            StructuredDataTagChild::Table(table) => push_table(table, out),
            StructuredDataTagChild::StructuredDataTag(nested) => push_content_control(nested, out),
            _ => {}
        }
    }
}

fn push_table(table: &Table, out: &mut String) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => push_paragraph(paragraph, out),
                    TableCellContent::Table(nested) => push_table(nested, out),
                    TableCellContent::StructuredDataTag(tag) => push_content_control(tag, out),
                    _ => {}
                }
            }
        }
    }
}
