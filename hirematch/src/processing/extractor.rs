use std::path::Path;

use crate::error::{MatchError, Result};
use crate::models::{DocumentFormat, DocumentKind, RawDocument};

const RESUME_FORMATS: &[DocumentFormat] =
    &[DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Txt];
const JD_FORMATS: &[DocumentFormat] =
    &[DocumentFormat::Pdf, DocumentFormat::Txt, DocumentFormat::Docx];

pub fn validate_resume_file(filename: &str) -> bool {
    format_from_filename(filename).is_some_and(|f| RESUME_FORMATS.contains(&f))
}

pub fn validate_jd_file(filename: &str) -> bool {
    format_from_filename(filename).is_some_and(|f| JD_FORMATS.contains(&f))
}

fn format_from_filename(filename: &str) -> Option<DocumentFormat> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
}

/// Detect the format from the extension, falling back to magic bytes.
pub fn detect_format(filename: &str, bytes: &[u8]) -> Option<DocumentFormat> {
    if let Some(format) = format_from_filename(filename) {
        return Some(format);
    }
    // PDF: %PDF
    if bytes.starts_with(b"%PDF") {
        return Some(DocumentFormat::Pdf);
    }
    // ZIP container (PK\x03\x04); the only one we accept is DOCX
    if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
        return Some(DocumentFormat::Docx);
    }
    None
}

/// Turns uploaded PDF, DOCX and plain-text files into raw document text.
pub struct ContentExtractor;

impl ContentExtractor {
    /// Extract a document and reject it when no usable text comes out.
    pub fn extract(filename: &str, kind: DocumentKind, bytes: &[u8]) -> Result<RawDocument> {
        let format = detect_format(filename, bytes)
            .ok_or_else(|| MatchError::UnsupportedFormat(filename.to_string()))?;

        let accepted = match kind {
            DocumentKind::Resume => RESUME_FORMATS,
            DocumentKind::JobDescription => JD_FORMATS,
        };
        if !accepted.contains(&format) {
            return Err(MatchError::UnsupportedFormat(format!("{format} for {kind}")));
        }

        let text = Self::extract_text(format, bytes)?;
        tracing::debug!(
            "Extracted {} words from {} ({})",
            text.split_whitespace().count(),
            filename,
            format
        );
        RawDocument::new(filename, kind, text)
    }

    pub fn extract_file(path: impl AsRef<Path>, kind: DocumentKind) -> Result<RawDocument> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        Self::extract(filename, kind, &bytes)
    }

    pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String> {
        match format {
            DocumentFormat::Pdf => Self::extract_from_pdf(bytes),
            DocumentFormat::Docx => Self::extract_from_docx(bytes),
            DocumentFormat::Txt => Ok(String::from_utf8_lossy(bytes).trim().to_string()),
        }
    }

    /// pdf-extract panics on some fonts and encodings; a panic is reported as
    /// an extraction error for this document only.
    pub fn extract_from_pdf(bytes: &[u8]) -> Result<String> {
        let text = contain_panic("PDF", || pdf_extract::extract_text_from_mem(bytes))?
            .map_err(|e| MatchError::Extraction(format!("PDF extraction failed: {e}")))?;
        Ok(text.trim().to_string())
    }

    /// Paragraph text one per line; table rows become `cell | cell` lines.
    pub fn extract_from_docx(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| MatchError::Extraction(format!("DOCX parse error: {e}")))?;

        let mut lines: Vec<String> = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    let text = paragraph_text(paragraph);
                    if !text.trim().is_empty() {
                        lines.push(text);
                    }
                }
                docx_rs::DocumentChild::Table(table) => {
                    lines.extend(table_lines(table));
                }
                _ => {}
            }
        }

        Ok(lines.join("\n").trim().to_string())
    }
}

fn contain_panic<T, F>(label: &str, f: F) -> Result<T>
where
    F: FnOnce() -> T + std::panic::UnwindSafe,
{
    std::panic::catch_unwind(f).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::warn!("{} extractor panicked: {}", label, message);
        MatchError::Extraction(format!("{label} extraction failed: {message}"))
    })
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut content = String::new();
    for para_child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = para_child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(text) = run_child {
                    content.push_str(&text.text);
                }
            }
        }
    }
    content
}

fn table_lines(table: &docx_rs::Table) -> Vec<String> {
    let mut lines = Vec::new();
    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|row_child| {
                let docx_rs::TableRowChild::TableCell(cell) = row_child;
                cell.children
                    .iter()
                    .filter_map(|content| match content {
                        docx_rs::TableCellContent::Paragraph(para) => Some(paragraph_text(para)),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string()
            })
            .filter(|cell| !cell.is_empty())
            .collect();
        if !cells.is_empty() {
            lines.push(cells.join(" | "));
        }
    }
    lines
}
