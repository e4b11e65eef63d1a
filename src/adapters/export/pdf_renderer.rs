//! Minimal PDF writer for the prospect list document.
//!
//! Writes an uncompressed PDF 1.4 file with one built-in font (Helvetica),
//! so the renderer has no external dependencies. Layout follows the printed
//! list: title at the top of the first page, then one line per entry on a
//! fixed vertical step, breaking to a new page at the bottom margin.
//!
//! # Example
//!
//! ```rust,ignore
//! let renderer = PdfDocumentRenderer::new();
//! let bytes = renderer.render_document(&prospect_list_document(title, &prospects)).await?;
//! ```

use async_trait::async_trait;
use std::fmt::Write as _;

use crate::domain::report::ReportDocument;
use crate::ports::{DocumentRenderer, ExportError, ExportFormat};

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Page geometry and type sizes, in millimetres and points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub left_margin_mm: f64,
    /// Baseline of the title on the first page.
    pub title_y_mm: f64,
    /// Baseline of the first line under the title.
    pub first_line_y_mm: f64,
    /// Baseline of the first line on continuation pages.
    pub continuation_y_mm: f64,
    /// Lowest baseline allowed before breaking the page.
    pub bottom_limit_mm: f64,
    pub line_step_mm: f64,
    pub title_size_pt: f64,
    pub line_size_pt: f64,
}

impl Default for PageLayout {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            left_margin_mm: 14.0,
            title_y_mm: 15.0,
            first_line_y_mm: 25.0,
            continuation_y_mm: 15.0,
            bottom_limit_mm: 287.0,
            line_step_mm: 10.0,
            title_size_pt: 16.0,
            line_size_pt: 12.0,
        }
    }
}

/// A line of text placed on a page, measured from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub y_mm: f64,
    pub size_pt: f64,
    pub text: String,
}

/// Renders `ReportDocument`s to PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfDocumentRenderer {
    layout: PageLayout,
}

impl PdfDocumentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Assigns every line of the document to a page and a baseline.
    pub fn paginate(&self, document: &ReportDocument) -> Vec<Vec<PlacedText>> {
        let layout = &self.layout;
        let mut pages = vec![vec![PlacedText {
            y_mm: layout.title_y_mm,
            size_pt: layout.title_size_pt,
            text: document.title.clone(),
        }]];

        let mut y = layout.first_line_y_mm;
        for line in &document.lines {
            if y > layout.bottom_limit_mm {
                pages.push(Vec::new());
                y = layout.continuation_y_mm;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedText {
                    y_mm: y,
                    size_pt: layout.line_size_pt,
                    text: line.clone(),
                });
            }
            y += layout.line_step_mm;
        }

        pages
    }

    fn content_stream(&self, page: &[PlacedText]) -> Vec<u8> {
        let x = self.layout.left_margin_mm * PT_PER_MM;
        let mut out = Vec::new();
        for placed in page {
            let y = (self.layout.page_height_mm - placed.y_mm) * PT_PER_MM;
            out.extend_from_slice(
                format!("BT /F1 {:.0} Tf {:.2} {:.2} Td (", placed.size_pt, x, y).as_bytes(),
            );
            out.extend_from_slice(&encode_text(&placed.text));
            out.extend_from_slice(b") Tj ET\n");
        }
        out
    }

    fn write_pdf(&self, pages: &[Vec<PlacedText>]) -> Result<Vec<u8>, ExportError> {
        let width = self.layout.page_width_mm * PT_PER_MM;
        let height = self.layout.page_height_mm * PT_PER_MM;

        // Objects 1-3 are catalog, page tree and font; pages follow in pairs.
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + i * 2).collect();
        let mut objects: Vec<Vec<u8>> = Vec::with_capacity(3 + pages.len() * 2);

        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

        let mut kids = String::new();
        for id in &page_ids {
            write!(kids, "{} 0 R ", id).map_err(|e| pdf_error(e.to_string()))?;
        }
        objects.push(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.trim_end(),
                pages.len()
            )
            .into_bytes(),
        );

        objects.push(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        );

        for (page, page_id) in pages.iter().zip(&page_ids) {
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    width,
                    height,
                    page_id + 1
                )
                .into_bytes(),
            );

            let stream = self.content_stream(page);
            let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            content.extend_from_slice(&stream);
            content.extend_from_slice(b"endstream");
            objects.push(content);
        }

        let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );

        Ok(out)
    }
}

#[async_trait]
impl DocumentRenderer for PdfDocumentRenderer {
    async fn render_document(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let pages = self.paginate(document);
        let bytes = self.write_pdf(&pages)?;
        tracing::debug!(
            "Rendered PDF with {} lines on {} pages ({} bytes)",
            document.lines.len(),
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn pdf_error(reason: impl Into<String>) -> ExportError {
    ExportError::render_failed(ExportFormat::Pdf, reason)
}

/// Encodes text for a PDF literal string in WinAnsi.
///
/// Latin-1 maps to itself except 0x80-0x9F, where WinAnsi places the
/// typographic glyphs. Anything without a WinAnsi code becomes `?`.
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\n' | '\r' => out.push(b' '),
            c if (c as u32) < 0x20 => {}
            c => out.push(win_ansi_byte(c).unwrap_or(b'?')),
        }
    }
    out
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}
