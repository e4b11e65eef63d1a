//! XLSX workbook renderer.
//!
//! Packages a `Workbook` as an Office Open XML spreadsheet: a zip container
//! holding the workbook part, one worksheet part per sheet and the
//! relationships that tie them together. Cells are written as inline
//! strings, so no shared string table is needed.

use async_trait::async_trait;
use quick_xml::escape::escape;
use std::borrow::Cow;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::report::{Sheet, Workbook};
use crate::ports::{ExportError, ExportFormat, WorkbookRenderer};

const SHEET_NAME_MAX_LEN: usize = 31;
const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Renders workbooks to XLSX bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWorkbookRenderer;

impl XlsxWorkbookRenderer {
    pub fn new() -> Self {
        Self
    }

    fn package(&self, workbook: &Workbook) -> Result<Vec<u8>, ExportError> {
        if workbook.sheets.is_empty() {
            return Err(xlsx_error("workbook has no sheets"));
        }
        for sheet in &workbook.sheets {
            validate_sheet_name(&sheet.name)?;
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut parts = vec![
            ("[Content_Types].xml".to_string(), content_types(workbook.sheets.len())),
            ("_rels/.rels".to_string(), root_rels()),
            ("xl/workbook.xml".to_string(), workbook_xml(workbook)),
            ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels(workbook.sheets.len())),
            ("xl/styles.xml".to_string(), styles_xml()),
        ];
        for (i, sheet) in workbook.sheets.iter().enumerate() {
            parts.push((format!("xl/worksheets/sheet{}.xml", i + 1), worksheet_xml(sheet)));
        }

        for (name, body) in parts {
            zip.start_file(name.as_str(), options)
                .map_err(|e| xlsx_error(format!("Failed to start {}: {}", name, e)))?;
            zip.write_all(body.as_bytes())
                .map_err(|e| xlsx_error(format!("Failed to write {}: {}", name, e)))?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| xlsx_error(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl WorkbookRenderer for XlsxWorkbookRenderer {
    async fn render_workbook(&self, workbook: &Workbook) -> Result<Vec<u8>, ExportError> {
        let bytes = self.package(workbook)?;
        tracing::debug!(
            "Rendered XLSX with {} sheets ({} bytes)",
            workbook.sheets.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn xlsx_error(reason: impl Into<String>) -> ExportError {
    ExportError::render_failed(ExportFormat::Xlsx, reason)
}

fn validate_sheet_name(name: &str) -> Result<(), ExportError> {
    if name.is_empty() || name.chars().count() > SHEET_NAME_MAX_LEN {
        return Err(xlsx_error(format!(
            "sheet name '{}' must be 1 to {} characters",
            name, SHEET_NAME_MAX_LEN
        )));
    }
    if name.contains(SHEET_NAME_FORBIDDEN) {
        return Err(xlsx_error(format!("sheet name '{}' contains a forbidden character", name)));
    }
    Ok(())
}

/// Spreadsheet column letters for a zero-based index: 0 -> A, 25 -> Z, 26 -> AA.
fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

fn content_types(sheet_count: usize) -> String {
    let mut xml = format!(
        "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
         <Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>",
        XML_DECL
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
            i
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn root_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
         <Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"xl/workbook.xml\"/>\
         </Relationships>",
        XML_DECL, PKG_REL_NS, REL_NS
    )
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut xml = format!(
        "{}<workbook xmlns=\"{}\" xmlns:r=\"{}\"><sheets>",
        XML_DECL, MAIN_NS, REL_NS
    );
    for (i, sheet) in workbook.sheets.iter().enumerate() {
        xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            escape(sheet.name.as_str()),
            i + 1,
            i + 1
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = format!("{}<Relationships xmlns=\"{}\">", XML_DECL, PKG_REL_NS);
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{}/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
            i, REL_NS, i
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"{}/styles\" Target=\"styles.xml\"/>",
        sheet_count + 1,
        REL_NS
    ));
    xml.push_str("</Relationships>");
    xml
}

fn styles_xml() -> String {
    format!(
        "{}<styleSheet xmlns=\"{}\">\
         <fonts count=\"1\"><font><sz val=\"11\"/><name val=\"Calibri\"/></font></fonts>\
         <fills count=\"1\"><fill><patternFill patternType=\"none\"/></fill></fills>\
         <borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>\
         <cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\
         <cellXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/></cellXfs>\
         </styleSheet>",
        XML_DECL, MAIN_NS
    )
}

/// Drops characters XML 1.0 cannot carry (C0 controls other than tab,
/// newline and carriage return, and the U+FFFE/U+FFFF non-characters).
/// Spreadsheet readers refuse a part that contains them.
fn xml_safe(value: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        !matches!(
            c,
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
        )
    }
    if value.chars().all(allowed) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.chars().filter(|&c| allowed(c)).collect())
    }
}

fn worksheet_xml(sheet: &Sheet) -> String {
    let mut xml = format!("{}<worksheet xmlns=\"{}\"><sheetData>", XML_DECL, MAIN_NS);
    let header = std::iter::once(&sheet.columns);
    for (row_index, cells) in header.chain(sheet.rows.iter()).enumerate() {
        let row_number = row_index + 1;
        xml.push_str(&format!("<row r=\"{}\">", row_number));
        for (col, value) in cells.iter().enumerate() {
            let value = xml_safe(value);
            // Blank cells are left out; readers treat them as empty.
            if value.is_empty() {
                continue;
            }
            xml.push_str(&format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                column_letters(col),
                row_number,
                escape(value.as_ref())
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn sheet(name: &str) -> Sheet {
        Sheet {
            name: name.to_string(),
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![vec!["1".to_string(), "Acme & Sons <Ltd>".to_string()]],
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(12), "M");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn sheet_names_are_validated() {
        assert!(validate_sheet_name("Prospek").is_ok());
        assert!(validate_sheet_name("").is_err());
        assert!(validate_sheet_name("a/b").is_err());
        assert!(validate_sheet_name(&"x".repeat(32)).is_err());
    }

    #[test]
    fn worksheet_escapes_cell_text() {
        let xml = worksheet_xml(&sheet("Prospek"));
        assert!(xml.contains("Acme &amp; Sons &lt;Ltd&gt;"));
        assert!(xml.contains("<c r=\"A1\" t=\"inlineStr\"><is><t xml:space=\"preserve\">id</t>"));
        assert!(xml.contains("<c r=\"B2\""));
    }

    #[test]
    fn control_characters_are_dropped_from_cells() {
        let sheet = Sheet {
            name: "Aktivitas".to_string(),
            columns: vec!["notes".to_string(), "extra".to_string()],
            rows: vec![vec![
                "line\u{B}break\u{1}\tok\nnext".to_string(),
                "\u{7}".to_string(),
            ]],
        };

        let xml = worksheet_xml(&sheet);
        assert!(!xml.contains('\u{B}'));
        assert!(!xml.contains('\u{1}'));
        assert!(xml.contains("linebreak\tok\nnext"));
        assert!(!xml.contains("<c r=\"B2\""));
    }

    #[test]
    fn clean_text_is_not_copied() {
        assert!(matches!(xml_safe("Acme"), Cow::Borrowed("Acme")));
    }

    #[tokio::test]
    async fn package_contains_every_part() {
        let workbook = Workbook {
            sheets: vec![sheet("Prospek"), sheet("Aktivitas")],
        };
        let bytes = XlsxWorkbookRenderer::new()
            .render_workbook(&workbook)
            .await
            .unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }

        let workbook_part = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook_part.contains("<sheet name=\"Prospek\" sheetId=\"1\" r:id=\"rId1\"/>"));
        assert!(workbook_part.contains("<sheet name=\"Aktivitas\" sheetId=\"2\" r:id=\"rId2\"/>"));
    }

    #[tokio::test]
    async fn empty_workbook_is_rejected() {
        let err = XlsxWorkbookRenderer::new()
            .render_workbook(&Workbook { sheets: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::RenderFailed { format: ExportFormat::Xlsx, .. }));
    }
}
