//! XLSX encoder.
//!
//! Builds a single-worksheet OOXML workbook entirely in memory: the ZIP
//! container holds `[Content_Types].xml`, the package relationships, the
//! workbook and its relationships, a minimal styles part, the shared strings
//! table, and one worksheet. Strings are deduplicated through the shared
//! table; numbers are written as numeric cells. No styling beyond the
//! defaults.
//!
//! Cell text containing control characters that XML 1.0 cannot carry fails
//! loudly with `ExportError::Encoding` rather than being silently mangled.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::io::Write;

use zip::write::{SimpleFileOptions, ZipWriter};

use super::{Cell, ExportError, Table};

const SHEET_NAME: &str = "Members";

/// Serialize the dataset to workbook bytes.
pub fn encode(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut strings = SharedStrings::new();
    let sheet_xml = worksheet_xml(table, &mut strings)?;

    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", content_types_xml()),
        ("_rels/.rels", package_rels_xml()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", workbook_rels_xml()),
        ("xl/styles.xml", styles_xml()),
        ("xl/sharedStrings.xml", strings.to_xml()),
        ("xl/worksheets/sheet1.xml", sheet_xml),
    ];
    for (path, content) in parts {
        writer
            .start_file(path, options)
            .map_err(|err| ExportError::Archive(err.to_string()))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|err| ExportError::Archive(err.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|err| ExportError::Archive(err.to_string()))?;
    Ok(cursor.into_inner())
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Reject text XML 1.0 has no representation for.
fn check_representable(s: &str) -> Result<(), ExportError> {
    if let Some(ch) = s
        .chars()
        .find(|&c| c < '\u{20}' && c != '\t' && c != '\n' && c != '\r')
    {
        return Err(ExportError::Encoding(format!(
            "control character U+{:04X} in cell text",
            ch as u32
        )));
    }
    Ok(())
}

/// Deduplicated shared strings table.
struct SharedStrings {
    strings: Vec<String>,
    string_to_index: HashMap<String, usize>,
}

impl SharedStrings {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            string_to_index: HashMap::new(),
        }
    }

    /// Add a string and return its index; existing strings keep theirs.
    fn add(&mut self, s: &str) -> usize {
        if let Some(&index) = self.string_to_index.get(s) {
            index
        } else {
            let index = self.strings.len();
            self.strings.push(s.to_string());
            self.string_to_index.insert(s.to_string(), index);
            index
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
            self.strings.len()
        );
        for s in &self.strings {
            let _ = write!(xml, "<si><t xml:space=\"preserve\">{}</t></si>", escape_xml(s));
        }
        xml.push_str("</sst>");
        xml
    }
}

/// Spreadsheet column name for a zero-based index (A, B, ..., Z, AA, ...).
fn column_ref(index: usize) -> String {
    let mut index = index;
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name
}

fn worksheet_xml(table: &Table, strings: &mut SharedStrings) -> Result<String, ExportError> {
    let mut xml = String::with_capacity(8192);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str("<sheetData>");

    // Header row, then one row per record. Rows are 1-based in the format.
    xml.push_str(r#"<row r="1">"#);
    for (col, name) in table.columns.iter().enumerate() {
        check_representable(name)?;
        let index = strings.add(name);
        let _ = write!(xml, r#"<c r="{}1" t="s"><v>{}</v></c>"#, column_ref(col), index);
    }
    xml.push_str("</row>");

    for (row_index, row) in table.rows.iter().enumerate() {
        let row_no = row_index + 2;
        let _ = write!(xml, r#"<row r="{row_no}">"#);
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Number(_) => {
                    let _ = write!(
                        xml,
                        r#"<c r="{}{}"><v>{}</v></c>"#,
                        column_ref(col),
                        row_no,
                        cell.to_display()
                    );
                }
                Cell::Text(text) => {
                    check_representable(text)?;
                    let index = strings.add(text);
                    let _ = write!(
                        xml,
                        r#"<c r="{}{}" t="s"><v>{}</v></c>"#,
                        column_ref(col),
                        row_no,
                        index
                    );
                }
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");
    Ok(xml)
}

fn content_types_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
        r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
        r#"</Types>"#,
    )
    .to_string()
}

fn package_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
        r#"</Relationships>"#,
    )
    .to_string()
}

fn workbook_xml() -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    xml.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    let _ = write!(
        xml,
        r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
        escape_xml(SHEET_NAME)
    );
    xml.push_str("</workbook>");
    xml
}

fn workbook_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        r#"</Relationships>"#,
    )
    .to_string()
}

fn styles_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
        r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
        r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
        r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
        r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
        r#"</styleSheet>"#,
    )
    .to_string()
}
