//! PDF encoder.
//!
//! Renders the dataset as a fixed-width grid on A4 pages: a centred bold
//! title, a bold header row (column names truncated to 18 characters), then
//! one bordered row per record (cells over 30 characters truncated to 27
//! plus `...`). A page break is inserted whenever the next row would cross
//! the bottom margin.
//!
//! The document is assembled by hand: built-in Helvetica fonts, WinAnsi
//! text encoding, uncompressed content streams, a classic xref table.
//! Characters without a WinAnsi code point are replaced with `?` — the
//! output is always deterministic for a given dataset.

use std::fmt::Write as FmtWrite;

use super::{ExportError, Table};

const TITLE: &str = "Coding Club Members";

// A4 portrait, in points.
const PAGE_W: f64 = 595.28;
const PAGE_H: f64 = 841.89;
const MARGIN: f64 = 28.35; // 10 mm
const BOTTOM_MARGIN: f64 = 42.52; // 15 mm, matches the auto-page-break band
const ROW_H: f64 = 22.68; // 8 mm grid rows
const TITLE_BAND: f64 = 28.35; // 10 mm title row plus
const TITLE_GAP: f64 = 14.17; // a 5 mm gap below it

const TITLE_SIZE: f64 = 16.0;
const HEADER_SIZE: f64 = 10.0;
const BODY_SIZE: f64 = 9.0;
const CELL_PAD: f64 = 2.0;
const BASELINE_PAD: f64 = 7.0;

const HEADER_CHAR_BUDGET: usize = 18;
const CELL_CHAR_LIMIT: usize = 30;
const CELL_CHAR_BUDGET: usize = 27;

const BODY_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Serialize the dataset to PDF bytes.
pub fn encode(table: &Table) -> Result<Vec<u8>, ExportError> {
    if table.columns.is_empty() {
        return Err(ExportError::Render("dataset has no columns".to_string()));
    }

    let cell_w = (PAGE_W - 2.0 * MARGIN) / table.columns.len() as f64;
    let header_cells: Vec<String> = table
        .columns
        .iter()
        .map(|name| name.chars().take(HEADER_CHAR_BUDGET).collect())
        .collect();

    let mut pages: Vec<String> = Vec::new();
    let mut ops = String::new();
    let mut y = PAGE_H - MARGIN;

    // Centred title on the first page only; continuation pages are all grid.
    let title_x = (PAGE_W - text_width(TITLE, TITLE_SIZE)) / 2.0;
    draw_text(&mut ops, BOLD_FONT, TITLE_SIZE, title_x, y - TITLE_BAND / 2.0, TITLE);
    y -= TITLE_BAND + TITLE_GAP;

    draw_row(&mut ops, BOLD_FONT, HEADER_SIZE, y, cell_w, &header_cells);
    y -= ROW_H;

    for row in &table.rows {
        if y - ROW_H < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut ops));
            y = PAGE_H - MARGIN;
        }
        let cells: Vec<String> = row.iter().map(|cell| clip(&cell.to_display())).collect();
        draw_row(&mut ops, BODY_FONT, BODY_SIZE, y, cell_w, &cells);
        y -= ROW_H;
    }
    pages.push(ops);

    Ok(assemble(&pages))
}

/// Truncate a cell value to the fixed character budget, marking the cut.
fn clip(text: &str) -> String {
    if text.chars().count() > CELL_CHAR_LIMIT {
        let mut clipped: String = text.chars().take(CELL_CHAR_BUDGET).collect();
        clipped.push_str("...");
        clipped
    } else {
        text.to_string()
    }
}

/// Approximate Helvetica line width. Exact metrics are not needed; this is
/// only used to centre the title.
fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.55
}

fn draw_text(ops: &mut String, font: &str, size: f64, x: f64, y: f64, text: &str) {
    let _ = writeln!(
        ops,
        "BT /{font} {size} Tf {x:.2} {y:.2} Td ({}) Tj ET",
        encode_win_ansi(text)
    );
}

fn draw_row(ops: &mut String, font: &str, size: f64, y_top: f64, cell_w: f64, cells: &[String]) {
    for (i, text) in cells.iter().enumerate() {
        let x = MARGIN + i as f64 * cell_w;
        let _ = writeln!(ops, "{x:.2} {:.2} {cell_w:.2} {ROW_H:.2} re S", y_top - ROW_H);
        draw_text(ops, font, size, x + CELL_PAD, y_top - ROW_H + BASELINE_PAD, text);
    }
}

/// Render text as a PDF string literal in WinAnsi encoding.
///
/// Delimiters are backslash-escaped, non-ASCII WinAnsi bytes are written as
/// octal escapes, and anything WinAnsi cannot express becomes `?`.
fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => match win_ansi_byte(ch) {
                Some(byte) => {
                    let _ = write!(out, "\\{byte:03o}");
                }
                None => out.push('?'),
            },
        }
    }
    out
}

/// WinAnsi (CP1252) code point for a char, if one exists.
fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        0xA0..=0xFF => Some(ch as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80), // euro sign
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85), // horizontal ellipsis
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91), // left single quote
            '\u{2019}' => Some(0x92), // right single quote
            '\u{201C}' => Some(0x93), // left double quote
            '\u{201D}' => Some(0x94), // right double quote
            '\u{2022}' => Some(0x95), // bullet
            '\u{2013}' => Some(0x96), // en dash
            '\u{2014}' => Some(0x97), // em dash
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99), // trade mark
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

/// Lay the content streams out as a complete document with an xref table.
fn assemble(pages: &[String]) -> Vec<u8> {
    let first_page_id = 5;
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_id + 2 * i))
        .collect();

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    for (i, content) in pages.iter().enumerate() {
        let content_id = first_page_id + 2 * i + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_W:.2} {PAGE_H:.2}] \
             /Resources << /Font << /{BODY_FONT} 3 0 R /{BOLD_FONT} 4 0 R >> >> \
             /Contents {content_id} 0 R >>"
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut out = Vec::with_capacity(4096);
    out.extend_from_slice(b"%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}
