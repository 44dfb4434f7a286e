//! Maps a [`DocxDocument`] onto the `docx-rs` document model.

use crate::docx::DocxDocument;
use docx_rs::{
    AlignmentType, BreakType, Docx, FieldCharType, Footer, Header, InstrText, LineSpacing,
    PageMargin, Paragraph, Run, RunFonts, Table, TableCell, TableRow, WidthType,
};

const CODE_FONT: &str = "Courier New";
/// Half-points: 10pt.
const FONT_SIZE: usize = 20;

/// A4 in twips.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const MARGIN_TOP_BOTTOM_CM: f64 = 2.54;
const MARGIN_LEFT_RIGHT_CM: f64 = 3.17;
const HEADER_DISTANCE: i32 = 851;
const FOOTER_DISTANCE: i32 = 992;
const HEADER_TABLE_WIDTH_CM: f64 = 16.0;

pub fn cm_to_twips(cm: f64) -> i32 {
    (cm / 2.54 * 1440.0).round() as i32
}

/// Drop characters XML 1.0 cannot carry; the library escapes the rest.
fn printable(line: &str) -> String {
    line.chars()
        .filter(|&c| c == '\t' || !(c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}'))
        .collect()
}

fn code_fonts() -> RunFonts {
    RunFonts::new()
        .ascii(CODE_FONT)
        .hi_ansi(CODE_FONT)
        .cs(CODE_FONT)
}

fn text_run(text: &str) -> Run {
    Run::new().size(FONT_SIZE).add_text(printable(text))
}

fn field_run(kind: FieldCharType) -> Run {
    Run::new().size(FONT_SIZE).add_field_char(kind, false)
}

/// One paragraph holding a whole page of code, lines separated by line
/// breaks and tabs kept as tab stops.
fn code_paragraph(lines: &[String], page_break_before: bool) -> Paragraph {
    let mut run = Run::new().fonts(code_fonts()).size(FONT_SIZE);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (j, segment) in printable(line).split('\t').enumerate() {
            if j > 0 {
                run = run.add_tab();
            }
            if !segment.is_empty() {
                run = run.add_text(segment);
            }
        }
    }

    let mut paragraph = Paragraph::new()
        .line_spacing(LineSpacing::new().before(0).after(0))
        .add_run(run);
    if page_break_before {
        paragraph = paragraph.page_break_before(true);
    }
    paragraph
}

/// Borderless two-cell table: title on the left, "第 N 页，共 M 页" on the
/// right with a live PAGE field.
fn header(doc: &DocxDocument<'_>) -> Header {
    let cell_width = cm_to_twips(HEADER_TABLE_WIDTH_CM) as usize / 2;

    let title = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(text_run(&doc.meta.title()));
    let page_number = Paragraph::new()
        .align(AlignmentType::Right)
        .add_run(text_run("第 "))
        .add_run(field_run(FieldCharType::Begin))
        .add_run(
            Run::new()
                .size(FONT_SIZE)
                .add_instr_text(InstrText::Unsupported(" PAGE ".to_string())),
        )
        .add_run(field_run(FieldCharType::Separate))
        .add_run(text_run("1"))
        .add_run(field_run(FieldCharType::End))
        .add_run(text_run(&format!(" 页，共 {} 页", doc.target_pages)));

    let table = Table::new(vec![TableRow::new(vec![
        TableCell::new()
            .width(cell_width, WidthType::Dxa)
            .add_paragraph(title),
        TableCell::new()
            .width(cell_width, WidthType::Dxa)
            .add_paragraph(page_number),
    ])])
    .set_grid(vec![cell_width, cell_width])
    .width(cell_width * 2, WidthType::Dxa)
    .clear_all_border();

    Header::new().add_table(table).add_paragraph(Paragraph::new())
}

fn footer(doc: &DocxDocument<'_>) -> Footer {
    Footer::new().add_paragraph(
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(text_run(&format!("著作权人: {}", doc.meta.author))),
    )
}

/// Build the whole document: A4 page setup, header, footer and one code
/// paragraph per page, each after the first starting on a new page.
pub fn build_docx(doc: &DocxDocument<'_>) -> Docx {
    let top_bottom = cm_to_twips(MARGIN_TOP_BOTTOM_CM);
    let left_right = cm_to_twips(MARGIN_LEFT_RIGHT_CM);

    let mut docx = Docx::new()
        .page_size(PAGE_WIDTH, PAGE_HEIGHT)
        .page_margin(
            PageMargin::new()
                .top(top_bottom)
                .bottom(top_bottom)
                .left(left_right)
                .right(left_right)
                .header(HEADER_DISTANCE)
                .footer(FOOTER_DISTANCE)
                .gutter(0),
        )
        .default_fonts(code_fonts())
        .default_size(FONT_SIZE)
        .header(header(doc))
        .footer(footer(doc));

    if doc.pages.is_empty() {
        return docx.add_paragraph(Paragraph::new());
    }
    for (i, page) in doc.pages.iter().enumerate() {
        docx = docx.add_paragraph(code_paragraph(page, i > 0));
    }
    docx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentMeta;
    use std::io::{Cursor, Read};

    fn meta() -> DocumentMeta {
        DocumentMeta::new("Demo <X>", "V1.0", "R&D Ltd").unwrap()
    }

    /// Pack `docx` in memory and return the named part.
    fn part(docx: Docx, name: &str) -> String {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        let mut archive = zip::ZipArchive::new(buf).unwrap();
        let mut out = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_cm_to_twips() {
        assert_eq!(cm_to_twips(2.54), 1440);
        assert_eq!(cm_to_twips(3.17), 1797);
    }

    #[test]
    fn test_printable_drops_control_characters() {
        assert_eq!(printable("x\u{0C}y\0z"), "xyz");
        assert_eq!(printable("中\tb"), "中\tb");
    }

    #[test]
    fn test_document_page_breaks_between_pages_only() {
        let meta = meta();
        let p1 = vec!["fn main() {".to_string(), "}".to_string()];
        let p2 = vec!["\tlet x = 1;".to_string()];
        let doc = DocxDocument {
            meta: &meta,
            target_pages: 60,
            pages: vec![p1.as_slice(), p2.as_slice()],
        };

        let xml = part(build_docx(&doc), "word/document.xml");
        assert_eq!(xml.matches("w:pageBreakBefore").count(), 1);
        assert_eq!(xml.matches("textWrapping").count(), 1);
        assert!(xml.contains("w:tab"));
        assert!(xml.contains("fn main() {"));
        assert!(xml.contains("Courier New"));
        assert!(xml.contains(r#"w:left="1797""#));
        assert!(xml.contains(r#"w:top="1440""#));
        assert!(xml.contains(r#"w:h="16838""#));
    }

    #[test]
    fn test_header_and_footer_text() {
        let meta = meta();
        let doc = DocxDocument {
            meta: &meta,
            target_pages: 60,
            pages: Vec::new(),
        };

        let hdr = part(build_docx(&doc), "word/header1.xml");
        assert!(hdr.contains("Demo &lt;X"));
        assert!(hdr.contains("V1.0"));
        assert!(!hdr.contains("<X>"));
        assert!(hdr.contains("PAGE"));
        assert!(hdr.contains("页，共 60 页"));
        assert!(hdr.contains("w:tbl"));

        let ftr = part(build_docx(&doc), "word/footer1.xml");
        assert!(ftr.contains("著作权人: R&amp;"));
        assert!(!ftr.contains("R&D"));
    }
}
