//! PDF export of advice text
//!
//! Two layouts:
//! - `Plain`: one output line per input line, automatic page breaks.
//! - `Sectioned`: blank-line separated sections, each opened by a bold
//!   heading, word-wrapped body text and a closing footer.
//!
//! Pages use the standard Type1 Helvetica faces, which carry no Unicode
//! glyphs, so text is reduced to ASCII before layout.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use nutri_advisor_shared::ExportLayout;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_LEFT: i64 = 28; // 10 mm
const MARGIN_TOP: i64 = 28;
const MARGIN_BOTTOM: i64 = 43; // 15 mm auto page break
const WRAP_COLUMNS: usize = 90;

static SECTION_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("section break pattern is valid"));

#[derive(Error, Debug, PartialEq)]
pub enum PdfError {
    #[error("nothing to export")]
    EmptyDocument,

    #[error("failed to encode page content: {0}")]
    Encode(String),

    #[error("failed to write document: {0}")]
    Write(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    fn resource(&self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    face: Face,
    size: i64,
}

impl Line {
    fn new(text: impl Into<String>, face: Face, size: i64) -> Self {
        Self {
            text: text.into(),
            face,
            size,
        }
    }

    fn blank() -> Self {
        Self::new("", Face::Regular, 11)
    }

    fn height(&self) -> i64 {
        self.size + self.size / 2
    }
}

/// Text of the downloadable report: analysis followed by the meal plan
pub fn compose_report(analysis: &str, meal_plan: &str) -> String {
    format!("Nutrition Analysis:\n{analysis}\n\nMeal Plan for Tomorrow:\n{meal_plan}")
}

/// Render `text` to PDF bytes
pub fn export_pdf(text: &str, layout: ExportLayout, footer: &str) -> Result<Vec<u8>, PdfError> {
    if text.trim().is_empty() {
        return Err(PdfError::EmptyDocument);
    }
    let lines = match layout {
        ExportLayout::Plain => plain_lines(text),
        ExportLayout::Sectioned => {
            // Nothing printable survives stripping: only the footer would be left
            if strip_non_ascii(text).trim().is_empty() {
                return Err(PdfError::EmptyDocument);
            }
            sectioned_lines(text, footer)
        }
    };
    if lines.iter().all(|line| line.text.trim().is_empty()) {
        return Err(PdfError::EmptyDocument);
    }
    render(&paginate(lines))
}

/// Replace every non-ASCII character with `?`, tabs with spaces
fn replace_non_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            '\n' => '\n',
            _ => '?',
        })
        .collect()
}

/// Drop every non-ASCII character
pub fn strip_non_ascii(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii() && (!c.is_ascii_control() || *c == '\n' || *c == '\t'))
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}

/// Split on blank lines, dropping empty sections
pub fn split_sections(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    SECTION_BREAK
        .split(&normalized)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Greedy word wrap; words longer than `width` are cut
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let mut word = word.to_string();
        while word.len() > width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            out.push(word);
            word = rest;
        }
        if current.is_empty() {
            current = word;
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            out.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

fn plain_lines(text: &str) -> Vec<Line> {
    replace_non_ascii(&text.replace("\r\n", "\n"))
        .split('\n')
        .flat_map(|l| wrap(l, WRAP_COLUMNS))
        .map(|l| Line::new(l, Face::Regular, 12))
        .collect()
}

fn sectioned_lines(text: &str, footer: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    for section in split_sections(&strip_non_ascii(text)) {
        let mut rows = section.lines();
        if let Some(heading) = rows.next() {
            for part in wrap(heading.trim(), WRAP_COLUMNS) {
                lines.push(Line::new(part, Face::Bold, 13));
            }
        }
        for row in rows {
            for part in wrap(row, WRAP_COLUMNS) {
                lines.push(Line::new(part, Face::Regular, 11));
            }
        }
        lines.push(Line::blank());
    }
    let footer = strip_non_ascii(footer);
    if !footer.trim().is_empty() {
        lines.push(Line::blank());
        for part in wrap(footer.trim(), WRAP_COLUMNS) {
            lines.push(Line::new(part, Face::Oblique, 9));
        }
    }
    lines
}

/// Assign lines to pages; each entry is (line, baseline y)
fn paginate(lines: Vec<Line>) -> Vec<Vec<(Line, i64)>> {
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN_TOP;
    for line in lines {
        let next = y - line.height();
        if next < MARGIN_BOTTOM && !page.is_empty() {
            pages.push(std::mem::take(&mut page));
            y = PAGE_HEIGHT - MARGIN_TOP;
        }
        y -= line.height();
        page.push((line, y));
    }
    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

fn render(pages: &[Vec<(Line, i64)>]) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font = |doc: &mut Document, base: &str| -> ObjectId {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let oblique = font(&mut doc, "Helvetica-Oblique");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular, "F2" => bold, "F3" => oblique },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations = Vec::new();
        for (line, y) in page {
            if line.text.is_empty() {
                continue;
            }
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![line.face.resource().into(), Object::Integer(line.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(MARGIN_LEFT), Object::Integer(*y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations }
            .encode()
            .map_err(|e| PdfError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), Object::Integer(PAGE_WIDTH), Object::Integer(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_plain_export_single_page() {
        let bytes = export_pdf("Line one\nLine two", ExportLayout::Plain, "").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("Line one"));
        assert!(raw.contains("Line two"));
    }

    #[test]
    fn test_plain_export_paginates() {
        let text = (0..200).map(|i| format!("Row {i}")).collect::<Vec<_>>().join("\n");
        let bytes = export_pdf(&text, ExportLayout::Plain, "").unwrap();
        assert!(page_count(&bytes) >= 3);
    }

    #[test]
    fn test_sectioned_export_has_headings_and_footer() {
        let text = compose_report("Low iron intake.\nAdd lentils.", "Breakfast: oats");
        let bytes = export_pdf(&text, ExportLayout::Sectioned, "Fixed footer").unwrap();
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("Nutrition Analysis:"));
        assert!(raw.contains("Meal Plan for Tomorrow:"));
        assert!(raw.contains("Fixed footer"));
        assert!(raw.contains("Helvetica-Bold"));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            export_pdf("  \n ", ExportLayout::Sectioned, "footer"),
            Err(PdfError::EmptyDocument)
        ));
    }

    #[test]
    fn test_emoji_only_text_rejected_when_sectioned() {
        for footer in ["", "Fixed footer"] {
            assert!(matches!(
                export_pdf("\u{1F34E}\u{1F957}", ExportLayout::Sectioned, footer),
                Err(PdfError::EmptyDocument)
            ));
        }
        // Plain keeps a `?` per character, so there is something to print
        let bytes = export_pdf("\u{1F34E}\u{1F957}", ExportLayout::Plain, "").unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_non_ascii_handling() {
        assert_eq!(strip_non_ascii("Caf\u{e9} \u{1F34E} plan"), "Caf  plan");
        assert_eq!(replace_non_ascii("Caf\u{e9}\tok"), "Caf? ok");
    }

    #[test]
    fn test_sectioned_lines_bold_first_line() {
        let lines = sectioned_lines("Heading A\nbody a\n\n  \nHeading B\nbody b", "");
        let bold: Vec<_> = lines
            .iter()
            .filter(|l| l.face == Face::Bold)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(bold, vec!["Heading A", "Heading B"]);
    }

    #[test]
    fn test_split_sections() {
        let sections = split_sections("A\nb\n\n\nC\r\n\r\nD");
        assert_eq!(sections, vec!["A\nb", "C", "D"]);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), vec![""]);
        for line in wrap(&"word ".repeat(100), WRAP_COLUMNS) {
            assert!(line.len() <= WRAP_COLUMNS);
        }
    }

    #[test]
    fn test_compose_report_shape() {
        assert_eq!(
            compose_report("A", "B"),
            "Nutrition Analysis:\nA\n\nMeal Plan for Tomorrow:\nB"
        );
    }
}
