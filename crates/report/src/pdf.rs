//! PDF session report writer.
//!
//! Renders the cached summary plus the full question/answer history as a
//! paginated A4 document: a title line, a "Summary" paragraph, then one
//! Q/A/Snippet block per turn. Built directly on `lopdf` with the standard
//! Helvetica font, so no font asset ships with the binary.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::debug;

use docsage_core::session::Session;

use crate::ReportError;

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: f32 = 50.0;
const FONT_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 16.0;
/// Wrap width in characters, sized for Helvetica 11pt on an A4 text column.
const WRAP_CHARS: usize = 90;

/// Render a session as PDF bytes.
pub fn render_session_pdf(session: &Session) -> Result<Vec<u8>, ReportError> {
    let lines = report_lines(session);
    debug!(session_id = %session.id, lines = lines.len(), "rendering session report");

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids: Vec<Object> = Vec::new();
    for page_lines in paginate(&lines) {
        let content = page_content(page_lines);
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    Ok(out)
}

/// One typeset line: text plus its font size.
struct Line {
    text: String,
    size: f32,
}

impl Line {
    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: FONT_SIZE,
        }
    }

    fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: TITLE_SIZE,
        }
    }

    fn blank() -> Self {
        Self::body("")
    }
}

/// Flatten the session into wrapped report lines.
fn report_lines(session: &Session) -> Vec<Line> {
    let mut lines = vec![Line::title("docsage Session Report"), Line::blank()];

    lines.push(Line::body("Summary:"));
    push_wrapped(&mut lines, &session.summary);
    lines.push(Line::blank());

    lines.push(Line::body("Conversation History:"));
    for turn in &session.history {
        push_wrapped(&mut lines, &format!("Q: {}", turn.question));
        push_wrapped(&mut lines, &format!("A: {}", turn.answer));
        push_wrapped(&mut lines, &format!("Snippet: {}", turn.snippet));
        lines.push(Line::blank());
    }
    lines
}

/// Word-wrap `text` into body lines, keeping hard line breaks.
fn push_wrapped(lines: &mut Vec<Line>, text: &str) {
    for raw in text.split('\n') {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let candidate_len = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if candidate_len > WRAP_CHARS && !current.is_empty() {
                lines.push(Line::body(std::mem::take(&mut current)));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(Line::body(current));
    }
}

/// Split lines into pages by the vertical space available on each.
fn paginate(lines: &[Line]) -> Vec<&[Line]> {
    let per_page = (((PAGE_HEIGHT as f32 - 2.0 * MARGIN) / LINE_HEIGHT) as usize).max(1);
    if lines.is_empty() {
        return vec![lines];
    }
    lines.chunks(per_page).collect()
}

/// Typeset one page of lines from the top margin down.
fn page_content(lines: &[Line]) -> Content {
    let mut operations = Vec::new();
    let mut y = PAGE_HEIGHT as f32 - MARGIN;

    for line in lines {
        if !line.text.is_empty() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), line.size.into()]));
            operations.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        y -= LINE_HEIGHT;
    }

    Content { operations }
}
