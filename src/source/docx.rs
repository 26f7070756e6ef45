//! Word document text extraction.
//!
//! A `.docx` file is a ZIP container; the body lives in `word/document.xml`.
//! Only paragraphs that are direct children of `<w:body>` are read, in
//! document order. Tables, headers, footers, text boxes and styling are
//! discarded.
//!
//! Inside a paragraph, run content maps as follows:
//!
//! | Element          | Text       |
//! |------------------|------------|
//! | `w:t`            | its text   |
//! | `w:tab`          | `\t`       |
//! | `w:br`, `w:cr`   | `\n`       |
//!
//! Deleted revision text (`w:delText`) is not part of the paragraph.

use std::io::{Cursor, Read};

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

/// Path of the main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Extract body paragraph texts from `.docx` bytes, joined with `\n`.
pub(crate) fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a valid zip container: {}", e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("cannot open {}: {}", DOCUMENT_PART, e))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("cannot read {}: {}", DOCUMENT_PART, e))?;

    let paragraphs = body_paragraphs(&xml)?;
    tracing::trace!(paragraphs = paragraphs.len(), "extracted word document body");
    Ok(paragraphs.join("\n"))
}

/// Parse `word/document.xml` and return the text of each body paragraph.
pub(crate) fn body_paragraphs(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut collector = ParagraphCollector::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at byte {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Start(e) => collector.start(e.local_name().as_ref()),
            Event::Empty(e) => collector.empty(e.local_name().as_ref()),
            Event::End(_) => collector.end(),
            Event::Text(e) => {
                let text = e.decode().map_err(|e| e.to_string())?;
                collector.text(&text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref()).map_err(|e| e.to_string())?;
                collector.text(text);
            }
            Event::GeneralRef(e) => {
                let name = e.decode().map_err(|e| e.to_string())?;
                collector.text(&resolve_entity(&name)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(collector.paragraphs)
}

/// Resolve a general entity or character reference (without `&` and `;`).
fn resolve_entity(raw: &str) -> Result<String, String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.to_string());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => rest.parse::<u32>(),
        }
        .map_err(|_| format!("invalid character reference: &{};", raw))?;

        return char::from_u32(code)
            .map(String::from)
            .ok_or_else(|| format!("invalid character reference: &{};", raw));
    }

    Err(format!("unknown entity: &{};", raw))
}

// =============================================================================
// ParagraphCollector
// =============================================================================

/// Tracks element nesting and accumulates body paragraph text.
#[derive(Default)]
struct ParagraphCollector {
    /// Local names of the open elements
    stack: Vec<Vec<u8>>,
    /// Text of the body paragraph being read
    current: Option<String>,
    /// Paragraphs nested inside `current` (text boxes, drawings)
    nested: usize,
    paragraphs: Vec<String>,
}

impl ParagraphCollector {
    fn parent_is(&self, name: &[u8]) -> bool {
        self.stack.last().is_some_and(|open| open == name)
    }

    fn start(&mut self, name: &[u8]) {
        if name == b"p" {
            if self.current.is_some() {
                self.nested += 1;
            } else if self.parent_is(b"body") {
                self.current = Some(String::new());
            }
        }
        self.stack.push(name.to_vec());
    }

    fn end(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };
        if name != b"p" {
            return;
        }
        if self.nested > 0 {
            self.nested -= 1;
        } else if self.parent_is(b"body") {
            self.paragraphs.extend(self.current.take());
        }
    }

    fn empty(&mut self, name: &[u8]) {
        if name == b"p" && self.current.is_none() && self.parent_is(b"body") {
            self.paragraphs.push(String::new());
            return;
        }
        if !self.in_run() {
            return;
        }
        match name {
            b"tab" => self.push('\t'),
            b"br" | b"cr" => self.push('\n'),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let in_text = self.parent_is(b"t")
            && self.stack.len() >= 2
            && self.stack[self.stack.len() - 2] == b"r";
        if in_text && self.nested == 0 {
            if let Some(current) = &mut self.current {
                current.push_str(text);
            }
        }
    }

    /// Directly inside a run of the current body paragraph.
    fn in_run(&self) -> bool {
        self.current.is_some() && self.nested == 0 && self.parent_is(b"r")
    }

    fn push(&mut self, c: char) {
        if let Some(current) = &mut self.current {
            current.push(c);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
