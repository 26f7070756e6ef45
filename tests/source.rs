//! Loading documents from disk.

use std::fs;

use tempfile::TempDir;
use tola_textdiff::{load_text, DiffOptions, DiffRequest, Error};

fn workspace() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[test]
fn test_plain_text_is_verbatim() {
    let dir = workspace();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "line one\r\n\tline two  \n").unwrap();
    assert_eq!(load_text(&path).unwrap(), "line one\r\n\tline two  \n");
}

#[test]
fn test_uppercase_extension() {
    let dir = workspace();
    let path = dir.path().join("NOTES.TXT");
    fs::write(&path, "shout").unwrap();
    assert_eq!(load_text(&path).unwrap(), "shout");
}

#[test]
fn test_invalid_utf8() {
    let dir = workspace();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, [0x63, 0x61, 0x66, 0xE9]).unwrap();
    assert!(matches!(load_text(&path), Err(Error::InvalidUtf8 { .. })));
}

#[test]
fn test_unsupported_extension() {
    let dir = workspace();
    let path = dir.path().join("slides.pdf");
    fs::write(&path, "%PDF-1.7").unwrap();

    let err = load_text(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFileType { .. }));
    assert_eq!(err.path(), path);
}

#[test]
fn test_missing_file() {
    let dir = workspace();
    let err = load_text(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_request_from_files() {
    let dir = workspace();
    let a = dir.path().join("old.txt");
    let b = dir.path().join("new.txt");
    fs::write(&a, "the cat sat").unwrap();
    fs::write(&b, "the dog sat").unwrap();

    let request = DiffRequest::from_files(&a, &b).unwrap();
    assert_eq!(request.label_a, "old.txt");
    assert_eq!(request.label_b, "new.txt");

    let html = request.render_report(&DiffOptions::default());
    assert!(html.contains(r#"<div class="panel-header">old.txt</div>"#));
    assert!(html.contains(r#"the <span class="diff diff-del">cat</span> sat"#));
    assert!(html.contains(r#"the <span class="diff diff-ins">dog</span> sat"#));
}

#[test]
fn test_request_fails_if_either_side_fails() {
    let dir = workspace();
    let a = dir.path().join("old.txt");
    fs::write(&a, "present").unwrap();

    let err = DiffRequest::from_files(&a, dir.path().join("new.rtf")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFileType { .. }));
}

#[cfg(feature = "docx")]
mod docx {
    use std::io::Write;
    use std::path::Path;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    fn write_docx(path: &Path, body: &str) {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        );

        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    fn paragraph(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let dir = workspace();
        let path = dir.path().join("report.docx");
        write_docx(&path, &[paragraph("Title"), paragraph(""), paragraph("Body &amp; more")].concat());

        assert_eq!(load_text(&path).unwrap(), "Title\n\nBody & more");
    }

    #[test]
    fn test_docx_against_text() {
        let dir = workspace();
        let a = dir.path().join("draft.docx");
        let b = dir.path().join("final.txt");
        write_docx(&a, &[paragraph("alpha beta"), paragraph("gamma")].concat());
        fs::write(&b, "alpha delta\ngamma").unwrap();

        let outcome = DiffRequest::from_files(&a, &b).unwrap().diff(&DiffOptions::default());
        assert_eq!(outcome.markup_a.as_str(), "alpha <span class=\"diff diff-del\">beta</span>\ngamma");
        assert_eq!(outcome.markup_b.as_str(), "alpha <span class=\"diff diff-ins\">delta</span>\ngamma");
    }

    #[test]
    fn test_corrupt_docx() {
        let dir = workspace();
        let path = dir.path().join("broken.docx");
        fs::write(&path, "this is not a zip archive").unwrap();
        assert!(matches!(load_text(&path), Err(Error::Docx { .. })));
    }

    #[test]
    fn test_docx_without_document_part() {
        let dir = workspace();
        let path = dir.path().join("empty.docx");
        let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
        zip.start_file("[Content_Types].xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        zip.finish().unwrap();

        let err = load_text(&path).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"), "{err}");
    }
}
