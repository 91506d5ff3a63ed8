//! Word document text extraction
//!
//! DOCX files are unzipped and `word/document.xml` is streamed with
//! quick-xml, collecting paragraph texts. Legacy binary `.doc` files have
//! no structured reader here; their text is salvaged by decoding as
//! Windows-1252 and keeping the printable runs.

use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::ExtractError;

/// Non-empty paragraph texts of a `.docx`, joined with newlines.
pub fn extract_docx_text(path: &Path) -> Result<String, ExtractError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;
    docx_paragraphs(&xml)
}

fn docx_paragraphs(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| ExtractError::Xml(e.to_string()))?
        {
            Event::Start(e) if e.local_name().as_ref() == b"p" => current.clear(),
            Event::End(e) if e.local_name().as_ref() == b"p" => {
                let paragraph = current.trim();
                if !paragraph.is_empty() {
                    paragraphs.push(paragraph.to_string());
                }
                current.clear();
            }
            Event::Text(t) => {
                let piece = t.unescape().map_err(|e| ExtractError::Xml(e.to_string()))?;
                current.push_str(&piece);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Salvage text from a legacy binary `.doc` file.
pub fn extract_doc_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    Ok(salvage_doc_text(&bytes))
}

/// Decode as Windows-1252 and keep runs that look like content (at least
/// four alphanumeric characters between control bytes).
fn salvage_doc_text(bytes: &[u8]) -> String {
    let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    let mut segments = Vec::new();

    for segment in decoded.split(|c: char| c.is_control()) {
        let segment = segment.trim();
        if segment.chars().filter(|c| c.is_alphanumeric()).count() >= 4 {
            segments.push(segment.to_string());
        }
    }

    segments.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn fake_docx(document_xml: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
        file
    }

    #[test]
    fn docx_paragraphs_join_with_newlines() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Ata do Conselho Fiscal</w:t></w:r></w:p>
                <w:p><w:r><w:t></w:t></w:r></w:p>
                <w:p><w:r><w:t>Reunido em 10/02/2024</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let file = fake_docx(xml);
        let text = extract_docx_text(file.path()).unwrap();
        assert_eq!(text, "Ata do Conselho Fiscal\nReunido em 10/02/2024");
    }

    #[test]
    fn docx_runs_within_one_paragraph_concatenate() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body><w:p>
                <w:r><w:t>Comitê de </w:t></w:r>
                <w:r><w:t>Investimentos</w:t></w:r>
              </w:p></w:body></w:document>"#;
        let file = fake_docx(xml);
        let text = extract_docx_text(file.path()).unwrap();
        assert_eq!(text, "Comitê de Investimentos");
    }

    #[test]
    fn missing_document_xml_is_an_error() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nada").unwrap();
        writer.finish().unwrap();

        assert!(extract_docx_text(file.path()).is_err());
    }

    #[test]
    fn doc_salvage_keeps_printable_runs() {
        let mut bytes = vec![0xd0, 0xcf, 0x11, 0xe0, 0x00, 0x01];
        bytes.extend_from_slice("Ata da reuni\u{e3}o do conselho fiscal".as_bytes());
        bytes.extend_from_slice(&[0x00, 0x07, 0x01]);
        bytes.extend_from_slice(b"em 12/04/2024");
        bytes.extend_from_slice(&[0x13, 0x00]);

        let text = salvage_doc_text(&bytes);
        assert!(text.contains("conselho fiscal"));
        assert!(text.contains("em 12/04/2024"));
        assert!(!text.contains('\u{13}'));
    }
}
