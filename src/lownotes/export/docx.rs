use crate::error::{NotesError, Result};
use serde::Serialize;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

#[derive(Debug, Serialize)]
#[serde(rename = "w:document")]
struct Document {
    #[serde(rename = "@xmlns:w")]
    ns: &'static str,
    #[serde(rename = "w:body")]
    body: Body,
}

#[derive(Debug, Serialize)]
struct Body {
    #[serde(rename = "w:p")]
    paragraph: Paragraph,
}

#[derive(Debug, Serialize)]
struct Paragraph {
    #[serde(rename = "w:r")]
    run: Run,
}

#[derive(Debug, Serialize)]
struct Run {
    #[serde(rename = "$value")]
    items: Vec<RunItem>,
}

#[derive(Debug, Serialize)]
enum RunItem {
    #[serde(rename = "w:t")]
    Text(Text),
    #[serde(rename = "w:br")]
    Break,
}

#[derive(Debug, Serialize)]
struct Text {
    #[serde(rename = "@xml:space")]
    space: &'static str,
    #[serde(rename = "$text")]
    value: String,
}

/// Writes the note body as a minimal DOCX package holding one paragraph.
///
/// The archive is assembled in memory because the zip writer needs to seek.
pub fn write<W: Write>(mut writer: W, content: &str) -> Result<()> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/document.xml", document_xml(content)?),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes()).map_err(NotesError::Io)?;
    }

    let bytes = zip.finish()?.into_inner();
    writer.write_all(&bytes).map_err(NotesError::Io)?;
    writer.flush().map_err(NotesError::Io)?;
    Ok(())
}

/// The main document part. Line breaks stay inside the single run.
fn document_xml(content: &str) -> Result<String> {
    let mut items = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            items.push(RunItem::Break);
        }
        items.push(RunItem::Text(Text {
            space: "preserve",
            value: xml_safe(line.trim_end_matches('\r')),
        }));
    }

    let document = Document {
        ns: WORDML_NS,
        body: Body {
            paragraph: Paragraph { run: Run { items } },
        },
    };
    let xml = quick_xml::se::to_string(&document).map_err(|e| NotesError::Xml(e.to_string()))?;
    Ok(format!("{}{}", XML_DECLARATION, xml))
}

/// Drops characters XML 1.0 can't carry (control characters other than tab).
fn xml_safe(line: &str) -> String {
    let kept: String = line.chars().filter(|c| is_xml_char(*c)).collect();
    if kept.len() != line.len() {
        tracing::debug!(dropped = line.chars().count() - kept.chars().count(), "dropped characters not allowed in XML");
    }
    kept
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
