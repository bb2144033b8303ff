use crate::error::{NotesError, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::{BufWriter, Write};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 14.0;
const LINES_PER_PAGE: usize = 50;
const MAX_LINE_CHARS: usize = 90;

/// Writes the note body as a single text block on A4 pages.
///
/// The built-in Helvetica font only covers Latin-1 (WinAnsi encoding).
/// Characters outside it are rendered wrongly by PDF viewers; a warning is
/// logged when the body contains any.
pub fn write<W: Write>(writer: W, content: &str) -> Result<()> {
    let unsupported = count_unsupported(content);
    if unsupported > 0 {
        tracing::warn!(
            characters = unsupported,
            "note contains characters the PDF font can't display"
        );
    }

    let (doc, first_page, first_layer) =
        PdfDocument::new("Note", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| NotesError::Pdf(format!("{:?}", e)))?;

    let lines = wrap_lines(content, MAX_LINE_CHARS);
    let mut first = Some(doc.get_page(first_page).get_layer(first_layer));
    for (page_no, chunk) in lines.chunks(LINES_PER_PAGE).enumerate() {
        let layer = match first.take() {
            Some(layer) => layer,
            None => {
                let (page, layer) = doc.add_page(
                    Mm(PAGE_WIDTH),
                    Mm(PAGE_HEIGHT),
                    format!("Layer {}", page_no + 1),
                );
                doc.get_page(page).get_layer(layer)
            }
        };

        layer.begin_text_section();
        layer.set_font(&font, FONT_SIZE);
        layer.set_line_height(LINE_HEIGHT);
        layer.set_text_cursor(Mm(MARGIN), Mm(PAGE_HEIGHT - MARGIN));
        for line in chunk {
            layer.write_text(line.clone(), &font);
            layer.add_line_break();
        }
        layer.end_text_section();
    }

    let mut out = BufWriter::new(writer);
    doc.save(&mut out)
        .map_err(|e| NotesError::Pdf(format!("{:?}", e)))?;
    out.flush().map_err(NotesError::Io)?;
    Ok(())
}

/// Characters outside Latin-1, which the built-in font can't encode.
fn count_unsupported(content: &str) -> usize {
    content.chars().filter(|c| *c as u32 > 0xFF).count()
}

/// Greedy word wrap by character count. Blank lines are kept, words longer
/// than `width` are split.
pub fn wrap_lines(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in content.split('\n') {
        let raw = raw.trim_end_matches('\r');
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in raw.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }
        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}
