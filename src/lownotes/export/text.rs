use crate::error::{NotesError, Result};
use std::io::Write;

/// Writes the note body as raw UTF-8 bytes.
pub fn write<W: Write>(mut writer: W, content: &str) -> Result<()> {
    writer.write_all(content.as_bytes()).map_err(NotesError::Io)?;
    writer.flush().map_err(NotesError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_bytes_verbatim() {
        let mut buf = Vec::new();
        write(&mut buf, "milk, eggs\nbread").unwrap();
        assert_eq!(buf, b"milk, eggs\nbread");
    }
}
