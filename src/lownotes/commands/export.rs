use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::{DestinationPicker, ExportFormat};

/// Writes `content` in `format` to wherever the picker points.
///
/// Failures while picking or writing are logged and reported as an error
/// message on the result; they are never returned as `Err`. A cancelled
/// pick writes nothing.
pub fn run<P: DestinationPicker + ?Sized>(
    content: &str,
    format: ExportFormat,
    picker: &mut P,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let suggested = format.suggested_file_name();

    let mut destination = match picker.pick(&suggested) {
        Ok(Some(destination)) => destination,
        Ok(None) => {
            result.add_message(CmdMessage::info("Export cancelled."));
            return Ok(result);
        }
        Err(e) => {
            tracing::error!(format = %format, error = %e, "could not open export destination");
            result.add_message(CmdMessage::error(format.failure_message()));
            return Ok(result);
        }
    };

    match format.write(&mut destination.writer, content) {
        Ok(()) => {
            tracing::info!(format = %format, destination = %destination.name, "note exported");
            result.exported_to = Some(destination.name.clone());
            result.add_message(CmdMessage::success(format.success_message()));
        }
        Err(e) => {
            tracing::error!(format = %format, destination = %destination.name, error = %e, "export failed");
            result.add_message(CmdMessage::error(format.failure_message()));
        }
    }

    Ok(result)
}
