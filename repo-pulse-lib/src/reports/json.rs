use crate::Result;
use serde::Serialize;
use std::io::Write;

/// Write any report value as pretty-printed JSON followed by a newline.
pub fn generate<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
