//! Host load/save collaborators
//!
//! Thin wrappers over whole-file reads and writes. Loading funnels through
//! a single [`TextBuffer::set_text`] bulk replace, so one load triggers
//! exactly one highlighting pass regardless of line count, and a failed
//! read leaves the buffer's prior content intact.

use std::fs;
use std::path::Path;

use log::debug;

use crate::buffer::TextBuffer;
use crate::error::Result;

/// Read a file and load its content into the buffer as one bulk replace
pub fn load_into(buffer: &TextBuffer, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;
    debug!("loaded {} bytes from {}", content.len(), path.display());
    buffer.set_text(&content);
    Ok(())
}

/// Write the buffer's current content to a file
///
/// The buffer is never mutated, so a failed save cannot corrupt it.
pub fn save_from(buffer: &TextBuffer, path: &Path) -> Result<()> {
    fs::write(path, buffer.get_text())?;
    Ok(())
}
