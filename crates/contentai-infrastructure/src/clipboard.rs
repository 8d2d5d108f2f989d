//! System clipboard backed by `arboard`.

use contentai_core::clipboard::Clipboard;
use contentai_core::{ContentError, Result};

/// Writes to the desktop clipboard.
///
/// A new `arboard::Clipboard` is opened per call; holding one open for the
/// process lifetime fails on some X11 setups once the owner exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ContentError::client(format!("Clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ContentError::client(format!("Failed to copy to clipboard: {}", e)))
    }
}
