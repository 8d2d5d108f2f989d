//! Clipboard abstraction.

use crate::error::Result;

/// Destination for "copy to clipboard" actions.
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    ///
    /// Failures are reported as `ContentError::Client`.
    fn set_text(&self, text: &str) -> Result<()>;
}
