//! The copy buttons: `.copy-button[data-copy]` puts its text on the clipboard.

use crate::notify::{Kind, Notifier};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Shown once the text is on the clipboard.
pub const COPIED: &str = "Copied to clipboard!";

/// Represents a clipboard write that did not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(String);

impl ClipboardError {
    /// Creates a new `ClipboardError` with the reason the write failed.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Why a copy button did nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// The button has no `data-copy` text.
    #[error("copy button has no `data-copy` text")]
    NothingToCopy,
    /// The clipboard refused the write.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Somewhere text can be copied to, like the system clipboard.
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A [`Clipboard`] kept in memory. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard(Arc<Mutex<Option<String>>>);

impl MemoryClipboard {
    /// Returns what was last copied.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.0.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.0.lock() = Some(text.to_owned());
        Ok(())
    }
}

/// Handles a click on a copy button whose `data-copy` is `data_copy`.
///
/// The success notification is only shown after the write went through. A
/// failure is logged and shows nothing.
///
/// # Example
///
/// ```
/// # use moviereviews::{UiContext, ui::clipboard::{self, MemoryClipboard}};
/// let clipboard = MemoryClipboard::default();
/// let ui = UiContext::default();
///
/// clipboard::copy(&clipboard, &ui, Some("https://reviews.example.com/post/foo/"))?;
///
/// assert_eq!(Some("https://reviews.example.com/post/foo/".to_owned()), clipboard.contents());
/// # Ok::<(), clipboard::CopyError>(())
/// ```
pub fn copy(
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
    data_copy: Option<&str>,
) -> Result<(), CopyError> {
    let Some(text) = data_copy else {
        tracing::warn!("copy button without `data-copy`, nothing copied");
        return Err(CopyError::NothingToCopy);
    };

    if let Err(err) = clipboard.write_text(text) {
        tracing::warn!(%err, "failed to copy to clipboard");
        return Err(err.into());
    }

    notifier.notify(COPIED, Kind::Success);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::widget::fake::Recorder;
    use pretty_assertions::assert_eq;

    struct Denied;

    impl Clipboard for Denied {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::new("permission denied"))
        }
    }

    #[test]
    fn copy_should_write_then_notify() {
        let clipboard = MemoryClipboard::default();
        let notifications = Recorder::default();

        copy(&clipboard, &notifications, Some("Spirited Away")).unwrap();

        assert_eq!(Some("Spirited Away".to_owned()), clipboard.contents());
        assert_eq!(
            vec![("Copied to clipboard!".to_owned(), Kind::Success)],
            notifications.messages()
        );
    }

    #[test]
    fn failed_write_should_not_notify() {
        let notifications = Recorder::default();

        let err = copy(&Denied, &notifications, Some("Spirited Away")).unwrap_err();

        assert_eq!(
            CopyError::Clipboard(ClipboardError::new("permission denied")),
            err
        );
        assert!(notifications.messages().is_empty());
    }

    #[test]
    fn missing_text_should_copy_nothing() {
        let clipboard = MemoryClipboard::default();
        let notifications = Recorder::default();

        assert_eq!(
            Err(CopyError::NothingToCopy),
            copy(&clipboard, &notifications, None)
        );
        assert_eq!(None, clipboard.contents());
        assert!(notifications.messages().is_empty());
    }
}
