//! The UI services shared by every widget on a page.

use crate::{
    PostRef,
    notify::{Kind, Notifications, Notifier},
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Something that closes when the user clicks outside of it.
pub(crate) trait Dismiss: Send + Sync {
    fn post(&self) -> &PostRef;

    fn dismiss(&self);
}

#[derive(Default)]
struct Registry {
    next: u64,
    attached: Vec<(u64, Weak<dyn Dismiss>)>,
}

/// Shared UI services: the notification surface and the document-level click
/// listener that closes open reaction panels.
///
/// Widgets take a `UiContext` when mounted. Clones share the same services.
///
/// # Example
///
/// ```
/// # use moviereviews::{UiContext, notify::Notifications};
/// let notifications = Notifications::new();
/// let ui = UiContext::new(notifications.clone());
///
/// // Nothing attached yet, so this is a no-op.
/// ui.document_click(None);
/// ```
#[derive(Clone)]
pub struct UiContext {
    notifier: Arc<dyn Notifier>,
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("attached", &self.attached())
            .finish_non_exhaustive()
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(Notifications::new())
    }
}

impl UiContext {
    /// Creates a context that reports through `notifier`.
    #[must_use]
    pub fn new(notifier: impl Notifier + 'static) -> Self {
        Self {
            notifier: Arc::new(notifier),
            registry: Arc::default(),
        }
    }

    /// Shows a notification.
    #[inline]
    pub fn notify(&self, message: &str, kind: Kind) {
        self.notifier.notify(message, kind);
    }

    /// Handles a click anywhere in the document.
    ///
    /// `inside` is the post of the widget container the click landed in, if
    /// any. Every attached panel belonging to another post is closed.
    pub fn document_click(&self, inside: Option<&PostRef>) {
        // Collected first so that no lock is held while a widget re-renders.
        let targets: Vec<Arc<dyn Dismiss>> = {
            let mut registry = self.registry.lock();
            registry.attached.retain(|(_, weak)| weak.strong_count() > 0);
            registry
                .attached
                .iter()
                .filter_map(|(_, weak)| weak.upgrade())
                .filter(|target| Some(target.post()) != inside)
                .collect()
        };

        for target in targets {
            target.dismiss();
        }
    }

    /// Returns how many widgets are attached to the click listener.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.registry
            .lock()
            .attached
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    pub(crate) fn attach(&self, target: Weak<dyn Dismiss>) -> Attachment {
        let mut registry = self.registry.lock();
        let id = registry.next;
        registry.next += 1;
        registry.attached.push((id, target));

        Attachment {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }
}

impl Notifier for UiContext {
    #[inline]
    fn notify(&self, message: &str, kind: Kind) {
        Self::notify(self, message, kind);
    }
}

/// Keeps a widget attached to the click listener; detaches it on drop.
pub(crate) struct Attachment {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().attached.retain(|(id, _)| *id != self.id);
        }
    }
}
