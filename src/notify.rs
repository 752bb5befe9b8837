//! Transient status messages shown to the user.
//!
//! Widgets report through the [`Notifier`] trait. [`Notifications`] is the
//! default surface: every message enters, becomes visible after a short delay,
//! stays for a fixed interval, then leaves and is removed.

use parking_lot::Mutex;
use std::{fmt::Display, sync::Arc, time::Duration};

/// Most notifications kept on a surface; adding past it drops the oldest.
pub const MAX_ACTIVE: usize = 32;

/// Represents the kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An action went through.
    Success,
    /// An action failed.
    Error,
    /// An action was blocked before doing anything.
    Warning,
    /// Anything else.
    Info,
}

impl Kind {
    /// Returns the icon name shown with this kind.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };

        write!(f, "{kind}")
    }
}

/// Something that can show a message to the user.
///
/// Implementations must tolerate being called in rapid succession.
pub trait Notifier: Send + Sync {
    /// Shows `message`.
    fn notify(&self, message: &str, kind: Kind);
}

/// Represents how long a notification takes to appear, stays, and takes to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay before a new notification becomes visible.
    pub show_after: Duration,
    /// How long it stays visible.
    pub visible_for: Duration,
    /// Delay between hiding and removal, for the exit transition.
    pub remove_after: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            show_after: Duration::from_millis(100),
            visible_for: Duration::from_millis(3000),
            remove_after: Duration::from_millis(300),
        }
    }
}

/// Represents where a notification is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Added, not yet shown.
    Entering,
    /// Shown.
    Visible,
    /// Hidden, about to be removed.
    Leaving,
}

/// Represents a single notification on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: u64,
    message: Arc<str>,
    kind: Kind,
    phase: Phase,
}

impl Notification {
    /// Returns the notification's id, unique per surface.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Renders the notification as markup. The message is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let show = if self.phase == Phase::Visible {
            " show"
        } else {
            ""
        };

        format!(
            r#"<div class="notification notification-{kind}{show}"><i class="fas fa-{icon} me-2"></i>{message}</div>"#,
            kind = self.kind,
            icon = self.kind.icon(),
            message = html_escape::encode_text(&self.message),
        )
    }
}

#[derive(Debug, Default)]
struct Surface {
    next: u64,
    active: Vec<Notification>,
}

impl Surface {
    fn set_phase(&mut self, id: u64, phase: Phase) {
        if let Some(notification) = self.active.iter_mut().find(|n| n.id == id) {
            notification.phase = phase;
        }
    }

    fn remove(&mut self, id: u64) {
        self.active.retain(|n| n.id != id);
    }
}

/// The default notification surface.
///
/// Clones share the same surface.
///
/// # Example
///
/// ```
/// # use moviereviews::notify::{Notifications, Notifier, Kind};
/// # #[tokio::main]
/// # async fn main() {
/// let notifications = Notifications::new();
///
/// notifications.notify("Copied to clipboard!", Kind::Success);
///
/// assert_eq!("Copied to clipboard!", notifications.active()[0].message());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    surface: Arc<Mutex<Surface>>,
    timing: Timing,
}

impl Notifications {
    /// Creates an empty surface with the default [`Timing`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty surface with custom [`Timing`].
    #[inline]
    #[must_use]
    pub fn with_timing(timing: Timing) -> Self {
        Self {
            surface: Arc::default(),
            timing,
        }
    }

    /// Returns the notifications currently on the surface, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.surface.lock().active.clone()
    }

    /// Removes every notification from the surface.
    ///
    /// Without an async runtime nothing is dismissed on its own, so this, or
    /// the [`MAX_ACTIVE`] cap, is what clears the surface.
    pub fn clear(&self) {
        self.surface.lock().active.clear();
    }

    /// Returns the most recently added notification still on the surface.
    #[must_use]
    pub fn latest(&self) -> Option<Notification> {
        self.surface.lock().active.last().cloned()
    }
}

impl Notifier for Notifications {
    fn notify(&self, message: &str, kind: Kind) {
        let id = {
            let mut surface = self.surface.lock();
            let id = surface.next;
            surface.next += 1;
            surface.active.push(Notification {
                id,
                message: Arc::from(message),
                kind,
                phase: Phase::Entering,
            });

            let excess = surface.active.len().saturating_sub(MAX_ACTIVE);
            surface.active.drain(..excess);

            id
        };

        tracing::debug!(id, %kind, text = message, "notification added");

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(id, "no async runtime to dismiss notification; showing it until cleared");
            self.surface.lock().set_phase(id, Phase::Visible);
            return;
        };

        let surface = Arc::clone(&self.surface);
        let timing = self.timing;

        runtime.spawn(async move {
            tokio::time::sleep(timing.show_after).await;
            surface.lock().set_phase(id, Phase::Visible);

            tokio::time::sleep(timing.visible_for).await;
            surface.lock().set_phase(id, Phase::Leaving);

            tokio::time::sleep(timing.remove_after).await;
            surface.lock().remove(id);
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_should_map_to_icons() {
        assert_eq!("check-circle", Kind::Success.icon());
        assert_eq!("exclamation-circle", Kind::Error.icon());
        assert_eq!("exclamation-triangle", Kind::Warning.icon());
        assert_eq!("info-circle", Kind::Info.icon());
    }

    #[test]
    fn without_runtime_should_show_immediately() {
        let notifications = Notifications::new();
        notifications.notify("saved", Kind::Info);

        let latest = notifications.latest().unwrap();
        assert_eq!(Phase::Visible, latest.phase());
        assert_eq!("saved", latest.message());
    }

    #[test]
    fn without_runtime_should_keep_only_latest() {
        let notifications = Notifications::new();

        for idx in 0..40 {
            notifications.notify(&format!("message {idx}"), Kind::Info);
        }

        let active = notifications.active();
        assert_eq!(MAX_ACTIVE, active.len());
        assert_eq!("message 8", active[0].message());
        assert_eq!("message 39", active[MAX_ACTIVE - 1].message());

        notifications.clear();
        assert!(notifications.active().is_empty());
    }

    #[test]
    fn html_should_escape_message() {
        let notification = Notification {
            id: 0,
            message: Arc::from("<b>hi</b>"),
            kind: Kind::Warning,
            phase: Phase::Visible,
        };

        assert_eq!(
            r#"<div class="notification notification-warning show"><i class="fas fa-exclamation-triangle me-2"></i>&lt;b&gt;hi&lt;/b&gt;</div>"#,
            notification.to_html()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_follow_lifecycle_then_be_removed() {
        let notifications = Notifications::new();
        notifications.notify("You like this review", Kind::Success);

        assert_eq!(Phase::Entering, notifications.latest().unwrap().phase());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(Phase::Visible, notifications.latest().unwrap().phase());

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(Phase::Leaving, notifications.latest().unwrap().phase());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(notifications.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_calls_should_stack() {
        let notifications = Notifications::new();

        for idx in 0..20 {
            notifications.notify(&format!("message {idx}"), Kind::Info);
        }

        let active = notifications.active();
        assert_eq!(20, active.len());
        assert_eq!("message 0", active[0].message());
        assert_eq!("message 19", active[19].message());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(notifications.active().is_empty());
    }
}
