//! The emoji reaction picker of a review post.

use super::{Busy, LOADING_LABEL, Subscribers};
use crate::{
    PostRef,
    client::Backend,
    context::{Attachment, Dismiss, UiContext},
    error::ToggleError,
    notify::Kind,
    reaction::{ReactionKind, ReactionState},
    render::Render,
};
use parking_lot::Mutex;
use std::sync::Arc;

const LOG_IN: &str = "Log in to react to reviews";
const REMOVED: &str = "Reaction removed";
const FAILED: &str = "Could not update your reaction, please try again";

/// Main button label when the current user has not reacted.
pub const PROMPT_LABEL: &str = "😊 React";

/// Shown in place of the summary when nobody reacted yet.
pub const EMPTY_SUMMARY: &str = "Be the first to react";

/// Everything a [`ReactionWidget`] starts from, as rendered by the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionConfig {
    /// The post the widget belongs to.
    pub post: PostRef,
    /// The reactions on the post when the page was rendered.
    pub state: ReactionState,
    /// The kinds offered in the option panel, in listing order.
    pub options: Vec<ReactionKind>,
    /// Set when the current user is not logged in.
    pub disabled: bool,
}

/// Whether the option panel is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    /// Hidden.
    #[default]
    Closed,
    /// Showing the reaction options.
    Open,
}

/// The summary line under a reaction widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Nobody reacted yet; shows [`EMPTY_SUMMARY`].
    Empty,
    /// At least one reaction.
    Counted {
        /// Total number of reactions.
        total: u32,
        /// `reaction` or `reactions`, matching `total`.
        noun: &'static str,
        /// Every kind with a non-zero count, in listing order.
        breakdown: Vec<(ReactionKind, u32)>,
    },
}

/// What a reaction widget looks like at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionView {
    /// The post the widget belongs to.
    pub post: PostRef,
    /// The last state confirmed by the site.
    pub state: ReactionState,
    /// The kinds offered in the option panel.
    pub options: Vec<ReactionKind>,
    /// Whether the option panel is showing.
    pub panel: Panel,
    /// A request is in flight; the main button is disabled and shows a loading label.
    pub busy: bool,
    /// The widget cannot be used by the current user.
    pub disabled: bool,
    /// The state was just updated and should briefly highlight.
    pub highlight: bool,
}

impl ReactionView {
    /// Returns the main button label: `{emoji} {label}` of the user's
    /// reaction, or [`PROMPT_LABEL`].
    #[must_use]
    pub fn main_label(&self) -> String {
        if self.busy {
            return LOADING_LABEL.to_owned();
        }

        match self.state.user_reaction() {
            Some(kind) => format!("{} {}", kind.emoji(), kind.label()),
            None => PROMPT_LABEL.to_owned(),
        }
    }

    /// Returns the summary line.
    #[must_use]
    pub fn summary(&self) -> Summary {
        if self.state.is_empty() {
            return Summary::Empty;
        }

        Summary::Counted {
            total: self.state.total(),
            noun: self.state.noun(),
            breakdown: self.state.breakdown().collect(),
        }
    }
}

/// A reaction picker bound to one post.
///
/// While mounted, a click anywhere outside the widget, reported through
/// [`UiContext::document_click`], closes its option panel. Clones are handles
/// to the same widget; dropping the last one detaches it.
#[derive(Clone)]
pub struct ReactionWidget {
    inner: Arc<Inner>,
}

struct Inner {
    post: PostRef,
    disabled: bool,
    options: Vec<ReactionKind>,
    state: Mutex<ReactionState>,
    panel: Mutex<Panel>,
    busy: Busy,
    backend: Arc<dyn Backend>,
    ui: UiContext,
    subscribers: Subscribers<ReactionView>,
    attachment: Mutex<Option<Attachment>>,
}

impl Inner {
    fn view(&self, highlight: bool) -> ReactionView {
        ReactionView {
            post: self.post.clone(),
            state: self.state.lock().clone(),
            options: self.options.clone(),
            panel: *self.panel.lock(),
            busy: self.busy.is_set(),
            disabled: self.disabled,
            highlight,
        }
    }

    fn publish(&self, highlight: bool) {
        self.subscribers.publish(&self.view(highlight));
    }

    /// Returns `true` if the panel was open.
    fn close(&self) -> bool {
        let was_open = std::mem::take(&mut *self.panel.lock()) == Panel::Open;

        if was_open {
            self.publish(false);
        }

        was_open
    }
}

impl Dismiss for Inner {
    fn post(&self) -> &PostRef {
        &self.post
    }

    fn dismiss(&self) {
        if self.close() {
            tracing::debug!(post = %self.post, "reaction panel dismissed by outside click");
        }
    }
}

impl std::fmt::Debug for ReactionWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionWidget")
            .field("post", &self.inner.post)
            .field("state", &self.state())
            .field("panel", &self.panel())
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl ReactionWidget {
    /// Mounts a widget for `config`, talking to `backend` and reporting through `ui`.
    ///
    /// If `config` offers no options, every kind is offered.
    #[must_use]
    pub fn mount(config: ReactionConfig, backend: Arc<dyn Backend>, ui: UiContext) -> Self {
        tracing::debug!(post = %config.post, disabled = config.disabled, "mounting reaction widget");

        let options = if config.options.is_empty() {
            ReactionKind::ALL.to_vec()
        } else {
            config.options
        };

        let inner = Arc::new(Inner {
            post: config.post,
            disabled: config.disabled,
            options,
            state: Mutex::new(config.state),
            panel: Mutex::new(Panel::Closed),
            busy: Busy::default(),
            backend,
            ui: ui.clone(),
            subscribers: Subscribers::default(),
            attachment: Mutex::new(None),
        });

        let target: Arc<dyn Dismiss> = inner.clone();
        *inner.attachment.lock() = Some(ui.attach(Arc::downgrade(&target)));

        Self { inner }
    }

    /// Stops listening for outside clicks. The panel then only closes through
    /// [`close_panel`](Self::close_panel) or a selection.
    pub fn detach(&self) {
        if self.inner.attachment.lock().take().is_some() {
            tracing::debug!(post = %self.inner.post, "reaction widget detached");
        }
    }

    /// Returns the post the widget belongs to.
    #[inline]
    #[must_use]
    pub fn post(&self) -> &PostRef {
        &self.inner.post
    }

    /// Returns the last state confirmed by the site.
    #[must_use]
    pub fn state(&self) -> ReactionState {
        self.inner.state.lock().clone()
    }

    /// Returns whether the option panel is showing.
    #[must_use]
    pub fn panel(&self) -> Panel {
        *self.inner.panel.lock()
    }

    /// Returns `true` while a request is in flight.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.busy.is_set()
    }

    /// Returns `true` if the current user cannot use the widget.
    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.inner.disabled
    }

    /// Returns what the widget currently looks like.
    #[must_use]
    pub fn view(&self) -> ReactionView {
        self.inner.view(false)
    }

    /// Adds a renderer and renders the current view to it.
    pub fn subscribe(&self, renderer: Arc<dyn Render<ReactionView>>) {
        renderer.render(&self.view());
        self.inner.subscribers.push(renderer);
    }

    /// Opens the option panel if closed, closes it if open.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::Disabled`] if the current user cannot react; a warning
    ///   is shown.
    /// - [`ToggleError::Busy`] while a reaction is in flight; the panel stays as is.
    pub fn toggle_panel(&self) -> Result<Panel, ToggleError> {
        let inner = &self.inner;

        if inner.disabled {
            inner.ui.notify(LOG_IN, Kind::Warning);
            return Err(ToggleError::Disabled);
        }

        if inner.busy.is_set() {
            return Err(ToggleError::Busy);
        }

        let panel = {
            let mut panel = inner.panel.lock();
            *panel = match *panel {
                Panel::Closed => Panel::Open,
                Panel::Open => Panel::Closed,
            };
            *panel
        };

        inner.publish(false);

        Ok(panel)
    }

    /// Closes the option panel.
    pub fn close_panel(&self) {
        self.inner.close();
    }

    /// Toggles the current user's `kind` reaction.
    ///
    /// Closes the panel first. The state only changes to what the site answers
    /// with. On any failure it stays as it was, and the main button goes back
    /// to its label from before.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::Disabled`] if the current user cannot react; a warning
    ///   is shown and nothing is sent.
    /// - [`ToggleError::Busy`] if a reaction is already in flight; nothing happens.
    /// - Any failure of [`Backend::toggle_reaction`], after an error notification.
    pub async fn select(&self, kind: ReactionKind) -> Result<ReactionState, ToggleError> {
        let inner = &self.inner;

        if inner.disabled {
            inner.ui.notify(LOG_IN, Kind::Warning);
            return Err(ToggleError::Disabled);
        }

        let Some(claim) = inner.busy.claim() else {
            tracing::debug!(post = %inner.post, %kind, "reaction already in flight");
            return Err(ToggleError::Busy);
        };

        *inner.panel.lock() = Panel::Closed;
        inner.publish(false);

        let result = inner.backend.toggle_reaction(&inner.post, kind).await;

        match result {
            Ok(state) => {
                *inner.state.lock() = state.clone();
                drop(claim);

                tracing::debug!(
                    post = %inner.post,
                    user_reaction = ?state.user_reaction(),
                    total = state.total(),
                    "reaction toggled"
                );

                inner.publish(true);

                match state.user_reaction() {
                    Some(kind) => inner
                        .ui
                        .notify(&format!("You reacted with {}", kind.label()), Kind::Success),
                    None => inner.ui.notify(REMOVED, Kind::Success),
                }

                Ok(state)
            }
            Err(err) => {
                drop(claim);

                tracing::warn!(post = %inner.post, %kind, error = %err, "failed to toggle reaction");

                inner.publish(false);
                inner.ui.notify(FAILED, Kind::Error);

                Err(err)
            }
        }
    }
}
