//! The like toggle of a review post.

use super::{Busy, LOADING_LABEL, Subscribers};
use crate::{
    PostRef,
    client::Backend,
    context::UiContext,
    error::ToggleError,
    like::LikeState,
    notify::Kind,
    render::Render,
};
use parking_lot::Mutex;
use std::sync::Arc;

const LOG_IN: &str = "Log in to like reviews";
const LIKED: &str = "You like this review";
const UNLIKED: &str = "You no longer like this review";
const FAILED: &str = "Could not update your like, please try again";

/// Everything a [`LikeWidget`] starts from, as rendered by the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeConfig {
    /// The post the widget belongs to.
    pub post: PostRef,
    /// If the current user already likes the post.
    pub liked: bool,
    /// How many users like the post.
    pub likes_count: u32,
    /// Set when the current user is not logged in.
    pub disabled: bool,
}

/// What a like widget looks like at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeView {
    /// The post the widget belongs to.
    pub post: PostRef,
    /// The last state confirmed by the site.
    pub state: LikeState,
    /// A request is in flight; the button is disabled and shows a loading label.
    pub busy: bool,
    /// The widget cannot be used by the current user.
    pub disabled: bool,
    /// The state was just updated and should briefly pulse.
    pub pulse: bool,
}

impl LikeView {
    /// Returns the button label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match (self.busy, self.state.liked) {
            (true, _) => LOADING_LABEL,
            (false, true) => "♥ Liked",
            (false, false) => "♡ Like",
        }
    }

    /// Returns the sentence describing how many people like the post.
    #[must_use]
    pub fn count_text(&self) -> String {
        self.state.count_text()
    }
}

/// A like toggle bound to one post.
///
/// Clones are handles to the same widget.
///
/// # Example
///
/// ```no_run
/// # use moviereviews::{Client, UiContext, LikeWidget, PostRef, widget::LikeConfig};
/// # use std::sync::Arc;
/// # #[tokio::main]
/// # async fn main() -> Result<(), moviereviews::error::Error> {
/// let client = Arc::new(Client::new());
/// let ui = UiContext::default();
///
/// let config = LikeConfig {
///     post: PostRef::new("foo")?,
///     liked: false,
///     likes_count: 0,
///     disabled: false,
/// };
///
/// let widget = LikeWidget::mount(config, client, ui);
/// let state = widget.toggle().await?;
///
/// assert!(state.liked);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LikeWidget {
    inner: Arc<Inner>,
}

struct Inner {
    post: PostRef,
    disabled: bool,
    state: Mutex<LikeState>,
    busy: Busy,
    backend: Arc<dyn Backend>,
    ui: UiContext,
    subscribers: Subscribers<LikeView>,
}

impl std::fmt::Debug for LikeWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LikeWidget")
            .field("post", &self.inner.post)
            .field("state", &self.state())
            .field("busy", &self.is_busy())
            .field("disabled", &self.inner.disabled)
            .finish_non_exhaustive()
    }
}

impl LikeWidget {
    /// Mounts a widget for `config`, talking to `backend` and reporting through `ui`.
    #[must_use]
    pub fn mount(config: LikeConfig, backend: Arc<dyn Backend>, ui: UiContext) -> Self {
        tracing::debug!(post = %config.post, disabled = config.disabled, "mounting like widget");

        Self {
            inner: Arc::new(Inner {
                post: config.post,
                disabled: config.disabled,
                state: Mutex::new(LikeState {
                    liked: config.liked,
                    likes_count: config.likes_count,
                }),
                busy: Busy::default(),
                backend,
                ui,
                subscribers: Subscribers::default(),
            }),
        }
    }

    /// Returns the post the widget belongs to.
    #[inline]
    #[must_use]
    pub fn post(&self) -> &PostRef {
        &self.inner.post
    }

    /// Returns the last state confirmed by the site.
    #[inline]
    #[must_use]
    pub fn state(&self) -> LikeState {
        *self.inner.state.lock()
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
    pub fn view(&self) -> LikeView {
        LikeView {
            post: self.inner.post.clone(),
            state: self.state(),
            busy: self.is_busy(),
            disabled: self.inner.disabled,
            pulse: false,
        }
    }

    /// Adds a renderer and renders the current view to it.
    pub fn subscribe(&self, renderer: Arc<dyn Render<LikeView>>) {
        renderer.render(&self.view());
        self.inner.subscribers.push(renderer);
    }

    /// Toggles the current user's like.
    ///
    /// The state only changes to what the site answers with. On any failure it
    /// stays as it was, and the button goes back to its label from before.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::Disabled`] if the current user cannot like; a warning
    ///   is shown and nothing is sent.
    /// - [`ToggleError::Busy`] if a toggle is already in flight; nothing happens.
    /// - Any failure of [`Backend::toggle_like`], after an error notification.
    pub async fn toggle(&self) -> Result<LikeState, ToggleError> {
        let inner = &self.inner;

        if inner.disabled {
            inner.ui.notify(LOG_IN, Kind::Warning);
            return Err(ToggleError::Disabled);
        }

        let Some(claim) = inner.busy.claim() else {
            tracing::debug!(post = %inner.post, "like toggle already in flight");
            return Err(ToggleError::Busy);
        };

        self.publish(false);

        let result = inner.backend.toggle_like(&inner.post).await;

        match result {
            Ok(state) => {
                *inner.state.lock() = state;
                drop(claim);

                tracing::debug!(post = %inner.post, liked = state.liked, likes = state.likes_count, "like toggled");

                self.publish(true);

                if state.liked {
                    inner.ui.notify(LIKED, Kind::Success);
                } else {
                    inner.ui.notify(UNLIKED, Kind::Info);
                }

                Ok(state)
            }
            Err(err) => {
                drop(claim);

                tracing::warn!(post = %inner.post, error = %err, "failed to toggle like");

                self.publish(false);
                inner.ui.notify(FAILED, Kind::Error);

                Err(err)
            }
        }
    }

    fn publish(&self, pulse: bool) {
        let view = LikeView {
            pulse,
            ..self.view()
        };

        self.inner.subscribers.publish(&view);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::widget::fake::{Call, FakeBackend, Recorder, Reply};
    use pretty_assertions::assert_eq;

    fn config(slug: &str, liked: bool, likes_count: u32, disabled: bool) -> LikeConfig {
        LikeConfig {
            post: PostRef::new(slug).unwrap(),
            liked,
            likes_count,
            disabled,
        }
    }

    fn views(widget: &LikeWidget) -> Arc<Mutex<Vec<LikeView>>> {
        let views = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&views);
        widget.subscribe(Arc::new(move |view: &LikeView| sink.lock().push(view.clone())));
        views.lock().clear();
        views
    }

    #[tokio::test]
    async fn like_on_foo_should_adopt_server_state() {
        let backend = FakeBackend::new([Reply::Like(LikeState {
            liked: true,
            likes_count: 1,
        })]);
        let notifications = Recorder::default();
        let widget = LikeWidget::mount(
            config("foo", false, 0, false),
            backend.clone(),
            UiContext::new(notifications.clone()),
        );
        let views = views(&widget);

        let state = widget.toggle().await.unwrap();

        assert!(state.liked);
        assert_eq!("1 person likes this", widget.view().count_text());
        assert_eq!(
            Some(("You like this review".to_owned(), Kind::Success)),
            notifications.last()
        );
        assert_eq!(
            vec![Call::Like(PostRef::new("foo").unwrap())],
            backend.calls()
        );

        let views = views.lock();
        assert_eq!(2, views.len());
        assert_eq!(LOADING_LABEL, views[0].label());
        assert!(views[1].pulse);
        assert_eq!("♥ Liked", views[1].label());
    }

    #[tokio::test]
    async fn unlike_should_notify_info() {
        let backend = FakeBackend::new([Reply::Like(LikeState {
            liked: false,
            likes_count: 2,
        })]);
        let notifications = Recorder::default();
        let widget = LikeWidget::mount(
            config("foo", true, 3, false),
            backend,
            UiContext::new(notifications.clone()),
        );

        widget.toggle().await.unwrap();

        assert_eq!("2 people like this", widget.view().count_text());
        assert_eq!(
            Some(("You no longer like this review".to_owned(), Kind::Info)),
            notifications.last()
        );
    }

    #[tokio::test]
    async fn disabled_should_warn_without_calling_backend() {
        let backend = FakeBackend::new([]);
        let notifications = Recorder::default();
        let widget = LikeWidget::mount(
            config("foo", false, 4, true),
            backend.clone(),
            UiContext::new(notifications.clone()),
        );

        for _ in 0..3 {
            assert!(matches!(widget.toggle().await, Err(ToggleError::Disabled)));
        }

        assert!(backend.calls().is_empty());
        assert_eq!(
            vec![("Log in to like reviews".to_owned(), Kind::Warning); 3],
            notifications.messages()
        );
        assert_eq!(4, widget.state().likes_count);
    }

    #[tokio::test]
    async fn failures_should_leave_state_untouched() {
        let backend = FakeBackend::new([Reply::Rejected, Reply::Status(403)]);
        let notifications = Recorder::default();
        let widget = LikeWidget::mount(
            config("foo", true, 5, false),
            backend,
            UiContext::new(notifications.clone()),
        );
        let before = widget.view();
        let views = views(&widget);

        assert!(matches!(widget.toggle().await, Err(ToggleError::Rejected(_))));
        assert!(matches!(widget.toggle().await, Err(ToggleError::Status(_))));

        assert_eq!(before, widget.view());
        assert!(!widget.is_busy());
        assert_eq!(
            vec![
                (FAILED.to_owned(), Kind::Error),
                (FAILED.to_owned(), Kind::Error)
            ],
            notifications.messages()
        );

        let views = views.lock();
        assert_eq!(LOADING_LABEL, views[0].label());
        assert_eq!(before.label(), views[1].label());
        assert!(!views[1].pulse);
    }

    #[tokio::test]
    async fn second_toggle_while_pending_should_be_inert() {
        let backend = FakeBackend::gated([Reply::Like(LikeState {
            liked: true,
            likes_count: 8,
        })]);
        let notifications = Recorder::default();
        let widget = LikeWidget::mount(
            config("foo", false, 7, false),
            backend.clone(),
            UiContext::new(notifications.clone()),
        );

        let first = widget.toggle();
        tokio::pin!(first);
        assert!(futures::poll!(&mut first).is_pending());
        assert!(widget.is_busy());

        assert!(matches!(widget.toggle().await, Err(ToggleError::Busy)));
        assert_eq!(1, backend.calls().len());
        assert!(notifications.messages().is_empty());

        backend.release();
        let state = first.await.unwrap();

        assert_eq!(8, state.likes_count);
        assert!(!widget.is_busy());
        assert_eq!(1, backend.calls().len());
    }

    #[tokio::test]
    async fn widget_should_stay_usable_after_failure() {
        let backend = FakeBackend::new([
            Reply::Status(500),
            Reply::Like(LikeState {
                liked: true,
                likes_count: 1,
            }),
        ]);
        let widget = LikeWidget::mount(config("foo", false, 0, false), backend, UiContext::default());

        assert!(widget.toggle().await.is_err());
        assert!(widget.toggle().await.unwrap().liked);
    }
}
