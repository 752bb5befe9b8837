//! Turning widget views into something a user sees.
//!
//! Widgets push a fresh view to every subscribed [`Render`] after each
//! transition. Any `Fn(&V)` closure is a renderer; [`HtmlFragment`] renders
//! the same markup the site serves, so its output can be read back with
//! [`Page::parse`](crate::page::Page::parse).

use crate::{
    reaction::ReactionKind,
    stdx::cache::Cache,
    widget::{
        LikeView, ReactionView, Summary,
        reaction::{EMPTY_SUMMARY, Panel},
    },
};
use html_escape::encode_double_quoted_attribute as attr;
use std::fmt::{self, Write};

/// Something that presents a widget view.
pub trait Render<V>: Send + Sync {
    /// Presents `view`, replacing whatever was presented before.
    fn render(&self, view: &V);
}

impl<V, F> Render<V> for F
where
    F: Fn(&V) + Send + Sync,
{
    #[inline]
    fn render(&self, view: &V) {
        self(view);
    }
}

/// Keeps the markup of the last view it was given.
///
/// Clones share the same markup.
///
/// # Example
///
/// ```
/// # use moviereviews::{LikeWidget, PostRef, UiContext, Client, render::HtmlFragment, widget::LikeConfig};
/// # use std::sync::Arc;
/// let widget = LikeWidget::mount(
///     LikeConfig {
///         post: PostRef::new("foo")?,
///         liked: false,
///         likes_count: 2,
///         disabled: false,
///     },
///     Arc::new(Client::new()),
///     UiContext::default(),
/// );
///
/// let fragment = HtmlFragment::new();
/// widget.subscribe(Arc::new(fragment.clone()));
///
/// assert!(fragment.html().contains("2 people like this"));
/// # Ok::<(), moviereviews::error::InvalidPostRef>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlFragment(Cache<String>);

impl HtmlFragment {
    /// Creates an empty fragment.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Cache::empty())
    }

    /// Returns the markup of the last rendered view. Empty before the first one.
    #[inline]
    #[must_use]
    pub fn html(&self) -> String {
        self.0.get().or_default()
    }
}

impl Render<LikeView> for HtmlFragment {
    fn render(&self, view: &LikeView) {
        match like_markup(view) {
            Ok(html) => self.0.insert(html),
            Err(err) => tracing::warn!(post = %view.post, %err, "failed to render like widget"),
        }
    }
}

impl Render<ReactionView> for HtmlFragment {
    fn render(&self, view: &ReactionView) {
        match reaction_markup(view) {
            Ok(html) => self.0.insert(html),
            Err(err) => tracing::warn!(post = %view.post, %err, "failed to render reaction widget"),
        }
    }
}

fn like_markup(view: &LikeView) -> Result<String, fmt::Error> {
    let mut html = String::new();

    write!(
        html,
        r#"<div class="like-section{pulse}" data-post-slug="{slug}">"#,
        pulse = if view.pulse { " pulse" } else { "" },
        slug = attr(view.post.slug()),
    )?;

    write!(
        html,
        r#"<button class="btn like-btn{liked}"{disabled}>{label}</button>"#,
        liked = if view.state.liked { " liked" } else { "" },
        disabled = if view.busy || view.disabled { " disabled" } else { "" },
        label = view.label(),
    )?;

    write!(
        html,
        r#"<span class="likes-count">{count}</span> <span class="likes-text">{text}</span></div>"#,
        count = view.state.likes_count,
        text = view.count_text(),
    )?;

    Ok(html)
}

fn reaction_markup(view: &ReactionView) -> Result<String, fmt::Error> {
    let mut html = String::new();

    write!(
        html,
        r#"<div class="reactions-container{highlight}" data-post-slug="{slug}">"#,
        highlight = if view.highlight { " highlight" } else { "" },
        slug = attr(view.post.slug()),
    )?;

    write!(
        html,
        r#"<button class="reaction-main-btn" data-user-reaction="{user}"{disabled}>{label}</button>"#,
        user = view.state.user_reaction().map_or("", ReactionKind::as_str),
        disabled = if view.busy || view.disabled { " disabled" } else { "" },
        label = view.main_label(),
    )?;

    write!(
        html,
        r#"<div class="reaction-panel{open}">"#,
        open = if view.panel == Panel::Open { " show" } else { "" },
    )?;
    for kind in &view.options {
        write!(
            html,
            r#"<button class="reaction-option" data-reaction="{kind}" title="{label}">{emoji}</button>"#,
            label = kind.label(),
            emoji = kind.emoji(),
        )?;
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="reactions-summary">"#);
    match view.summary() {
        Summary::Empty => {
            write!(html, r#"<span class="no-reactions">{EMPTY_SUMMARY}</span>"#)?;
        }
        Summary::Counted {
            total,
            noun,
            breakdown,
        } => {
            write!(
                html,
                r#"<span class="total-reactions">{total}</span> <span class="reactions-text">{noun}</span><div class="reactions-breakdown">"#,
            )?;
            for (kind, count) in breakdown {
                write!(
                    html,
                    r#"<span class="reaction-item" data-reaction="{kind}">{emoji} <span class="reaction-count">{count}</span></span>"#,
                    emoji = kind.emoji(),
                )?;
            }
            html.push_str("</div>");
        }
    }
    html.push_str("</div></div>");

    Ok(html)
}
