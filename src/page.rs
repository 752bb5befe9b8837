//! Module for reading the interactive parts of a server-rendered review page.
//!
//! The site renders the initial like and reaction state into the markup of each
//! post. [`Page::parse`] turns that markup into typed widget configuration, so
//! that nothing downstream reads attributes again.
//!
//! # Markup
//!
//! ```html
//! <div class="like-section" data-post-slug="foo">
//!   <button class="like-btn liked">♥ Liked</button>
//!   <span class="likes-count">3</span>
//! </div>
//!
//! <div class="reactions-container" data-post-slug="foo">
//!   <button class="reaction-main-btn" data-user-reaction="love">❤️ Love</button>
//!   <div class="reaction-panel">
//!     <button class="reaction-option" data-reaction="like">👍</button>
//!     <!-- ... -->
//!   </div>
//!   <div class="reactions-summary">
//!     <span class="total-reactions">3</span> <span class="reactions-text">reactions</span>
//!     <div class="reactions-breakdown">
//!       <span class="reaction-item" data-reaction="love">❤️ <span class="reaction-count">2</span></span>
//!       <span class="reaction-item" data-reaction="like">👍 <span class="reaction-count">1</span></span>
//!     </div>
//!   </div>
//! </div>
//! ```

use crate::{
    PostRef,
    csrf::{self, CsrfToken},
    error::PageError,
    reaction::{ReactionKind, ReactionState},
    stdx::error::Assume,
    widget::{LikeConfig, ReactionConfig},
};
use scraper::{ElementRef, Html, Selector};

/// Represents everything interactive found on a review page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    csrf: CsrfToken,
    likes: Vec<LikeConfig>,
    reactions: Vec<ReactionConfig>,
}

impl Page {
    /// Parses a server-rendered page.
    ///
    /// Containers whose `data-post-slug` is missing or invalid are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// # use moviereviews::page::Page;
    /// let page = Page::parse(r#"
    ///     <meta name="csrf-token" content="abc">
    ///     <div class="like-section" data-post-slug="foo">
    ///       <button class="like-btn">Like</button>
    ///       <span class="likes-count">0</span>
    ///     </div>
    /// "#)?;
    ///
    /// assert_eq!("abc", page.csrf_token().as_str());
    /// assert_eq!("foo", page.likes()[0].post.slug());
    /// # Ok::<(), moviereviews::error::PageError>(())
    /// ```
    pub fn parse(html: &str) -> Result<Self, PageError> {
        let html = Html::parse_document(html);

        Ok(Self {
            csrf: csrf::resolve(&html)?,
            likes: likes(&html)?,
            reactions: reactions(&html)?,
        })
    }

    /// Returns the page's anti-forgery token. Empty if the page has none.
    #[inline]
    #[must_use]
    pub fn csrf_token(&self) -> &CsrfToken {
        &self.csrf
    }

    /// Returns the configuration of every like widget, in document order.
    #[inline]
    #[must_use]
    pub fn likes(&self) -> &[LikeConfig] {
        &self.likes
    }

    /// Returns the configuration of every reaction widget, in document order.
    #[inline]
    #[must_use]
    pub fn reactions(&self) -> &[ReactionConfig] {
        &self.reactions
    }
}

fn selector(selector: &str) -> Result<Selector, PageError> {
    Ok(Selector::parse(selector).assumption(format!("`{selector}` should be a valid selector"))?)
}

fn post_ref(container: ElementRef<'_>) -> Option<PostRef> {
    let Some(slug) = container.attr("data-post-slug") else {
        tracing::warn!("widget container without `data-post-slug`, skipping");
        return None;
    };

    match PostRef::new(slug.trim()) {
        Ok(post) => Some(post),
        Err(err) => {
            tracing::warn!(%err, "widget container with invalid slug, skipping");
            None
        }
    }
}

fn count(element: Option<ElementRef<'_>>) -> u32 {
    element
        .map(|element| element.text().collect::<String>())
        .and_then(|text| text.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

fn likes(html: &Html) -> Result<Vec<LikeConfig>, PageError> {
    let container = selector(".like-section[data-post-slug]")?;
    let like_button = selector(".like-btn")?;
    let likes_count = selector(".likes-count")?;

    let mut configs = Vec::new();

    for element in html.select(&container) {
        let Some(post) = post_ref(element) else {
            continue;
        };

        let button = element.select(&like_button).next();

        configs.push(LikeConfig {
            post,
            liked: button.is_some_and(|button| button.value().classes().any(|class| class == "liked")),
            likes_count: count(element.select(&likes_count).next()),
            disabled: button.is_some_and(|button| button.attr("disabled").is_some()),
        });
    }

    Ok(configs)
}

fn reactions(html: &Html) -> Result<Vec<ReactionConfig>, PageError> {
    let container = selector(".reactions-container[data-post-slug]")?;
    let main_button = selector(".reaction-main-btn")?;
    let option = selector(".reaction-option[data-reaction]")?;
    let item = selector(".reactions-breakdown .reaction-item[data-reaction]")?;
    let reaction_count = selector(".reaction-count")?;
    let total = selector(".total-reactions")?;

    let mut configs = Vec::new();

    for element in html.select(&container) {
        let Some(post) = post_ref(element) else {
            continue;
        };

        let button = element.select(&main_button).next();

        let user_reaction = button
            .and_then(|button| button.attr("data-user-reaction"))
            .map(str::trim)
            .filter(|reaction| !reaction.is_empty())
            .and_then(|reaction| match reaction.parse::<ReactionKind>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    tracing::warn!(%post, %err, "ignoring unknown user reaction");
                    None
                }
            });

        let mut options: Vec<ReactionKind> = element
            .select(&option)
            .filter_map(|option| option.attr("data-reaction"))
            .filter_map(|reaction| reaction.trim().parse().ok())
            .collect();
        options.sort();
        options.dedup();

        if options.is_empty() {
            options = ReactionKind::ALL.to_vec();
        }

        let counts: Vec<(ReactionKind, u32)> = element
            .select(&item)
            .filter_map(|item| {
                let kind = item.attr("data-reaction")?.trim().parse().ok()?;
                Some((kind, count(item.select(&reaction_count).next())))
            })
            .collect();

        let state = ReactionState::new(user_reaction, counts);

        if let Some(rendered) = element.select(&total).next() {
            let rendered = count(Some(rendered));
            if rendered != state.total() {
                tracing::warn!(
                    %post,
                    rendered,
                    breakdown = state.total(),
                    "rendered reaction total disagrees with breakdown, using breakdown"
                );
            }
        }

        configs.push(ReactionConfig {
            post,
            state,
            options,
            disabled: button.is_some_and(|button| button.attr("disabled").is_some()),
        });
    }

    Ok(configs)
}
