//! The search box: suggestions under the input, and the "searching" indicator.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// How long typing has to pause before the input is marked as searching.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// How long the input stays marked as searching.
pub const SEARCHING_FOR: Duration = Duration::from_millis(1000);

/// Most suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 5;

const DEFAULT_SUGGESTIONS: [&str; 10] = [
    "Anime",
    "Action movies",
    "Horror",
    "Comedy",
    "Drama",
    "Science fiction",
    "Marvel",
    "DC",
    "Studio Ghibli",
    "Miyazaki",
];

/// The list suggestions are picked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions(Vec<String>);

impl Default for Suggestions {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTIONS)
    }
}

impl Suggestions {
    /// Creates a list from `items`, in the order they should be offered.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    /// Suggestions to show when the input gains focus.
    ///
    /// Only an empty input shows anything: the first few items. `None` means
    /// whatever is showing stays.
    #[must_use]
    pub fn on_focus(&self, value: &str) -> Option<Vec<&str>> {
        value.is_empty().then(|| {
            self.0
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(String::as_str)
                .collect()
        })
    }

    /// Suggestions to show after the input changed.
    ///
    /// Items containing `value`, ignoring case, in list order. An empty input
    /// clears the list.
    ///
    /// # Example
    ///
    /// ```
    /// # use moviereviews::ui::search::Suggestions;
    /// let suggestions = Suggestions::default();
    /// assert_eq!(vec!["Drama", "Marvel"], suggestions.on_input("ma"));
    /// ```
    #[must_use]
    pub fn on_input(&self, value: &str) -> Vec<&str> {
        if value.is_empty() {
            return Vec::new();
        }

        let query = value.to_lowercase();

        self.0
            .iter()
            .filter(|item| item.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }
}

/// Renders a suggestion list as markup. Items are escaped.
#[must_use]
pub fn suggestions_html(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="suggestion-item" data-suggestion="{attr}">{text}</div>"#,
                attr = html_escape::encode_double_quoted_attribute(item),
                text = html_escape::encode_text(item),
            )
        })
        .collect()
}

/// Returns `true` if `value` is long enough to be searched for.
#[must_use]
pub fn is_searchable(value: &str) -> bool {
    value.trim().chars().count() > 2
}

/// Tracks typing in the search box, so only the last input of a burst counts.
///
/// Clones share the same box.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    generation: Arc<AtomicU64>,
}

impl SearchBox {
    /// Creates a search box nobody typed in yet.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports that the input changed to `value`.
    ///
    /// Resolves after [`SEARCH_DEBOUNCE`] to `true` if the input should now be
    /// marked as searching: `value` is searchable and nothing was typed since.
    /// Resolves to `false` right away for values that are too short.
    pub async fn input(&self, value: &str) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        if !is_searchable(value) {
            return false;
        }

        tokio::time::sleep(SEARCH_DEBOUNCE).await;

        self.generation.load(Ordering::Acquire) == generation
    }
}
