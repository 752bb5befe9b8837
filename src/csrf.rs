//! Module for finding the anti-forgery token on a server-rendered page.

use crate::{error::PageError, stdx::error::Assume};
use scraper::{Html, Selector};
use std::{fmt::Display, sync::Arc};

/// Represents the anti-forgery token the site expects on state-changing requests.
///
/// An empty token is valid to hold and to send: the site decides whether the
/// request goes through, and a missing token ends up as a `403` from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(Arc<str>);

impl CsrfToken {
    /// Creates a token from its raw value.
    #[inline]
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self(Arc::from(token.trim()))
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no token was found.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves the token from raw page markup.
    ///
    /// # Example
    ///
    /// ```
    /// # use moviereviews::csrf::CsrfToken;
    /// let html = r#"<html><head><meta name="csrf-token" content="abc123"></head></html>"#;
    ///
    /// assert_eq!("abc123", CsrfToken::from_html(html)?.as_str());
    /// # Ok::<(), moviereviews::error::PageError>(())
    /// ```
    pub fn from_html(html: &str) -> Result<Self, PageError> {
        resolve(&Html::parse_document(html))
    }
}

impl Display for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finds the token on a parsed page.
///
/// Looks at the page-level `<meta name="csrf-token">` first, then at the hidden
/// `csrfmiddlewaretoken` input forms carry. Returns an empty token if neither
/// is present.
pub fn resolve(html: &Html) -> Result<CsrfToken, PageError> {
    let meta = Selector::parse(r#"meta[name="csrf-token"]"#) //
        .assumption(r#"`meta[name="csrf-token"]` should be a valid selector"#)?;

    let input = Selector::parse(r#"input[name="csrfmiddlewaretoken"]"#) //
        .assumption(r#"`input[name="csrfmiddlewaretoken"]` should be a valid selector"#)?;

    let from_meta = html
        .select(&meta)
        .filter_map(|element| element.attr("content"))
        .find(|token| !token.trim().is_empty());

    if let Some(token) = from_meta {
        return Ok(CsrfToken::new(token));
    }

    let from_input = html
        .select(&input)
        .filter_map(|element| element.attr("value"))
        .find(|token| !token.trim().is_empty());

    if let Some(token) = from_input {
        return Ok(CsrfToken::new(token));
    }

    tracing::debug!("no csrf token found on page, continuing with an empty one");

    Ok(CsrfToken::default())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_prefer_meta_tag() {
        let html = r#"
            <html>
              <head><meta name="csrf-token" content="from-meta"></head>
              <body>
                <form><input type="hidden" name="csrfmiddlewaretoken" value="from-form"></form>
              </body>
            </html>
        "#;

        assert_eq!("from-meta", CsrfToken::from_html(html).unwrap().as_str());
    }

    #[test]
    fn should_fall_back_to_hidden_field() {
        let html = r#"
            <form method="post">
              <input type="hidden" name="csrfmiddlewaretoken" value="from-form">
              <textarea name="content"></textarea>
            </form>
        "#;

        assert_eq!("from-form", CsrfToken::from_html(html).unwrap().as_str());
    }

    #[test]
    fn empty_meta_should_fall_back_to_hidden_field() {
        let html = r#"
            <meta name="csrf-token" content="">
            <input type="hidden" name="csrfmiddlewaretoken" value="from-form">
        "#;

        assert_eq!("from-form", CsrfToken::from_html(html).unwrap().as_str());
    }

    #[test]
    fn missing_token_should_be_empty_not_error() {
        let token = CsrfToken::from_html("<html><body><p>hi</p></body></html>").unwrap();

        assert!(token.is_empty());
        assert_eq!("", token.as_str());
    }
}
