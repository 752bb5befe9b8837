//! Module representing a reference to a review post.

use crate::error::InvalidPostRef;
use std::{fmt::Display, str::FromStr, sync::Arc};

/// Represents a reference to a review post on the site, by its slug.
///
/// A slug is what the site uses in every post-specific URL:
/// `/post/{slug}/`, `/toggle-like/{slug}/` and so on. It is non-empty and
/// made of ASCII letters, digits, `-` and `_`.
///
/// # Example
///
/// ```
/// # use moviereviews::PostRef;
/// let post = PostRef::new("the-thing-1982")?;
/// assert_eq!("the-thing-1982", post.slug());
///
/// assert!(PostRef::new("not a slug").is_err());
/// # Ok::<(), moviereviews::error::InvalidPostRef>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostRef(Arc<str>);

impl PostRef {
    /// Creates a new `PostRef` from a slug.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPostRef`] if the slug is empty or contains characters
    /// the site never puts in a slug.
    pub fn new(slug: &str) -> Result<Self, InvalidPostRef> {
        let valid = !slug.is_empty()
            && slug
                .bytes()
                .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_');

        if !valid {
            return Err(InvalidPostRef::new(slug));
        }

        Ok(Self(Arc::from(slug)))
    }

    /// Returns the slug.
    #[inline]
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.0
    }
}

impl FromStr for PostRef {
    type Err = InvalidPostRef;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for PostRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_accept_site_slugs() {
        for slug in ["foo", "bar", "el-viaje-de-chihiro", "post_2", "A1"] {
            let post = PostRef::new(slug).unwrap();
            assert_eq!(slug, post.slug());
        }
    }

    #[test]
    fn should_reject_invalid_slugs() {
        for slug in ["", "with space", "../admin", "a/b", "é"] {
            assert!(PostRef::new(slug).is_err(), "`{slug}` should be rejected");
        }
    }

    #[test]
    fn should_parse_from_str() {
        let post: PostRef = "foo".parse().unwrap();
        assert_eq!("foo", post.to_string());
    }
}
