//! Module representing likes on a review post.

/// Represents the like status of a post for the current user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeState {
    /// If the current user likes the post.
    pub liked: bool,
    /// How many users like the post.
    pub likes_count: u32,
}

impl LikeState {
    /// Returns the sentence describing how many people like the post.
    ///
    /// # Example
    ///
    /// ```
    /// # use moviereviews::like::LikeState;
    /// let state = LikeState { liked: true, likes_count: 1 };
    /// assert_eq!("1 person likes this", state.count_text());
    /// ```
    #[must_use]
    pub fn count_text(&self) -> String {
        match self.likes_count {
            0 => "Be the first to like this review".to_owned(),
            1 => "1 person likes this".to_owned(),
            count => format!("{count} people like this"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_pluralize_count_text() {
        let text = |likes_count| {
            LikeState {
                liked: false,
                likes_count,
            }
            .count_text()
        };

        assert_eq!("Be the first to like this review", text(0));
        assert_eq!("1 person likes this", text(1));
        assert_eq!("2 people like this", text(2));
        assert!(text(2).contains('2'));
        assert_eq!("1043 people like this", text(1043));
    }
}
