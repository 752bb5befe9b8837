//! Module representing comments left on a review post.

use chrono::NaiveDateTime;

/// Represents a comment as the site returns it after posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Display name of the author: full name if set, else username.
    pub author: String,
    /// Body of the comment.
    pub content: String,
    /// When the comment was created, in the site's local time.
    pub created_at: NaiveDateTime,
    /// If the comment is a reply to another comment.
    pub is_reply: bool,
}

/// Represents a subcategory reviews can be filed under, e.g. "Anime" under "Movies".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subcategory {
    /// The subcategory's id.
    pub id: u32,
    /// The subcategory's display name.
    pub name: String,
}
