pub mod comment;
pub mod like;
pub mod reaction;
pub mod subcategory;
