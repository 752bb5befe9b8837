//! Behaviours of the site's pages that have no backend and no failure modes.
//!
//! Each is reduced to the values a presentation layer needs: what a field's
//! error message is, which theme to apply, where an effect is at a given
//! frame.

pub mod clipboard;
pub mod effects;
pub mod search;
pub mod theme;
pub mod validate;
