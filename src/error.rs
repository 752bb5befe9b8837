//! Errors that can happen when interacting with the review site.
#![allow(missing_docs)]

use std::{collections::BTreeMap, fmt};
use thiserror::Error;

pub use _inner::{
    ClientBuilderError, CommentError, EndpointError, Error, PageError, ToggleError,
};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct RequestError(#[from] pub(crate) reqwest::Error);

/// Represents a reply from the site with a non-success HTTP status.
///
/// A missing or invalid CSRF token usually surfaces as a `403` here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("site responded with status `{0}`")]
pub struct HttpStatus(u16);

impl HttpStatus {
    /// Creates a new `HttpStatus` from a status code.
    #[inline]
    #[must_use]
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the status code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> u16 {
        self.0
    }
}

/// Represents a reply with `success: false`.
///
/// The site may or may not say why.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("site rejected the request{}", .0.as_deref().map(|reason| format!(": {reason}")).unwrap_or_default())]
pub struct Rejected(Option<String>);

impl Rejected {
    /// Creates a new `Rejected`, with the reason the site gave, if any.
    #[inline]
    #[must_use]
    pub fn new(reason: Option<String>) -> Self {
        Self(reason)
    }

    /// Returns the reason the site gave for rejecting the request.
    #[inline]
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Represents an invalid post slug.
///
/// Slugs are non-empty and made of ASCII letters, digits, `-` and `_`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid post slug `{0}`")]
pub struct InvalidPostRef(String);

impl InvalidPostRef {
    pub(crate) fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }
}

/// Field errors reported by the site for a submitted form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub(crate) fn new(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self(errors)
    }

    /// Returns the messages reported for `field`.
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Iterates over `(field, messages)` pairs, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("form rejected")?;

        for (idx, (field, messages)) in self.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}`{field}` {}", messages.join(", "))?;
        }

        Ok(())
    }
}

impl std::error::Error for FormErrors {}

mod _inner {
    use crate::stdx::error::Assumption;
    use error_set::error_set;

    error_set! {
        #[expect(
            clippy::error_impl_error,
            reason = "`Error` is a ball of mud enum thats built through codegen; only meant for prototyping"
        )]
        Error := {
            InvalidPostRef(super::InvalidPostRef),
        }
        || Base
        || ClientError
        || ToggleError
        || CommentError
        || PageError

        /// Errors from a single request to one of the site endpoints.
        EndpointError := Base || ClientError

        /// Errors from toggling a like or a reaction.
        ToggleError := {
            #[display("widget is disabled; log in to interact")]
            Disabled,
            #[display("a request for this widget is already in flight")]
            Busy,
            Rejected(super::Rejected),
        } || Base || ClientError

        CommentError := {
            #[display("comment content cannot be empty")]
            EmptyComment,
            Invalid(super::FormErrors),
        } || Base || ClientError

        PageError := Base

        ClientBuilderError := {
            BuildFailed,
            InvalidBaseUrl(url::ParseError),
        }

        // --- Internal ---

        ClientError := {
            RequestFailed(super::RequestError),
            Status(super::HttpStatus),
        }

        Base := {
            Internal(Assumption),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejected_should_display_reason() {
        assert_eq!(
            "site rejected the request: Method not allowed",
            Rejected::new(Some("Method not allowed".into())).to_string()
        );
        assert_eq!("site rejected the request", Rejected::new(None).to_string());
    }

    #[test]
    fn form_errors_should_list_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("content".to_owned(), vec!["This field is required.".to_owned()]);
        let errors = FormErrors::new(errors);

        assert_eq!(
            "form rejected: `content` This field is required.",
            errors.to_string()
        );
        assert_eq!(["This field is required."], errors.field("content"));
        assert!(errors.field("parent_id").is_empty());
    }

    #[test]
    fn endpoint_error_should_widen_into_toggle_error() {
        let err = EndpointError::Status(HttpStatus::new(403));
        let err = ToggleError::from(err);

        assert!(matches!(err, ToggleError::Status(status) if status.code() == 403));
    }
}
