use crate::{
    comment::Comment,
    error::{CommentError, FormErrors},
    stdx::error::{Assume, assumption},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Format the site renders comment timestamps in.
const CREATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Deserialize, Debug)]
pub struct RawCommentResponse {
    pub success: bool,
    pub comment: Option<RawComment>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct RawComment {
    pub author: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub is_reply: bool,
}

impl TryFrom<RawCommentResponse> for Comment {
    type Error = CommentError;

    fn try_from(response: RawCommentResponse) -> Result<Self, Self::Error> {
        if !response.success {
            return Err(CommentError::Invalid(FormErrors::new(response.errors)));
        }

        let comment = response.comment.assumption(
            "if add-comment response is successful, `comment` should be present",
        )?;

        let created_at = match NaiveDateTime::parse_from_str(&comment.created_at, CREATED_AT_FORMAT)
        {
            Ok(created_at) => created_at,
            Err(err) => assumption!(
                "comment `created_at` should be in `{CREATED_AT_FORMAT}` format, but was `{}`: {err}",
                comment.created_at
            ),
        };

        Ok(Self {
            author: comment.author,
            content: comment.content,
            created_at,
            is_reply: comment.is_reply,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn should_deserialize_created_comment() {
        let response: RawCommentResponse = serde_json::from_str(
            r#"{"success": true, "comment": {"author": "Ana", "content": "Great review", "created_at": "05/03/2024 21:07", "is_reply": false}}"#,
        )
        .unwrap();

        let comment = Comment::try_from(response).unwrap();

        assert_eq!("Ana", comment.author);
        assert_eq!("Great review", comment.content);
        assert!(!comment.is_reply);
        assert_eq!(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(21, 7, 0).unwrap()),
            comment.created_at
        );
    }

    #[test]
    fn form_errors_should_be_invalid() {
        let response: RawCommentResponse = serde_json::from_str(
            r#"{"success": false, "errors": {"content": ["This field is required."]}}"#,
        )
        .unwrap();

        let Err(CommentError::Invalid(errors)) = Comment::try_from(response) else {
            panic!("expected form errors");
        };

        assert_eq!(errors.field("content"), ["This field is required."]);
    }

    #[test]
    fn bad_timestamp_should_be_malformed() {
        let response: RawCommentResponse = serde_json::from_str(
            r#"{"success": true, "comment": {"author": "Ana", "content": "x", "created_at": "2024-03-05T21:07", "is_reply": true}}"#,
        )
        .unwrap();

        assert!(matches!(
            Comment::try_from(response),
            Err(CommentError::Internal(_))
        ));
    }
}
