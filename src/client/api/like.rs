use crate::{
    error::{Rejected, ToggleError},
    like::LikeState,
    stdx::{
        error::{Assume, assumption},
        serde::u32_or_zero,
    },
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct RawLikeResponse {
    pub success: bool,
    pub liked: Option<bool>,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub likes_count: u32,
    pub error: Option<String>,
}

impl TryFrom<RawLikeResponse> for LikeState {
    type Error = ToggleError;

    fn try_from(response: RawLikeResponse) -> Result<Self, Self::Error> {
        if !response.success {
            return Err(ToggleError::Rejected(Rejected::new(response.error)));
        }

        let liked = response.liked.assumption(
            "if toggle-like response is successful, `liked` should be present",
        )?;

        assumption!(
            !liked || response.likes_count > 0,
            "if the current user likes the post, the likes count should include them, but was {}",
            response.likes_count
        );

        Ok(Self {
            liked,
            likes_count: response.likes_count,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_deserialize_success() {
        let response: RawLikeResponse =
            serde_json::from_str(r#"{"success": true, "liked": true, "likes_count": 1}"#).unwrap();

        assert_eq!(
            LikeState {
                liked: true,
                likes_count: 1
            },
            LikeState::try_from(response).unwrap()
        );
    }

    #[test]
    fn should_reject_on_failure_without_reading_fields() {
        let response: RawLikeResponse =
            serde_json::from_str(r#"{"success": false, "error": "Method not allowed"}"#).unwrap();

        let err = LikeState::try_from(response).unwrap_err();
        assert!(
            matches!(&err, ToggleError::Rejected(rejected) if rejected.reason() == Some("Method not allowed")),
            "{err:?}"
        );
    }

    #[test]
    fn liked_with_zero_count_should_be_malformed() {
        let response: RawLikeResponse =
            serde_json::from_str(r#"{"success": true, "liked": true, "likes_count": 0}"#).unwrap();

        assert!(matches!(
            LikeState::try_from(response),
            Err(ToggleError::Internal(_))
        ));
    }

    #[test]
    fn success_without_liked_should_be_malformed() {
        let response: RawLikeResponse =
            serde_json::from_str(r#"{"success": true, "likes_count": 4}"#).unwrap();

        assert!(matches!(
            LikeState::try_from(response),
            Err(ToggleError::Internal(_))
        ));
    }
}
