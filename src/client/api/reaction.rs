use crate::{
    error::{Rejected, ToggleError},
    reaction::{ReactionKind, ReactionState},
    stdx::{
        error::assumption,
        serde::{u32_from_string, u32_or_zero},
    },
};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Deserialize, Debug)]
pub struct RawReactionResponse {
    pub success: bool,
    pub user_reaction: Option<String>,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub total_reactions: u32,
    #[serde(default)]
    pub reactions_by_type: HashMap<String, Count>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct Count(pub u32);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32_from_string(deserializer).map(Self)
    }
}

impl TryFrom<RawReactionResponse> for ReactionState {
    type Error = ToggleError;

    fn try_from(response: RawReactionResponse) -> Result<Self, Self::Error> {
        if !response.success {
            return Err(ToggleError::Rejected(Rejected::new(response.error)));
        }

        let user_reaction = match response.user_reaction.as_deref() {
            None | Some("") => None,
            Some(reaction) => match reaction.parse::<ReactionKind>() {
                Ok(kind) => Some(kind),
                Err(err) => assumption!("toggle-reaction response had an unknown `user_reaction`: {err}"),
            },
        };

        let mut counts = Vec::with_capacity(response.reactions_by_type.len());

        for (reaction, count) in response.reactions_by_type {
            match reaction.parse::<ReactionKind>() {
                Ok(kind) => counts.push((kind, count.0)),
                Err(err) => assumption!(
                    "toggle-reaction response had an unknown kind in `reactions_by_type`: {err}"
                ),
            }
        }

        let Some(state) = Self::try_new(user_reaction, counts) else {
            assumption!(
                "`reactions_by_type` should add up to a count that fits a `u32`, site claimed a total of {}",
                response.total_reactions
            );
        };

        assumption!(
            state.total() == response.total_reactions,
            "`total_reactions` should equal the sum of `reactions_by_type`, but was {} for a sum of {}",
            response.total_reactions,
            state.total()
        );

        if let Some(kind) = user_reaction {
            assumption!(
                state.count(kind) > 0,
                "the current user's reaction `{kind}` should be counted in `reactions_by_type`"
            );
        }

        Ok(state)
    }
}
