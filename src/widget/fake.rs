//! Scripted backend and notifier for exercising widgets without a site.

use crate::{
    PostRef,
    client::Backend,
    error::{HttpStatus, Rejected, ToggleError},
    like::LikeState,
    notify::{Kind, Notifier},
    reaction::{ReactionKind, ReactionState},
};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Like(PostRef),
    Reaction(PostRef, ReactionKind),
}

pub enum Reply {
    Like(LikeState),
    Reaction(ReactionState),
    Rejected,
    Status(u16),
}

/// Answers each call with the next scripted reply.
///
/// With a gate, every call waits for [`FakeBackend::release`] before answering.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
    gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        })
    }

    pub fn gated(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        })
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    async fn answer(&self, call: Call) -> Reply {
        self.calls.lock().push(call);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.replies
            .lock()
            .pop_front()
            .expect("a reply should be scripted for every call")
    }
}

fn failure(reply: Reply) -> ToggleError {
    match reply {
        Reply::Rejected => ToggleError::Rejected(Rejected::new(None)),
        Reply::Status(code) => ToggleError::Status(HttpStatus::new(code)),
        Reply::Like(_) | Reply::Reaction(_) => panic!("scripted reply does not fit the call"),
    }
}

impl Backend for FakeBackend {
    fn toggle_like<'a>(
        &'a self,
        post: &'a PostRef,
    ) -> BoxFuture<'a, Result<LikeState, ToggleError>> {
        async move {
            match self.answer(Call::Like(post.clone())).await {
                Reply::Like(state) => Ok(state),
                reply => Err(failure(reply)),
            }
        }
        .boxed()
    }

    fn toggle_reaction<'a>(
        &'a self,
        post: &'a PostRef,
        kind: ReactionKind,
    ) -> BoxFuture<'a, Result<ReactionState, ToggleError>> {
        async move {
            match self.answer(Call::Reaction(post.clone(), kind)).await {
                Reply::Reaction(state) => Ok(state),
                reply => Err(failure(reply)),
            }
        }
        .boxed()
    }
}

/// Records every notification instead of showing it.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<(String, Kind)>>>);

impl Recorder {
    pub fn messages(&self) -> Vec<(String, Kind)> {
        self.0.lock().clone()
    }

    pub fn last(&self) -> Option<(String, Kind)> {
        self.0.lock().last().cloned()
    }
}

impl Notifier for Recorder {
    fn notify(&self, message: &str, kind: Kind) {
        self.0.lock().push((message.to_owned(), kind));
    }
}
