//! The interactive widgets of a review post.
//!
//! Both widgets are small state machines over a [`Backend`](crate::client::Backend):
//! `Idle` until an interaction claims the widget, `Pending` while its single
//! request is in flight, then `Idle` again with whatever state the site
//! answered with. Nothing changes before the site confirms it.
//!
//! Views are pushed to [`Render`] subscribers after every transition.

pub mod like;
pub mod reaction;

#[cfg(test)]
pub(crate) mod fake;

pub use like::{LikeConfig, LikeView, LikeWidget};
pub use reaction::{Panel, ReactionConfig, ReactionView, ReactionWidget, Summary};

use crate::render::Render;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Label shown on a button while its request is in flight.
pub const LOADING_LABEL: &str = "Loading...";

/// The per-widget interaction lock.
///
/// Claimed synchronously, before any request future exists, so that a second
/// interaction on the same widget is turned away instead of queued.
#[derive(Debug, Default)]
struct Busy(AtomicBool);

impl Busy {
    fn claim(&self) -> Option<Claim<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Claim(&self.0))
    }

    fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the lock on drop, including when the interaction is cancelled.
#[must_use]
struct Claim<'a>(&'a AtomicBool);

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Subscribers<V>(Mutex<Vec<Arc<dyn Render<V>>>>);

impl<V> Default for Subscribers<V> {
    fn default() -> Self {
        Self(Mutex::new(Vec::new()))
    }
}

impl<V> Subscribers<V> {
    fn push(&self, renderer: Arc<dyn Render<V>>) {
        self.0.lock().push(renderer);
    }

    fn len(&self) -> usize {
        self.0.lock().len()
    }

    fn publish(&self, view: &V) {
        // A renderer may read the widget back; the list must not stay locked.
        let renderers = self.0.lock().clone();

        for renderer in renderers {
            renderer.render(view);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn busy_should_only_be_claimed_once() {
        let busy = Busy::default();

        let claim = busy.claim();
        assert!(claim.is_some());
        assert!(busy.is_set());
        assert!(busy.claim().is_none());

        drop(claim);
        assert!(!busy.is_set());
        assert!(busy.claim().is_some());
    }

    #[test]
    fn subscribers_should_all_receive_view() {
        let subscribers = Subscribers::<u32>::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            subscribers.push(Arc::new(move |view: &u32| seen.lock().push(*view)));
        }

        subscribers.publish(&7);

        assert_eq!(2, subscribers.len());
        assert_eq!(vec![7, 7], *seen.lock());
    }
}
