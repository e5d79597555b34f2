//! Typed action model
//!
//! Actions form a closed tagged union instead of the duck-typed
//! object-or-function shapes common in dynamic implementations of this
//! pattern. The reducer only ever sees [`Action::Init`] and
//! [`Action::Data`]; [`Action::Effect`] is consumed by the thunk middleware
//! and rejected by the raw store.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::middleware::StoreApi;

/// A dispatchable action over state `S` and consumer action kind `A`.
///
/// `A` is the consumer's own action enum; its variants are the
/// discriminator.
pub enum Action<S, A> {
    /// Internal bootstrap action dispatched once per store before creation
    /// returns. The nonce is a timestamp stamp kept for log readability;
    /// the variant itself already cannot collide with consumer kinds.
    Init { nonce: u64 },
    /// A consumer-defined data record describing a state change.
    Data(A),
    /// A deferred action: a callable that performs its own dispatches,
    /// synchronously or from a later scheduled task. Only meaningful when
    /// the thunk middleware is installed.
    Effect(Thunk<S, A>),
}

impl<S, A> Action<S, A> {
    pub(crate) fn init() -> Self {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Action::Init { nonce }
    }

    /// Wrap a closure as a deferred action.
    pub fn effect<F>(effect: F) -> Self
    where
        F: FnOnce(StoreApi<S, A>) + Send + 'static,
    {
        Action::Effect(Thunk::new(effect))
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Action<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Init { nonce } => write!(f, "Init({nonce})"),
            Action::Data(action) => write!(f, "Data({action:?})"),
            Action::Effect(_) => f.write_str("Effect(..)"),
        }
    }
}

/// A deferred action body, invoked once with the store API.
///
/// The closure receives a [`StoreApi`] whose `dispatch` re-enters the full
/// middleware pipeline, so follow-up dispatches behave exactly like
/// consumer-initiated ones.
pub struct Thunk<S, A>(Box<dyn FnOnce(StoreApi<S, A>) + Send>);

impl<S, A> Thunk<S, A> {
    pub fn new<F>(effect: F) -> Self
    where
        F: FnOnce(StoreApi<S, A>) + Send + 'static,
    {
        Self(Box::new(effect))
    }

    pub(crate) fn run(self, api: StoreApi<S, A>) {
        (self.0)(api)
    }
}

/// What a successful dispatch produced.
///
/// Returning the dispatched action keeps dispatch results chainable through
/// middlewares, mirroring the raw store handing the action back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched<A> {
    /// The data action that reached the reducer.
    Data(A),
    /// The internal bootstrap action reached the reducer.
    Init,
    /// An effect action was handed to its thunk; dispatches may follow
    /// later from whatever the thunk scheduled.
    Deferred,
}
