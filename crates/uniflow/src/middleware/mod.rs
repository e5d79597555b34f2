//! Middleware system
//!
//! Middleware sits between action dispatch and reducer execution, allowing
//! side effects, deferred dispatch, logging, and other cross-cutting
//! concerns to be handled in a composable way.
//!
//! ## Design
//!
//! ```text
//! Action → Middleware Chain → Reducer → State
//! ```
//!
//! Each middleware turns the downstream dispatch function (`next`) into a
//! wrapped one. Stages are folded right-to-left by the enhancer, so the
//! first middleware installed wraps everything downstream and therefore
//! sees each action first. A middleware can:
//! - inspect actions and state
//! - dispatch new actions through the full pipeline via [`StoreApi`]
//! - consume an action without forwarding it to `next`

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::action::{Action, Dispatched};
use crate::error::StoreError;

mod logging;
mod thunk;

pub use logging::{LoggingMiddleware, Phase};
pub use thunk::ThunkMiddleware;

/// Result of a dispatch: the dispatched action on success.
pub type DispatchResult<A> = Result<Dispatched<A>, StoreError>;

/// A dispatch function. The innermost one is the raw store dispatch; each
/// middleware stage wraps the one below it.
pub type DispatchFn<S, A> = Arc<dyn Fn(Action<S, A>) -> DispatchResult<A> + Send + Sync>;

/// One middleware's stage: maps the downstream dispatch (`next`) to the
/// wrapped dispatch.
pub type DispatchStage<S, A> = crate::compose::Composable<DispatchFn<S, A>>;

/// Holds middleware between action dispatch and the reducer.
///
/// `apply` receives the store API once, at installation time, and returns
/// this middleware's dispatch stage. The stage's `next` argument is the
/// following middleware's dispatch, or the raw store dispatch for the last
/// middleware in the chain.
pub trait Middleware<S, A>: Send + Sync {
    fn apply(&self, api: StoreApi<S, A>) -> DispatchStage<S, A>;
}

// Sized holder so the slot stores a thin pointer.
pub(crate) struct DispatchHolder<S, A>(pub(crate) DispatchFn<S, A>);

pub(crate) type DispatchSlot<S, A> = Arc<ArcSwap<DispatchHolder<S, A>>>;

/// Store handle given to middlewares and thunks.
///
/// `dispatch` always re-enters the *fully composed* pipeline, not just the
/// stages downstream of the caller: it reads the dispatch function through
/// a slot the enhancer resolves to the final augmented dispatch once the
/// chain is built. Until then the slot holds the raw store dispatch.
pub struct StoreApi<S, A> {
    get_state: Arc<dyn Fn() -> S + Send + Sync>,
    dispatch: DispatchSlot<S, A>,
}

impl<S, A> StoreApi<S, A> {
    pub(crate) fn new(
        get_state: Arc<dyn Fn() -> S + Send + Sync>,
        dispatch: DispatchSlot<S, A>,
    ) -> Self {
        Self { get_state, dispatch }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        (self.get_state)()
    }

    /// Dispatch through the whole middleware chain.
    pub fn dispatch(&self, action: Action<S, A>) -> DispatchResult<A> {
        let dispatch = self.dispatch.load_full();
        (dispatch.0)(action)
    }
}

impl<S, A> Clone for StoreApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            get_state: Arc::clone(&self.get_state),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}
