//! Reducer contract

use crate::action::Action;

/// Pure state transition function: `(current state, action) -> next state`.
///
/// The reducer is the only place where state transitions happen. It must be
/// deterministic and side-effect free; side effects belong in middleware.
///
/// It is called with `None` exactly once, during store bootstrap, together
/// with the internal init action: the unknown/default branch must produce
/// the initial state. On every later call the previous state is borrowed in
/// and a wholly new state is returned; the store never mutates state in
/// place. The reducer is never invoked with [`Action::Effect`].
pub type Reducer<S, A> = Box<dyn Fn(Option<&S>, &Action<S, A>) -> S + Send + Sync>;
