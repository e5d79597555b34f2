//! Typed unidirectional state container with a composable dispatch pipeline
//!
//! A single state value is updated exclusively through a pure reducer;
//! cross-cutting concerns (deferred dispatch, logging) hook into dispatch
//! via an ordered middleware chain installed through an enhancer.
//!
//! ## Design
//!
//! ```text
//! Action → Middleware Chain → Reducer → State → Listeners
//! ```
//!
//! - [`Store`] owns the current state and the listener table
//! - [`Action`] is a closed tagged union: consumer data records or deferred
//!   effects, no duck typing
//! - [`Middleware`] wraps the dispatch function; middlewares compose
//!   right-to-left so the first one installed sees each action first
//! - [`MiddlewareStack`] is the [`Enhancer`] that installs a chain
//!
//! ## Example
//!
//! ```
//! use uniflow::{Action, MiddlewareStack, Store, ThunkMiddleware};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum CounterAction {
//!     Increase,
//!     Decrease,
//! }
//!
//! fn counter(state: Option<&i64>, action: &Action<i64, CounterAction>) -> i64 {
//!     let current = state.copied().unwrap_or(0);
//!     match action {
//!         Action::Data(CounterAction::Increase) => current + 1,
//!         Action::Data(CounterAction::Decrease) => current - 1,
//!         _ => current,
//!     }
//! }
//!
//! let store = Store::enhanced(counter, MiddlewareStack::new().with(ThunkMiddleware));
//! store.dispatch(Action::Data(CounterAction::Increase)).unwrap();
//! assert_eq!(store.state(), 1);
//! ```

mod action;
mod compose;
mod enhancer;
mod error;
mod middleware;
mod reducer;
mod store;
pub mod task;

pub use action::{Action, Dispatched, Thunk};
pub use compose::{Composable, compose};
pub use enhancer::{Enhancer, MiddlewareStack, StoreCreator};
pub use error::StoreError;
pub use middleware::{
    DispatchFn, DispatchResult, DispatchStage, LoggingMiddleware, Middleware, Phase, StoreApi,
    ThunkMiddleware,
};
pub use reducer::Reducer;
pub use store::{Store, Subscription};
