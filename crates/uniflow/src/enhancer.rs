//! Store enhancers and the middleware installer
//!
//! An enhancer intercepts store creation: it receives the base creation
//! function and the reducer and is solely responsible for producing the
//! final store. [`MiddlewareStack`] is the built-in enhancer that installs
//! a middleware chain around dispatch.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::compose::compose;
use crate::middleware::{DispatchHolder, DispatchStage, Middleware, StoreApi};
use crate::reducer::Reducer;
use crate::store::Store;

/// Base store creation function handed to enhancers.
pub type StoreCreator<S, A> = fn(Reducer<S, A>) -> Store<S, A>;

/// Wraps store creation to substitute an augmented store.
pub trait Enhancer<S, A> {
    fn enhance(self, create: StoreCreator<S, A>, reducer: Reducer<S, A>) -> Store<S, A>;
}

/// Ordered middleware chain, installed as an [`Enhancer`].
///
/// Middlewares see actions in the order they were added: the first one
/// added wraps everything downstream.
///
/// # Example
///
/// ```ignore
/// let store = Store::enhanced(
///     reducer,
///     MiddlewareStack::new()
///         .with(ThunkMiddleware)
///         .with(LoggingMiddleware::new()),
/// );
/// ```
pub struct MiddlewareStack<S, A> {
    middlewares: Vec<Box<dyn Middleware<S, A>>>,
}

impl<S, A> MiddlewareStack<S, A> {
    pub fn new() -> Self {
        Self { middlewares: Vec::new() }
    }

    /// Add a middleware to the end of the chain.
    pub fn with<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S, A> + 'static,
    {
        self.middlewares.push(Box::new(middleware));
        self
    }
}

impl<S, A> Default for MiddlewareStack<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Enhancer<S, A> for MiddlewareStack<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    fn enhance(self, create: StoreCreator<S, A>, reducer: Reducer<S, A>) -> Store<S, A> {
        let store = create(reducer);
        let raw = store.dispatch_fn();

        // the slot starts at the raw dispatch and is resolved to the final
        // augmented dispatch below, so middleware-initiated re-dispatch
        // goes through the whole chain rather than just downstream stages
        let slot = Arc::new(ArcSwap::from_pointee(DispatchHolder(Arc::clone(&raw))));
        let api = StoreApi::new(store.state_getter(), Arc::clone(&slot));

        let stages: Vec<DispatchStage<S, A>> = self
            .middlewares
            .iter()
            .map(|middleware| middleware.apply(api.clone()))
            .collect();
        let augmented = compose(stages)(raw);
        slot.store(Arc::new(DispatchHolder(Arc::clone(&augmented))));

        store.with_dispatch(augmented)
    }
}
