//! Deferred-action (thunk) middleware

use std::sync::Arc;

use crate::action::{Action, Dispatched};

use super::{DispatchStage, Middleware, StoreApi};

/// Interprets effect actions as deferred action producers.
///
/// On [`Action::Effect`] the thunk is invoked with the store API and `next`
/// is bypassed entirely; the thunk is expected to dispatch itself,
/// synchronously or from a task it schedules (see [`crate::task`]). Data
/// and init actions are forwarded to `next` unchanged. Without this
/// middleware installed, effect actions reach the raw store and are
/// rejected as invalid.
pub struct ThunkMiddleware;

impl<S, A> Middleware<S, A> for ThunkMiddleware
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    fn apply(&self, api: StoreApi<S, A>) -> DispatchStage<S, A> {
        Box::new(move |next| {
            let api = api.clone();
            Arc::new(move |action| match action {
                Action::Effect(thunk) => {
                    thunk.run(api.clone());
                    Ok(Dispatched::Deferred)
                }
                other => next(other),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancer::MiddlewareStack;
    use crate::error::StoreError;
    use crate::store::Store;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestAction {
        Bump,
    }

    fn reducer_with_counter(
        calls: Arc<AtomicUsize>,
    ) -> impl Fn(Option<&usize>, &Action<usize, TestAction>) -> usize + Send + Sync + 'static {
        move |state, action| {
            calls.fetch_add(1, Ordering::SeqCst);
            let current = state.copied().unwrap_or(0);
            match action {
                Action::Data(TestAction::Bump) => current + 1,
                _ => current,
            }
        }
    }

    #[test]
    fn effect_actions_never_reach_the_reducer() {
        let reducer_calls = Arc::new(AtomicUsize::new(0));
        let store = Store::enhanced(
            reducer_with_counter(Arc::clone(&reducer_calls)),
            MiddlewareStack::new().with(ThunkMiddleware),
        );
        // one call so far: the bootstrap init action
        assert_eq!(reducer_calls.load(Ordering::SeqCst), 1);

        let result = store.dispatch(Action::effect(|_api| {}));

        assert_eq!(result, Ok(Dispatched::Deferred));
        assert_eq!(reducer_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn thunk_receives_a_working_store_api() {
        let store = Store::enhanced(
            reducer_with_counter(Arc::new(AtomicUsize::new(0))),
            MiddlewareStack::new().with(ThunkMiddleware),
        );

        store
            .dispatch(Action::effect(|api| {
                assert_eq!(api.state(), 0);
                // a synchronous re-dispatch runs through the whole chain
                let dispatched = api.dispatch(Action::Data(TestAction::Bump));
                assert_eq!(dispatched, Ok(Dispatched::Data(TestAction::Bump)));
                assert_eq!(api.state(), 1);
            }))
            .unwrap();

        assert_eq!(store.state(), 1);
    }

    #[test]
    fn nested_effects_are_interpreted_too() {
        let store = Store::enhanced(
            reducer_with_counter(Arc::new(AtomicUsize::new(0))),
            MiddlewareStack::new().with(ThunkMiddleware),
        );

        store
            .dispatch(Action::effect(|api| {
                let inner = api.clone();
                api.dispatch(Action::effect(move |_| {
                    inner
                        .dispatch(Action::Data(TestAction::Bump))
                        .unwrap();
                }))
                .unwrap();
            }))
            .unwrap();

        assert_eq!(store.state(), 1);
    }

    #[test]
    fn without_thunk_middleware_effects_are_invalid() {
        let store = Store::new(reducer_with_counter(Arc::new(AtomicUsize::new(0))));

        let result = store.dispatch(Action::effect(|_api| {}));

        assert_eq!(result, Err(StoreError::InvalidAction));
        assert_eq!(store.state(), 0);
    }
}
