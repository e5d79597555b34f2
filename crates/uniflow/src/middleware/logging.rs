//! Logging middleware

use std::fmt;
use std::sync::Arc;

use log::debug;

use super::{DispatchStage, Middleware, StoreApi};

/// Which side of `next` a state observation was taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Before => f.write_str("old"),
            Phase::After => f.write_str("new"),
        }
    }
}

/// Observes the state before and after each dispatch.
///
/// Purely observational: the action and the result of `next` pass through
/// untouched. The default sink logs via `log::debug!`; a custom sink can be
/// supplied for other destinations.
pub struct LoggingMiddleware<S> {
    sink: Arc<dyn Fn(Phase, &S) + Send + Sync>,
}

impl<S: fmt::Debug> LoggingMiddleware<S> {
    pub fn new() -> Self {
        Self::with_sink(|phase, state: &S| debug!("{phase} state: {state:?}"))
    }
}

impl<S> LoggingMiddleware<S> {
    pub fn with_sink<F>(sink: F) -> Self
    where
        F: Fn(Phase, &S) + Send + Sync + 'static,
    {
        Self { sink: Arc::new(sink) }
    }
}

impl<S: fmt::Debug> Default for LoggingMiddleware<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware<S>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    fn apply(&self, api: StoreApi<S, A>) -> DispatchStage<S, A> {
        let sink = Arc::clone(&self.sink);
        Box::new(move |next| {
            let api = api.clone();
            let sink = Arc::clone(&sink);
            Arc::new(move |action| {
                (sink)(Phase::Before, &api.state());
                let result = next(action);
                (sink)(Phase::After, &api.state());
                result
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, Dispatched};
    use crate::enhancer::MiddlewareStack;
    use crate::store::Store;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestAction {
        Bump,
    }

    fn bump_reducer(state: Option<&usize>, action: &Action<usize, TestAction>) -> usize {
        let current = state.copied().unwrap_or(0);
        match action {
            Action::Data(TestAction::Bump) => current + 1,
            _ => current,
        }
    }

    #[test]
    fn one_dispatch_yields_one_before_and_one_after_observation() {
        let observations = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let observations = Arc::clone(&observations);
            move |phase, state: &usize| observations.lock().push((phase, *state))
        };
        let store = Store::enhanced(
            bump_reducer,
            MiddlewareStack::new().with(LoggingMiddleware::with_sink(sink)),
        );

        store.dispatch(Action::Data(TestAction::Bump)).unwrap();

        assert_eq!(*observations.lock(), vec![(Phase::Before, 0), (Phase::After, 1)]);
    }

    #[test]
    fn result_of_next_passes_through_unchanged() {
        let store = Store::enhanced(
            bump_reducer,
            MiddlewareStack::new().with(LoggingMiddleware::with_sink(|_, _: &usize| {})),
        );

        let result = store.dispatch(Action::Data(TestAction::Bump));

        assert_eq!(result, Ok(Dispatched::Data(TestAction::Bump)));
        assert_eq!(store.state(), 1);
    }
}
