//! Store core
//!
//! The store holds the current state and the listener table. State is
//! replaced wholesale on every dispatch; the reducer's output is
//! authoritative and nothing ever mutates state in place.

use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::action::{Action, Dispatched};
use crate::enhancer::Enhancer;
use crate::error::StoreError;
use crate::middleware::{DispatchFn, DispatchResult};
use crate::reducer::Reducer;

type ListenerFn = Arc<Mutex<dyn FnMut() + Send>>;

struct ListenerEntry {
    id: u64,
    callback: ListenerFn,
}

type ListenerTable = Arc<Mutex<Vec<ListenerEntry>>>;

/// Shared store cell: one per logical store, shared by every facade.
pub(crate) struct StoreInner<S, A> {
    state: Mutex<S>,
    listeners: ListenerTable,
    next_listener_id: AtomicU64,
    // reentrancy guard over the reduce+notify critical section
    dispatching: AtomicBool,
    reducer: Reducer<S, A>,
}

impl<S, A> StoreInner<S, A> {
    fn dispatch_raw(&self, action: Action<S, A>) -> DispatchResult<A> {
        // validated before any mutation: a rejected dispatch leaves state
        // untouched
        let action = match action {
            Action::Effect(_) => return Err(StoreError::InvalidAction),
            other => other,
        };
        let _guard = DispatchGuard::enter(&self.dispatching)?;
        {
            let mut state = self.state.lock();
            let next = (self.reducer)(Some(&*state), &action);
            *state = next;
        }
        self.notify();
        Ok(match action {
            Action::Data(data) => Dispatched::Data(data),
            _ => Dispatched::Init,
        })
    }

    /// Notify listeners in registration order.
    ///
    /// The table is snapshotted at cycle start, so unsubscribing during a
    /// cycle does not affect the cycle in flight. A panicking listener
    /// aborts the remainder of the cycle and propagates.
    fn notify(&self) {
        let snapshot: Vec<ListenerFn> = self
            .listeners
            .lock()
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();
        for callback in snapshot {
            let mut callback = callback.lock();
            (&mut *callback)();
        }
    }
}

struct DispatchGuard<'a>(&'a AtomicBool);

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Result<Self, StoreError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(StoreError::DispatchInProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for DispatchGuard<'_> {
    // released on drop so a panicking reducer or listener cannot wedge the
    // store
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds application state and dispatches actions through pure reducers.
///
/// Cloning a `Store` produces another facade over the same cell; an
/// enhancer uses this to hand back a copy with only `dispatch` replaced.
pub struct Store<S, A> {
    inner: Arc<StoreInner<S, A>>,
    dispatch: DispatchFn<S, A>,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store with the given reducer.
    ///
    /// The reducer is immediately run over an internal init action, so the
    /// state is initialized (via the reducer's default branch) before this
    /// returns and `state()` never observes a missing value.
    pub fn new<R>(reducer: R) -> Self
    where
        R: Fn(Option<&S>, &Action<S, A>) -> S + Send + Sync + 'static,
    {
        Self::create(Box::new(reducer))
    }

    /// Create a store through an enhancer.
    ///
    /// Construction defers entirely to the enhancer, which receives the
    /// base creation function and the reducer and is solely responsible
    /// for producing the final store. [`crate::MiddlewareStack`] is the
    /// enhancer that installs a middleware chain.
    pub fn enhanced<R, E>(reducer: R, enhancer: E) -> Self
    where
        R: Fn(Option<&S>, &Action<S, A>) -> S + Send + Sync + 'static,
        E: Enhancer<S, A>,
    {
        enhancer.enhance(Self::create, Box::new(reducer))
    }

    pub(crate) fn create(reducer: Reducer<S, A>) -> Self {
        let initial = reducer(None, &Action::init());
        let inner = Arc::new(StoreInner {
            state: Mutex::new(initial),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
            dispatching: AtomicBool::new(false),
            reducer,
        });
        let dispatch = {
            let inner = Arc::clone(&inner);
            Arc::new(move |action| inner.dispatch_raw(action)) as DispatchFn<S, A>
        };
        Self { inner, dispatch }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.inner.state.lock().clone()
    }

    /// Dispatch an action through the installed pipeline.
    ///
    /// For data actions this is synchronous end-to-end: the reducer runs,
    /// the state is replaced, and every registered listener fires, in
    /// registration order, before this returns. The dispatched action is
    /// handed back on success.
    pub fn dispatch(&self, action: Action<S, A>) -> DispatchResult<A> {
        (self.dispatch)(action)
    }

    /// Register a listener called after every state replacement.
    ///
    /// The same callback registered twice is two independent
    /// registrations. Dropping the returned [`Subscription`] does not
    /// unsubscribe; removal is always explicit.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut() + Send + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push(ListenerEntry {
            id,
            callback: Arc::new(Mutex::new(listener)),
        });
        Subscription {
            id,
            listeners: Arc::downgrade(&self.inner.listeners),
        }
    }

    pub(crate) fn state_getter(&self) -> Arc<dyn Fn() -> S + Send + Sync> {
        let inner = Arc::clone(&self.inner);
        Arc::new(move || inner.state.lock().clone())
    }

    pub(crate) fn dispatch_fn(&self) -> DispatchFn<S, A> {
        Arc::clone(&self.dispatch)
    }

    /// Facade copy sharing the same cell, with `dispatch` replaced.
    pub(crate) fn with_dispatch(&self, dispatch: DispatchFn<S, A>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch,
        }
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

/// Handle for one listener registration, removed by stable id.
///
/// Identity-based: unsubscribing removes exactly this registration, even
/// when the same callback was registered several times. Unsubscribing
/// twice, or after the store is gone, is a no-op.
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Vec<ListenerEntry>>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().retain(|entry| entry.id != self.id);
        }
    }
}
