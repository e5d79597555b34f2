//! Counter consumer: data actions plus a deferred increase.
//!
//! Run with logging to watch the logging middleware observe each dispatch:
//!
//! ```text
//! RUST_LOG=debug cargo run --example counter
//! ```

use std::time::Duration;

use uniflow::{Action, LoggingMiddleware, MiddlewareStack, Store, ThunkMiddleware, task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterAction {
    Increase,
    Decrease,
}

fn counter(state: Option<&i64>, action: &Action<i64, CounterAction>) -> i64 {
    let current = state.copied().unwrap_or(0);
    match action {
        Action::Data(CounterAction::Increase) => current + 1,
        Action::Data(CounterAction::Decrease) => current - 1,
        _ => current,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // constructed once here and passed by handle; no global store
    let store = Store::enhanced(
        counter,
        MiddlewareStack::new()
            .with(ThunkMiddleware)
            .with(LoggingMiddleware::new()),
    );

    let subscription = {
        let store = store.clone();
        store.clone().subscribe(move || println!("count is now {}", store.state()))
    };

    store.dispatch(Action::Data(CounterAction::Increase))?;
    store.dispatch(Action::Data(CounterAction::Decrease))?;
    store.dispatch(Action::Data(CounterAction::Increase))?;

    // deferred increase: the thunk schedules a dispatch for one second later
    store.dispatch(Action::effect(|api| {
        task::spawn_after(Duration::from_secs(1), move || {
            if let Err(error) = api.dispatch(Action::Data(CounterAction::Increase)) {
                log::error!("deferred dispatch failed: {error}");
            }
        });
    }))?;

    println!("deferred increase scheduled, count still {}", store.state());
    tokio::time::sleep(Duration::from_millis(1500)).await;
    println!("final count: {}", store.state());

    subscription.unsubscribe();
    Ok(())
}
