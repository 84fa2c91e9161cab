//! Complete counter application demonstrating all features together

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rudder::middleware::logger;
use rudder::{apply_middleware, create_store, Action, Middleware};
use serde_json::Value;

#[derive(Clone, Debug)]
struct CounterState {
    count: i32,
    step: i32,
    history: Vec<i32>,
}

impl CounterState {
    fn new() -> Self {
        Self {
            count: 0,
            step: 1,
            history: vec![0],
        }
    }
}

fn reducer(state: Option<CounterState>, action: &Action) -> CounterState {
    let mut state = state.unwrap_or_else(CounterState::new);
    match action.kind_str() {
        Some("INCREMENT") => state.count += state.step,
        Some("DECREMENT") => state.count -= state.step,
        Some("RESET") => state.count = 0,
        Some("SET_STEP") => {
            // Steps outside the i32 range are ignored.
            if let Some(step) = action
                .payload()
                .and_then(Value::as_i64)
                .and_then(|step| i32::try_from(step).ok())
            {
                state.step = step;
            }
            return state;
        }
        _ => return state,
    }
    state.history.push(state.count);
    state
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Complete Counter Application ===\n");

    // Refuse steps larger than 10 before they reach the reducer
    let clamp_step = Middleware::from_fn(|_api, next, signal| {
        if signal["type"] == "SET_STEP" && signal["payload"].as_i64().unwrap_or(0) > 10 {
            println!("   [Middleware] Rejected step {}", signal["payload"]);
            return Ok(None);
        }
        next(signal)
    });

    println!("1. Creating store with logger and step clamp middleware");
    let store = create_store(
        reducer,
        None,
        Some(apply_middleware([logger(), clamp_step])),
    )
    .expect("store");

    let renders = Arc::new(AtomicUsize::new(0));
    let view = store.clone();
    let renders_clone = renders.clone();
    let subscription = store.subscribe(move || {
        renders_clone.fetch_add(1, Ordering::SeqCst);
        if let Some(state) = view.get_state() {
            println!("   [State] Count: {}, Step: {}", state.count, state.step);
        }
    });

    println!("\n2. Incrementing");
    for _ in 0..3 {
        store.dispatch(Action::new("INCREMENT")).expect("dispatch");
    }

    println!("\n3. Changing step to 5");
    store
        .dispatch(Action::new("SET_STEP").with("payload", 5))
        .expect("dispatch");
    store.dispatch(Action::new("INCREMENT")).expect("dispatch");

    println!("\n4. Trying step 50");
    store
        .dispatch(Action::new("SET_STEP").with("payload", 50))
        .expect("dispatch");

    println!("\n5. Decrementing and resetting");
    store.dispatch(Action::new("DECREMENT")).expect("dispatch");
    store.dispatch(Action::new("RESET")).expect("dispatch");

    println!("\n6. Dispatching something that is not a record");
    if let Err(err) = store.dispatch(Value::from(42)) {
        println!("   Rejected: {err}");
    }

    subscription.unsubscribe();
    store.dispatch(Action::new("INCREMENT")).expect("dispatch");

    let final_state = store.get_state().expect("state");
    println!("\n7. Final statistics:");
    println!("   Count: {}", final_state.count);
    println!("   History: {:?}", final_state.history);
    println!("   Renders: {}", renders.load(Ordering::SeqCst));

    println!("\n✓ Example complete!");
}
