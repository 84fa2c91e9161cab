use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{ReentrantMutex, RwLock};
use serde_json::Value;

use crate::action::{self, Action};
use crate::config::StoreConfig;
use crate::error::StoreError;

use super::builder::StoreBuilder;

/// The transition function: computes the next state from the current one.
///
/// The current state is `None` until the first dispatch when the store was
/// built without preloaded state, so reducers pick their own default.
pub type Reducer<S> = Arc<dyn Fn(Option<S>, &Action) -> S + Send + Sync>;

/// A change callback. Listeners read the new state through the store.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// `Some(state)` once a signal went through the transition function. `None`
/// when a middleware absorbed it without calling `next`.
pub type DispatchResult<S> = Result<Option<S>, StoreError>;

/// A dispatch function, native or wrapped by middleware.
pub type Dispatch<S> = Arc<dyn Fn(Value) -> DispatchResult<S> + Send + Sync>;

/// Listeners keyed by a registration id that only ever grows, so map order is
/// registration order.
#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

type SharedListeners = RwLock<ListenerSet>;

struct StoreCore<S> {
    state: RwLock<Option<S>>,
    listeners: Arc<SharedListeners>,
    reducer: Reducer<S>,
    config: StoreConfig,
    // Serializes dispatch across threads while letting the owning thread
    // re-enter. Holds the current nesting depth.
    depth: ReentrantMutex<Cell<usize>>,
}

impl<S: Clone> StoreCore<S> {
    fn dispatch(&self, signal: Value) -> DispatchResult<S> {
        let action = action::validate(signal, &self.config.kind_field)?;

        let depth = self.depth.lock();
        let level = depth.get() + 1;
        if let Some(limit) = self.config.max_dispatch_depth {
            if level > limit {
                return Err(StoreError::DispatchDepthExceeded { limit });
            }
        }
        depth.set(level);
        let _depth = scopeguard::guard(depth, |depth| depth.set(depth.get() - 1));

        tracing::trace!(kind = %action.kind(), depth = level, "dispatch");

        let current = self.state.read().clone();
        let next = (self.reducer)(current, &action);
        *self.state.write() = Some(next.clone());

        self.notify();
        Ok(Some(next))
    }

    /// Call every listener in registration order.
    ///
    /// Each step looks up the first id after the last one called, so listeners
    /// added during the pass run in it too and removed ones are skipped. No
    /// lock is held while a listener runs. A panicking listener stops the pass.
    fn notify(&self) {
        let mut cursor = 0;
        loop {
            let next = self
                .listeners
                .read()
                .entries
                .range(cursor..)
                .next()
                .map(|(id, listener)| (*id, Arc::clone(listener)));
            let Some((id, listener)) = next else {
                break;
            };
            listener();
            cursor = id + 1;
        }
    }
}

/// A state container updated only by dispatching signals through a reducer.
///
/// Cloning a store is cheap and yields a handle to the same state, listeners
/// and dispatch pipeline.
///
/// # Examples
///
/// ```
/// use rudder::{Action, Store};
///
/// let store = Store::new(
///     |count: Option<i64>, action: &Action| {
///         let count = count.unwrap_or(0);
///         if action.is("INC") { count + 1 } else { count }
///     },
///     None,
/// );
///
/// store.dispatch(Action::new("INC")).unwrap();
/// assert_eq!(store.get_state(), Some(1));
/// ```
pub struct Store<S> {
    core: Arc<StoreCore<S>>,
    dispatch: Dispatch<S>,
}

impl<S: Clone + Send + Sync + 'static> Store<S> {
    /// Create a plain store with the default configuration.
    ///
    /// The reducer is not called here; `preloaded_state` is the state until
    /// the first dispatch.
    pub fn new<R>(reducer: R, preloaded_state: Option<S>) -> Self
    where
        R: Fn(Option<S>, &Action) -> S + Send + Sync + 'static,
    {
        Self::with_config(Arc::new(reducer), preloaded_state, StoreConfig::default())
    }

    /// Start building a store, optionally with an enhancer and configuration.
    pub fn builder() -> StoreBuilder<S> {
        StoreBuilder::new()
    }

    pub(crate) fn with_config(
        reducer: Reducer<S>,
        preloaded_state: Option<S>,
        config: StoreConfig,
    ) -> Self {
        tracing::debug!(
            kind_field = %config.kind_field,
            preloaded = preloaded_state.is_some(),
            "store created"
        );
        let core = Arc::new(StoreCore {
            state: RwLock::new(preloaded_state),
            listeners: Arc::new(RwLock::new(ListenerSet::default())),
            reducer,
            config,
            depth: ReentrantMutex::new(Cell::new(0)),
        });
        let native = Arc::clone(&core);
        let dispatch: Dispatch<S> = Arc::new(move |signal| native.dispatch(signal));
        Self { core, dispatch }
    }

    /// Get a clone of the current state.
    pub fn get_state(&self) -> Option<S> {
        self.core.state.read().clone()
    }

    /// Read state without cloning it.
    ///
    /// The state stays locked while `f` runs, so `f` must not dispatch.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&S>) -> R,
    {
        let state = self.core.state.read();
        f(state.as_ref())
    }

    /// Send a signal through the dispatch pipeline.
    ///
    /// Fails without touching state when the signal is not a plain record or
    /// lacks the kind field. Otherwise the reducer runs, the state is replaced,
    /// and every listener is called in order before this returns.
    pub fn dispatch(&self, signal: impl Into<Value>) -> DispatchResult<S> {
        (self.dispatch)(signal.into())
    }

    /// The dispatch function itself, for handing to code that only dispatches.
    pub fn dispatcher(&self) -> Dispatch<S> {
        Arc::clone(&self.dispatch)
    }

    /// Subscribe to state changes.
    ///
    /// The listener runs after every successful dispatch, after the reducer.
    /// Registering the same function twice runs it twice. Dropping the returned
    /// handle leaves the listener in place.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        let id = {
            let mut listeners = self.core.listeners.write();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.insert(id, listener);
            id
        };
        tracing::debug!(id, "listener subscribed");
        Subscription {
            id,
            listeners: Arc::downgrade(&self.core.listeners),
        }
    }

    /// Number of listeners still subscribed.
    pub fn listener_count(&self) -> usize {
        self.core.listeners.read().entries.len()
    }

    /// Same state and listeners, different dispatch.
    pub(crate) fn replace_dispatch(&self, dispatch: Dispatch<S>) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatch,
        }
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.core.state.read())
            .field("config", &self.core.config)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered listener.
///
/// Removing one listener leaves the others in their order, and a notification
/// pass already under way simply skips it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<SharedListeners>,
}

impl Subscription {
    /// Remove the listener. Returns false if it was already gone or the store
    /// has been dropped.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let removed = listeners.write().entries.remove(&self.id).is_some();
        if removed {
            tracing::debug!(id = self.id, "listener unsubscribed");
        }
        removed
    }

    /// Whether the listener is still registered with a live store.
    pub fn is_active(&self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let active = listeners.read().entries.contains_key(&self.id);
        active
    }
}
