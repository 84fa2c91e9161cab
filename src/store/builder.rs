use std::sync::Arc;

use crate::action::Action;
use crate::compose::Transform;
use crate::config::StoreConfig;
use crate::error::StoreError;

use super::store::{Reducer, Store};

/// Builds a store from a reducer and optional preloaded state.
///
/// Enhancers receive one of these and return another, usually one that calls
/// the original and wraps what it returns.
pub type StoreFactory<S> =
    Arc<dyn Fn(Reducer<S>, Option<S>) -> Result<Store<S>, StoreError> + Send + Sync>;

/// Wraps store construction. [`apply_middleware`](crate::apply_middleware)
/// returns one; several are combined with [`compose`](crate::compose::compose).
pub type Enhancer<S> = Transform<StoreFactory<S>>;

/// Step-by-step store construction.
///
/// ```
/// use rudder::{Action, Store, StoreConfig};
///
/// let store = Store::builder()
///     .reducer(|n: Option<u32>, action: &Action| n.unwrap_or(0) + u32::from(action.is("TICK")))
///     .preloaded_state(10)
///     .config(StoreConfig { kind_field: "kind".into(), ..Default::default() })
///     .build()
///     .unwrap();
///
/// store.dispatch(serde_json::json!({ "kind": "TICK" })).unwrap();
/// assert_eq!(store.get_state(), Some(11));
/// ```
pub struct StoreBuilder<S> {
    reducer: Option<Reducer<S>>,
    preloaded_state: Option<S>,
    enhancers: Vec<Enhancer<S>>,
    config: StoreConfig,
}

impl<S: Clone + Send + Sync + 'static> StoreBuilder<S> {
    /// An empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            reducer: None,
            preloaded_state: None,
            enhancers: Vec::new(),
            config: StoreConfig::default(),
        }
    }

    /// Set the transition function. Required.
    pub fn reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(Option<S>, &Action) -> S + Send + Sync + 'static,
    {
        self.reducer = Some(Arc::new(reducer));
        self
    }

    /// State the store holds until the first dispatch.
    pub fn preloaded_state(mut self, state: S) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    /// Set the enhancer. Only one is accepted; compose several into one first.
    pub fn enhancer(mut self, enhancer: Enhancer<S>) -> Self {
        self.enhancers.push(enhancer);
        self
    }

    /// Replace the default [`StoreConfig`].
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Create the store.
    ///
    /// With an enhancer, construction is handed over entirely: the enhancer
    /// gets the plain store factory and its result builds the store. The
    /// reducer is never called here.
    pub fn build(mut self) -> Result<Store<S>, StoreError> {
        let reducer = self.reducer.ok_or(StoreError::InvalidTransitionFunction)?;
        if self.enhancers.len() > 1 {
            return Err(StoreError::InvalidEnhancer {
                reason: format!(
                    "{} enhancers given, compose them into a single enhancer",
                    self.enhancers.len()
                ),
            });
        }
        if self.config.max_dispatch_depth == Some(0) {
            return Err(StoreError::InvalidConfig {
                reason: "max_dispatch_depth must be at least 1".to_string(),
            });
        }

        let create = base_factory(self.config);
        match self.enhancers.pop() {
            Some(enhancer) => enhancer(create)(reducer, self.preloaded_state),
            None => create(reducer, self.preloaded_state),
        }
    }
}

impl<S: Clone + Send + Sync + 'static> Default for StoreBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// The plain store constructor, as a value an enhancer can call.
fn base_factory<S: Clone + Send + Sync + 'static>(config: StoreConfig) -> StoreFactory<S> {
    Arc::new(
        move |reducer: Reducer<S>, preloaded_state: Option<S>| -> Result<Store<S>, StoreError> {
            Ok(Store::with_config(reducer, preloaded_state, config.clone()))
        },
    )
}

/// Create a store, handing construction to `enhancer` when one is given.
///
/// ```
/// use rudder::{create_store, Action};
///
/// let store = create_store(
///     |count: Option<i32>, action: &Action| {
///         let count = count.unwrap_or(0);
///         if action.is("INC") { count + 1 } else { count }
///     },
///     None,
///     None,
/// )
/// .unwrap();
///
/// for _ in 0..3 {
///     store.dispatch(Action::new("INC")).unwrap();
/// }
/// assert_eq!(store.get_state(), Some(3));
/// ```
pub fn create_store<S, R>(
    reducer: R,
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S>>,
) -> Result<Store<S>, StoreError>
where
    S: Clone + Send + Sync + 'static,
    R: Fn(Option<S>, &Action) -> S + Send + Sync + 'static,
{
    let mut builder = StoreBuilder::new().reducer(reducer);
    if let Some(state) = preloaded_state {
        builder = builder.preloaded_state(state);
    }
    if let Some(enhancer) = enhancer {
        builder = builder.enhancer(enhancer);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use parking_lot::Mutex;

    fn counter(state: Option<i64>, action: &Action) -> i64 {
        let state = state.unwrap_or(0);
        if action.is("INC") {
            state + 1
        } else {
            state
        }
    }

    /// Logs each factory call with the preloaded state it saw.
    fn spy(log: Arc<Mutex<Vec<String>>>, name: &'static str) -> Enhancer<i64> {
        Box::new(move |create: StoreFactory<i64>| -> StoreFactory<i64> {
            let log = log.clone();
            Arc::new(move |reducer: Reducer<i64>, preloaded: Option<i64>| {
                log.lock().push(format!("{name}:{preloaded:?}"));
                create(reducer, preloaded)
            })
        })
    }

    #[test]
    fn missing_reducer_is_rejected() {
        let result = StoreBuilder::<i64>::new().preloaded_state(1).build();
        assert!(matches!(result, Err(StoreError::InvalidTransitionFunction)));
    }

    #[test]
    fn several_enhancers_are_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let result = StoreBuilder::new()
            .reducer(counter)
            .enhancer(spy(log.clone(), "a"))
            .enhancer(spy(log.clone(), "b"))
            .build();
        assert!(matches!(result, Err(StoreError::InvalidEnhancer { .. })));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn zero_dispatch_depth_is_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let result = StoreBuilder::new()
            .reducer(counter)
            .config(StoreConfig {
                max_dispatch_depth: Some(0),
                ..StoreConfig::default()
            })
            .enhancer(spy(log.clone(), "spy"))
            .build();
        assert!(matches!(result, Err(StoreError::InvalidConfig { .. })));
        assert!(log.lock().is_empty());

        let store = StoreBuilder::new()
            .reducer(counter)
            .config(StoreConfig {
                max_dispatch_depth: Some(1),
                ..StoreConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(store.dispatch(Action::new("INC")).unwrap(), Some(1));
    }

    #[test]
    fn enhancer_receives_reducer_and_preloaded_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let store = create_store(counter, Some(4), Some(spy(log.clone(), "spy"))).unwrap();
        assert_eq!(*log.lock(), vec!["spy:Some(4)"]);
        assert_eq!(store.get_state(), Some(4));

        store.dispatch(Action::new("INC")).unwrap();
        assert_eq!(store.get_state(), Some(5));
    }

    #[test]
    fn enhancer_can_replace_construction() {
        let enhancer: Enhancer<i64> = Box::new(|_create: StoreFactory<i64>| -> StoreFactory<i64> {
            Arc::new(
                |_reducer: Reducer<i64>, _preloaded: Option<i64>| -> Result<Store<i64>, StoreError> {
                    Ok(Store::new(|_: Option<i64>, _: &Action| 100, Some(-1)))
                },
            )
        });
        let store = create_store(counter, Some(0), Some(enhancer)).unwrap();
        assert_eq!(store.get_state(), Some(-1));
        store.dispatch(Action::new("INC")).unwrap();
        assert_eq!(store.get_state(), Some(100));
    }

    #[test]
    fn composed_enhancers_run_outermost_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let enhancer =
            compose([spy(log.clone(), "outer"), spy(log.clone(), "inner")]).into_transform();
        let _store = create_store(counter, None, Some(enhancer)).unwrap();
        assert_eq!(*log.lock(), vec!["outer:None", "inner:None"]);
    }

    #[test]
    fn base_factory_keeps_builder_config() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let store = StoreBuilder::new()
            .reducer(counter)
            .config(StoreConfig {
                kind_field: "kind".into(),
                ..StoreConfig::default()
            })
            .enhancer(spy(log, "spy"))
            .build()
            .unwrap();

        assert!(store.dispatch(Action::new("INC")).is_err());
        store.dispatch(serde_json::json!({ "kind": "INC" })).unwrap();
        assert_eq!(store.get_state(), Some(1));
    }
}
