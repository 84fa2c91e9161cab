use std::sync::Arc;

use serde_json::Value;

use crate::compose::{compose, Transform};
use crate::error::{BoxError, StoreError};
use crate::store::{Dispatch, DispatchResult, Enhancer, Reducer, Store, StoreFactory};

/// Wraps the next dispatch in the chain and returns the wrapped dispatch.
pub type DispatchLayer<S> = Transform<Dispatch<S>>;

type Factory<S> =
    Box<dyn Fn(&MiddlewareApi<S>) -> Result<DispatchLayer<S>, BoxError> + Send + Sync>;

/// The narrowed store view a middleware is built with.
///
/// `dispatch` here is the store's dispatch from before the middleware were
/// attached. A middleware that wants the rest of the chain calls its `next`.
pub struct MiddlewareApi<S> {
    store: Store<S>,
}

impl<S: Clone + Send + Sync + 'static> MiddlewareApi<S> {
    /// Current state of the store being built.
    pub fn get_state(&self) -> Option<S> {
        self.store.get_state()
    }

    /// Dispatch through the store's own dispatch, not the middleware chain.
    pub fn dispatch(&self, signal: impl Into<Value>) -> DispatchResult<S> {
        self.store.dispatch(signal)
    }
}

impl<S> Clone for MiddlewareApi<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

/// A dispatch interceptor.
///
/// A middleware is a factory: given the [`MiddlewareApi`], it produces a
/// [`DispatchLayer`] that turns `next` into a new dispatch function.
pub struct Middleware<S> {
    factory: Factory<S>,
}

impl<S: Clone + Send + Sync + 'static> Middleware<S> {
    /// A middleware whose factory always attaches.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&MiddlewareApi<S>) -> DispatchLayer<S> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(move |api| Ok(factory(api))),
        }
    }

    /// A middleware whose factory may refuse to attach. The refusal surfaces
    /// as [`StoreError::InvalidMiddleware`] when the store is built.
    pub fn try_new<F, E>(factory: F) -> Self
    where
        F: Fn(&MiddlewareApi<S>) -> Result<DispatchLayer<S>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            factory: Box::new(move |api| factory(api).map_err(Into::into)),
        }
    }

    /// A middleware written as one function of `(api, next, signal)`.
    ///
    /// ```
    /// use rudder::{apply_middleware, create_store, Action, Middleware};
    ///
    /// let ignore_reset = Middleware::from_fn(|_api, next, signal| {
    ///     if signal["type"] == "RESET" {
    ///         return Ok(None);
    ///     }
    ///     next(signal)
    /// });
    ///
    /// let store = create_store(
    ///     |n: Option<i32>, action: &Action| if action.is("RESET") { 0 } else { n.unwrap_or(0) + 1 },
    ///     None,
    ///     Some(apply_middleware([ignore_reset])),
    /// )
    /// .unwrap();
    ///
    /// store.dispatch(Action::new("INC")).unwrap();
    /// assert_eq!(store.dispatch(Action::new("RESET")).unwrap(), None);
    /// assert_eq!(store.get_state(), Some(1));
    /// ```
    pub fn from_fn<F>(handler: F) -> Self
    where
        F: Fn(&MiddlewareApi<S>, &Dispatch<S>, Value) -> DispatchResult<S> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(move |api| {
            let api = api.clone();
            let handler = Arc::clone(&handler);
            Box::new(move |next: Dispatch<S>| -> Dispatch<S> {
                let api = api.clone();
                let handler = Arc::clone(&handler);
                Arc::new(move |signal: Value| handler(&api, &next, signal))
            })
        })
    }

    fn attach(&self, api: &MiddlewareApi<S>) -> Result<DispatchLayer<S>, BoxError> {
        (self.factory)(api)
    }
}

/// Build an enhancer that routes every dispatch through `middlewares`.
///
/// The first middleware is the outermost: it sees each signal first and its
/// `next` leads to the second one. The last `next` is the store's own
/// dispatch. State reads and subscriptions are untouched.
pub fn apply_middleware<S, I>(middlewares: I) -> Enhancer<S>
where
    S: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = Middleware<S>>,
{
    let middlewares: Arc<Vec<Middleware<S>>> = Arc::new(middlewares.into_iter().collect());
    Box::new(move |create: StoreFactory<S>| -> StoreFactory<S> {
        let middlewares = Arc::clone(&middlewares);
        Arc::new(
            move |reducer: Reducer<S>, preloaded_state: Option<S>| -> Result<Store<S>, StoreError> {
                let store = create(reducer, preloaded_state)?;
                let api = MiddlewareApi {
                    store: store.clone(),
                };

                let chain = middlewares
                    .iter()
                    .enumerate()
                    .map(|(index, middleware)| {
                        middleware
                            .attach(&api)
                            .map_err(|source| StoreError::InvalidMiddleware { index, source })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                tracing::debug!(middlewares = chain.len(), "middleware attached");

                let dispatch = compose(chain).apply(store.dispatcher());
                Ok(store.replace_dispatch(dispatch))
            },
        )
    })
}
