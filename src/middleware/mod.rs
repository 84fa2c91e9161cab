//! Dispatch middleware and the enhancer that installs it.
//!
//! Middleware sit between [`Store::dispatch`](crate::Store::dispatch) and the
//! reducer. Each one sees a signal first and may rewrite it, or stop it by not
//! calling `next`. [`apply_middleware`] composes them right-to-left
//! around the store's native dispatch so the first one listed runs first.

mod logger;
mod middleware;

pub use logger::logger;
pub use middleware::{apply_middleware, DispatchLayer, Middleware, MiddlewareApi};
