//! # Rudder
//!
//! A minimal unidirectional state container for Rust.
//!
//! All state lives in one [`Store`]. It changes only when a signal is
//! dispatched: the signal goes through any middleware, then through the
//! store's reducer, and every subscribed listener is told before `dispatch`
//! returns. Everything is synchronous.
//!
//! ## Store
//!
//! - [`create_store`] / [`StoreBuilder`] - construction, optionally handed to an
//!   enhancer
//! - [`Store::dispatch`] - validate a signal, run the reducer, notify
//! - [`Store::subscribe`] - ordered change listeners, removable through their
//!   [`Subscription`]
//!
//! ## Signals
//!
//! Signals are plain JSON records carrying a kind field (`"type"` by default).
//! [`Action`] is the validated form reducers receive; typed signals
//! round-trip through serde.
//!
//! ## Middleware
//!
//! - [`apply_middleware`] - an enhancer wrapping dispatch in a middleware chain
//! - [`compose`](compose::compose) - the right-to-left composer behind it

pub mod action;
pub mod compose;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store;

// Re-export main types for convenience
pub use action::{is_plain_record, Action};
pub use config::StoreConfig;
pub use error::StoreError;
pub use middleware::{apply_middleware, Middleware, MiddlewareApi};
pub use store::{
    create_store, Dispatch, DispatchResult, Enhancer, Store, StoreBuilder, Subscription,
};
