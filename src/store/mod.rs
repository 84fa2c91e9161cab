//! The state container and its construction protocol.
//!
//! A [`Store`] owns one state value and an ordered list of listeners. State
//! only changes through [`Store::dispatch`], which runs the reducer and then
//! notifies every listener before returning. Construction goes through
//! [`create_store`] or [`StoreBuilder`], which can hand the whole process to an
//! enhancer such as the one [`apply_middleware`](crate::apply_middleware)
//! returns.

mod builder;
mod store;

pub use builder::{create_store, Enhancer, StoreBuilder, StoreFactory};
pub use store::{Dispatch, DispatchResult, Listener, Reducer, Store, Subscription};
