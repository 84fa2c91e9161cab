//! Signals and their shape validation.
//!
//! A signal is dispatched as a raw [`serde_json::Value`]. Before it reaches a
//! transition function it must be a plain record that carries the store's
//! kind field; it is then wrapped as an [`Action`].

mod action;
mod shape;

pub use action::Action;
pub use shape::is_plain_record;
pub(crate) use shape::validate;
