//! Right-to-left function composition.
//!
//! The composer is generic: the middleware harness composes dispatch layers
//! with it, and several enhancers can be composed into one the same way.

mod pipeline;

pub use pipeline::{compose, Pipeline, Transform};
