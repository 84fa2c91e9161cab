use thiserror::Error;

/// Boxed error returned by fallible middleware factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by store construction and dispatch.
///
/// Every variant is a misuse of the API. Nothing here is retried or logged;
/// the failing operation is aborted and the error handed straight back.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a store needs a transition function")]
    InvalidTransitionFunction,

    #[error("invalid enhancer: {reason}")]
    InvalidEnhancer { reason: String },

    #[error("invalid store configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("signal must be a plain record, got {found}")]
    InvalidSignalShape { found: &'static str },

    #[error("signal is missing its \"{field}\" field")]
    MissingSignalKind { field: String },

    #[error("middleware #{index} could not be attached: {source}")]
    InvalidMiddleware {
        index: usize,
        #[source]
        source: BoxError,
    },

    #[error("dispatch nested deeper than {limit} levels")]
    DispatchDepthExceeded { limit: usize },

    #[error("signal could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
