use std::fmt::Debug;

use super::Middleware;

/// Log every signal on its way in and the state it produced.
///
/// Signals are logged at info level before the rest of the chain sees them,
/// so signals a later middleware drops still show up. Failures are returned
/// untouched and not logged.
pub fn logger<S>() -> Middleware<S>
where
    S: Clone + Debug + Send + Sync + 'static,
{
    Middleware::from_fn(|_api, next, signal| {
        tracing::info!(%signal, "dispatching");
        let result = next(signal);
        match &result {
            Ok(Some(state)) => tracing::debug!(?state, "next state"),
            Ok(None) => tracing::debug!("signal absorbed by middleware"),
            Err(_) => {}
        }
        result
    })
}
