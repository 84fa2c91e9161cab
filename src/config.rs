use serde::Deserialize;

/// Field a signal must carry unless configured otherwise.
pub const DEFAULT_KIND_FIELD: &str = "type";

/// Store configuration.
///
/// Deserializable so applications can keep it next to the rest of their
/// settings; every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the field that identifies a signal's kind.
    pub kind_field: String,
    /// Upper bound on nested dispatches. `None` leaves re-entrancy unbounded.
    /// Must be at least 1; building a store with `Some(0)` fails.
    pub max_dispatch_depth: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind_field: DEFAULT_KIND_FIELD.to_string(),
            max_dispatch_depth: None,
        }
    }
}
