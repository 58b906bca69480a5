//! String-keyed records with opaque values.

use std::collections::HashMap;

pub use serde_json::Value;

/// A flat, string-keyed record.
///
/// Records serve as both the pipeline's input and every stage's output.
/// Values are opaque to the engine: they are carried, renamed, and dropped,
/// but never inspected. The host builds a fresh record per invocation; the
/// engine never mutates it in place; every transformation starts from a
/// defensive copy.
pub type Record = HashMap<String, Value>;
