use indexmap::IndexMap;

/// Durations (ms) per operation name, in log order.
///
/// Names keep the order in which they first appeared in the log.
pub type OperationLog = IndexMap<String, Vec<f64>>;
