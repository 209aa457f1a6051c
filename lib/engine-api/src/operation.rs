use std::any::Any;
use std::collections::HashMap;
use std::time::SystemTime;

/// Key under which the engine publishes [`ApqStats`] in the stats bag.
pub const APQ_STATS_KEY: &str = "APQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

/// The operation as the parser understood it. Absent entirely when the
/// document failed to parse.
#[derive(Debug, Clone)]
pub struct ParsedOperation {
    pub name: Option<String>,
    pub operation_type: OperationType,
}

/// A completed, already-measured interval of one request phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTiming {
    pub start: SystemTime,
    pub end: SystemTime,
}

impl PhaseTiming {
    pub fn new(start: SystemTime, end: SystemTime) -> Self {
        PhaseTiming { start, end }
    }
}

/// Automatic-persisted-query statistics, published by the engine's APQ
/// extension when the client sent a query hash.
#[derive(Debug, Clone)]
pub struct ApqStats {
    pub hash: String,
    /// Whether the full query text accompanied the hash (cache miss replay).
    pub sent_query: bool,
}

/// Computed operation cost, published by a cooperating complexity extension
/// under its own extension name.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityStats {
    pub limit: i64,
    pub calculated: i64,
}

/// String-keyed bag of per-request statistics with type-checked access.
///
/// An absent key and a value of the wrong type both read as "no stats
/// available" — never an error.
#[derive(Default)]
pub struct StatsBag {
    entries: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl StatsBag {
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Box::new(value));
    }

    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(|v| v.downcast_ref::<T>())
    }
}

impl std::fmt::Debug for StatsBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsBag")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Timings and extension statistics the engine gathered for one request.
#[derive(Debug)]
pub struct OperationStats {
    /// Wall-clock instant the engine began handling the request, when known.
    pub operation_start: Option<SystemTime>,
    pub parsing: PhaseTiming,
    pub read: PhaseTiming,
    pub validation: PhaseTiming,
    pub extensions: StatsBag,
}

/// Everything known about one client-submitted operation, owned by the
/// engine and borrowed read-only by extensions.
#[derive(Debug)]
pub struct OperationContext {
    /// Operation name as supplied in the request parameters.
    pub operation_name: Option<String>,
    pub operation: Option<ParsedOperation>,
    /// Client-supplied variable bindings, already JSON-decoded.
    pub variables: HashMap<String, serde_json::Value>,
    pub stats: OperationStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_bag_lookup_is_type_checked() {
        let mut bag = StatsBag::default();
        bag.insert(APQ_STATS_KEY, ApqStats { hash: "abc".into(), sent_query: true });

        let stats = bag.get::<ApqStats>(APQ_STATS_KEY).unwrap();
        assert_eq!(stats.hash, "abc");

        // Wrong type reads as absent, not as an error.
        assert!(bag.get::<ComplexityStats>(APQ_STATS_KEY).is_none());
        assert!(bag.get::<ApqStats>("missing").is_none());
    }

    #[test]
    fn operation_type_renders_keyword() {
        assert_eq!(OperationType::Query.to_string(), "query");
        assert_eq!(OperationType::Mutation.to_string(), "mutation");
        assert_eq!(OperationType::Subscription.to_string(), "subscription");
    }
}
