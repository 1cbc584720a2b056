//! Request binding: string pairs to `QueryParameters`.
//!
//! Keys match a field's parameter key, property name, or display name,
//! ignoring ASCII case. The first value bound to a field wins. Empty values
//! bind as absent.

use deal_query_domain::{QueryField, QueryParameters};
use std::collections::BTreeSet;
use tracing::debug;

/// Result of binding request pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOutcome {
    /// Bound model.
    pub parameters: QueryParameters,
    /// Keys that matched no field or repeated an already bound field, in
    /// arrival order.
    pub ignored_keys: Vec<String>,
}

/// Bind `(key, value)` pairs onto a fresh `QueryParameters`.
pub fn bind_query_parameters<I, K, V>(pairs: I) -> BindOutcome
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut outcome = BindOutcome::default();
    let mut bound = BTreeSet::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        let Some(field) = QueryField::lookup(key) else {
            debug!(key, "ignoring unknown query key");
            outcome.ignored_keys.push(key.to_owned());
            continue;
        };
        if !bound.insert(field) {
            debug!(key, %field, "ignoring repeated query key");
            outcome.ignored_keys.push(key.to_owned());
            continue;
        }

        let value = value.as_ref();
        let value = (!value.is_empty()).then(|| value.to_owned());
        outcome.parameters.set(field, value);
    }

    outcome
}

/// Parse an `application/x-www-form-urlencoded` query (leading `?`
/// tolerated) and bind it.
#[must_use]
pub fn bind_query_string(query: &str) -> BindOutcome {
    let query = query.strip_prefix('?').unwrap_or(query);
    bind_query_parameters(url::form_urlencoded::parse(query.as_bytes()))
}
