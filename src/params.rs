//! Request-parameter access.
//!
//! The engine reads request input through [`ParameterSource`], which keeps
//! two states apart that query-string handling often collapses: a parameter
//! that is absent (or explicitly null) is skipped, while a parameter present
//! with an empty string still counts as a value — an empty string filters,
//! it just coerces to `false`/`0`/`""`.

use std::collections::HashMap;

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

/// Read-only view of incoming request parameters.
pub trait ParameterSource {
    /// The raw value of a parameter, `None` when absent or null.
    fn get(&self, name: &str) -> Option<&str>;

    /// Whether the parameter is present with a non-empty value.
    fn filled(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    /// The present parameters among `names`, in the order of `names`.
    fn get_multi(&self, names: &[&str]) -> Vec<(String, String)> {
        names
            .iter()
            .filter_map(|name| {
                self.get(name)
                    .map(|value| ((*name).to_owned(), value.to_owned()))
            })
            .collect()
    }
}

impl ParameterSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        Self::get(self, name).map(String::as_str)
    }
}

/// An owned parameter bag.
///
/// Values are `Option<String>` so explicit nulls (possible in JSON filter
/// payloads) behave exactly like absent parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FilterParams {
    values: HashMap<String, Option<String>>,
}

impl FilterParams {
    /// Parse a JSON object of parameters, the `filter={"genre":"fantasy"}`
    /// convention. Null values become absent, scalar values are stringified,
    /// arrays and objects are ignored. Invalid JSON yields an empty bag.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        let parsed: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
            Ok(map) => map,
            Err(error) => {
                tracing::warn!(%error, "invalid JSON filter payload, ignoring");
                serde_json::Map::new()
            }
        };
        let values = parsed
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::Null => Some((name, None)),
                serde_json::Value::String(s) => Some((name, Some(s))),
                serde_json::Value::Bool(b) => Some((name, Some(b.to_string()))),
                serde_json::Value::Number(n) => Some((name, Some(n.to_string()))),
                _ => None,
            })
            .collect();
        Self { values }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), Some(value.into()));
    }
}

impl FromIterator<(String, String)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name, Some(value)))
                .collect(),
        }
    }
}

impl From<HashMap<String, Option<String>>> for FilterParams {
    fn from(values: HashMap<String, Option<String>>) -> Self {
        Self { values }
    }
}

impl ParameterSource for FilterParams {
    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|value| value.as_deref())
    }
}

/// Extract the full query string as a parameter bag.
impl<S> FromRequestParts<S> for FilterParams
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(map) = Query::<HashMap<String, String>>::from_request_parts(parts, state).await?;
        Ok(map.into_iter().collect())
    }
}
