//! Bearer token extraction from login responses
//!
//! Target services disagree on where the token lives, so extraction walks an
//! ordered list of strategies and takes the first one that yields a value.

use serde_json::Value;

/// One place a token may be found in a login response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStrategy {
    /// Top-level string field
    Field(&'static str),
    /// String field inside a top-level object field
    Nested(&'static str, &'static str),
    /// The whole response body
    WholeBody,
}

/// Extraction order for `ApiClient::authenticate`
pub const TOKEN_STRATEGIES: &[TokenStrategy] = &[
    TokenStrategy::Field("token"),
    TokenStrategy::Field("access_token"),
    TokenStrategy::Field("data"),
    TokenStrategy::Nested("data", "token"),
    TokenStrategy::Nested("data", "access_token"),
    TokenStrategy::WholeBody,
];

impl TokenStrategy {
    /// Apply this strategy to a response body
    pub fn extract(&self, body: &Value) -> Option<String> {
        match self {
            TokenStrategy::Field(name) => non_empty_str(body.get(name)),
            TokenStrategy::Nested(outer, inner) => {
                non_empty_str(body.get(outer).and_then(|v| v.get(inner)))
            }
            TokenStrategy::WholeBody => match body {
                Value::Null => None,
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Run the strategies in order and return the first token found
pub fn extract_token(body: &Value, strategies: &[TokenStrategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy.extract(body))
}
