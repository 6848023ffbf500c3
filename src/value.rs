//! Values flowing in and out of intercepted calls.
//!
//! Arguments and results are dynamic [`serde_json::Value`]s so that the
//! engine stays agnostic of the substituted member's concrete signature.
//! `Value::Null` is the absence token handed back for void and optional
//! members.

use serde::{Deserialize, Serialize};

pub use serde_json::Value;

/// Returned for unmapped calls to members without a usable result.
pub const ABSENT: Value = Value::Null;

const DEFAULT_FAILURE_KIND: &str = "Failure";

/// A failure raised on purpose, either by a `Raises` program, a delegate,
/// or the original implementation.
///
/// The engine never rewrites a failure: `kind` and `message` reach the
/// caller exactly as they were configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    #[serde(default = "default_failure_kind")]
    pub kind: String,
    pub message: String,
}

fn default_failure_kind() -> String {
    DEFAULT_FAILURE_KIND.to_string()
}

impl Failure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// A failure of the generic `Failure` kind.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(DEFAULT_FAILURE_KIND, message)
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// What an intercepted call hands back to the generated substitute.
#[derive(Debug, Clone, PartialEq)]
pub enum Returned {
    Value(Value),
    /// The substitute must return itself (fluent interfaces).
    Proxy,
}

impl Returned {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Returned::Value(value) => Some(value),
            Returned::Proxy => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Returned::Value(value) => Some(value),
            Returned::Proxy => None,
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, Returned::Proxy)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Returned::Value(Value::Null))
    }
}

impl From<Value> for Returned {
    fn from(value: Value) -> Self {
        Returned::Value(value)
    }
}
