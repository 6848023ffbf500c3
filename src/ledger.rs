//! Per-proxy call history.

use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raised when a history query asks for a call that never happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing invocation #{invocation} for {member}, was {}.", describe_calls(.received))]
pub struct MissingInvocation {
    pub invocation: usize,
    /// Display name of the member.
    pub member: String,
    pub received: usize,
}

impl MissingInvocation {
    pub fn with_display_name(mut self, display: impl Into<String>) -> Self {
        self.member = display.into();
        self
    }
}

fn describe_calls(received: &usize) -> String {
    match *received {
        0 => "never called".to_string(),
        1 => "only called once".to_string(),
        n => format!("only called {} times", n),
    }
}

/// Append-only record of the arguments each member was called with.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvocationLedger {
    calls: BTreeMap<String, Vec<Vec<Value>>>,
}

impl InvocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a call and returns its 1-based invocation index.
    pub fn record(&mut self, member: &str, args: Vec<Value>) -> usize {
        let history = self.calls.entry(member.to_string()).or_default();
        history.push(args);
        history.len()
    }

    pub fn count_for(&self, member: &str) -> usize {
        self.calls.get(member).map_or(0, Vec::len)
    }

    pub fn arguments_for(
        &self,
        member: &str,
        invocation: usize,
    ) -> Result<&[Value], MissingInvocation> {
        invocation
            .checked_sub(1)
            .and_then(|slot| self.calls.get(member)?.get(slot))
            .map(Vec::as_slice)
            .ok_or_else(|| MissingInvocation {
                invocation,
                member: member.to_string(),
                received: self.count_for(member),
            })
    }

    pub fn history_for(&self, member: &str) -> &[Vec<Value>] {
        self.calls.get(member).map_or(&[][..], Vec::as_slice)
    }

    /// Members that received at least one call, in name order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.calls.keys().map(String::as_str)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
