//! Access to the original implementation behind a proxy.

use crate::program::Delegate;
use crate::value::{Failure, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Capability to call the substituted target's own implementation.
pub trait OriginalInvoker {
    /// Whether a concrete implementation of `member` is available.
    fn implements(&self, member: &str) -> bool;

    fn invoke(&self, member: &str, args: &[Value]) -> Result<Value, Failure>;
}

/// Original implementation given as one function per member.
#[derive(Clone, Default)]
pub struct OriginalImpl {
    members: HashMap<String, Delegate>,
}

impl OriginalImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, member: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + 'static,
    {
        self.members.insert(member.into(), Rc::new(f));
        self
    }

    /// A member whose implementation always produces `value`.
    pub fn with_value(self, member: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.with(member, move |_| Ok(value.clone()))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl OriginalInvoker for OriginalImpl {
    fn implements(&self, member: &str) -> bool {
        self.members.contains_key(member)
    }

    fn invoke(&self, member: &str, args: &[Value]) -> Result<Value, Failure> {
        match self.members.get(member) {
            Some(f) => f(args),
            None => Err(Failure::new(
                "BadMethodCall",
                format!("No original implementation for {}", member),
            )),
        }
    }
}

impl fmt::Debug for OriginalImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members: Vec<&str> = self.members.keys().map(String::as_str).collect();
        members.sort_unstable();
        f.debug_struct("OriginalImpl")
            .field("members", &members)
            .finish()
    }
}
