//! Proxies standing in for free functions.

use crate::call_map::{CallMapSpec, Mapping};
use crate::error::ConfigError;
use crate::metadata::{MemberInfo, TargetSignature};
use crate::original::OriginalImpl;
use crate::program::Behavior;
use crate::proxy::{Proxy, ReceivedArguments};
use crate::value::{Failure, Returned, Value, ABSENT};
use crate::CallMapError;
use std::rc::Rc;

/// A substitute for a single function. The function itself is the only
/// member of the underlying proxy.
#[derive(Debug)]
pub struct FunctionProxy {
    name: String,
    proxy: Proxy,
}

impl FunctionProxy {
    /// Substitute whose unmapped calls run `original`.
    pub fn of<F>(function: MemberInfo, original: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + 'static,
    {
        let name = function.name.clone();
        let original = OriginalImpl::new().with(name.clone(), original);
        let target = TargetSignature::function(function);
        Self {
            name,
            proxy: Proxy::with_metadata(Rc::new(target), Some(Rc::new(original))),
        }
    }

    /// Substitute that never runs any original; unmapped calls return the
    /// absence token.
    pub fn stub(function: MemberInfo) -> Self {
        let name = function.name.clone();
        let mut proxy = Proxy::with_metadata(Rc::new(TargetSignature::function(function)), None);
        proxy.prevent_parent_calls();
        Self { name, proxy }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maps every call of the function to `mapping`.
    pub fn returns(&mut self, mapping: impl Into<Mapping>) -> Result<&mut Self, ConfigError> {
        let spec = CallMapSpec::new().map(self.name.clone(), mapping);
        self.proxy.map_calls(&spec)?;
        Ok(self)
    }

    pub fn throws(&mut self, failure: Failure) -> Result<&mut Self, ConfigError> {
        self.returns(Behavior::Raises(failure))
    }

    pub fn prevent_parent_calls(&mut self) -> &mut Self {
        self.proxy.prevent_parent_calls();
        self
    }

    pub fn call(&mut self, args: &[Value]) -> Result<Value, Failure> {
        let name = self.name.clone();
        match self.proxy.on_intercepted(&name, args, false)? {
            Returned::Value(value) => Ok(value),
            Returned::Proxy => Ok(ABSENT),
        }
    }

    pub fn calls_received(&self) -> usize {
        self.proxy.ledger().count_for(&self.name)
    }

    pub fn arguments_received(&self, invocation: usize) -> Result<ReceivedArguments, CallMapError> {
        self.proxy.arguments_received_for(&self.name, invocation)
    }

    pub fn proxy(&self) -> &Proxy {
        &self.proxy
    }
}
