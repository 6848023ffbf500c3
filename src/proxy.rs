//! Proxy instances: call map, invocation ledger and dispatcher in one place.
//!
//! A substitute generator keeps one [`Proxy`] per generated instance and
//! forwards every overridden member to [`Proxy::on_intercepted`]. Each
//! proxy owns its ledger and call map; two proxies built for the same
//! target never share history.

use crate::call_map::{CallMap, CallMapSpec};
use crate::error::{Action, ConfigError};
use crate::fallback::FallbackPolicy;
use crate::ledger::InvocationLedger;
use crate::logging;
use crate::metadata::{validate_member, MemberMetadata, TargetSignature};
use crate::original::OriginalInvoker;
use crate::value::{Failure, Returned, Value};
use crate::CallMapError;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Arguments of one recorded call, with the declared parameter names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivedArguments {
    pub arguments: Vec<Value>,
    pub names: Vec<String>,
}

impl ReceivedArguments {
    /// Pairs each argument with its parameter name. Arguments beyond the
    /// declared parameter list (variadics) have no name.
    pub fn named(&self) -> Vec<(Option<&str>, &Value)> {
        self.arguments
            .iter()
            .enumerate()
            .map(|(i, value)| (self.names.get(i).map(String::as_str), value))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let position = self.names.iter().position(|n| n == name)?;
        self.arguments.get(position)
    }
}

pub struct Proxy {
    metadata: Rc<dyn MemberMetadata>,
    original: Option<Rc<dyn OriginalInvoker>>,
    call_map: Option<CallMap>,
    ledger: InvocationLedger,
    parent_calls_allowed: bool,
}

impl Proxy {
    /// Proxy for `target` whose unmapped calls reach `original`.
    pub fn of<O>(target: TargetSignature, original: O) -> Result<Self, ConfigError>
    where
        O: OriginalInvoker + 'static,
    {
        ensure_not_final(&target)?;
        Ok(Self::with_metadata(Rc::new(target), Some(Rc::new(original))))
    }

    /// Proxy without any original implementation. Unmapped calls return
    /// the proxy itself for fluent members and the absence token otherwise.
    pub fn stub(target: TargetSignature) -> Result<Self, ConfigError> {
        ensure_not_final(&target)?;
        let mut proxy = Self::with_metadata(Rc::new(target), None);
        proxy.prevent_parent_calls();
        Ok(proxy)
    }

    /// Low level constructor for generators that bring their own metadata.
    pub fn with_metadata(
        metadata: Rc<dyn MemberMetadata>,
        original: Option<Rc<dyn OriginalInvoker>>,
    ) -> Self {
        Self {
            metadata,
            original,
            call_map: None,
            ledger: InvocationLedger::new(),
            parent_calls_allowed: true,
        }
    }

    /// Stops unmapped calls from reaching the original implementation.
    /// Calls already recorded are unaffected.
    pub fn prevent_parent_calls(&mut self) -> &mut Self {
        self.parent_calls_allowed = false;
        self
    }

    pub fn parent_calls_allowed(&self) -> bool {
        self.parent_calls_allowed
    }

    /// Installs a call map. On error the previous call map stays in place.
    pub fn map_calls(&mut self, spec: &CallMapSpec) -> Result<&mut Self, ConfigError> {
        let call_map = CallMap::build(spec, self.metadata.as_ref())?;
        self.call_map = Some(call_map);
        Ok(self)
    }

    pub fn call_map(&self) -> Option<&CallMap> {
        self.call_map.as_ref()
    }

    pub fn ledger(&self) -> &InvocationLedger {
        &self.ledger
    }

    pub fn metadata(&self) -> &dyn MemberMetadata {
        self.metadata.as_ref()
    }

    /// Entry point for every intercepted call.
    ///
    /// The call is recorded before anything else, so a call that raises is
    /// still counted. `self_fallback_allowed` must be true only for members
    /// whose declared result is the host type.
    pub fn on_intercepted(
        &mut self,
        member: &str,
        args: &[Value],
        self_fallback_allowed: bool,
    ) -> Result<Returned, Failure> {
        let invocation = self.ledger.record(member, args.to_vec());
        logging::log_call_recorded(member, invocation, args.len());

        if let Some(program) = self
            .call_map
            .as_ref()
            .and_then(|map| map.program_for(member, invocation))
        {
            logging::log_program_resolved(member, invocation, program.kind());
            return program.execute(args).map(Returned::Value);
        }

        let policy = FallbackPolicy {
            parent_calls_allowed: self.parent_calls_allowed,
            metadata: self.metadata.as_ref(),
            original: self.original.as_deref(),
        };
        let step = policy.decide(member, self_fallback_allowed);
        logging::log_fallback(member, invocation, step.as_str());
        policy.resolve(step, member, args)
    }

    /// Intercepts a call, deriving the fluent flag from the member metadata.
    pub fn invoke(&mut self, member: &str, args: &[Value]) -> Result<Returned, Failure> {
        let fluent = self
            .metadata
            .member(member)
            .is_some_and(|info| info.returns_host());
        self.on_intercepted(member, args, fluent)
    }

    pub fn calls_received_for(&self, member: &str) -> Result<usize, ConfigError> {
        validate_member(self.metadata.as_ref(), member, Action::RetrieveCallAmount)?;
        Ok(self.ledger.count_for(member))
    }

    /// Arguments of the `invocation`-th call (1-based) to `member`.
    pub fn arguments_received_for(
        &self,
        member: &str,
        invocation: usize,
    ) -> Result<ReceivedArguments, CallMapError> {
        let info = validate_member(self.metadata.as_ref(), member, Action::RetrieveArguments)?;
        let arguments = self
            .ledger
            .arguments_for(member, invocation)
            .map_err(|e| e.with_display_name(self.metadata.display_name(member)))?;
        Ok(ReceivedArguments {
            arguments: arguments.to_vec(),
            names: info.params.clone(),
        })
    }

    pub fn first_arguments_received_for(
        &self,
        member: &str,
    ) -> Result<ReceivedArguments, CallMapError> {
        self.arguments_received_for(member, 1)
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("call_map", &self.call_map)
            .field("ledger", &self.ledger)
            .field("parent_calls_allowed", &self.parent_calls_allowed)
            .field("has_original", &self.original.is_some())
            .finish()
    }
}

fn ensure_not_final(target: &TargetSignature) -> Result<(), ConfigError> {
    if target.is_final() {
        return Err(ConfigError::FinalClass(target.name().to_string()));
    }
    Ok(())
}
