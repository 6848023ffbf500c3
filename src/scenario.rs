//! TOML scenarios: a target, its call map and a script of calls to replay.
//!
//! ```toml
//! [target]
//! name = "Greeter"
//! members = [{ name = "greet", params = ["name"] }]
//!
//! [original]
//! greet = "Hello world"
//!
//! [calls.greet]
//! sequence = ["great", "stuff"]
//!
//! [[steps]]
//! member = "greet"
//! args = ["world"]
//! expect = "great"
//! ```

use crate::call_map::{CallMapSpec, Mapping};
use crate::ledger::InvocationLedger;
use crate::logging;
use crate::metadata::{MemberInfo, TargetKind, TargetSignature};
use crate::original::OriginalImpl;
use crate::program::Behavior;
use crate::proxy::Proxy;
use crate::value::{Failure, Returned, Value};
use crate::{CallMapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    pub target: TargetSection,
    #[serde(default)]
    pub prevent_parent_calls: bool,
    /// Fixed results of the original implementation, per member
    #[serde(default)]
    pub original: BTreeMap<String, OriginalEntry>,
    #[serde(default)]
    pub calls: BTreeMap<String, CallEntry>,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
    #[serde(default)]
    pub expect_calls: Vec<CallCountExpectation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSectionKind {
    #[default]
    Class,
    Function,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TargetSection {
    pub name: String,
    #[serde(default)]
    pub kind: TargetSectionKind,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OriginalEntry {
    Raises { raises: Failure },
    Value(Value),
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CallEntry {
    pub value: Option<Value>,
    pub sequence: Option<Vec<SequenceItem>>,
    pub raises: Option<Failure>,
    /// Entries keyed by 1-based invocation index
    pub indexed: Option<BTreeMap<String, CallEntry>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SequenceItem {
    Raises { raises: Failure },
    Value(Value),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioStep {
    pub name: Option<String>,
    pub member: String,
    #[serde(default)]
    pub args: Vec<Value>,
    pub expect: Option<Value>,
    pub expect_failure: Option<String>,
    #[serde(default)]
    pub expect_self: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CallCountExpectation {
    pub member: String,
    pub count: usize,
}

/// What a step actually produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Observed {
    Returned { value: Value },
    Proxy,
    Raised { kind: String, message: String },
}

impl Observed {
    fn from_result(result: std::result::Result<Returned, Failure>) -> Self {
        match result {
            Ok(Returned::Value(value)) => Observed::Returned { value },
            Ok(Returned::Proxy) => Observed::Proxy,
            Err(failure) => Observed::Raised {
                kind: failure.kind,
                message: failure.message,
            },
        }
    }
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Returned { value } => write!(f, "returned {}", value),
            Observed::Proxy => f.write_str("returned the proxy itself"),
            Observed::Raised { kind, message } => write!(f, "raised {}: {}", kind, message),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub label: String,
    pub member: String,
    pub args: Vec<Value>,
    pub observed: Observed,
    pub passed: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallCountReport {
    pub member: String,
    pub expected: usize,
    pub actual: Option<usize>,
    pub passed: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub target: String,
    pub steps: Vec<StepReport>,
    pub call_counts: Vec<CallCountReport>,
    pub ledger: InvocationLedger,
    pub passed: bool,
}

impl ScenarioReport {
    pub fn passed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.passed).count()
    }
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let deserializer = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(deserializer).map_err(|e| {
            CallMapError::Scenario(format!(
                "Failed to parse scenario TOML at `{}`: {}",
                e.path(),
                e.inner()
            ))
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        logging::log_loading_scenario(&path.to_string_lossy());
        let content = fs::read_to_string(path).map_err(|e| {
            CallMapError::FileError(format!("Failed to read scenario file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn target_signature(&self) -> TargetSignature {
        let section = &self.target;
        match section.kind {
            TargetSectionKind::Class => TargetSignature::from_parts(
                TargetKind::Class {
                    name: section.name.clone(),
                    is_final: section.is_final,
                },
                section.members.clone(),
            ),
            TargetSectionKind::Function => {
                let function = section
                    .members
                    .iter()
                    .find(|m| m.name == section.name)
                    .cloned()
                    .unwrap_or_else(|| MemberInfo::new(section.name.clone()));
                TargetSignature::function(function)
            }
        }
    }

    pub fn original_impl(&self) -> OriginalImpl {
        self.original
            .iter()
            .fold(OriginalImpl::new(), |original, (member, entry)| match entry {
                OriginalEntry::Value(value) => original.with_value(member.clone(), value.clone()),
                OriginalEntry::Raises { raises } => {
                    let failure = raises.clone();
                    original.with(member.clone(), move |_| Err(failure.clone()))
                }
            })
    }

    pub fn call_map_spec(&self) -> Result<CallMapSpec> {
        self.calls
            .iter()
            .try_fold(CallMapSpec::new(), |spec, (member, entry)| -> Result<CallMapSpec> {
                Ok(spec.map(member.clone(), entry.to_mapping(member)?))
            })
    }

    /// Creates the proxy described by the scenario and installs its call map.
    pub fn build_proxy(&self, prevent_parent_calls: bool) -> Result<Proxy> {
        let mut proxy = Proxy::of(self.target_signature(), self.original_impl())?;
        if prevent_parent_calls || self.prevent_parent_calls {
            proxy.prevent_parent_calls();
        }
        let spec = self.call_map_spec()?;
        proxy.map_calls(&spec)?;
        Ok(proxy)
    }

    /// Replays every step, stopping at the first one that fails.
    pub fn run(&self, prevent_parent_calls: bool) -> Result<ScenarioReport> {
        let mut proxy = self.build_proxy(prevent_parent_calls)?;
        logging::log_scenario_start(&self.target.name, self.steps.len());

        let mut steps = Vec::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            let observed = Observed::from_result(proxy.invoke(&step.member, &step.args));
            let detail = step.check(&observed);
            let passed = detail.is_none();
            if let Some(reason) = &detail {
                logging::log_step_failed(i + 1, &step.member, reason);
            }
            steps.push(StepReport {
                index: i + 1,
                label: step.name.clone().unwrap_or_else(|| step.member.clone()),
                member: step.member.clone(),
                args: step.args.clone(),
                observed,
                passed,
                detail,
            });
            if !passed {
                break;
            }
        }

        let call_counts: Vec<CallCountReport> = self
            .expect_calls
            .iter()
            .map(|expectation| expectation.check(&proxy))
            .collect();

        let passed = steps.len() == self.steps.len()
            && steps.iter().all(|s| s.passed)
            && call_counts.iter().all(|c| c.passed);
        let report = ScenarioReport {
            target: self.target.name.clone(),
            steps,
            call_counts,
            ledger: proxy.ledger().clone(),
            passed,
        };
        logging::log_scenario_complete(report.passed_steps(), self.steps.len());
        Ok(report)
    }
}

impl CallEntry {
    fn to_mapping(&self, member: &str) -> Result<Mapping> {
        if let Some(indexed) = &self.indexed {
            self.ensure_single(member)?;
            let entries = indexed
                .iter()
                .map(|(key, entry)| -> Result<(usize, Behavior)> {
                    let invocation = key.trim().parse::<usize>().map_err(|_| {
                        CallMapError::Scenario(format!(
                            "Invalid invocation index '{}' for {}",
                            key, member
                        ))
                    })?;
                    Ok((invocation, entry.to_behavior(member)?))
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(Mapping::indexed(entries));
        }
        Ok(Mapping::Uniform(self.to_behavior(member)?))
    }

    fn to_behavior(&self, member: &str) -> Result<Behavior> {
        self.ensure_single(member)?;
        if let Some(value) = &self.value {
            return Ok(Behavior::FixedValue(value.clone()));
        }
        if let Some(items) = &self.sequence {
            return Ok(Behavior::sequence(items.iter().map(SequenceItem::to_behavior)));
        }
        if let Some(failure) = &self.raises {
            return Ok(Behavior::Raises(failure.clone()));
        }
        Err(CallMapError::Scenario(format!(
            "Call entry for {} needs one of `value`, `sequence`, `raises` or `indexed` \
             (nested `indexed` is not supported)",
            member
        )))
    }

    fn ensure_single(&self, member: &str) -> Result<()> {
        let set = [
            self.value.is_some(),
            self.sequence.is_some(),
            self.raises.is_some(),
            self.indexed.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if set > 1 {
            return Err(CallMapError::Scenario(format!(
                "Call entry for {} sets more than one of `value`, `sequence`, `raises`, `indexed`",
                member
            )));
        }
        Ok(())
    }
}

impl SequenceItem {
    fn to_behavior(&self) -> Behavior {
        match self {
            SequenceItem::Raises { raises } => Behavior::Raises(raises.clone()),
            SequenceItem::Value(value) => Behavior::FixedValue(value.clone()),
        }
    }
}

impl ScenarioStep {
    /// Returns why the step failed, if it did.
    fn check(&self, observed: &Observed) -> Option<String> {
        if let Some(expected) = &self.expect_failure {
            return match observed {
                Observed::Raised { message, .. } if message == expected => None,
                other => Some(format!("expected failure '{}', {}", expected, other)),
            };
        }
        if self.expect_self {
            return match observed {
                Observed::Proxy => None,
                other => Some(format!("expected the proxy itself, {}", other)),
            };
        }
        match (observed, &self.expect) {
            (Observed::Raised { .. }, _) => Some(format!("unexpectedly {}", observed)),
            (Observed::Returned { value }, Some(expected)) if value != expected => {
                Some(format!("expected {}, {}", expected, observed))
            }
            (Observed::Proxy, Some(expected)) => {
                Some(format!("expected {}, {}", expected, observed))
            }
            _ => None,
        }
    }
}

impl CallCountExpectation {
    fn check(&self, proxy: &Proxy) -> CallCountReport {
        match proxy.calls_received_for(&self.member) {
            Ok(actual) => CallCountReport {
                member: self.member.clone(),
                expected: self.count,
                actual: Some(actual),
                passed: actual == self.count,
                detail: (actual != self.count).then(|| {
                    format!(
                        "expected {} calls to {}, received {}",
                        self.count,
                        proxy.metadata().display_name(&self.member),
                        actual
                    )
                }),
            },
            Err(e) => CallCountReport {
                member: self.member.clone(),
                expected: self.count,
                actual: None,
                passed: false,
                detail: Some(e.to_string()),
            },
        }
    }
}
