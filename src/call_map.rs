//! The call map: which program answers which call.
//!
//! A [`CallMapSpec`] is the declarative table written by the test author.
//! [`CallMap::build`] validates every key against the target's metadata and
//! turns the table into per-member [`ProgramSlot`]s. Sequences are expanded
//! into indexed entries here, so at call time resolution is a plain lookup
//! by member name and invocation index.

use crate::error::{Action, ConfigError};
use crate::logging;
use crate::metadata::{validate_member, MemberMetadata};
use crate::program::{Behavior, Program};
use std::collections::{BTreeMap, HashMap};

/// How a single member is mapped in the declarative table.
#[derive(Debug, Clone)]
pub enum Mapping {
    /// Same behavior on every call. A `Sequence` is expanded from call 1.
    Uniform(Behavior),
    /// Behavior per 1-based invocation index. Indices not listed fall back.
    Indexed(BTreeMap<usize, Behavior>),
}

impl Mapping {
    pub fn indexed<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, Behavior)>,
    {
        Mapping::Indexed(entries.into_iter().collect())
    }
}

impl From<Behavior> for Mapping {
    fn from(behavior: Behavior) -> Self {
        Mapping::Uniform(behavior)
    }
}

/// Declarative call map table, in the order the entries were given.
#[derive(Debug, Clone, Default)]
pub struct CallMapSpec {
    entries: Vec<(String, Mapping)>,
}

impl CallMapSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `member`. A later mapping for the same member replaces the
    /// earlier one.
    pub fn map(mut self, member: impl Into<String>, mapping: impl Into<Mapping>) -> Self {
        let member = member.into();
        let mapping = mapping.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == member) {
            entry.1 = mapping;
        } else {
            self.entries.push((member, mapping));
        }
        self
    }

    pub fn entries(&self) -> &[(String, Mapping)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, M> FromIterator<(S, M)> for CallMapSpec
where
    S: Into<String>,
    M: Into<Mapping>,
{
    fn from_iter<T: IntoIterator<Item = (S, M)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(CallMapSpec::new(), |spec, (member, mapping)| {
                spec.map(member, mapping)
            })
    }
}

/// Resolved programs of one member.
#[derive(Debug, Clone)]
pub enum ProgramSlot {
    Uniform(Program),
    Indexed(BTreeMap<usize, Program>),
}

impl ProgramSlot {
    pub fn program_for(&self, invocation: usize) -> Option<&Program> {
        match self {
            ProgramSlot::Uniform(program) => Some(program),
            ProgramSlot::Indexed(table) => table.get(&invocation),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallMap {
    slots: HashMap<String, ProgramSlot>,
}

impl CallMap {
    /// Validates and compiles `spec`. Nothing is kept if any entry is invalid.
    pub fn build(spec: &CallMapSpec, metadata: &dyn MemberMetadata) -> Result<Self, ConfigError> {
        let mut slots = HashMap::with_capacity(spec.len());
        for (member, mapping) in spec.entries() {
            validate_member(metadata, member, Action::Map)?;
            let slot = compile(member, mapping, metadata)?;
            slots.insert(member.clone(), slot);
        }
        logging::log_call_map_built(slots.len());
        Ok(Self { slots })
    }

    pub fn slot(&self, member: &str) -> Option<&ProgramSlot> {
        self.slots.get(member)
    }

    pub fn program_for(&self, member: &str, invocation: usize) -> Option<&Program> {
        self.slots.get(member)?.program_for(invocation)
    }

    pub fn has_result_for(&self, member: &str, invocation: usize) -> bool {
        self.program_for(member, invocation).is_some()
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn compile(
    member: &str,
    mapping: &Mapping,
    metadata: &dyn MemberMetadata,
) -> Result<ProgramSlot, ConfigError> {
    match mapping {
        Mapping::Uniform(Behavior::Sequence(items)) => {
            let mut table = BTreeMap::new();
            expand_into(&mut table, member, 1, items, metadata)?;
            Ok(ProgramSlot::Indexed(table))
        }
        Mapping::Uniform(behavior) => behavior
            .to_program()
            .map(ProgramSlot::Uniform)
            .ok_or_else(|| nested_sequence(member, metadata)),
        Mapping::Indexed(entries) => {
            let mut table = BTreeMap::new();
            for (&invocation, behavior) in entries {
                if invocation == 0 {
                    return Err(ConfigError::ZeroInvocation {
                        member: member.to_string(),
                        display: metadata.display_name(member),
                    });
                }
                match behavior {
                    Behavior::Sequence(items) => {
                        expand_into(&mut table, member, invocation, items, metadata)?
                    }
                    other => insert(&mut table, member, invocation, other, metadata)?,
                }
            }
            Ok(ProgramSlot::Indexed(table))
        }
    }
}

fn expand_into(
    table: &mut BTreeMap<usize, Program>,
    member: &str,
    start: usize,
    items: &[Behavior],
    metadata: &dyn MemberMetadata,
) -> Result<(), ConfigError> {
    for (offset, item) in items.iter().enumerate() {
        let invocation = start
            .checked_add(offset)
            .ok_or_else(|| ConfigError::InvocationOverflow {
                member: member.to_string(),
                display: metadata.display_name(member),
                start,
            })?;
        insert(table, member, invocation, item, metadata)?;
    }
    Ok(())
}

fn insert(
    table: &mut BTreeMap<usize, Program>,
    member: &str,
    invocation: usize,
    behavior: &Behavior,
    metadata: &dyn MemberMetadata,
) -> Result<(), ConfigError> {
    let program = behavior
        .to_program()
        .ok_or_else(|| nested_sequence(member, metadata))?;
    if table.insert(invocation, program).is_some() {
        return Err(ConfigError::OverlappingInvocation {
            member: member.to_string(),
            display: metadata.display_name(member),
            invocation,
        });
    }
    Ok(())
}

fn nested_sequence(member: &str, metadata: &dyn MemberMetadata) -> ConfigError {
    ConfigError::NestedSequence {
        member: member.to_string(),
        display: metadata.display_name(member),
    }
}
