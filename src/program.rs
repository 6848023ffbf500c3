//! Behavior programs: what a mapped member does when it is called.

use crate::value::{Failure, Value};
use std::fmt;
use std::rc::Rc;

/// A function standing in for a member, or for the original implementation.
pub type Delegate = Rc<dyn Fn(&[Value]) -> Result<Value, Failure>>;

/// Declarative description of how a call should be answered.
///
/// `Sequence` only exists at configuration time. Building a
/// [`CallMap`](crate::call_map::CallMap) expands it into one indexed entry
/// per element, so that a call past the end of the sequence finds no entry
/// and falls back.
#[derive(Clone)]
pub enum Behavior {
    FixedValue(Value),
    Sequence(Vec<Behavior>),
    Raises(Failure),
    Delegate(Delegate),
}

impl Behavior {
    pub fn value(value: impl Into<Value>) -> Self {
        Behavior::FixedValue(value.into())
    }

    pub fn sequence<I, B>(items: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Behavior>,
    {
        Behavior::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn raises(failure: Failure) -> Self {
        Behavior::Raises(failure)
    }

    pub fn delegate<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + 'static,
    {
        Behavior::Delegate(Rc::new(f))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Behavior::Sequence(_))
    }

    /// Converts a non-sequence behavior into its executable form.
    pub(crate) fn to_program(&self) -> Option<Program> {
        match self {
            Behavior::FixedValue(value) => Some(Program::Return(value.clone())),
            Behavior::Raises(failure) => Some(Program::Raise(failure.clone())),
            Behavior::Delegate(f) => Some(Program::Delegate(Rc::clone(f))),
            Behavior::Sequence(_) => None,
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::FixedValue(value) => f.debug_tuple("FixedValue").field(value).finish(),
            Behavior::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Behavior::Raises(failure) => f.debug_tuple("Raises").field(failure).finish(),
            Behavior::Delegate(_) => f.write_str("Delegate(..)"),
        }
    }
}

impl From<Value> for Behavior {
    fn from(value: Value) -> Self {
        Behavior::FixedValue(value)
    }
}

impl From<Failure> for Behavior {
    fn from(failure: Failure) -> Self {
        Behavior::Raises(failure)
    }
}

/// Answers consecutive calls with the given behaviors, one per call.
pub fn on_consecutive_calls<I, B>(items: I) -> Behavior
where
    I: IntoIterator<Item = B>,
    B: Into<Behavior>,
{
    Behavior::sequence(items)
}

/// Raises `failure` when invoked.
pub fn throws(failure: Failure) -> Behavior {
    Behavior::Raises(failure)
}

/// Executable leaf stored in a call map slot.
#[derive(Clone)]
pub enum Program {
    Return(Value),
    Raise(Failure),
    Delegate(Delegate),
}

impl Program {
    pub fn execute(&self, args: &[Value]) -> Result<Value, Failure> {
        match self {
            Program::Return(value) => Ok(value.clone()),
            Program::Raise(failure) => Err(failure.clone()),
            Program::Delegate(f) => f(args),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Program::Return(_) => "return",
            Program::Raise(_) => "raise",
            Program::Delegate(_) => "delegate",
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Program::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Program::Raise(failure) => f.debug_tuple("Raise").field(failure).finish(),
            Program::Delegate(_) => f.write_str("Delegate(..)"),
        }
    }
}
