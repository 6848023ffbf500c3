use std::fmt;

/// What the caller was trying to do when a member failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Map,
    RetrieveCallAmount,
    RetrieveArguments,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Map => "map",
            Action::RetrieveCallAmount => "retrieve call amount for",
            Action::RetrieveArguments => "retrieve received arguments for",
        })
    }
}

/// Rejected proxy or call map configuration. Always raised eagerly, never
/// at call time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Trying to {action} method {display}, but it does not exist. Probably a typo?")]
    UnknownMember {
        action: Action,
        member: String,
        display: String,
    },

    #[error("Trying to {action} method {display}, but it is not applicable for mapping.")]
    NotApplicable {
        action: Action,
        member: String,
        display: String,
    },

    #[error("Can not create mapping proxy for final class {0}")]
    FinalClass(String),

    #[error("Invalid invocation #0 mapped for {display}, invocations are counted from 1")]
    ZeroInvocation { member: String, display: String },

    #[error("Invocation #{invocation} for {display} is mapped more than once")]
    OverlappingInvocation {
        member: String,
        display: String,
        invocation: usize,
    },

    #[error("Sequence mapped for {display} contains another sequence")]
    NestedSequence { member: String, display: String },

    #[error("Sequence mapped for {display} at invocation #{start} runs past the last representable invocation")]
    InvocationOverflow {
        member: String,
        display: String,
        start: usize,
    },
}

impl ConfigError {
    /// Name of the member the error refers to, if any.
    pub fn member(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownMember { member, .. }
            | ConfigError::NotApplicable { member, .. }
            | ConfigError::ZeroInvocation { member, .. }
            | ConfigError::OverlappingInvocation { member, .. }
            | ConfigError::NestedSequence { member, .. }
            | ConfigError::InvocationOverflow { member, .. } => Some(member),
            ConfigError::FinalClass(_) => None,
        }
    }
}
