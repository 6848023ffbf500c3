//! What an intercepted call does when no mapped program applies.

use crate::metadata::MemberMetadata;
use crate::original::OriginalInvoker;
use crate::value::{Failure, Returned, Value, ABSENT};

/// The step of the fallback chain that answered a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStep {
    Original,
    Proxy,
    Absent,
}

impl FallbackStep {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackStep::Original => "original",
            FallbackStep::Proxy => "proxy",
            FallbackStep::Absent => "absent",
        }
    }
}

/// Fallback chain: original implementation, then the proxy itself for
/// fluent members, then the absence token.
pub struct FallbackPolicy<'a> {
    pub parent_calls_allowed: bool,
    pub metadata: &'a dyn MemberMetadata,
    pub original: Option<&'a dyn OriginalInvoker>,
}

impl FallbackPolicy<'_> {
    /// Picks the step that will answer an unmapped call to `member`.
    pub fn decide(&self, member: &str, self_fallback_allowed: bool) -> FallbackStep {
        if self.can_call_original(member) {
            FallbackStep::Original
        } else if self_fallback_allowed {
            FallbackStep::Proxy
        } else {
            FallbackStep::Absent
        }
    }

    /// Answers the call with the step picked by [`FallbackPolicy::decide`].
    pub fn resolve(
        &self,
        step: FallbackStep,
        member: &str,
        args: &[Value],
    ) -> Result<Returned, Failure> {
        match step {
            FallbackStep::Original => match self.original {
                Some(original) => original.invoke(member, args).map(Returned::Value),
                None => Ok(Returned::Value(ABSENT)),
            },
            FallbackStep::Proxy => Ok(Returned::Proxy),
            FallbackStep::Absent => Ok(Returned::Value(ABSENT)),
        }
    }

    fn can_call_original(&self, member: &str) -> bool {
        if !self.parent_calls_allowed {
            return false;
        }
        let concrete = self
            .metadata
            .member(member)
            .is_some_and(|info| info.is_concrete());
        concrete && self.original.is_some_and(|o| o.implements(member))
    }
}
