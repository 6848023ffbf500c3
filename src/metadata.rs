//! Member metadata of the substituted target.
//!
//! The engine never reflects on anything itself. Whoever generates the
//! substitute describes the target once, through [`MemberMetadata`], and the
//! engine asks it whether a member exists, whether it may be intercepted,
//! and what its parameters are called.

use crate::error::{Action, ConfigError};
use serde::{Deserialize, Serialize};

/// Declared result of a member. Drives the last two fallback steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// The member returns the host type itself (fluent interface).
    HostType,
    Void,
    Optional,
    Value,
    #[default]
    Undeclared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub returns: ReturnKind,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_constructor: bool,
}

impl MemberInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: ReturnKind::Undeclared,
            is_final: false,
            is_abstract: false,
            is_constructor: false,
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn returning(mut self, returns: ReturnKind) -> Self {
        self.returns = returns;
        self
    }

    pub fn fluent(self) -> Self {
        self.returning(ReturnKind::HostType)
    }

    pub fn sealed(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn abstract_only(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.is_constructor = true;
        self
    }

    pub fn is_interceptable(&self) -> bool {
        !self.is_final && !self.is_constructor
    }

    pub fn is_concrete(&self) -> bool {
        !self.is_abstract
    }

    pub fn returns_host(&self) -> bool {
        self.returns == ReturnKind::HostType
    }
}

/// Metadata capability supplied by the substitute generator.
pub trait MemberMetadata {
    fn member(&self, name: &str) -> Option<&MemberInfo>;

    /// Human readable identifier used in error messages.
    fn display_name(&self, member: &str) -> String;
}

/// Checks that `member` exists and may be intercepted.
pub fn validate_member<'a>(
    metadata: &'a dyn MemberMetadata,
    member: &str,
    action: Action,
) -> Result<&'a MemberInfo, ConfigError> {
    match metadata.member(member) {
        Some(info) if info.is_interceptable() => Ok(info),
        Some(_) => Err(ConfigError::NotApplicable {
            action,
            member: member.to_string(),
            display: metadata.display_name(member),
        }),
        None => Err(ConfigError::UnknownMember {
            action,
            member: member.to_string(),
            display: metadata.display_name(member),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetKind {
    Class {
        name: String,
        #[serde(default)]
        is_final: bool,
    },
    Function {
        name: String,
    },
}

/// Concrete description of a class or free function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSignature {
    kind: TargetKind,
    members: Vec<MemberInfo>,
}

impl TargetSignature {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Class {
                name: name.into(),
                is_final: false,
            },
            members: Vec::new(),
        }
    }

    pub fn final_class(name: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Class {
                name: name.into(),
                is_final: true,
            },
            members: Vec::new(),
        }
    }

    /// A free function: a target whose only member is the function itself.
    pub fn function(function: MemberInfo) -> Self {
        Self {
            kind: TargetKind::Function {
                name: function.name.clone(),
            },
            members: vec![function],
        }
    }

    pub fn from_parts(kind: TargetKind, members: Vec<MemberInfo>) -> Self {
        Self { kind, members }
    }

    /// Adds or replaces a member.
    pub fn with_member(mut self, info: MemberInfo) -> Self {
        if let Some(existing) = self.members.iter_mut().find(|m| m.name == info.name) {
            *existing = info;
        } else {
            self.members.push(info);
        }
        self
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            TargetKind::Class { name, .. } | TargetKind::Function { name } => name,
        }
    }

    pub fn kind(&self) -> &TargetKind {
        &self.kind
    }

    pub fn is_final(&self) -> bool {
        matches!(self.kind, TargetKind::Class { is_final: true, .. })
    }

    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }
}

impl MemberMetadata for TargetSignature {
    fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.name == name)
    }

    fn display_name(&self, member: &str) -> String {
        match &self.kind {
            TargetKind::Class { name, .. } => format!("{}::{}()", name, member),
            TargetKind::Function { .. } => format!("{}()", member),
        }
    }
}
