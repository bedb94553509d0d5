//! Extraction failures.
//!
//! These are internal invariant violations: they signal a defect in the
//! producer of the IR, never a problem in the user's program.

use prune_ir::{MemberNamespace, Name, Type};
use thiserror::Error;

/// Invariant violation found while extracting a unit.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InfoError {
    /// A virtual call whose receiver type cannot carry methods.
    #[error("invalid receiver type {receiver:?} for virtual call to method {method:?}")]
    InvalidReceiverType { receiver: Type, method: Name },

    /// A failure inside one member, tagged with the member's identity.
    #[error("in member {namespace:?} {member:?}: {source}")]
    InMember {
        namespace: MemberNamespace,
        member: Name,
        #[source]
        source: Box<InfoError>,
    },
}

impl InfoError {
    /// Tag this error with the member being extracted.
    #[must_use]
    pub fn in_member(self, namespace: MemberNamespace, member: Name) -> Self {
        InfoError::InMember {
            namespace,
            member,
            source: Box::new(self),
        }
    }

    /// The innermost error, without member context.
    pub fn root_cause(&self) -> &InfoError {
        match self {
            InfoError::InMember { source, .. } => source.root_cause(),
            InfoError::InvalidReceiverType { .. } => self,
        }
    }
}
