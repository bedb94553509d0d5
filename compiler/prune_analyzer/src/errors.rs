//! Link errors: edges naming symbols the program does not contain.
//!
//! Link errors are data, not `Err`s. The analyzer keeps going after each
//! one, so a single run reports every missing symbol. Errors are
//! deduplicated by [`LinkErrorKind`] and kept in first-discovery order;
//! later referrers of the same missing symbol are appended to `from`.

use std::fmt;

use rustc_hash::FxHashMap;

use prune_infos::MemberKey;
use prune_ir::{Name, StringLookup};

/// Stable code for each kind of link error.
///
/// Format: L#### (link phase).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Reference to a unit that does not exist
    L0001,
    /// Reference to a member that does not exist
    L0002,
    /// Module load of a unit that is not a module
    L0003,
    /// Construction of a unit that cannot have instances
    L0004,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::L0001 => "L0001",
            ErrorCode::L0002 => "L0002",
            ErrorCode::L0003 => "L0003",
            ErrorCode::L0004 => "L0004",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What is missing or malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkErrorKind {
    MissingClass(Name),
    MissingMember { class: Name, key: MemberKey },
    NotAModule(Name),
    NotInstantiable(Name),
}

impl LinkErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LinkErrorKind::MissingClass(_) => ErrorCode::L0001,
            LinkErrorKind::MissingMember { .. } => ErrorCode::L0002,
            LinkErrorKind::NotAModule(_) => ErrorCode::L0003,
            LinkErrorKind::NotInstantiable(_) => ErrorCode::L0004,
        }
    }
}

/// The symbol whose edge exposed a link error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Referrer {
    /// A member body, including the synthetic top-level exports member.
    Member { class: Name, key: MemberKey },
    /// A unit's own hierarchy or field types.
    Unit(Name),
    /// The configured root set.
    Roots,
}

/// One missing symbol and everything that referred to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkError {
    pub kind: LinkErrorKind,
    /// Referrers in first-discovery order; never empty.
    pub from: Vec<Referrer>,
}

impl LinkError {
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Render with names resolved through `lookup`.
    pub fn display<'a>(&'a self, lookup: &'a dyn StringLookup) -> DisplayLinkError<'a> {
        DisplayLinkError { error: self, lookup }
    }
}

/// [`LinkError`] paired with an interner for rendering.
pub struct DisplayLinkError<'a> {
    error: &'a LinkError,
    lookup: &'a dyn StringLookup,
}

impl DisplayLinkError<'_> {
    fn member(&self, f: &mut fmt::Formatter<'_>, class: Name, key: MemberKey) -> fmt::Result {
        write!(
            f,
            "{}.{}{}",
            self.lookup.lookup(class),
            key.namespace.prefix(),
            self.lookup.lookup(key.name)
        )
    }
}

impl fmt::Display for DisplayLinkError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |n: Name| self.lookup.lookup(n);
        write!(f, "error[{}]: ", self.error.code())?;
        match self.error.kind {
            LinkErrorKind::MissingClass(class) => {
                write!(f, "referring to non-existent unit `{}`", name(class))?;
            }
            LinkErrorKind::MissingMember { class, key } => {
                write!(f, "referring to non-existent member `")?;
                self.member(f, class, key)?;
                write!(f, "`")?;
            }
            LinkErrorKind::NotAModule(class) => {
                write!(f, "loading `{}`, which is not a module", name(class))?;
            }
            LinkErrorKind::NotInstantiable(class) => {
                write!(f, "constructing `{}`, which cannot have instances", name(class))?;
            }
        }
        for referrer in &self.error.from {
            write!(f, "\n  referenced from ")?;
            match *referrer {
                Referrer::Member { class, key } => self.member(f, class, key)?,
                Referrer::Unit(class) => write!(f, "unit `{}`", name(class))?,
                Referrer::Roots => write!(f, "the root set")?,
            }
        }
        Ok(())
    }
}

/// Deduplicating, order-preserving error sink.
#[derive(Default)]
pub(crate) struct LinkErrors {
    errors: Vec<LinkError>,
    by_kind: FxHashMap<LinkErrorKind, usize>,
}

impl LinkErrors {
    pub(crate) fn report(&mut self, kind: LinkErrorKind, from: Referrer) {
        if let Some(&idx) = self.by_kind.get(&kind) {
            let error = &mut self.errors[idx];
            if !error.from.contains(&from) {
                error.from.push(from);
            }
            return;
        }
        tracing::debug!(code = kind.code().as_str(), ?kind, ?from, "link error");
        self.by_kind.insert(kind, self.errors.len());
        self.errors.push(LinkError {
            kind,
            from: vec![from],
        });
    }

    pub(crate) fn into_vec(self) -> Vec<LinkError> {
        self.errors
    }
}
