//! Classification of cross-package references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The ways a package can refer to an identifier of another package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RefKind {
    /// Instantiation of a type, e.g. `pkg.Type{...}`.
    Instantiation,
    /// Call of a function, e.g. `pkg.Func(...)`.
    Call,
    /// A concrete type satisfying an interface.
    Implementation,
    /// An interface whose method set includes another interface's.
    Extension,
    /// Import of a package. `from_ident` is the alias when one is given,
    /// `.` for dot-imports.
    Import,
    /// Any other use: value reads, types in signatures.
    Reference,
}

impl RefKind {
    pub const ALL: [RefKind; 6] = [
        RefKind::Instantiation,
        RefKind::Call,
        RefKind::Implementation,
        RefKind::Extension,
        RefKind::Import,
        RefKind::Reference,
    ];

    /// Kinds produced by the interface matrix rather than while loading.
    pub fn is_structural(&self) -> bool {
        matches!(self, RefKind::Implementation | RefKind::Extension)
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefKind::Instantiation => "Instantiation",
            RefKind::Call => "Call",
            RefKind::Implementation => "Implementation",
            RefKind::Extension => "Extension",
            RefKind::Import => "Import",
            RefKind::Reference => "Reference",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("unknown reference kind `{0}`")]
pub struct UnknownRefKind(pub String);

impl FromStr for RefKind {
    type Err = UnknownRefKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RefKind::ALL
            .into_iter()
            .find(|k| k.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRefKind(s.to_string()))
    }
}
