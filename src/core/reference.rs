//! Ref - a directed edge between two package-level identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{LoadPath, Position, RefKind};

/// A reference from an identifier use (or declaration) in one package to
/// a definition in another, or the same, package.
///
/// Packages are referred to by load-path; the graph resolves them. A Ref
/// recorded in `from_package`'s out-refs is always also recorded in
/// `to_package`'s in-refs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ref {
    pub kind: RefKind,

    /// Package the reference is made from.
    pub from_package: LoadPath,

    /// Package holding what is referred to.
    pub to_package: LoadPath,

    /// Identifier at the use site. Differs from `to_ident` for aliased
    /// imports and for Implementation/Extension edges.
    pub from_ident: String,

    /// Identifier referred to.
    pub to_ident: String,

    pub from_position: Position,
    pub to_position: Position,
}

impl Ref {
    /// Flat record for serialization, stamped with the version of the
    /// package the reference comes from.
    pub fn to_record(&self, version: i64) -> RefRecord {
        RefRecord {
            version,
            from: Location {
                position: self.from_position.clone(),
                package: self.from_package.to_string(),
                ident: self.from_ident.clone(),
            },
            to: Location {
                position: self.to_position.clone(),
                package: self.to_package.to_string(),
                ident: self.to_ident.clone(),
            },
            kind: self.kind,
        }
    }

    /// Whether either end of this reference is in `file`.
    pub fn touches_file(&self, file: &str) -> bool {
        self.from_position.file == file || self.to_position.file == file
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of to:`{}.{}` at {} by from:`{}.{}` at {}",
            self.kind,
            self.to_package,
            self.to_ident,
            self.to_position,
            self.from_package,
            self.from_ident,
            self.from_position
        )
    }
}

/// One end of a serialized reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub position: Position,
    pub package: String,
    pub ident: String,
}

/// Storage form of a Ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefRecord {
    pub version: i64,
    pub from: Location,
    pub to: Location,
    pub kind: RefKind,
}
