//! Core data model of the reference graph.
//!
//! - Load-paths (interned package identities)
//! - Corpora and corpus-relative positions
//! - Refs and their kinds
//! - Packages, the graph's nodes

pub mod corpus;
pub mod load_path;
pub mod package;
pub mod position;
pub mod ref_kind;
pub mod reference;

pub use corpus::{Corpus, CorpusError};
pub use load_path::LoadPath;
pub use package::{document_id, FileRecord, Package, PackageRecord};
pub use position::{Position, NO_POS};
pub use ref_kind::RefKind;
pub use reference::{Location, Ref, RefRecord};
