//! Package - a node of the reference graph.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Corpus, LoadPath, Ref};
use crate::resolver::TypeDecl;

/// A package loaded into a `PackageGraph`.
///
/// Identity is the load-path. In- and out-refs share their `Ref`s with
/// the package at the other end of each edge; a self-referencing edge
/// (an Implementation inside one package) appears in both lists here.
#[derive(Debug, Clone)]
pub struct Package {
    pub(crate) name: String,
    pub(crate) path: LoadPath,
    pub(crate) version: i64,
    pub(crate) files: Vec<String>,

    /// Exported interfaces with at least one method.
    pub(crate) interfaces: Vec<TypeDecl>,

    /// Named non-interface types.
    pub(crate) impls: Vec<TypeDecl>,

    pub(crate) in_refs: Vec<Arc<Ref>>,
    pub(crate) out_refs: Vec<Arc<Ref>>,

    /// `None` for built-in pseudo-packages and packages with no files.
    pub(crate) corpus: Option<Corpus>,
}

impl Package {
    pub(crate) fn new(
        name: impl Into<String>,
        path: LoadPath,
        version: i64,
        corpus: Option<Corpus>,
    ) -> Self {
        Package {
            name: name.into(),
            path,
            version,
            files: Vec::new(),
            interfaces: Vec::new(),
            impls: Vec::new(),
            in_refs: Vec::new(),
            out_refs: Vec::new(),
            corpus,
        }
    }

    /// A compiler built-in with no backing files.
    pub(crate) fn pseudo(path: LoadPath) -> Self {
        Package::new(path.last_segment(), path, 0, None)
    }

    pub(crate) fn add_file(&mut self, file: String) {
        if !self.files.contains(&file) {
            self.files.push(file);
        }
    }

    /// Short package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> LoadPath {
        self.path
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Corpus-relative files, in load order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn interfaces(&self) -> &[TypeDecl] {
        &self.interfaces
    }

    pub fn impls(&self) -> &[TypeDecl] {
        &self.impls
    }

    /// Refs pointing to identifiers of this package.
    pub fn in_refs(&self) -> &[Arc<Ref>] {
        &self.in_refs
    }

    /// Refs made by this package.
    pub fn out_refs(&self) -> &[Arc<Ref>] {
        &self.out_refs
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    /// Stable id of this package at this version, for idempotent upserts
    /// into a document store. The `v1` prefix names the id format.
    pub fn document_id(&self) -> String {
        document_id(self.path.as_str(), self.version)
    }

    pub fn to_record(&self) -> PackageRecord {
        PackageRecord {
            path: self.path.to_string(),
            version: self.version,
            name: self.name.clone(),
            files: self.files.clone(),
        }
    }

    pub fn file_records(&self) -> impl Iterator<Item = FileRecord> + '_ {
        self.files.iter().map(|f| FileRecord {
            filename: f.clone(),
            package: self.path.to_string(),
        })
    }
}

/// Document id for `load_path` at `version`.
pub fn document_id(load_path: &str, version: i64) -> String {
    format!("v1@{}@{}", version, load_path)
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Package {}

/// Storage form of a Package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(rename = "loadpath")]
    pub path: String,
    pub version: i64,
    pub name: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl PackageRecord {
    pub fn document_id(&self) -> String {
        document_id(&self.path, self.version)
    }
}

/// Storage form of a file membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub package: String,
}
