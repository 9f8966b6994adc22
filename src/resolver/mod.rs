//! Symbol resolution capability.
//!
//! The graph never parses or type-checks anything itself. It consumes a
//! `SymbolResolver`, which turns entry load-paths into a `ResolvedProgram`:
//! every reachable package with its files, import declarations,
//! identifier uses (with the defining package and syntactic context) and
//! top-level named types. The resolver also answers structural
//! assignability between a type and an interface.

pub mod errors;
pub mod snapshot;

pub use errors::ResolverError;
pub use snapshot::{Snapshot, SnapshotResolver};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source of resolved programs.
pub trait SymbolResolver {
    /// Resolve the packages reachable from `load_paths`. With
    /// `include_tests`, external test packages of the entries are added.
    fn resolve_program(
        &self,
        load_paths: &[String],
        include_tests: bool,
    ) -> Result<ResolvedProgram, ResolverError>;

    /// Whether `ty` satisfies the interface `iface`.
    fn is_assignable(&self, ty: &TypeDecl, iface: &TypeDecl) -> bool;
}

/// Every package reachable from a set of entry points, keyed by load-path.
#[derive(Debug, Clone, Default)]
pub struct ResolvedProgram {
    packages: BTreeMap<String, ResolvedPackage>,
}

impl ResolvedProgram {
    pub fn new(packages: impl IntoIterator<Item = ResolvedPackage>) -> Self {
        ResolvedProgram {
            packages: packages
                .into_iter()
                .map(|p| (p.path.clone(), p))
                .collect(),
        }
    }

    pub fn package(&self, load_path: &str) -> Option<&ResolvedPackage> {
        self.packages.get(load_path)
    }

    /// Packages in load-path order.
    pub fn packages(&self) -> impl Iterator<Item = &ResolvedPackage> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// A package as reported by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPackage {
    /// Load-path.
    pub path: String,
    /// Declared short name.
    pub name: String,
    #[serde(default)]
    pub files: Vec<ResolvedFile>,
    /// Identifier uses resolved to a definition.
    #[serde(default)]
    pub uses: Vec<IdentUse>,
    /// Top-level named types.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl ResolvedPackage {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        ResolvedPackage {
            path: path.into(),
            name: name.into(),
            files: Vec::new(),
            uses: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: ResolvedFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_use(mut self, ident: IdentUse) -> Self {
        self.uses.push(ident);
        self
    }

    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }
}

/// A source file with its import declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFile {
    /// Absolute path.
    pub path: PathBuf,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
}

impl ResolvedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResolvedFile {
            path: path.into(),
            imports: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: ImportDecl) -> Self {
        self.imports.push(import);
        self
    }
}

/// An import declaration as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Literal import string, unquoted.
    pub path: String,
    /// Local name, `.` for a dot-import.
    #[serde(default)]
    pub alias: Option<String>,
    pub span: Span,
}

impl ImportDecl {
    pub fn new(path: impl Into<String>, span: Span) -> Self {
        ImportDecl {
            path: path.into(),
            alias: None,
            span,
        }
    }

    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Absolute location in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub file: PathBuf,
    pub line: i32,
    pub col: i32,
}

impl SourcePos {
    pub fn new(file: impl Into<PathBuf>, line: i32, col: i32) -> Self {
        SourcePos {
            file: file.into(),
            line,
            col,
        }
    }
}

/// A start location with an optional end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: SourcePos,
    #[serde(default)]
    pub end: Option<SourcePos>,
}

impl Span {
    pub fn new(start: SourcePos, end: SourcePos) -> Self {
        Span {
            start,
            end: Some(end),
        }
    }

    pub fn point(start: SourcePos) -> Self {
        Span { start, end: None }
    }
}

/// Identity of an identifier node within a resolved program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// A use of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentUse {
    pub node: NodeId,
    pub name: String,
    pub span: Span,
    /// `None` for built-ins, which belong to no package.
    #[serde(default)]
    pub def: Option<Definition>,
    /// Enclosing syntax, innermost first.
    #[serde(default)]
    pub context: Vec<SyntaxFrame>,
}

impl IdentUse {
    pub fn new(node: NodeId, name: impl Into<String>, span: Span) -> Self {
        IdentUse {
            node,
            name: name.into(),
            span,
            def: None,
            context: Vec::new(),
        }
    }

    pub fn defined_at(mut self, package: impl Into<String>, name: impl Into<String>, pos: SourcePos) -> Self {
        self.def = Some(Definition {
            package: package.into(),
            name: name.into(),
            pos,
        });
        self
    }

    /// Push an enclosing frame, outside the ones already present.
    pub fn within(mut self, frame: SyntaxFrame) -> Self {
        self.context.push(frame);
        self
    }
}

/// Where a used identifier is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub package: String,
    pub name: String,
    pub pos: SourcePos,
}

/// An enclosing syntax node, reduced to what reference classification
/// looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum SyntaxFrame {
    /// `callee(args...)`
    Call { callee: Expr },
    /// `Type{...}`
    CompositeLit { ty: Expr },
    Other,
}

/// The callee or literal type of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "expr", content = "node", rename_all = "snake_case")]
pub enum Expr {
    /// A bare identifier, as produced by a dot-import.
    Ident(NodeId),
    /// `x.sel`; holds the selected identifier.
    Selector(NodeId),
    Other,
}

impl Expr {
    /// Whether this expression names exactly `node`.
    pub fn names(&self, node: NodeId) -> bool {
        match self {
            Expr::Ident(id) | Expr::Selector(id) => *id == node,
            Expr::Other => false,
        }
    }
}

/// A top-level named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Load-path of the declaring package.
    pub package: String,
    pub name: String,
    pub exported: bool,
    pub interface: bool,
    #[serde(default)]
    pub methods: Vec<Method>,
    pub pos: SourcePos,
}

impl TypeDecl {
    pub fn interface(package: impl Into<String>, name: impl Into<String>, pos: SourcePos) -> Self {
        Self::declare(package.into(), name.into(), true, pos)
    }

    pub fn concrete(package: impl Into<String>, name: impl Into<String>, pos: SourcePos) -> Self {
        Self::declare(package.into(), name.into(), false, pos)
    }

    fn declare(package: String, name: String, interface: bool, pos: SourcePos) -> Self {
        TypeDecl {
            exported: is_exported(&name),
            package,
            name,
            interface,
            methods: Vec::new(),
            pos,
        }
    }

    pub fn method(mut self, name: impl Into<String>, signature: impl Into<String>) -> Self {
        self.methods.push(Method {
            name: name.into(),
            signature: signature.into(),
        });
        self
    }

    /// Whether both describe the same declaration.
    pub fn same_decl(&self, other: &TypeDecl) -> bool {
        self.package == other.package && self.name == other.name
    }
}

/// A method in a type's method set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub signature: String,
}

/// Identifiers starting with an upper-case letter are visible outside
/// their package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
