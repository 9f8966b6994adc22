//! Test fixtures for common test scenarios.
//!
//! Resolved packages are described with `PackageFixture`, a builder that
//! hands out node ids and source spans so tests only state what a
//! program declares, imports and uses. The prebuilt programs mirror
//! small source trees under the `/go/src` corpus; none of the files
//! exist on disk.

use std::path::PathBuf;

use crate::core::load_path::last_segment;
use crate::resolver::{
    Expr, IdentUse, ImportDecl, NodeId, ResolvedFile, ResolvedPackage, SourcePos, Span,
    SyntaxFrame, TypeDecl,
};

/// Corpus root of every fixture file.
pub const ROOT: &str = "/go/src";

/// Every method in a fixture has this signature.
pub const SIG: &str = "func()";

/// Absolute path of `file` in package `load_path`.
pub fn source_file(load_path: &str, file: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}/{}", ROOT, load_path, file))
}

/// Builder for a `ResolvedPackage`.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    pkg: ResolvedPackage,
    next_node: u32,
}

impl PackageFixture {
    pub fn new(load_path: &str, name: &str) -> Self {
        PackageFixture {
            pkg: ResolvedPackage::new(load_path, name),
            next_node: 1,
        }
    }

    /// A package named after its last path segment with one file,
    /// `<name>.go`.
    pub fn named(load_path: &str) -> Self {
        let name = last_segment(load_path);
        Self::new(load_path, name).file(&format!("{}.go", name))
    }

    pub fn file(mut self, name: &str) -> Self {
        let path = source_file(&self.pkg.path, name);
        self.pkg.files.push(ResolvedFile::new(path));
        self
    }

    /// Import `literal` from the last file, on `line`.
    pub fn import(self, literal: &str, line: i32) -> Self {
        self.import_decl(literal, None, line)
    }

    pub fn import_as(self, literal: &str, alias: &str, line: i32) -> Self {
        self.import_decl(literal, Some(alias), line)
    }

    fn import_decl(mut self, literal: &str, alias: Option<&str>, line: i32) -> Self {
        let file = self.current_file();
        let width = literal.len() as i32 + 2;
        let span = Span::new(
            SourcePos::new(&file, line, 2),
            SourcePos::new(&file, line, 2 + width),
        );
        let mut decl = ImportDecl::new(literal, span);
        if let Some(alias) = alias {
            decl = decl.aliased(alias);
        }
        if let Some(f) = self.pkg.files.last_mut() {
            f.imports.push(decl);
        }
        self
    }

    /// `pkg.name(...)`
    pub fn call(self, def_pkg: &str, name: &str, line: i32, col: i32) -> Self {
        self.use_in(def_pkg, name, line, col, |id| SyntaxFrame::Call {
            callee: Expr::Selector(id),
        })
    }

    /// `name(...)` through a dot-import.
    pub fn dot_call(self, def_pkg: &str, name: &str, line: i32, col: i32) -> Self {
        self.use_in(def_pkg, name, line, col, |id| SyntaxFrame::Call {
            callee: Expr::Ident(id),
        })
    }

    /// `pkg.name{...}`
    pub fn instantiate(self, def_pkg: &str, name: &str, line: i32, col: i32) -> Self {
        self.use_in(def_pkg, name, line, col, |id| SyntaxFrame::CompositeLit {
            ty: Expr::Selector(id),
        })
    }

    /// `pkg.name` in any other position.
    pub fn reference(self, def_pkg: &str, name: &str, line: i32, col: i32) -> Self {
        self.use_in(def_pkg, name, line, col, |_| SyntaxFrame::Other)
    }

    /// A use of a built-in, which has no defining package.
    pub fn builtin(mut self, name: &str, line: i32, col: i32) -> Self {
        let node = self.node();
        let span = self.span(name, line, col);
        self.pkg.uses.push(IdentUse::new(node, name, span));
        self
    }

    fn use_in(
        mut self,
        def_pkg: &str,
        name: &str,
        line: i32,
        col: i32,
        frame: impl FnOnce(NodeId) -> SyntaxFrame,
    ) -> Self {
        let node = self.node();
        let span = self.span(name, line, col);
        let def_pos = SourcePos::new(source_file(def_pkg, &format!("{}.go", last_segment(def_pkg))), 3, 6);
        let ident = IdentUse::new(node, name, span)
            .defined_at(def_pkg, name, def_pos)
            .within(frame(node));
        self.pkg.uses.push(ident);
        self
    }

    /// An interface declared on `line` of the first file.
    pub fn interface(self, name: &str, methods: &[&str], line: i32) -> Self {
        self.type_decl(name, methods, line, true)
    }

    /// A concrete type declared on `line` of the first file.
    pub fn concrete(self, name: &str, methods: &[&str], line: i32) -> Self {
        self.type_decl(name, methods, line, false)
    }

    fn type_decl(mut self, name: &str, methods: &[&str], line: i32, interface: bool) -> Self {
        let file = self
            .pkg
            .files
            .first()
            .map(|f| f.path.clone())
            .unwrap_or_else(|| source_file(&self.pkg.path, "types.go"));
        let pos = SourcePos::new(file, line, 6);
        let mut decl = if interface {
            TypeDecl::interface(&self.pkg.path, name, pos)
        } else {
            TypeDecl::concrete(&self.pkg.path, name, pos)
        };
        for m in methods {
            decl = decl.method(*m, SIG);
        }
        self.pkg.types.push(decl);
        self
    }

    pub fn build(self) -> ResolvedPackage {
        self.pkg
    }

    fn node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn current_file(&self) -> PathBuf {
        self.pkg
            .files
            .last()
            .map(|f| f.path.clone())
            .unwrap_or_else(|| source_file(&self.pkg.path, "main.go"))
    }

    fn span(&self, name: &str, line: i32, col: i32) -> Span {
        let file = self.current_file();
        Span::new(
            SourcePos::new(&file, line, col),
            SourcePos::new(&file, line, col + name.len() as i32),
        )
    }
}

/// `simple/main` printing through `fmt.Println`.
pub fn simple() -> Vec<ResolvedPackage> {
    vec![
        PackageFixture::new("simple/main", "main")
            .file("main.go")
            .import("fmt", 3)
            .call("fmt", "Println", 6, 6)
            .builtin("len", 7, 2)
            .build(),
        PackageFixture::named("fmt").build(),
    ]
}

/// A package importing nothing and using nothing.
pub fn empty() -> Vec<ResolvedPackage> {
    vec![PackageFixture::new("empty/main", "main").file("main.go").build()]
}

/// Two mains sharing `multiple_mains/common`.
pub fn multiple_mains() -> Vec<ResolvedPackage> {
    let main = |n: &str| {
        PackageFixture::new(&format!("multiple_mains/{}/main", n), "main")
            .file("main.go")
            .import("multiple_mains/common", 3)
            .call("multiple_mains/common", "Hello", 6, 9)
            .build()
    };
    vec![
        main("1"),
        main("2"),
        PackageFixture::named("multiple_mains/common").build(),
    ]
}

/// `vendored/a/b` and `other` both import `c/d`; only the former sees
/// the copy vendored under `vendored/a`.
pub fn vendored() -> Vec<ResolvedPackage> {
    vec![
        PackageFixture::named("vendored/a/b")
            .import("c/d", 3)
            .call("vendored/a/vendor/c/d", "Pinned", 6, 4)
            .build(),
        PackageFixture::named("vendored/a/vendor/c/d").build(),
        PackageFixture::named("c/d").file("d2.go").build(),
        PackageFixture::named("other").import("c/d", 3).build(),
    ]
}

/// `dotimports/main` dot-imports `dotimports/lib` and calls `Foo()`.
pub fn dot_imports() -> Vec<ResolvedPackage> {
    vec![
        PackageFixture::new("dotimports/main", "main")
            .file("main.go")
            .import_as("dotimports/lib", ".", 3)
            .dot_call("dotimports/lib", "Foo", 6, 2)
            .build(),
        PackageFixture::named("dotimports/lib").build(),
    ]
}

/// `relimports/lib` imports its parent as `..` under the alias `r`.
pub fn relative_imports() -> Vec<ResolvedPackage> {
    vec![
        PackageFixture::new("relimports/lib", "lib")
            .file("lib.go")
            .import_as("..", "r", 3)
            .reference("relimports", "Value", 6, 9)
            .build(),
        PackageFixture::new("relimports", "lib").file("lib.go").build(),
    ]
}

/// Interfaces and implementations spread over `interfaces/main` and
/// `interfaces/lib`.
pub fn interfaces() -> Vec<ResolvedPackage> {
    vec![
        PackageFixture::new("interfaces/main", "main")
            .file("main.go")
            .import("interfaces/lib", 5)
            .call("interfaces/lib", "LibA", 13, 10)
            .interface("IfaceA", &["A"], 18)
            .interface("IfaceB", &["B"], 23)
            .interface("IfaceAB", &["A", "B"], 28)
            .interface("ifaceC", &["C"], 34)
            .interface("Empty", &[], 39)
            .interface("closer", &["close"], 41)
            .concrete("A", &["A"], 44)
            .concrete("B", &["B"], 47)
            .concrete("AB", &["A", "B"], 50)
            .concrete("file", &["close"], 52)
            .build(),
        PackageFixture::new("interfaces/lib", "lib")
            .file("lib.go")
            .interface("IfaceLibA", &["A"], 7)
            .interface("IfaceLibB", &["B"], 12)
            .interface("IfaceLibAB", &["A", "B"], 18)
            .concrete("LibA", &["A"], 24)
            .concrete("libB", &["B"], 27)
            .concrete("LibC", &["C"], 31)
            .concrete("LibAB", &["A", "B"], 34)
            .concrete("Handle", &["close"], 36)
            .build(),
    ]
}
