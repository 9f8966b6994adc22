//! Recursive, memoized package loading.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::corpus::rel_to;
use crate::core::{Corpus, LoadPath, Package, Position, Ref, RefKind};
use crate::graph::errors::GraphError;
use crate::graph::{classify, is_pseudo_package, resolve_import, PackageGraph};
use crate::resolver::{ResolvedPackage, ResolvedProgram};

impl PackageGraph {
    /// Resolve the programs rooted at `load_paths` and load every package
    /// they reach.
    ///
    /// Packages already in the graph are left as they are, so this may be
    /// called repeatedly to add more programs. A resolver failure aborts
    /// this call only.
    pub fn load_programs<S: AsRef<str>>(
        &mut self,
        load_paths: &[S],
        include_tests: bool,
    ) -> Result<(), GraphError> {
        let start = Instant::now();
        let paths: Vec<String> = load_paths.iter().map(|p| p.as_ref().to_string()).collect();

        let program = self
            .resolver
            .resolve_program(&paths, include_tests)
            .map_err(|source| GraphError::Resolve {
                paths: paths.join(", "),
                source,
            })?;

        let before = self.len();
        for pkg in program.packages() {
            self.load_package(&pkg.path, &program);
        }

        info!(
            "loaded {} new packages ({} resolved) in {:.2}s",
            self.len() - before,
            program.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Load a single program.
    pub fn load_program(&mut self, load_path: &str, include_tests: bool) -> Result<(), GraphError> {
        self.load_programs(std::slice::from_ref(&load_path), include_tests)
    }

    /// Load `load_path` and, recursively, what it imports and refers to.
    /// Returns the package's key, or `None` if it could not be loaded.
    pub(crate) fn load_package(
        &mut self,
        load_path: &str,
        program: &ResolvedProgram,
    ) -> Option<LoadPath> {
        let path = LoadPath::new(load_path);
        if self.packages.contains_key(&path) {
            return Some(path);
        }

        if is_pseudo_package(&path) {
            self.packages.insert(path, Package::pseudo(path));
            return Some(path);
        }

        // The resolver may key a package with or without a trailing `/`.
        let Some(resolved) = program
            .package(load_path)
            .or_else(|| program.package(&path))
        else {
            warn!("no resolved package for `{}`", load_path);
            return None;
        };

        let version = match self.version_policy.version(resolved) {
            Ok(v) => v,
            Err(e) => {
                debug!("not loading `{}`: {}", load_path, e);
                return None;
            }
        };

        let corpus = resolved
            .files
            .first()
            .and_then(|f| self.corpus_for(&f.path));

        // Registered before recursing so that re-entry finds it.
        self.packages.insert(
            path,
            Package::new(&resolved.name, path, version, corpus.clone()),
        );

        if !self.filter.accept(&path, version) {
            debug!("filtered out `{}` at version {}", load_path, version);
            return Some(path);
        }

        self.load_files(path, corpus.as_ref(), resolved, program);
        self.load_uses(path, corpus.as_ref(), resolved, program);
        self.load_types(path, resolved);

        Some(path)
    }

    fn load_files(
        &mut self,
        path: LoadPath,
        corpus: Option<&Corpus>,
        resolved: &ResolvedPackage,
        program: &ResolvedProgram,
    ) {
        for file in &resolved.files {
            let rel = rel_to(corpus, &file.path);
            if let Some(pkg) = self.packages.get_mut(&path) {
                pkg.add_file(rel);
            }

            for import in &file.imports {
                let exists = |c: &str| program.package(c).is_some() || is_pseudo_package(c);
                let Some(target) = resolve_import(&path, &import.path, exists) else {
                    warn!(
                        "cannot resolve import `{}` in {}",
                        import.path,
                        file.path.display()
                    );
                    continue;
                };

                let Some(imported) = self.load_package(&target, program) else {
                    continue;
                };
                let Some(imported_pkg) = self.packages.get(&imported) else {
                    continue;
                };
                let name = imported_pkg.name().to_string();
                let imported_corpus = imported_pkg.corpus().cloned();

                let from_ident = import.alias.clone().unwrap_or_else(|| name.clone());
                let from_position = Position::from_span(corpus, &import.span);

                let imported_files = program
                    .package(&target)
                    .or_else(|| program.package(&imported))
                    .map(|p| p.files.as_slice())
                    .unwrap_or_default();
                for imported_file in imported_files {
                    let to_file = rel_to(imported_corpus.as_ref(), &imported_file.path);
                    self.add_ref(Ref {
                        kind: RefKind::Import,
                        from_package: path,
                        to_package: imported,
                        from_ident: from_ident.clone(),
                        to_ident: name.clone(),
                        from_position: from_position.clone(),
                        to_position: Position::point(to_file, 1, 1),
                    });
                }
            }
        }
    }

    fn load_uses(
        &mut self,
        path: LoadPath,
        corpus: Option<&Corpus>,
        resolved: &ResolvedPackage,
        program: &ResolvedProgram,
    ) {
        for ident in &resolved.uses {
            // Built-ins have no package.
            let Some(def) = &ident.def else {
                continue;
            };
            if LoadPath::new(&def.package) == path {
                continue;
            }

            let Some(target) = self.load_package(&def.package, program) else {
                continue;
            };
            let target_corpus = self.packages.get(&target).and_then(|p| p.corpus().cloned());

            self.add_ref(Ref {
                kind: classify(ident),
                from_package: path,
                to_package: target,
                from_ident: ident.name.clone(),
                to_ident: def.name.clone(),
                from_position: Position::from_span(corpus, &ident.span),
                to_position: Position::at(target_corpus.as_ref(), &def.pos),
            });
        }
    }

    fn load_types(&mut self, path: LoadPath, resolved: &ResolvedPackage) {
        let Some(pkg) = self.packages.get_mut(&path) else {
            return;
        };
        for decl in &resolved.types {
            if !decl.interface {
                pkg.impls.push(decl.clone());
            } else if decl.exported && !decl.methods.is_empty() {
                // Empty interfaces are satisfied by everything.
                pkg.interfaces.push(decl.clone());
            }
        }
    }
}
