//! Interface satisfaction across the whole graph.

use std::time::Instant;

use tracing::info;

use crate::core::{Package, Position, Ref, RefKind};
use crate::graph::PackageGraph;
use crate::resolver::TypeDecl;

impl PackageGraph {
    /// Add Implementation and Extension refs for every pair of packages,
    /// including each package with itself, and return how many were
    /// added.
    ///
    /// For each interface I of package A: every concrete type T of package
    /// B that satisfies I yields an Implementation ref B.T -> A.I, and
    /// every other interface J of B that satisfies I yields an Extension
    /// ref B.J -> A.I. A declaration is never matched against itself.
    ///
    /// Refs from an earlier run are replaced, so calling this again after
    /// loading more programs does not duplicate edges.
    pub fn compute_interface_implementation_matrix(&mut self) -> usize {
        let start = Instant::now();

        for pkg in self.packages.values_mut() {
            pkg.in_refs.retain(|r| !r.kind.is_structural());
            pkg.out_refs.retain(|r| !r.kind.is_structural());
        }

        let mut found = Vec::new();
        for pa in self.packages.values() {
            for iface in &pa.interfaces {
                for pb in self.packages.values() {
                    for ty in &pb.impls {
                        if !ty.same_decl(iface) && self.resolver.is_assignable(ty, iface) {
                            found.push(structural_ref(RefKind::Implementation, pb, ty, pa, iface));
                        }
                    }
                    for other in &pb.interfaces {
                        if !other.same_decl(iface) && self.resolver.is_assignable(other, iface) {
                            found.push(structural_ref(RefKind::Extension, pb, other, pa, iface));
                        }
                    }
                }
            }
        }

        let count = found.len();
        for r in found {
            self.add_ref(r);
        }

        info!(
            "computed {} implementation/extension refs in {:.2}s",
            count,
            start.elapsed().as_secs_f64()
        );
        count
    }
}

fn structural_ref(
    kind: RefKind,
    from: &Package,
    ty: &TypeDecl,
    to: &Package,
    iface: &TypeDecl,
) -> Ref {
    Ref {
        kind,
        from_package: from.path(),
        to_package: to.path(),
        from_ident: ty.name.clone(),
        to_ident: iface.name.clone(),
        from_position: Position::at(from.corpus(), &ty.pos),
        to_position: Position::at(to.corpus(), &iface.pos),
    }
}
