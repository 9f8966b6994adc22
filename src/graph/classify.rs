//! Reference classification.

use crate::core::RefKind;
use crate::resolver::{IdentUse, SyntaxFrame};

/// Kind of a non-local identifier use, decided by its nearest enclosing
/// call or composite literal.
///
/// The first frame that is a call naming the identifier as its callee
/// gives `Call`; the first composite literal whose type is the identifier
/// gives `Instantiation`. Frames that enclose the identifier without
/// naming it (an argument of a call, a field of a literal) are passed
/// over. Anything else is a plain `Reference`.
pub fn classify(ident: &IdentUse) -> RefKind {
    for frame in &ident.context {
        match frame {
            SyntaxFrame::Call { callee } if callee.names(ident.node) => return RefKind::Call,
            SyntaxFrame::CompositeLit { ty } if ty.names(ident.node) => {
                return RefKind::Instantiation
            }
            _ => {}
        }
    }
    RefKind::Reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{Expr, NodeId, SourcePos, Span};

    fn use_of(node: u32) -> IdentUse {
        IdentUse::new(NodeId(node), "F", Span::point(SourcePos::new("/a.go", 1, 1)))
    }

    #[test]
    fn test_selector_call() {
        // lib.F()
        let ident = use_of(1).within(SyntaxFrame::Call {
            callee: Expr::Selector(NodeId(1)),
        });
        assert_eq!(classify(&ident), RefKind::Call);
    }

    #[test]
    fn test_dot_import_call() {
        // F()
        let ident = use_of(1).within(SyntaxFrame::Call {
            callee: Expr::Ident(NodeId(1)),
        });
        assert_eq!(classify(&ident), RefKind::Call);
    }

    #[test]
    fn test_composite_literal() {
        // lib.T{}
        let ident = use_of(1).within(SyntaxFrame::CompositeLit {
            ty: Expr::Selector(NodeId(1)),
        });
        assert_eq!(classify(&ident), RefKind::Instantiation);
    }

    #[test]
    fn test_argument_of_call_is_reference() {
        // g(lib.V)
        let ident = use_of(1).within(SyntaxFrame::Call {
            callee: Expr::Ident(NodeId(7)),
        });
        assert_eq!(classify(&ident), RefKind::Reference);
    }

    #[test]
    fn test_outer_frame_decides_when_inner_does_not_name() {
        let ident = use_of(1)
            .within(SyntaxFrame::Other)
            .within(SyntaxFrame::Call {
                callee: Expr::Other,
            })
            .within(SyntaxFrame::CompositeLit {
                ty: Expr::Selector(NodeId(1)),
            });
        assert_eq!(classify(&ident), RefKind::Instantiation);
    }

    #[test]
    fn test_innermost_match_wins() {
        // lib.F(lib.T{}) seen from F
        let ident = use_of(1)
            .within(SyntaxFrame::Call {
                callee: Expr::Selector(NodeId(1)),
            })
            .within(SyntaxFrame::CompositeLit {
                ty: Expr::Selector(NodeId(1)),
            });
        assert_eq!(classify(&ident), RefKind::Call);
    }

    #[test]
    fn test_no_context() {
        assert_eq!(classify(&use_of(1)), RefKind::Reference);
    }
}
