//! Depth-first traversal with pre/post-order callbacks.

use dw_tree::Node;

/// Outcome of visiting a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Walk the children, then call [`NodeVisitor::depart`].
    Descend,
    /// Skip the children and the depart call.
    Skip,
    /// Like [`Visit::Skip`], but reported through [`NodeVisitor::unsupported`].
    Unsupported(&'static str),
}

/// Per-node callbacks driven by [`walk`].
pub trait NodeVisitor {
    /// Error that aborts the walk.
    type Error;

    /// Called before the node's children.
    fn visit(&mut self, node: &Node) -> Result<Visit, Self::Error>;

    /// Called after the node's children, only when `visit` returned
    /// [`Visit::Descend`].
    fn depart(&mut self, node: &Node) -> Result<(), Self::Error>;

    /// Called when `visit` returned [`Visit::Unsupported`].
    fn unsupported(&mut self, node: &Node, reason: &'static str) {
        tracing::debug!(kind = %node.kind(), reason, "Skipped node");
    }
}

/// Walk `node` depth-first. The first error aborts the walk.
pub fn walk<V: NodeVisitor + ?Sized>(node: &Node, visitor: &mut V) -> Result<(), V::Error> {
    match visitor.visit(node)? {
        Visit::Descend => {
            for child in node.children() {
                walk(child, visitor)?;
            }
            visitor.depart(node)
        }
        Visit::Skip => Ok(()),
        Visit::Unsupported(reason) => {
            visitor.unsupported(node, reason);
            Ok(())
        }
    }
}
