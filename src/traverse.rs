//! Depth-first walk over a [`Node`] tree.
//!
//! The walker calls [`Visitor::enter`] before a node's children and
//! [`Visitor::exit`] after them. `exit` runs for every node whose `enter`
//! succeeded, also when `enter` asked to skip the children.

use crate::{
    data_structures::node::Node,
    error::{CompileError, CompileResult},
};

pub trait Visitor {
    /// Pre-order hook. Returns whether the children should be walked.
    fn enter(&mut self, node: &Node) -> CompileResult<bool>;

    /// Post-order hook.
    fn exit(&mut self, node: &Node) -> CompileResult<()>;
}

/// Walks `root` depth first, children in order.
///
/// Errors are returned with the slash-separated path of node names leading to
/// the failing node. Nesting deeper than `max_depth` aborts the walk.
pub fn traverse<V: Visitor>(root: &Node, visitor: &mut V, max_depth: usize) -> CompileResult<()> {
    let mut path = Vec::new();
    walk(root, visitor, max_depth, &mut path)
}

fn walk<'n, V: Visitor>(
    node: &'n Node,
    visitor: &mut V,
    max_depth: usize,
    path: &mut Vec<&'n str>,
) -> CompileResult<()> {
    path.push(node.name());
    if path.len() > max_depth {
        return Err(CompileError::DepthLimitExceeded { limit: max_depth }.at(path.join("/")));
    }

    let descend = visitor.enter(node).map_err(|e| e.at(path.join("/")))?;
    if descend {
        for child in node.children() {
            walk(child, visitor, max_depth, path)?;
        }
    } else {
        log::trace!("not descending into {} '{}'", node.kind(), node.name());
    }
    visitor.exit(node).map_err(|e| e.at(path.join("/")))?;

    path.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::{
        handle::{GeometryHandle, LightHandle},
        node::NodeKind,
    };

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl Visitor for Recorder {
        fn enter(&mut self, node: &Node) -> CompileResult<bool> {
            if self.fail_on == Some(node.name()) {
                return Err(CompileError::malformed("boom"));
            }
            self.events.push(format!("+{}", node.name()));
            Ok(node.kind() != NodeKind::Geometry)
        }

        fn exit(&mut self, node: &Node) -> CompileResult<()> {
            self.events.push(format!("-{}", node.name()));
            Ok(())
        }
    }

    fn tree() -> Node {
        Node::world("w").with_children([
            Node::geometry("g", GeometryHandle(0)).with_child(Node::light("hidden", LightHandle(0))),
            Node::new("o", NodeKind::Other).with_child(Node::light("l", LightHandle(1))),
        ])
    }

    #[test]
    fn visits_pre_and_post_order() {
        let mut rec = Recorder::default();
        traverse(&tree(), &mut rec, 16).unwrap();
        assert_eq!(
            rec.events,
            vec!["+w", "+g", "-g", "+o", "+l", "-l", "-o", "-w"]
        );
    }

    #[test]
    fn errors_carry_the_path() {
        let mut rec = Recorder {
            fail_on: Some("l"),
            ..Default::default()
        };
        let err = traverse(&tree(), &mut rec, 16).unwrap_err();
        assert_eq!(err.path(), Some("w/o/l"));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut rec = Recorder::default();
        let err = traverse(&tree(), &mut rec, 2).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CompileError::DepthLimitExceeded { limit: 2 }
        ));
        assert_eq!(err.path(), Some("w/o/l"));
    }
}
