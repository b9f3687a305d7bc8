//! Mermaid sequence diagram renderer

use super::{escape_label, NodeIds};
use crate::engine::UsesNode;

/// Render the tree as a Mermaid sequence diagram, one `uses` message per
/// parent/child edge.
pub fn render_sequence(tree: &UsesNode) -> String {
    let ids = NodeIds::assign(tree);
    let mut out = String::from("sequenceDiagram\n");

    for (id, node) in ids.nodes() {
        out.push_str(&format!("    participant n{id} as {}\n", escape_label(&node.name)));
    }
    for (parent, child) in tree.edges() {
        out.push_str(&format!("    n{}->>n{}: uses\n", ids.id(parent), ids.id(child)));
    }

    out
}
