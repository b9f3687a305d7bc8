//! Mermaid flowchart renderer

use super::{escape_label, NodeIds};
use crate::engine::UsesNode;

pub const FLOWCHART_TITLE: &str = "Workflow Graph";

/// Render the tree as a top-to-bottom Mermaid flowchart.
pub fn render_flowchart(tree: &UsesNode) -> String {
    let ids = NodeIds::assign(tree);
    let mut out = format!("---\ntitle: {FLOWCHART_TITLE}\n---\nflowchart TB\n");

    for (id, node) in ids.nodes() {
        out.push_str(&format!(
            "    {id}@{{ shape: rect, label: \"{}\"}}\n",
            escape_label(&node.name)
        ));
    }

    for (parent, child) in tree.edges() {
        out.push_str(&format!("    {} --> {}\n", ids.id(parent), ids.id(child)));
    }

    out
}
