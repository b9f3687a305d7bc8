//! Mermaid renderers
//!
//! - `flowchart`: a top-to-bottom flowchart, one box per node
//! - `sequence`: a sequence diagram, one participant per node
//!
//! Both key nodes by their unique id, so nodes that share a label stay
//! distinct in the output.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::engine::{AnalysisError, UsesNode};

pub mod flowchart;
pub mod sequence;

pub use flowchart::render_flowchart;
pub use sequence::render_sequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramType {
    #[default]
    Flowchart,
    Sequence,
}

impl DiagramType {
    pub fn render(&self, tree: &UsesNode) -> String {
        match self {
            DiagramType::Flowchart => render_flowchart(tree),
            DiagramType::Sequence => render_sequence(tree),
        }
    }
}

impl FromStr for DiagramType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flowchart" => Ok(DiagramType::Flowchart),
            "sequence" => Ok(DiagramType::Sequence),
            _ => Err(AnalysisError::UnsupportedDiagramType(s.to_string())),
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramType::Flowchart => write!(f, "flowchart"),
            DiagramType::Sequence => write!(f, "sequence"),
        }
    }
}

/// Sequential diagram ids, assigned depth-first and keyed by unique id
pub(crate) struct NodeIds<'t> {
    ids: HashMap<&'t str, usize>,
    order: Vec<&'t UsesNode>,
}

impl<'t> NodeIds<'t> {
    pub(crate) fn assign(tree: &'t UsesNode) -> Self {
        let mut ids = HashMap::new();
        let mut order = Vec::new();
        for node in tree.descendants() {
            if !ids.contains_key(node.unique_id.as_str()) {
                ids.insert(node.unique_id.as_str(), order.len());
                order.push(node);
            }
        }
        Self { ids, order }
    }

    pub(crate) fn id(&self, node: &UsesNode) -> usize {
        self.ids[node.unique_id.as_str()]
    }

    /// Nodes in id order
    pub(crate) fn nodes(&self) -> impl Iterator<Item = (usize, &'t UsesNode)> + '_ {
        self.order.iter().copied().enumerate()
    }
}

/// Mermaid-safe label text
pub(crate) fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}
