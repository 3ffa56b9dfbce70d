//! Defines the exported (n-ary) form of a classified tree.
use serde::{Serialize, Deserialize};

use crate::error::Result;
use super::{
    node::*,
    oblique_tree::ClassifiedTree,
};

use std::path::Path;
use std::fs::File;
use std::io::prelude::*;


/// Kind of an [`ExportedNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A node that splits by a hyperplane.
    Decision,
    /// A node with no children.
    Leaf,
}


/// A node of the exported tree.
/// Children are listed left first.
/// 
/// The exported tree owns copies of every array,
/// so it is independent of the tree it came from.
/// Serialized field names are in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedNode {
    /// Path string of a decision node, or the synthesized leaf name.
    pub name: String,
    /// `"decision"` or `"leaf"`.
    pub kind: NodeKind,
    /// Weights followed by the bias. All zeros for leaves.
    pub split: Vec<f64>,
    /// Indices of the non-zero weights of `split`.
    pub feature_indices: Vec<usize>,
    /// Points per class that reached this node.
    pub total_count: Vec<usize>,
    /// Points per class routed left. Empty for leaves.
    pub left_count: Vec<usize>,
    /// Points per class routed right. Empty for leaves.
    pub right_count: Vec<usize>,
    /// Indices of the points that reached this node.
    pub sub_training_set: Vec<usize>,
    /// Empty for leaves.
    pub left_sub_training_set: Vec<usize>,
    /// Empty for leaves.
    pub right_sub_training_set: Vec<usize>,
    /// Empty for decision nodes.
    pub feature_contribution: FeatureContribution,
    /// Left child first, if present.
    pub children: Vec<ExportedNode>,
    /// The labels in class-index order:
    /// `classes[k]` is the label counted at index `k`
    /// of every count and contribution vector.
    /// Set on the root of an exported tree, empty elsewhere.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<i64>,
}


impl From<&Node> for ExportedNode {
    /// Copies the sub-tree rooted at `node`.
    /// `classes` is left empty.
    fn from(node: &Node) -> Self {
        let mut root = ExportedNode::shallow(node);

        // Pre-order with the right child visited first,
        // so popping `nodes` from the back meets left siblings first.
        let mut nodes: Vec<(ExportedNode, Option<usize>)> = Vec::new();
        let mut stack = node.children()
            .map(|child| (child, None))
            .collect::<Vec<_>>();
        while let Some((node, parent)) = stack.pop() {
            let id = nodes.len();
            nodes.push((ExportedNode::shallow(node), parent));
            stack.extend(node.children().map(|child| (child, Some(id))));
        }

        while let Some((child, parent)) = nodes.pop() {
            match parent {
                Some(id) => nodes[id].0.children.push(child),
                None => root.children.push(child),
            }
        }
        root
    }
}


impl ClassifiedTree {
    /// Convert this tree into its exported form.
    /// The root carries the label of each class index.
    /// `self` is left untouched.
    #[inline]
    pub fn export(&self) -> ExportedNode {
        let mut root = ExportedNode::from(&self.root);
        root.classes = self.classes.clone();
        root
    }
}


// Frees the children one by one
// so that deep trees do not exhaust the stack.
impl Drop for ExportedNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}


impl ExportedNode {
    /// Copies `node` without its children.
    fn shallow(node: &Node) -> Self {
        match node {
            Node::Decision(decision) => {
                Self {
                    name: decision.name.clone(),
                    kind: NodeKind::Decision,
                    split: decision.split.coefficients().to_vec(),
                    feature_indices: decision.split.feature_indices(),
                    total_count: decision.total_count.clone(),
                    left_count: decision.left_count.clone(),
                    right_count: decision.right_count.clone(),
                    sub_training_set: decision.sub_training_set.clone(),
                    left_sub_training_set: decision.left_training_set.clone(),
                    right_sub_training_set: decision.right_training_set.clone(),
                    feature_contribution: FeatureContribution::new(),
                    children: Vec::new(),
                    classes: Vec::new(),
                }
            },
            Node::Leaf(leaf) => {
                Self {
                    name: leaf.name.clone(),
                    kind: NodeKind::Leaf,
                    split: leaf.split.coefficients().to_vec(),
                    feature_indices: leaf.split.feature_indices(),
                    total_count: leaf.total_count.clone(),
                    left_count: Vec::new(),
                    right_count: Vec::new(),
                    sub_training_set: leaf.sub_training_set.clone(),
                    left_sub_training_set: Vec::new(),
                    right_sub_training_set: Vec::new(),
                    feature_contribution: leaf.feature_contribution.clone(),
                    children: Vec::new(),
                    classes: Vec::new(),
                }
            },
        }
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }


    /// Iterate over this sub-tree in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &ExportedNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }


    /// Iterate over the leaves of this sub-tree, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &ExportedNode> {
        self.nodes().filter(|node| node.is_leaf())
    }


    /// Find the node named `name`.
    /// With legacy leaf naming, the left sibling is found first.
    pub fn find(&self, name: &str) -> Option<&ExportedNode> {
        self.nodes().find(|node| node.name == name)
    }


    /// Serialize this tree to a JSON string.
    #[inline]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }


    /// Serialize this tree to an indented JSON string.
    #[inline]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }


    /// Read a tree back from JSON.
    /// Input nested deeper than 128 levels is rejected by serde_json.
    #[inline]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Returns the tree in Graphviz dot format.
    /// Edges into a left child are labeled `"Yes"`.
    pub fn to_dot(&self) -> String {
        let mut info = Vec::new();
        let mut next_id = 0_usize;
        let mut stack: Vec<(&ExportedNode, Option<(usize, &str)>)> =
            vec![(self, None)];
        while let Some((node, edge)) = stack.pop() {
            let id = next_id;
            next_id += 1;

            info.push(node.dot_label(id));
            if let Some((parent_id, label)) = edge {
                info.push(format!(
                    "\tnode_{parent_id} -- node_{id} [ label = \"{label}\" ];\n",
                ));
            }

            let children = node.children.iter()
                .rev()
                .map(|child| (child, Some((id, node.edge_label(child)))));
            stack.extend(children);
        }
        format!("graph ObliqueTree {{\n{}}}\n", info.concat())
    }


    /// Write the tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(self.to_dot().as_bytes())?;
        Ok(())
    }


    fn dot_label(&self, id: usize) -> String {
        let counts = format!("{:?}", self.total_count);
        match self.kind {
            NodeKind::Leaf => format!(
                "\tnode_{id} [ label = \"{name}\\n{counts}\", shape = box ];\n",
                name = self.name,
            ),
            NodeKind::Decision => {
                let features = self.feature_indices.iter()
                    .map(|f| format!("x{f}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "\tnode_{id} [ label = \"{name}\\n{counts}\\n[{features}]\" ];\n",
                    name = self.name,
                )
            },
        }
    }


    /// "Yes" stands for a negative score.
    fn edge_label(&self, child: &ExportedNode) -> &'static str {
        match child.sub_training_set.first() {
            Some(i) if self.left_sub_training_set.contains(i) => "Yes",
            Some(_) => "No",
            None => "",
        }
    }
}
