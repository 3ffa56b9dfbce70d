//! Defines the inner representation
//! of the oblique decision tree.
use serde::{Serialize, Deserialize};

use super::path::LeftRight;
use super::split_rule::Hyperplane;

use std::collections::BTreeMap;
use std::fmt;


/// Per-feature, per-class contribution of a leaf.
/// Maps a feature index to a vector of length `n_label`.
pub type FeatureContribution = BTreeMap<usize, Vec<f64>>;


/// How leaves created during classification are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafNaming {
    /// `<parent>-llf` for a left leaf, `<parent>-rlf` for a right leaf.
    #[default]
    Sided,


    /// `<parent>-llf` on both sides,
    /// so sibling leaves share a name.
    Legacy,
}


impl LeafNaming {
    /// Returns the name of a leaf attached to `parent` on `side`.
    #[inline]
    pub fn leaf_name(&self, parent: &str, side: LeftRight) -> String {
        let suffix = match (self, side) {
            (LeafNaming::Sided, LeftRight::Right) => "-rlf",
            _ => "-llf",
        };
        format!("{parent}{suffix}")
    }
}


/// Enumeration of `DecisionNode` and `LeafNode`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that splits by a hyperplane.
    Decision(DecisionNode),


    /// A node created while classifying the training set.
    Leaf(LeafNode),
}


/// Represents the decision nodes of the tree.
/// A decision node owns up to two children.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionNode {
    pub(crate) name: String,
    pub(crate) split: Hyperplane,

    pub(crate) total_count: Vec<usize>,
    pub(crate) left_count: Vec<usize>,
    pub(crate) right_count: Vec<usize>,

    pub(crate) sub_training_set: Vec<usize>,
    pub(crate) left_training_set: Vec<usize>,
    pub(crate) right_training_set: Vec<usize>,

    pub(crate) left: Option<Box<Node>>,
    pub(crate) right: Option<Box<Node>>,
}


impl DecisionNode {
    /// Returns a `DecisionNode` with no children and no statistics.
    #[inline]
    pub(crate) fn new(name: String, split: Hyperplane) -> Self {
        Self {
            name,
            split,
            total_count: Vec::new(),
            left_count: Vec::new(),
            right_count: Vec::new(),
            sub_training_set: Vec::new(),
            left_training_set: Vec::new(),
            right_training_set: Vec::new(),
            left: None,
            right: None,
        }
    }


    /// Returns the name (path string) of this node.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the splitting rule of this node.
    #[inline]
    pub fn split(&self) -> &Hyperplane {
        &self.split
    }


    /// Number of training points per class that reached this node.
    #[inline]
    pub fn total_count(&self) -> &[usize] {
        &self.total_count[..]
    }


    /// Number of training points per class routed left.
    #[inline]
    pub fn left_count(&self) -> &[usize] {
        &self.left_count[..]
    }


    /// Number of training points per class routed right.
    #[inline]
    pub fn right_count(&self) -> &[usize] {
        &self.right_count[..]
    }


    /// Indices of the training points that reached this node.
    #[inline]
    pub fn sub_training_set(&self) -> &[usize] {
        &self.sub_training_set[..]
    }


    /// Indices of the training points routed left.
    #[inline]
    pub fn left_training_set(&self) -> &[usize] {
        &self.left_training_set[..]
    }


    /// Indices of the training points routed right.
    #[inline]
    pub fn right_training_set(&self) -> &[usize] {
        &self.right_training_set[..]
    }


    /// Returns the left child.
    #[inline]
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }


    /// Returns the right child.
    #[inline]
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }


    /// Returns the child on `side`.
    #[inline]
    pub fn child(&self, side: LeftRight) -> Option<&Node> {
        match side {
            LeftRight::Left  => self.left(),
            LeftRight::Right => self.right(),
        }
    }


    #[inline]
    pub(crate) fn child_mut(&mut self, side: LeftRight) -> Option<&mut Node> {
        match side {
            LeftRight::Left  => self.left.as_deref_mut(),
            LeftRight::Right => self.right.as_deref_mut(),
        }
    }


    #[inline]
    pub(crate) fn slot_mut(&mut self, side: LeftRight)
        -> &mut Option<Box<Node>>
    {
        match side {
            LeftRight::Left  => &mut self.left,
            LeftRight::Right => &mut self.right,
        }
    }


    /// Record that the `idx`-th point of class `class` reached this node.
    #[inline]
    pub(crate) fn record(&mut self, idx: usize, class: usize) {
        self.sub_training_set.push(idx);
        self.total_count[class] += 1;
    }


    /// Record that the `idx`-th point of class `class` went to `side`.
    #[inline]
    pub(crate) fn tally(&mut self, side: LeftRight, idx: usize, class: usize) {
        match side {
            LeftRight::Left => {
                self.left_count[class] += 1;
                self.left_training_set.push(idx);
            },
            LeftRight::Right => {
                self.right_count[class] += 1;
                self.right_training_set.push(idx);
            },
        }
    }
}


/// Represents the leaf nodes of the tree.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(crate) name: String,
    pub(crate) split: Hyperplane,
    pub(crate) total_count: Vec<usize>,
    pub(crate) sub_training_set: Vec<usize>,
    pub(crate) feature_contribution: FeatureContribution,
}


impl LeafNode {
    /// Returns an empty `LeafNode`.
    /// The point that made the classifier create it
    /// is recorded right after.
    #[inline]
    pub(crate) fn materialize(
        name: String,
        n_feature: usize,
        n_label: usize,
    ) -> Self
    {
        Self {
            name,
            split: Hyperplane::zeros(n_feature),
            total_count: vec![0; n_label],
            sub_training_set: Vec::new(),
            feature_contribution: FeatureContribution::new(),
        }
    }


    /// Returns the name of this leaf.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the all-zero placeholder split.
    #[inline]
    pub fn split(&self) -> &Hyperplane {
        &self.split
    }


    /// Number of training points per class that reached this leaf.
    #[inline]
    pub fn total_count(&self) -> &[usize] {
        &self.total_count[..]
    }


    /// Indices of the training points that reached this leaf.
    #[inline]
    pub fn sub_training_set(&self) -> &[usize] {
        &self.sub_training_set[..]
    }


    /// Per-feature, per-class contribution along the path to this leaf.
    /// Empty until
    /// [`ClassifiedTree::attribute_features`](crate::ClassifiedTree::attribute_features)
    /// runs.
    #[inline]
    pub fn feature_contribution(&self) -> &FeatureContribution {
        &self.feature_contribution
    }


    #[inline]
    pub(crate) fn record(&mut self, idx: usize, class: usize) {
        self.sub_training_set.push(idx);
        self.total_count[class] += 1;
    }
}


impl Node {
    /// Returns the name of this node.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Node::Decision(node) => node.name(),
            Node::Leaf(node) => node.name(),
        }
    }


    /// Returns the split of this node.
    #[inline]
    pub fn split(&self) -> &Hyperplane {
        match self {
            Node::Decision(node) => node.split(),
            Node::Leaf(node) => node.split(),
        }
    }


    /// Returns the per-class counts of this node.
    #[inline]
    pub fn total_count(&self) -> &[usize] {
        match self {
            Node::Decision(node) => node.total_count(),
            Node::Leaf(node) => node.total_count(),
        }
    }


    /// Returns the indices of the points that reached this node.
    #[inline]
    pub fn sub_training_set(&self) -> &[usize] {
        match self {
            Node::Decision(node) => node.sub_training_set(),
            Node::Leaf(node) => node.sub_training_set(),
        }
    }


    /// Returns the indices of the features this node splits on.
    #[inline]
    pub fn feature_indices(&self) -> Vec<usize> {
        self.split().feature_indices()
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }


    /// Returns the decision node, if it is one.
    #[inline]
    pub fn as_decision(&self) -> Option<&DecisionNode> {
        match self {
            Node::Decision(node) => Some(node),
            Node::Leaf(_) => None,
        }
    }


    /// Returns the leaf, if it is one.
    #[inline]
    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Node::Leaf(node) => Some(node),
            Node::Decision(_) => None,
        }
    }


    /// Returns the children of this node, left first.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        let (left, right) = match self {
            Node::Decision(node) => (node.left(), node.right()),
            Node::Leaf(_) => (None, None),
        };
        left.into_iter().chain(right)
    }


    /// Iterate over this sub-tree in pre-order.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }


    /// Returns the depth of this sub-tree.
    /// A single node has depth `0`.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self, 0_usize)];
        while let Some((node, d)) = stack.pop() {
            depth = depth.max(d);
            stack.extend(node.children().map(|child| (child, d + 1)));
        }
        depth
    }


    /// Returns the number of leaves of this sub-tree.
    #[inline]
    pub fn leaves(&self) -> usize {
        self.iter().filter(|node| node.is_leaf()).count()
    }


    /// Zero-fill every count vector with `n_label` classes.
    pub(crate) fn init_statistics(&mut self, n_label: usize) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Decision(node) => {
                    node.total_count = vec![0; n_label];
                    node.left_count = vec![0; n_label];
                    node.right_count = vec![0; n_label];
                    node.sub_training_set.clear();
                    node.left_training_set.clear();
                    node.right_training_set.clear();
                    stack.extend(node.left.as_deref_mut());
                    stack.extend(node.right.as_deref_mut());
                },
                Node::Leaf(node) => {
                    node.total_count = vec![0; n_label];
                    node.sub_training_set.clear();
                    node.feature_contribution.clear();
                },
            }
        }
    }
}


// Unlinks the sub-tree before it is freed,
// so that deep trees do not exhaust the stack.
impl Drop for DecisionNode {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            if let Node::Decision(decision) = &mut *node {
                stack.extend(decision.left.take());
                stack.extend(decision.right.take());
            }
        }
    }
}


/// Pre-order iterator over the nodes of a tree.
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}


impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Decision(decision) = node {
            self.stack.extend(decision.right());
            self.stack.extend(decision.left());
        }
        Some(node)
    }
}


impl fmt::Debug for DecisionNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("name", &self.name)
            .field("split", &self.split.coefficients())
            .field("total_count", &self.total_count)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}


impl fmt::Debug for LeafNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("name", &self.name)
            .field("total_count", &self.total_count)
            .field("feature_contribution", &self.feature_contribution)
            .finish()
    }
}


impl fmt::Debug for Node {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Decision(node) => write!(f, "{node:?}"),
            Node::Leaf(node) => write!(f, "{node:?}"),
        }
    }
}
