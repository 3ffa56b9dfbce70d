//! The oblique decision tree and the passes over it:
//! build, classify, attribute, and export.

// Path strings that locate decision nodes.
pub(crate) mod path;
// Oblique splitting rule.
pub(crate) mod split_rule;
// Inner representation of the tree.
pub(crate) mod node;
// Owners of the tree between the passes.
pub(crate) mod oblique_tree;

pub(crate) mod builder;
pub(crate) mod classify;
pub(crate) mod contribution;
pub(crate) mod export;


pub use path::{LeftRight, TreePath};
pub use split_rule::Hyperplane;
pub use node::{
    Node,
    NodeIter,
    DecisionNode,
    LeafNode,
    LeafNaming,
    FeatureContribution,
};
pub use oblique_tree::{ObliqueTree, ClassifiedTree};
pub use builder::TreeBuilder;
pub use contribution::normalize;
pub use export::{ExportedNode, NodeKind};
