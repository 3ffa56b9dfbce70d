//! The owners of the tree between the passes.
//! 
//! [`TreeBuilder`](crate::TreeBuilder) produces an [`ObliqueTree`],
//! [`ObliqueTree::classify`] consumes it and produces a [`ClassifiedTree`],
//! and [`ClassifiedTree::attribute_features`] consumes and returns that.
use super::node::{Node, LeafNaming};


/// A tree of decision nodes, before any point has been classified.
#[derive(Debug, Clone, PartialEq)]
pub struct ObliqueTree {
    pub(crate) root: Node,
    pub(crate) n_feature: usize,
    pub(crate) leaf_naming: LeafNaming,
}


impl ObliqueTree {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the number of features the splits are defined on.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Returns the naming rule for leaves created by
    /// [`ObliqueTree::classify`].
    #[inline]
    pub fn leaf_naming(&self) -> LeafNaming {
        self.leaf_naming
    }
}


/// A tree whose nodes carry the statistics of a training set.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTree {
    pub(crate) root: Node,
    pub(crate) n_feature: usize,
    pub(crate) classes: Vec<i64>,
}


impl ClassifiedTree {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the number of features the splits are defined on.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Returns the distinct labels in ascending order.
    /// The `k`-th entry of every count vector counts `classes()[k]`.
    #[inline]
    pub fn classes(&self) -> &[i64] {
        &self.classes[..]
    }


    /// Returns the number of distinct labels.
    #[inline]
    pub fn n_label(&self) -> usize {
        self.classes.len()
    }


    /// Iterate over the leaves in pre-order (left before right).
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.root.iter().filter(|node| node.is_leaf())
    }
}
