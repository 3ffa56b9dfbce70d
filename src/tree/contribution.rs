//! Feature contributions.
//! 
//! Along a root-to-leaf path every decision node shifts the class
//! distribution from its own to the one of the child the path takes.
//! That shift is shared among the features the node splits on,
//! in proportion to their absolute weights.
//! Summed over features, a leaf's contributions give
//! `normalize(leaf) - normalize(root)` for every class.
use crate::error::{ObliqueTreeError, Result};
use super::{
    node::*,
    oblique_tree::ClassifiedTree,
};


/// Returns `|x| / Σ|x|` for each entry,
/// or `None` if the entries sum to zero.
/// 
/// ```
/// use obliquetree::normalize;
/// assert_eq!(normalize(&[1.0, -3.0]), Some(vec![0.25, 0.75]));
/// assert_eq!(normalize(&[0.0, 0.0]), None);
/// ```
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let total = values.iter()
        .map(|x| x.abs())
        .sum::<f64>();

    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let normalized = values.iter()
        .map(|x| x.abs() / total)
        .collect();
    Some(normalized)
}


/// Class distribution of a node.
#[inline]
pub(crate) fn class_distribution(name: &str, counts: &[usize])
    -> Result<Vec<f64>>
{
    let counts = counts.iter()
        .map(|&c| c as f64)
        .collect::<Vec<_>>();
    normalize(&counts).ok_or_else(|| {
        let message = format!("no training point reached node \"{name}\"");
        ObliqueTreeError::DegenerateInput(message)
    })
}


/// Sub-trees of decision nodes at this depth or deeper
/// are attributed on the current thread without recursion.
const PARALLEL_DEPTH: usize = 8;


impl ClassifiedTree {
    /// Write the feature contribution of every leaf.
    /// 
    /// Returns `Err(DegenerateInput)` if a node on the way
    /// has no training point,
    /// or a decision node splits on no feature.
    pub fn attribute_features(mut self) -> Result<Self> {
        let n_label = self.n_label();
        if let Node::Decision(root) = &mut self.root {
            let root_mean = class_distribution(&root.name, &root.total_count)?;
            let acc = FeatureContribution::new();
            descend(root, &root_mean, &acc, n_label, 0)?;
        }

        log::debug!(
            "attributed feature contributions to {} leaves",
            self.root.leaves(),
        );
        Ok(self)
    }
}


/// Push the contributions of `parent` into both sub-trees.
/// The sub-trees are disjoint, so they are processed in parallel.
fn descend(
    parent: &mut DecisionNode,
    parent_mean: &[f64],
    acc: &FeatureContribution,
    n_label: usize,
    depth: usize,
) -> Result<()>
{
    if depth >= PARALLEL_DEPTH {
        return descend_serial(parent, parent_mean.to_vec(), acc.clone(), n_label);
    }

    let weights = split_weights(parent)?;
    let left = parent.left.as_deref_mut();
    let right = parent.right.as_deref_mut();
    let (left, right) = rayon::join(
        || visit(left, parent_mean, &weights, acc, n_label, depth),
        || visit(right, parent_mean, &weights, acc, n_label, depth),
    );
    left?;
    right
}


fn visit(
    child: Option<&mut Node>,
    parent_mean: &[f64],
    weights: &[(usize, f64)],
    acc: &FeatureContribution,
    n_label: usize,
    depth: usize,
) -> Result<()>
{
    let child = match child {
        Some(child) => child,
        None => return Ok(()),
    };

    let (child_mean, acc) = shift(child, parent_mean, weights, acc, n_label)?;
    match child {
        Node::Leaf(leaf) => {
            leaf.feature_contribution = acc;
            Ok(())
        },
        Node::Decision(decision) => {
            descend(decision, &child_mean, &acc, n_label, depth + 1)
        },
    }
}


/// Same as [`descend`], with an explicit stack.
fn descend_serial(
    root: &mut DecisionNode,
    root_mean: Vec<f64>,
    acc: FeatureContribution,
    n_label: usize,
) -> Result<()>
{
    let mut stack = vec![(root, root_mean, acc)];
    while let Some((parent, parent_mean, acc)) = stack.pop() {
        let weights = split_weights(parent)?;
        let children = [parent.left.as_deref_mut(), parent.right.as_deref_mut()];
        for child in children.into_iter().flatten() {
            let (child_mean, acc) = shift(
                child, &parent_mean, &weights, &acc, n_label,
            )?;
            match child {
                Node::Leaf(leaf) => { leaf.feature_contribution = acc; },
                Node::Decision(decision) => {
                    stack.push((decision, child_mean, acc));
                },
            }
        }
    }
    Ok(())
}


fn split_weights(parent: &DecisionNode) -> Result<Vec<(usize, f64)>> {
    parent.split.feature_weights()
        .ok_or_else(|| {
            let message = format!(
                "decision node \"{}\" splits on no feature",
                parent.name,
            );
            ObliqueTreeError::DegenerateInput(message)
        })
}


/// Returns the class distribution of `child`
/// and the accumulator extended by the move into it.
/// Each branch owns its copy of the accumulator.
fn shift(
    child: &Node,
    parent_mean: &[f64],
    weights: &[(usize, f64)],
    acc: &FeatureContribution,
    n_label: usize,
) -> Result<(Vec<f64>, FeatureContribution)>
{
    let child_mean = class_distribution(child.name(), child.total_count())?;

    let mut acc = acc.clone();
    for &(feature, weight) in weights {
        let contribution = acc.entry(feature)
            .or_insert_with(|| vec![0.0; n_label]);
        contribution.iter_mut()
            .zip(child_mean.iter().zip(parent_mean))
            .for_each(|(c, (y, p))| { *c += weight * (y - p); });
    }
    Ok((child_mean, acc))
}
