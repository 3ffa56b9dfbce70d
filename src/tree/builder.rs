use crate::error::{ObliqueTreeError, Result};
use super::{
    node::*,
    path::TreePath,
    split_rule::Hyperplane,
    oblique_tree::ObliqueTree,
};


/// A struct that builds [`ObliqueTree`].
/// `TreeBuilder` keeps the coefficient rows, their path strings,
/// and the parameters for the passes that follow.
/// 
/// The `k`-th path string locates the decision node
/// that splits by the `k`-th coefficient row.
/// A parent must appear before its children,
/// so `root` must come first.
/// 
/// # Example
/// 
/// ```
/// use obliquetree::{TreeBuilder, LeafNaming};
/// let paths = ["root", "l"];
/// let rows = vec![
///     vec![0.0, -0.7, 0.0, 1.0, 0.0, -0.46],
///     vec![1.0,  0.0, 0.0, 0.0, 0.0,  0.0],
/// ];
/// let tree = TreeBuilder::new(&paths, &rows)
///     .leaf_naming(LeafNaming::Sided)
///     .build()
///     .unwrap();
/// assert_eq!(tree.n_feature(), 5);
/// assert_eq!(tree.root().feature_indices(), vec![1, 3]);
/// ```
#[derive(Clone)]
pub struct TreeBuilder<'a, S> {
    paths: &'a [S],
    rows: &'a [Vec<f64>],
    leaf_naming: LeafNaming,
}


impl<'a, S> TreeBuilder<'a, S>
    where S: AsRef<str>
{
    /// Construct a new instance of [`TreeBuilder`].
    pub fn new(paths: &'a [S], rows: &'a [Vec<f64>]) -> Self {
        Self { paths, rows, leaf_naming: LeafNaming::default(), }
    }


    /// Set the naming rule for the leaves
    /// created while classifying.
    /// Default value is `LeafNaming::Sided`.
    #[inline]
    pub fn leaf_naming(mut self, leaf_naming: LeafNaming) -> Self {
        self.leaf_naming = leaf_naming;
        self
    }


    /// Build an [`ObliqueTree`] that holds decision nodes only.
    /// 
    /// Returns `Err(Schema)` if the rows and paths differ in number
    /// or the rows differ in width,
    /// and `Err(Structural)` if a path is malformed, repeated,
    /// or appears before its parent.
    pub fn build(&self) -> Result<ObliqueTree> {
        if self.paths.len() != self.rows.len() {
            let message = format!(
                "got {} path strings for {} coefficient rows",
                self.paths.len(),
                self.rows.len(),
            );
            return Err(ObliqueTreeError::Schema(message));
        }

        let width = match self.rows.first() {
            Some(row) => row.len(),
            None => {
                let message = "there is no decision node".to_string();
                return Err(ObliqueTreeError::Structural(message));
            },
        };

        let mut root: Option<Node> = None;
        for (path, row) in self.paths.iter().zip(self.rows) {
            let path = path.as_ref();
            if row.len() != width {
                let message = format!(
                    "the row of \"{path}\" has {} coefficients, expected {width}",
                    row.len(),
                );
                return Err(ObliqueTreeError::Schema(message));
            }

            let path = TreePath::parse(path)?;
            let split = Hyperplane::new(row.clone())?;
            let node = Node::Decision(DecisionNode::new(path.to_string(), split));

            if path.is_root() {
                if root.is_some() {
                    let message = "\"root\" appears more than once".to_string();
                    return Err(ObliqueTreeError::Structural(message));
                }
                root = Some(node);
                continue;
            }

            match root.as_mut() {
                Some(root) => attach(root, &path, node)?,
                None => {
                    let message = format!(
                        "\"{path}\" appears before \"root\""
                    );
                    return Err(ObliqueTreeError::Structural(message));
                },
            }
        }

        let root = root.ok_or_else(|| {
            let message = "there is no \"root\" path".to_string();
            ObliqueTreeError::Structural(message)
        })?;

        log::debug!(
            "built an oblique tree with {} decision nodes, depth {}",
            self.rows.len(),
            root.depth(),
        );

        Ok(ObliqueTree {
            root,
            n_feature: width - 1,
            leaf_naming: self.leaf_naming,
        })
    }
}


/// Walk from `root` along every move of `path` but the last,
/// then hang `node` on the last move.
fn attach(root: &mut Node, path: &TreePath, node: Node) -> Result<()> {
    let (parent, last) = match path.split_last() {
        Some(split) => split,
        None => {
            let message = "\"root\" appears more than once".to_string();
            return Err(ObliqueTreeError::Structural(message));
        },
    };

    let mut current = root;
    for (depth, &side) in parent.iter().enumerate() {
        current = match current {
            Node::Decision(decision) => decision.child_mut(side),
            Node::Leaf(_) => None,
        }
        .ok_or_else(|| {
            let message = format!(
                "the parent \"{}\" of \"{path}\" does not exist",
                path.prefix(depth + 1),
            );
            ObliqueTreeError::Structural(message)
        })?;
    }

    let decision = match current {
        Node::Decision(decision) => decision,
        Node::Leaf(_) => {
            let message = format!("the parent of \"{path}\" is a leaf");
            return Err(ObliqueTreeError::Structural(message));
        },
    };

    let slot = decision.slot_mut(last);
    if slot.is_some() {
        let message = format!("\"{path}\" appears more than once");
        return Err(ObliqueTreeError::Structural(message));
    }
    *slot = Some(Box::new(node));

    Ok(())
}
