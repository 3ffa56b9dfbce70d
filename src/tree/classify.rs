//! Streams the training points through the tree.
use crate::error::{ObliqueTreeError, Result};
use crate::sample::TrainingSet;
use super::{
    node::*,
    path::LeftRight,
    oblique_tree::{ObliqueTree, ClassifiedTree},
};


impl ObliqueTree {
    /// Route every point of `sample` from the root,
    /// counting per class at each node it visits.
    /// 
    /// A point that leaves a decision node on a side
    /// with no child creates a leaf there;
    /// later points reaching that leaf stop at it.
    /// Points are routed one by one in index order.
    /// 
    /// Returns `Err(Schema)` if the width of `sample`
    /// differs from the width of the splits.
    pub fn classify(self, sample: &TrainingSet) -> Result<ClassifiedTree> {
        if sample.n_feature() != self.n_feature {
            let message = format!(
                "the training set has {} features, the splits have {}",
                sample.n_feature(),
                self.n_feature,
            );
            return Err(ObliqueTreeError::Schema(message));
        }

        let Self { mut root, n_feature, leaf_naming } = self;
        let n_label = sample.n_label();
        root.init_statistics(n_label);

        let router = Router { n_feature, n_label, leaf_naming };
        let mut created = 0_usize;
        for (idx, point, class) in sample.iter() {
            if router.route(&mut root, point, idx, class) {
                created += 1;
            }
        }

        log::debug!(
            "classified {} points into {} leaves ({created} created)",
            sample.len(),
            root.leaves(),
        );

        Ok(ClassifiedTree {
            root,
            n_feature,
            classes: sample.classes().to_vec(),
        })
    }
}


struct Router {
    n_feature: usize,
    n_label: usize,
    leaf_naming: LeafNaming,
}


impl Router {
    /// Route one point from `root` down to a leaf.
    /// Returns `true` if a leaf was created for it.
    fn route(
        &self,
        root: &mut Node,
        point: &[f64],
        idx: usize,
        class: usize,
    ) -> bool
    {
        let mut created = false;
        let mut node = root;
        loop {
            let decision = match node {
                Node::Leaf(leaf) => {
                    leaf.record(idx, class);
                    return created;
                },
                Node::Decision(decision) => decision,
            };

            decision.record(idx, class);
            let side = decision.split.split(point);
            decision.tally(side, idx, class);

            let parent = &decision.name;
            let slot = match side {
                LeftRight::Left  => &mut decision.left,
                LeftRight::Right => &mut decision.right,
            };
            let child = slot.get_or_insert_with(|| {
                created = true;
                let name = self.leaf_naming.leaf_name(parent, side);
                let leaf = LeafNode::materialize(
                    name, self.n_feature, self.n_label,
                );
                Box::new(Node::Leaf(leaf))
            });
            node = &mut **child;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    #[test]
    fn test_classify_materializes_leaves() {
        let paths = ["root"];
        let rows = vec![vec![0.0, -0.7, 0.0, 1.0, 0.0, -0.46]];
        let sample = TrainingSet::new(
            vec![
                vec![0.0,  1.0, 0.0, 0.0, 0.0],
                vec![0.0, -1.0, 0.0, 0.0, 0.0],
            ],
            vec![0, 1],
        ).unwrap();

        let tree = TreeBuilder::new(&paths, &rows)
            .build()
            .unwrap()
            .classify(&sample)
            .unwrap();

        let root = tree.root().as_decision().unwrap();
        assert_eq!(root.total_count(), &[1, 1]);
        assert_eq!(root.left_count(), &[1, 0]);
        assert_eq!(root.right_count(), &[0, 1]);
        assert_eq!(root.left_training_set(), &[0]);
        assert_eq!(root.right_training_set(), &[1]);

        let left = root.left().unwrap().as_leaf().unwrap();
        assert_eq!(left.name(), "root-llf");
        assert_eq!(left.total_count(), &[1, 0]);
        assert_eq!(left.sub_training_set(), &[0]);

        let right = root.right().unwrap().as_leaf().unwrap();
        assert_eq!(right.name(), "root-rlf");
        assert_eq!(right.total_count(), &[0, 1]);
    }


    #[test]
    fn test_classify_width_mismatch() {
        let paths = ["root"];
        let rows = vec![vec![1.0, 1.0, 0.0]];
        let sample = TrainingSet::new(vec![vec![1.0]], vec![0]).unwrap();
        let err = TreeBuilder::new(&paths, &rows)
            .build()
            .unwrap()
            .classify(&sample)
            .unwrap_err();
        assert!(matches!(err, ObliqueTreeError::Schema(_)));
    }
}
