use obliquetree::prelude::*;
use obliquetree::{normalize, LeftRight};

use approx::assert_abs_diff_eq;
use rand::prelude::*;
use rand::rngs::StdRng;

// Toy example  (o/x are the label 1/-1 examples)
// Both splits are oblique.
//
// 15|                     \
//   |                   5  \
//   |                  x    \     6
//   |                        \   x
// 10|       4                 \       ` . 0.5x + y = 16
//   |      x                   \             ` .   1
//   |                           \           o      ` .
//   |                            \   0
//  5|                             \ o                 2
//   |                              \                 o
//   |            3                  \
//   |           x                    \ x + 0.1y = 9.5
//   |_________________________________\__________________
//  0            5              10            15
//

fn toy_sample() -> TrainingSet {
    let x = [10.0, 14.0, 15.0, 5.0, 3.0,  8.0, 12.0];
    let y = [ 5.0,  8.0,  3.0, 1.0, 9.0, 13.0, 11.0];
    let points = x.iter()
        .zip(y)
        .map(|(&x, y)| vec![x, y])
        .collect::<Vec<_>>();
    let labels = vec![1, 1, 1, -1, -1, -1, -1];

    TrainingSet::new(points, labels).unwrap()
}


fn toy_tree() -> ClassifiedTree {
    let paths = ["root", "r"];
    let rows = vec![
        vec![1.0, 0.1, -9.5],
        vec![0.5, 1.0, -16.0],
    ];
    TreeBuilder::new(&paths, &rows)
        .build()
        .unwrap()
        .classify(&toy_sample())
        .unwrap()
        .attribute_features()
        .unwrap()
}


/// Builds a full tree of the given depth with random splits.
fn random_tree(rng: &mut StdRng, n_feature: usize, depth: usize)
    -> (Vec<String>, Vec<Vec<f64>>)
{
    let mut paths = vec!["root".to_string()];
    let mut frontier = vec![String::new()];
    for _ in 1..depth {
        frontier = frontier.into_iter()
            .flat_map(|p| [format!("{p}l"), format!("{p}r")])
            .collect();
        paths.extend(frontier.iter().cloned());
    }

    let rows = paths.iter()
        .map(|_| {
            (0..=n_feature)
                .map(|_| rng.gen_range(-1.0..1.0))
                .collect::<Vec<f64>>()
        })
        .collect();
    (paths, rows)
}


fn random_sample(rng: &mut StdRng, n_sample: usize, n_feature: usize)
    -> TrainingSet
{
    let points = (0..n_sample)
        .map(|_| {
            (0..n_feature)
                .map(|_| rng.gen_range(-2.0..2.0))
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<_>>();
    let labels = (0..n_sample)
        .map(|_| rng.gen_range(0..3))
        .collect::<Vec<i64>>();
    TrainingSet::new(points, labels).unwrap()
}


#[test]
fn toy_tree_shape() {
    let tree = toy_tree();
    assert_eq!(tree.classes(), &[-1, 1]);

    let names = tree.root()
        .iter()
        .map(|node| node.name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["root", "root-llf", "r", "r-llf", "r-rlf"]);

    let root = tree.root().as_decision().unwrap();
    assert_eq!(root.total_count(), &[4, 3]);
    assert_eq!(root.left_training_set(), &[3, 4, 5]);
    assert_eq!(root.right_training_set(), &[0, 1, 2, 6]);

    let r = root.right().unwrap().as_decision().unwrap();
    assert_eq!(r.total_count(), &[1, 3]);
    assert_eq!(r.left().unwrap().total_count(), &[0, 3]);
    assert_eq!(r.right().unwrap().total_count(), &[1, 0]);
    assert_eq!(r.right().unwrap().sub_training_set(), &[6]);
}


#[test]
fn toy_tree_contributions() {
    let tree = toy_tree();
    let root = tree.root().as_decision().unwrap();
    let r = root.right().unwrap().as_decision().unwrap();
    let leaf = r.left().unwrap().as_leaf().unwrap();

    let contribution = leaf.feature_contribution();
    let f0 = (1.0 / 1.1) * (-9.0 / 28.0) + (1.0 / 3.0) * -0.25;
    let f1 = (0.1 / 1.1) * (-9.0 / 28.0) + (2.0 / 3.0) * -0.25;
    assert_abs_diff_eq!(contribution[&0][0], f0, epsilon = 1e-12);
    assert_abs_diff_eq!(contribution[&1][0], f1, epsilon = 1e-12);
    assert_abs_diff_eq!(contribution[&0][1], -f0, epsilon = 1e-12);
    assert_abs_diff_eq!(contribution[&1][1], -f1, epsilon = 1e-12);
}


#[test]
fn single_root_scenario() {
    let paths = ["root"];
    let rows = vec![vec![0.0, -0.7, 0.0, 1.0, 0.0, -0.46]];
    let tree = TreeBuilder::new(&paths, &rows).build().unwrap();

    assert_eq!(tree.n_feature(), 5);
    assert!(!tree.root().is_leaf());
    assert_eq!(tree.root().feature_indices(), vec![1, 3]);
    assert_eq!(tree.root().children().count(), 0);

    let sample = TrainingSet::new(
        vec![
            vec![0.0,  1.0, 0.0, 0.0, 0.0],
            vec![0.0, -1.0, 0.0, 0.0, 0.0],
        ],
        vec![0, 1],
    ).unwrap();
    let tree = tree.classify(&sample).unwrap();
    let root = tree.root().as_decision().unwrap();

    let left = root.child(LeftRight::Left).unwrap();
    assert!(left.is_leaf());
    assert_eq!(left.total_count(), &[1, 0]);
    assert_eq!(left.sub_training_set(), &[0]);

    let right = root.child(LeftRight::Right).unwrap();
    assert!(right.is_leaf());
    assert_eq!(right.total_count(), &[0, 1]);
    assert_eq!(right.sub_training_set(), &[1]);
}


#[test]
fn legacy_leaf_naming() {
    let paths = ["root"];
    let rows = vec![vec![1.0, 0.0]];
    let sample = TrainingSet::new(vec![vec![-1.0], vec![1.0]], vec![0, 1])
        .unwrap();

    let tree = TreeBuilder::new(&paths, &rows)
        .leaf_naming(LeafNaming::Legacy)
        .build()
        .unwrap()
        .classify(&sample)
        .unwrap();
    let names = tree.leaves()
        .map(|leaf| leaf.name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["root-llf", "root-llf"]);
}


#[test]
fn build_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let (paths, rows) = random_tree(&mut rng, 4, 4);
    let a = TreeBuilder::new(&paths, &rows).build().unwrap();
    let b = TreeBuilder::new(&paths, &rows).build().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.root().iter().count(), paths.len());
}


#[test]
fn classification_properties() {
    let mut rng = StdRng::seed_from_u64(1234);
    for depth in 1..=4 {
        let n_feature = 3;
        let (paths, rows) = random_tree(&mut rng, n_feature, depth);
        let sample = random_sample(&mut rng, 300, n_feature);

        let tree = TreeBuilder::new(&paths, &rows)
            .build()
            .unwrap()
            .classify(&sample)
            .unwrap();

        // The root sees every point.
        let root_total = tree.root().total_count().iter().sum::<usize>();
        assert_eq!(root_total, sample.len());

        // Every point ends in exactly one leaf, once.
        let mut seen = vec![0_usize; sample.len()];
        for leaf in tree.leaves() {
            for &i in leaf.sub_training_set() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));

        for node in tree.root().iter() {
            let decision = match node.as_decision() {
                Some(decision) => decision,
                None => continue,
            };

            // Count conservation.
            for k in 0..tree.n_label() {
                assert_eq!(
                    decision.left_count()[k] + decision.right_count()[k],
                    decision.total_count()[k],
                );
            }

            // Routing consistency.
            let split = decision.split();
            for &i in decision.left_training_set() {
                assert!(split.score(&sample.points()[i]) < 0.0);
            }
            for &i in decision.right_training_set() {
                assert!(split.score(&sample.points()[i]) >= 0.0);
            }

            // Children see exactly what was routed to them.
            if let Some(left) = decision.left() {
                assert_eq!(left.sub_training_set(), decision.left_training_set());
            }
            if let Some(right) = decision.right() {
                assert_eq!(right.sub_training_set(), decision.right_training_set());
            }
        }
    }
}


#[test]
fn contribution_closure() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut checked = 0;
    for depth in 1..=3 {
        for _ in 0..5 {
            let n_feature = 4;
            let (paths, rows) = random_tree(&mut rng, n_feature, depth);
            let sample = random_sample(&mut rng, 500, n_feature);

            let tree = TreeBuilder::new(&paths, &rows)
                .build()
                .unwrap()
                .classify(&sample)
                .unwrap();

            let has_empty_node = tree.root()
                .iter()
                .any(|node| node.total_count().iter().sum::<usize>() == 0);

            let tree = match tree.attribute_features() {
                Ok(tree) => tree,
                Err(ObliqueTreeError::DegenerateInput(_)) => {
                    assert!(has_empty_node);
                    continue;
                },
                Err(e) => panic!("unexpected error: {e}"),
            };

            let as_f64 = |counts: &[usize]| {
                counts.iter().map(|&c| c as f64).collect::<Vec<_>>()
            };
            let root_mean = normalize(&as_f64(tree.root().total_count()))
                .unwrap();

            for leaf in tree.leaves() {
                let leaf = leaf.as_leaf().unwrap();
                let leaf_mean = normalize(&as_f64(leaf.total_count())).unwrap();
                for k in 0..tree.n_label() {
                    let sum = leaf.feature_contribution()
                        .values()
                        .map(|c| c[k])
                        .sum::<f64>();
                    assert_abs_diff_eq!(
                        sum, leaf_mean[k] - root_mean[k], epsilon = 1e-9
                    );
                }
            }
            checked += 1;
        }
    }
    assert!(checked > 0);
}


#[test]
fn siblings_do_not_share_contributions() {
    let tree = toy_tree();
    let root = tree.root().as_decision().unwrap();

    // The left leaf only passed the root.
    let left = root.left().unwrap().as_leaf().unwrap();
    let delta = 1.0 - 4.0 / 7.0;
    assert_abs_diff_eq!(left.feature_contribution()[&0][0], delta / 1.1, epsilon = 1e-12);
    assert_abs_diff_eq!(left.feature_contribution()[&1][0], 0.1 * delta / 1.1, epsilon = 1e-12);

    // The two leaves under "r" share the root part but not the "r" part.
    let r = root.right().unwrap().as_decision().unwrap();
    let a = r.left().unwrap().as_leaf().unwrap().feature_contribution();
    let b = r.right().unwrap().as_leaf().unwrap().feature_contribution();
    let root_part = (1.0 / 1.1) * (0.25 - 4.0 / 7.0);
    assert_abs_diff_eq!(a[&0][0] - (1.0 / 3.0) * (0.0 - 0.25), root_part, epsilon = 1e-12);
    assert_abs_diff_eq!(b[&0][0] - (1.0 / 3.0) * (1.0 - 0.25), root_part, epsilon = 1e-12);
}
