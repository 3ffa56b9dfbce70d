#![warn(missing_docs)]

//! 
//! A crate that reconstructs and analyzes oblique decision trees.
//! An oblique decision tree splits each internal node on a
//! linear combination of features, `bias + Σ_i x[i] * w[i] < 0`,
//! instead of a single feature.
//! 
//! Given the coefficient rows of the decision nodes and a path string
//! for each (`root`, `l`, `lr`, ...), this crate
//! 
//! - rebuilds the binary tree ([`TreeBuilder`]),
//! - routes every training point through it,
//!     counting per class and creating leaves on demand
//!     ([`ObliqueTree::classify`]),
//! - splits the change of class distribution from the root to each leaf
//!     among the features used on the way
//!     ([`ClassifiedTree::attribute_features`]),
//! - exports an n-ary, serializable tree for a renderer
//!     ([`ClassifiedTree::export`]).
//! 
//! [`ObliqueTreeExporter`] runs all of the above.
//! 
//! ```
//! use obliquetree::ObliqueTreeExporter;
//! let training = "0,1,0,0,0\n0,-1,0,0,0\n";
//! let labels = "0\n1\n";
//! let root = ObliqueTreeExporter::new()
//!     .run_text(
//!         training,
//!         labels,
//!         &["root"],
//!         &[vec![0.0, -0.7, 0.0, 1.0, 0.0, -0.46]],
//!     )
//!     .unwrap();
//! let json = root.to_json().unwrap();
//! assert!(json.contains("\"featureContribution\""));
//! ```

pub mod error;
pub mod sample;
pub mod tree;
pub mod exporter;
pub mod report;
pub mod prelude;


pub use error::{ObliqueTreeError, Result};

pub use sample::{
    TrainingSet,
    SampleReader,
    parse_training_set,
    parse_labels,
};

pub use tree::{
    TreeBuilder,
    ObliqueTree,
    ClassifiedTree,
    Node,
    DecisionNode,
    LeafNode,
    LeafNaming,
    LeftRight,
    TreePath,
    Hyperplane,
    FeatureContribution,
    ExportedNode,
    NodeKind,
    normalize,
};

pub use exporter::{ObliqueTreeExporter, TreeSpec};
