//! The whole pipeline:
//! validate → build → classify → attribute → export.
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::sample::{TrainingSet, parse_training_set, parse_labels};
use crate::tree::{
    ClassifiedTree,
    ExportedNode,
    LeafNaming,
    TreeBuilder,
};


/// Everything [`ObliqueTreeExporter::run`] needs.
/// In JSON the keys are
/// `trainingSet`, `labelSet`, `nodeTreePath`, and `decisionNodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSpec {
    /// One row of features per training point.
    pub training_set: Vec<Vec<f64>>,
    /// One label per training point.
    pub label_set: Vec<i64>,
    /// The path string of each decision node.
    pub node_tree_path: Vec<String>,
    /// The coefficient row (weights, then bias) of each decision node.
    pub decision_nodes: Vec<Vec<f64>>,
}


impl TreeSpec {
    /// Read a `TreeSpec` from JSON.
    #[inline]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Build a `TreeSpec` whose training and label sets
    /// come from raw text blocks without header rows.
    pub fn from_text(
        training: &str,
        labels: &str,
        node_tree_path: Vec<String>,
        decision_nodes: Vec<Vec<f64>>,
    ) -> Result<Self>
    {
        let training_set = parse_training_set(training, false)?;
        let label_set = parse_labels(labels, false)?;
        Ok(Self { training_set, label_set, node_tree_path, decision_nodes, })
    }
}


/// Runs the pipeline and returns the exported tree.
/// 
/// # Example
/// ```
/// use obliquetree::{ObliqueTreeExporter, LeafNaming, TreeSpec};
/// let spec = TreeSpec {
///     training_set: vec![
///         vec![0.0,  1.0, 0.0, 0.0, 0.0],
///         vec![0.0, -1.0, 0.0, 0.0, 0.0],
///     ],
///     label_set: vec![0, 1],
///     node_tree_path: vec!["root".to_string()],
///     decision_nodes: vec![vec![0.0, -0.7, 0.0, 1.0, 0.0, -0.46]],
/// };
/// let root = ObliqueTreeExporter::new()
///     .leaf_naming(LeafNaming::Sided)
///     .run(&spec)
///     .unwrap();
/// assert_eq!(root.children.len(), 2);
/// assert_eq!(root.children[0].name, "root-llf");
/// ```
#[derive(Debug, Clone)]
pub struct ObliqueTreeExporter {
    leaf_naming: LeafNaming,
    feature_contributions: bool,
}


impl Default for ObliqueTreeExporter {
    fn default() -> Self {
        Self {
            leaf_naming: LeafNaming::default(),
            feature_contributions: true,
        }
    }
}


impl ObliqueTreeExporter {
    /// Construct a new instance of [`ObliqueTreeExporter`].
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the naming rule for leaves created while classifying.
    /// Default value is `LeafNaming::Sided`.
    #[inline]
    pub fn leaf_naming(mut self, leaf_naming: LeafNaming) -> Self {
        self.leaf_naming = leaf_naming;
        self
    }


    /// Set whether to compute feature contributions.
    /// If `false`, every `featureContribution` is left empty
    /// and unreached nodes are not an error.
    /// Default is `true`.
    #[inline]
    pub fn feature_contributions(mut self, flag: bool) -> Self {
        self.feature_contributions = flag;
        self
    }


    /// Run the pipeline on `spec`.
    pub fn run(&self, spec: &TreeSpec) -> Result<ExportedNode> {
        let sample = TrainingSet::new(
            spec.training_set.clone(), spec.label_set.clone(),
        )?;
        self.run_with(&sample, &spec.node_tree_path, &spec.decision_nodes)
    }


    /// Run the pipeline on raw text blocks without header rows.
    pub fn run_text<S>(
        &self,
        training: &str,
        labels: &str,
        node_tree_path: &[S],
        decision_nodes: &[Vec<f64>],
    ) -> Result<ExportedNode>
        where S: AsRef<str>
    {
        let sample = TrainingSet::from_text(training, labels, false)?;
        self.run_with(&sample, node_tree_path, decision_nodes)
    }


    /// Run the pipeline on an already validated training set.
    pub fn run_with<S>(
        &self,
        sample: &TrainingSet,
        node_tree_path: &[S],
        decision_nodes: &[Vec<f64>],
    ) -> Result<ExportedNode>
        where S: AsRef<str>
    {
        let tree = self.classified_tree(sample, node_tree_path, decision_nodes)?;
        let root = tree.export();
        log::info!(
            "exported {} nodes ({} leaves) for {} points",
            root.nodes().count(),
            root.leaves().count(),
            sample.len(),
        );
        Ok(root)
    }


    /// Run every stage but the export,
    /// and return the tree itself.
    pub fn classified_tree<S>(
        &self,
        sample: &TrainingSet,
        node_tree_path: &[S],
        decision_nodes: &[Vec<f64>],
    ) -> Result<ClassifiedTree>
        where S: AsRef<str>
    {
        log::info!(
            "building an oblique tree from {} decision nodes",
            decision_nodes.len(),
        );
        let tree = TreeBuilder::new(node_tree_path, decision_nodes)
            .leaf_naming(self.leaf_naming)
            .build()?;

        log::info!(
            "classifying {} points with {} classes",
            sample.len(),
            sample.n_label(),
        );
        let tree = tree.classify(sample)?;

        if !self.feature_contributions {
            log::debug!("feature contributions are disabled");
            return Ok(tree);
        }

        tree.attribute_features()
    }
}
