//! Exports the pipeline, the tree passes, and the training data.
//! 
pub use crate::exporter::{
    ObliqueTreeExporter,
    TreeSpec,
};


pub use crate::sample::{
    TrainingSet,
    SampleReader,
};


pub use crate::tree::{
    // Build -------------------------------------
    TreeBuilder,
    LeafNaming,


    // Passes ------------------------------------
    ObliqueTree,
    ClassifiedTree,
    Node,


    // Export ------------------------------------
    ExportedNode,
    NodeKind,
};


pub use crate::error::{
    ObliqueTreeError,
    Result,
};
