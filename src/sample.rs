//! Training data: the feature matrix and the label vector
//! that are pushed through an oblique decision tree.

// Parses raw comma-separated text blocks.
pub(crate) mod parser;
// Provides the training set struct.
pub(crate) mod training_set;

// Provides a struct that reads the text blocks from files.
pub(crate) mod sample_reader;


pub use parser::{parse_training_set, parse_labels};
pub use sample_reader::SampleReader;
pub use training_set::TrainingSet;
