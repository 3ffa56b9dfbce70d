use std::path::Path;
use std::fs;

use crate::error::{ObliqueTreeError, Result};
use super::training_set::TrainingSet;


/// A struct that returns [`TrainingSet`].
/// Using this struct, one can read the training block
/// and the label block from two CSV files.
/// # Example
/// The following code reads a pair of CSV files.
/// ```no_run
/// use obliquetree::SampleReader;
/// let sample = SampleReader::default()
///     .features("/path/to/training_set.csv")
///     .labels("/path/to/label_set.csv")
///     .has_header(true)
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P> {
    features: Option<P>,
    labels: Option<P>,
    has_header: bool,
}


impl<P> Default for SampleReader<P> {
    fn default() -> Self {
        Self {
            features: None,
            labels: None,
            has_header: false,
        }
    }
}


impl<P> SampleReader<P> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the flag whether the files have a header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P> SampleReader<P>
    where P: AsRef<Path>
{
    /// Set the file that holds the training points.
    pub fn features(mut self, file: P) -> Self {
        self.features = Some(file);
        self
    }


    /// Set the file that holds the labels.
    pub fn labels(mut self, file: P) -> Self {
        self.labels = Some(file);
        self
    }


    /// Reads the files based on the arguments,
    /// and returns [`TrainingSet`].
    /// This method consumes `self.`
    pub fn read(self) -> Result<TrainingSet> {
        let features = self.features.ok_or_else(|| {
            let message = "the training set file is not set. \
                Use `SampleReader::features`.".to_string();
            ObliqueTreeError::Schema(message)
        })?;
        let labels = self.labels.ok_or_else(|| {
            let message = "the label set file is not set. \
                Use `SampleReader::labels`.".to_string();
            ObliqueTreeError::Schema(message)
        })?;

        log::debug!(
            "reading training set from {} and labels from {}",
            features.as_ref().display(),
            labels.as_ref().display(),
        );

        let features = fs::read_to_string(features)?;
        let labels = fs::read_to_string(labels)?;
        TrainingSet::from_text(&features, &labels, self.has_header)
    }
}
