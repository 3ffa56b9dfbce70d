use polars::prelude::*;
use rayon::prelude::*;

use crate::error::{ObliqueTreeError, Result};
use super::parser::{parse_training_set, parse_labels};


/// Struct `TrainingSet` holds the training points and their labels.
/// 
/// Labels are arbitrary integers.
/// Per-label statistics in this crate are indexed by *class index*,
/// the position of a label in [`TrainingSet::classes`],
/// which lists the distinct labels in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    points: Vec<Vec<f64>>,
    labels: Vec<i64>,
    classes: Vec<i64>,
    n_feature: usize,
}


impl TrainingSet {
    /// Construct a new instance of `TrainingSet`.
    /// Returns `Err(Schema)` if the number of points and labels differ,
    /// the points have different widths, or there are no points.
    pub fn new(points: Vec<Vec<f64>>, labels: Vec<i64>) -> Result<Self> {
        if points.len() != labels.len() {
            let message = format!(
                "the training set has {} points but the label set has {} labels",
                points.len(),
                labels.len(),
            );
            return Err(ObliqueTreeError::Schema(message));
        }

        let n_feature = match points.first() {
            Some(point) => point.len(),
            None => {
                let message = "the training set is empty".to_string();
                return Err(ObliqueTreeError::Schema(message));
            },
        };

        if let Some((i, point)) = points.iter()
            .enumerate()
            .find(|(_, point)| point.len() != n_feature)
        {
            let message = format!(
                "point {i} has {} features, expected {n_feature}",
                point.len(),
            );
            return Err(ObliqueTreeError::Schema(message));
        }

        if let Some(i) = points.iter()
            .position(|point| point.iter().any(|x| !x.is_finite()))
        {
            let message = format!("point {i} has a non-finite feature");
            return Err(ObliqueTreeError::Schema(message));
        }

        let mut classes = labels.clone();
        classes.sort_unstable();
        classes.dedup();

        Ok(Self { points, labels, classes, n_feature, })
    }


    /// Parse the two raw text blocks
    /// (one point per row, one label per row).
    pub fn from_text(training: &str, labels: &str, has_header: bool)
        -> Result<Self>
    {
        let points = parse_training_set(training, has_header)?;
        let labels = parse_labels(labels, has_header)?;
        Self::new(points, labels)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into
    /// `TrainingSet`.
    /// Every column of `data` is cast to `f64`
    /// and `target` is cast to `i64`.
    /// Missing values are rejected.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let n_sample = data.height();

        let columns = data.get_columns()
            .par_iter()
            .map(|series| {
                let name = series.name().to_string();
                series.cast(&DataType::Float64)?
                    .f64()?
                    .into_iter()
                    .collect::<Option<Vec<f64>>>()
                    .ok_or_else(|| {
                        let message = format!(
                            "column \"{name}\" has a missing value"
                        );
                        ObliqueTreeError::Schema(message)
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let labels = target.cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .collect::<Option<Vec<i64>>>()
            .ok_or_else(|| {
                let message = "the target has a missing value".to_string();
                ObliqueTreeError::Schema(message)
            })?;

        let points = (0..n_sample).into_par_iter()
            .map(|i| columns.iter().map(|col| col[i]).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        Self::new(points, labels)
    }


    /// Returns the number of training points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }


    /// Always `false`; an empty training set cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }


    /// Returns the number of features per point.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Returns the number of distinct labels.
    #[inline]
    pub fn n_label(&self) -> usize {
        self.classes.len()
    }


    /// Returns the training points.
    #[inline]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points[..]
    }


    /// Returns the labels, one per point.
    #[inline]
    pub fn labels(&self) -> &[i64] {
        &self.labels[..]
    }


    /// Returns the distinct labels in ascending order.
    #[inline]
    pub fn classes(&self) -> &[i64] {
        &self.classes[..]
    }


    /// Returns the class index of the `idx`-th point.
    #[inline]
    pub fn class_index(&self, idx: usize) -> usize {
        // `classes` is built from `labels`, so the search always succeeds.
        self.classes.binary_search(&self.labels[idx])
            .unwrap_or_else(|pos| pos)
    }


    /// Iterate over `(index, point, class index)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[f64], usize)> + '_ {
        self.points.iter()
            .enumerate()
            .map(|(i, point)| (i, &point[..], self.class_index(i)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_01() {
        let sample = TrainingSet::from_text(
            "0,1\n2,3\n4,5\n",
            "3\n1\n3\n",
            false,
        ).unwrap();

        assert_eq!(sample.len(), 3);
        assert_eq!(sample.n_feature(), 2);
        assert_eq!(sample.classes(), &[1, 3]);
        assert_eq!(sample.class_index(0), 1);
        assert_eq!(sample.class_index(1), 0);
    }


    #[test]
    fn test_length_mismatch() {
        let err = TrainingSet::from_text("0,1\n2,3\n", "0\n", false)
            .unwrap_err();
        assert!(matches!(err, ObliqueTreeError::Schema(_)));
    }


    #[test]
    fn test_width_mismatch() {
        let err = TrainingSet::new(vec![vec![0.0, 1.0], vec![2.0]], vec![0, 1])
            .unwrap_err();
        assert!(matches!(err, ObliqueTreeError::Schema(_)));
    }


    #[test]
    fn test_from_dataframe_01() {
        let s1 = Series::new("x", &[10.0, 14.0, 15.0]);
        let s2 = Series::new("y", &[5_i64, 8, 3]);
        let df = DataFrame::new(vec![s1, s2]).unwrap();
        let target = Series::new("class", &[1_i64, 0, 1]);

        let sample = TrainingSet::from_dataframe(df, target).unwrap();
        assert_eq!(sample.points()[1], vec![14.0, 8.0]);
        assert_eq!(sample.labels(), &[1, 0, 1]);
        assert_eq!(sample.n_label(), 2);
    }
}
