//! This file defines the oblique split rule.
use serde::{Serialize, Deserialize};

use crate::error::{ObliqueTreeError, Result};
use super::path::LeftRight;


/// An oblique splitting rule `bias + Σ_i x[i] * weight[i]`.
/// A point goes left when the score is negative,
/// right otherwise (a zero score goes right).
/// 
/// The coefficients are stored as given:
/// the first `n_feature` values are the weights
/// and the last one is the bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hyperplane {
    coefficients: Vec<f64>,
}


impl Hyperplane {
    /// Construct a new hyperplane from a coefficient row.
    /// The row must hold at least one weight and the bias,
    /// and every coefficient must be finite.
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.len() < 2 {
            let message = format!(
                "a coefficient row needs at least one weight and a bias, \
                got {} value(s)",
                coefficients.len(),
            );
            return Err(ObliqueTreeError::Schema(message));
        }

        if coefficients.iter().any(|c| !c.is_finite()) {
            let message = "a coefficient row has a non-finite value"
                .to_string();
            return Err(ObliqueTreeError::Schema(message));
        }

        Ok(Self { coefficients })
    }


    /// The placeholder split held by leaves.
    #[inline]
    pub(crate) fn zeros(n_feature: usize) -> Self {
        Self { coefficients: vec![0.0; n_feature + 1] }
    }


    /// Returns the number of features this hyperplane is defined on.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.coefficients.len() - 1
    }


    /// Returns the whole row, weights followed by the bias.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients[..]
    }


    /// Returns the feature weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.coefficients[..self.n_feature()]
    }


    /// Returns the bias.
    #[inline]
    pub fn bias(&self) -> f64 {
        self.coefficients[self.n_feature()]
    }


    /// Returns `bias + Σ_i point[i] * weight[i]`.
    #[inline]
    pub fn score(&self, point: &[f64]) -> f64 {
        self.weights()
            .iter()
            .zip(point)
            .fold(self.bias(), |acc, (w, x)| acc + w * x)
    }


    /// Defines the splitting.
    #[inline]
    pub fn split(&self, point: &[f64]) -> LeftRight {
        if self.score(point) < 0.0 {
            LeftRight::Left
        } else {
            LeftRight::Right
        }
    }


    /// Returns the indices of the features with non-zero weight.
    pub fn feature_indices(&self) -> Vec<usize> {
        self.weights()
            .iter()
            .enumerate()
            .filter_map(|(i, w)| (*w != 0.0).then_some(i))
            .collect()
    }


    /// Returns `(feature, |weight| / Σ|weight|)` for the used features,
    /// or `None` if no feature is used.
    pub(crate) fn feature_weights(&self) -> Option<Vec<(usize, f64)>> {
        let indices = self.feature_indices();
        let weights = self.weights();
        let total = indices.iter()
            .map(|&i| weights[i].abs())
            .sum::<f64>();

        if total <= 0.0 {
            return None;
        }

        let normalized = indices.into_iter()
            .map(|i| (i, weights[i].abs() / total))
            .collect();
        Some(normalized)
    }
}
