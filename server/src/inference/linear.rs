//! Logistic regression
//!
//! Binary models only: the decision function is `w·x + b` and the positive
//! class wins when it is above zero. A one-row `coef` matrix as exported by
//! sklearn is accepted as well as a flat vector.

use super::artifact::{to_row, Bias, Weights};
use super::{FeatureRow, ModelError};

#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: FeatureRow,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coef: Weights, intercept: Bias) -> Result<Self, ModelError> {
        let weights = match coef {
            Weights::Flat(values) => values,
            Weights::Rows(mut rows) if rows.len() == 1 => rows.remove(0),
            Weights::Rows(rows) => {
                return Err(ModelError::InvalidArtifact(format!(
                    "coef has {} rows, expected 1 for a binary model",
                    rows.len()
                )))
            }
        };
        let intercept = match intercept {
            Bias::Scalar(value) => value,
            Bias::Values(values) if values.len() == 1 => values[0],
            Bias::Values(values) => {
                return Err(ModelError::InvalidArtifact(format!(
                    "intercept has {} values, expected 1",
                    values.len()
                )))
            }
        };

        Ok(Self {
            weights: to_row(weights, "coef")?,
            intercept,
        })
    }

    fn decision(&self, row: &FeatureRow) -> f64 {
        let dot: f64 = self.weights.iter().zip(row.iter()).map(|(w, x)| w * x).sum();
        dot + self.intercept
    }

    /// Index into the artifact's class list
    pub fn predict_index(&self, row: &FeatureRow) -> usize {
        usize::from(self.decision(row) > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::FEATURE_COUNT;

    fn unit(index: usize) -> Vec<f64> {
        let mut row = vec![0.0; FEATURE_COUNT];
        row[index] = 1.0;
        row
    }

    #[test]
    fn test_binary_decision() {
        // positive when bmi > 30
        let model = LinearModel::new(Weights::Flat(unit(2)), Bias::Scalar(-30.0)).unwrap();

        let mut row = [0.0; FEATURE_COUNT];
        row[2] = 30.0;
        assert_eq!(model.predict_index(&row), 0, "zero decision is the negative class");
        row[2] = 30.5;
        assert_eq!(model.predict_index(&row), 1);
    }

    #[test]
    fn test_sklearn_shaped_binary() {
        let model = LinearModel::new(Weights::Rows(vec![unit(0)]), Bias::Values(vec![-40.0])).unwrap();

        let mut row = [0.0; FEATURE_COUNT];
        row[0] = 50.0;
        assert_eq!(model.predict_index(&row), 1);
    }

    #[test]
    fn test_shape_errors() {
        let short = LinearModel::new(Weights::Flat(vec![1.0; 9]), Bias::Scalar(0.0));
        assert!(matches!(short, Err(ModelError::InvalidArtifact(_))));

        let rows = LinearModel::new(Weights::Rows(vec![unit(0), unit(1)]), Bias::Scalar(0.0));
        assert!(matches!(rows, Err(ModelError::InvalidArtifact(_))));

        let bias = LinearModel::new(Weights::Flat(unit(0)), Bias::Values(vec![0.0, 1.0]));
        assert!(matches!(bias, Err(ModelError::InvalidArtifact(_))));
    }
}
