//! Error statistics of a trained forest
//!
//! All rates are computed from posterior probabilities against the true
//! class of every record:
//!
//! - relative class error: fraction of records whose most probable class is wrong
//! - average cross-entropy: mean of `-ln p(true class)`
//! - root-mean-square error: over every class slot of every record
//! - average error: mean absolute error over every class slot
//! - average relative error: mean of `1 - p(true class)`

use crate::core::{ClassifierError, Result};
use crate::utils::index_of_max_value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorRates {
    pub relative_class_error: f64,
    pub average_cross_entropy: f64,
    pub root_mean_square_error: f64,
    pub average_error: f64,
    pub average_relative_error: f64,
}

impl ErrorRates {
    /// Compute the rates for backends that do not report them.
    ///
    /// `posteriors[i]` holds one probability per class for record `i`, whose
    /// true class is `labels[i]`. No records give all-zero rates.
    pub fn from_posteriors(posteriors: &[Vec<f64>], labels: &[usize]) -> Result<Self> {
        if posteriors.len() != labels.len() {
            return Err(ClassifierError::InvalidParamCount.into());
        }
        if posteriors.is_empty() {
            return Ok(Self::default());
        }

        let records = posteriors.len() as f64;
        let mut misclassified = 0usize;
        let mut cross_entropy = 0.0;
        let mut squared = 0.0;
        let mut absolute = 0.0;
        let mut relative = 0.0;
        let mut slots = 0usize;

        for (probabilities, &label) in posteriors.iter().zip(labels) {
            let p_true = *probabilities
                .get(label)
                .ok_or(ClassifierError::InvalidClassIndex)?;

            if index_of_max_value(probabilities).map(|(i, _)| i) != Some(label) {
                misclassified += 1;
            }
            cross_entropy -= p_true.max(f64::MIN_POSITIVE).ln();
            relative += 1.0 - p_true;

            for (class, p) in probabilities.iter().enumerate() {
                let target = if class == label { 1.0 } else { 0.0 };
                squared += (p - target).powi(2);
                absolute += (p - target).abs();
            }
            slots += probabilities.len();
        }

        let slots = slots as f64;
        Ok(Self {
            relative_class_error: misclassified as f64 / records,
            average_cross_entropy: cross_entropy / records,
            root_mean_square_error: (squared / slots).sqrt(),
            average_error: absolute / slots,
            average_relative_error: relative / records,
        })
    }
}

/// Error rates on the training set and on its out-of-bag partition
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForestErrorReport {
    pub in_sample: ErrorRates,
    pub out_of_bag: ErrorRates,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SwotError;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_predictions() {
        let rates =
            ErrorRates::from_posteriors(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[0, 1]).unwrap();
        assert_relative_eq!(rates.relative_class_error, 0.0);
        assert_relative_eq!(rates.average_cross_entropy, 0.0);
        assert_relative_eq!(rates.root_mean_square_error, 0.0);
        assert_relative_eq!(rates.average_error, 0.0);
        assert_relative_eq!(rates.average_relative_error, 0.0);
    }

    #[test]
    fn test_rates() {
        let posteriors = vec![vec![0.8, 0.2], vec![0.6, 0.4]];
        let rates = ErrorRates::from_posteriors(&posteriors, &[0, 1]).unwrap();

        assert_relative_eq!(rates.relative_class_error, 0.5);
        assert_relative_eq!(
            rates.average_cross_entropy,
            -(0.8f64.ln() + 0.4f64.ln()) / 2.0,
            epsilon = 1e-12
        );
        // slot errors: 0.2, 0.2, 0.6, 0.6
        assert_relative_eq!(
            rates.root_mean_square_error,
            ((0.04 + 0.04 + 0.36 + 0.36) / 4.0f64).sqrt(),
            epsilon = 1e-12
        );
        assert_relative_eq!(rates.average_error, 0.4, epsilon = 1e-12);
        assert_relative_eq!(rates.average_relative_error, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            ErrorRates::from_posteriors(&[vec![1.0]], &[]),
            Err(SwotError::Classifier(ClassifierError::InvalidParamCount))
        ));
        assert!(matches!(
            ErrorRates::from_posteriors(&[vec![1.0]], &[3]),
            Err(SwotError::Classifier(ClassifierError::InvalidClassIndex))
        ));
        assert_eq!(
            ErrorRates::from_posteriors(&[], &[]).unwrap(),
            ErrorRates::default()
        );
    }
}
