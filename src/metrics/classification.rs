//! Classification
//!
//! Sensitivity, specificity and the Matthews correlation coefficient for a binary
//! confusion matrix.
//!
//! The plain functions follow IEEE float semantics: when a denominator is zero they
//! return `NaN` instead of failing. The `try_` variants return
//! [`StatError::ZeroDenominator`] in that case.
use crate::errors::StatError;
use crate::utils::checked_ratio;
use serde::{Deserialize, Serialize};

/// True positive rate, `tp / (tp + fn)`.
pub fn sensitivity(true_positive: u32, false_negative: u32) -> f64 {
    let (numerator, denominator) = sensitivity_parts(true_positive, false_negative);
    numerator / denominator
}

/// Sensitivity, failing when `tp + fn` is zero.
pub fn try_sensitivity(true_positive: u32, false_negative: u32) -> Result<f64, StatError> {
    let (numerator, denominator) = sensitivity_parts(true_positive, false_negative);
    checked_ratio(numerator, denominator, "sensitivity")
}

/// True negative rate, `tn / (fp + tn)`.
pub fn specificity(true_negative: u32, false_positive: u32) -> f64 {
    let (numerator, denominator) = specificity_parts(true_negative, false_positive);
    numerator / denominator
}

/// Specificity, failing when `fp + tn` is zero.
pub fn try_specificity(true_negative: u32, false_positive: u32) -> Result<f64, StatError> {
    let (numerator, denominator) = specificity_parts(true_negative, false_positive);
    checked_ratio(numerator, denominator, "specificity")
}

/// Matthews correlation coefficient.
///
/// `(tp*tn - fp*fn) / sqrt((tp+fp)(tp+fn)(tn+fp)(tn+fn))`
///
/// The numerator is exact integer arithmetic, the denominator is accumulated in `f64`
/// so that large counts can not overflow.
pub fn mcc(true_positive: u32, false_positive: u32, false_negative: u32, true_negative: u32) -> f64 {
    let (numerator, denominator) = mcc_parts(true_positive, false_positive, false_negative, true_negative);
    numerator / denominator
}

/// Matthews correlation coefficient, failing when any marginal sum is zero.
pub fn try_mcc(
    true_positive: u32,
    false_positive: u32,
    false_negative: u32,
    true_negative: u32,
) -> Result<f64, StatError> {
    let (numerator, denominator) = mcc_parts(true_positive, false_positive, false_negative, true_negative);
    checked_ratio(numerator, denominator, "mcc")
}

fn sensitivity_parts(true_positive: u32, false_negative: u32) -> (f64, f64) {
    let tp = f64::from(true_positive);
    (tp, tp + f64::from(false_negative))
}

fn specificity_parts(true_negative: u32, false_positive: u32) -> (f64, f64) {
    let tn = f64::from(true_negative);
    (tn, f64::from(false_positive) + tn)
}

fn mcc_parts(true_positive: u32, false_positive: u32, false_negative: u32, true_negative: u32) -> (f64, f64) {
    let numerator = i128::from(true_positive) * i128::from(true_negative)
        - i128::from(false_positive) * i128::from(false_negative);

    let (tp, fp, fn_, tn) = (
        f64::from(true_positive),
        f64::from(false_positive),
        f64::from(false_negative),
        f64::from(true_negative),
    );
    let denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();

    (numerator as f64, denominator)
}

/// Counts of a binary confusion matrix.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_positive: u32,
    pub false_positive: u32,
    pub false_negative: u32,
    pub true_negative: u32,
}

/// The three classification measures of one confusion matrix.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ClassificationReport {
    pub sensitivity: f64,
    pub specificity: f64,
    pub mcc: f64,
}

impl ConfusionMatrix {
    pub fn new(true_positive: u32, false_positive: u32, false_negative: u32, true_negative: u32) -> Self {
        ConfusionMatrix {
            true_positive,
            false_positive,
            false_negative,
            true_negative,
        }
    }

    /// Tally a confusion matrix from paired actual and predicted labels.
    /// Pairs beyond the shorter of the two slices are ignored.
    pub fn from_labels(actual: &[bool], predicted: &[bool]) -> Self {
        actual
            .iter()
            .zip(predicted)
            .fold(ConfusionMatrix::default(), |mut cm, (a, p)| {
                match (a, p) {
                    (true, true) => cm.true_positive += 1,
                    (false, true) => cm.false_positive += 1,
                    (true, false) => cm.false_negative += 1,
                    (false, false) => cm.true_negative += 1,
                }
                cm
            })
    }

    pub fn total(&self) -> u64 {
        u64::from(self.true_positive)
            + u64::from(self.false_positive)
            + u64::from(self.false_negative)
            + u64::from(self.true_negative)
    }

    pub fn sensitivity(&self) -> f64 {
        sensitivity(self.true_positive, self.false_negative)
    }

    pub fn specificity(&self) -> f64 {
        specificity(self.true_negative, self.false_positive)
    }

    pub fn mcc(&self) -> f64 {
        mcc(
            self.true_positive,
            self.false_positive,
            self.false_negative,
            self.true_negative,
        )
    }

    /// All three measures, with non-finite values passed through.
    pub fn report(&self) -> ClassificationReport {
        ClassificationReport {
            sensitivity: self.sensitivity(),
            specificity: self.specificity(),
            mcc: self.mcc(),
        }
    }

    /// All three measures, failing on the first zero denominator.
    pub fn try_report(&self) -> Result<ClassificationReport, StatError> {
        Ok(ClassificationReport {
            sensitivity: try_sensitivity(self.true_positive, self.false_negative)?,
            specificity: try_specificity(self.true_negative, self.false_positive)?,
            mcc: try_mcc(
                self.true_positive,
                self.false_positive,
                self.false_negative,
                self.true_negative,
            )?,
        })
    }
}
