//! Metrics
//!
//! Classification measures computed from confusion-matrix counts.
pub mod classification;

pub use classification::{mcc, sensitivity, specificity, ClassificationReport, ConfusionMatrix};
