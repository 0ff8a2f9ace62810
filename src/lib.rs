//! Classification measures and a 2x2 contingency table chi-square test.
//!
//! All functions are pure and share nothing but the read-only reference tables, so
//! they can be called from any number of threads.

// Modules
pub mod config;
pub mod constants;
pub mod distribution;
pub mod errors;
pub mod metrics;
pub mod utils;

// Individual classes, and functions
pub use config::{DegeneratePolicy, TestConfig};
pub use distribution::{chi_square_2x2, chi_square_2x2_batch, p_value, ChiSquarePvalue, ContingencyTable};
pub use errors::StatError;
pub use metrics::{mcc, sensitivity, specificity, ClassificationReport, ConfusionMatrix};
