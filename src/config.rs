//! Test Configuration
//!
//! Settings shared by a run of contingency tests: the reliability threshold, how
//! degenerate inputs are reported and whether batches run in parallel.
use crate::constants::MIN_EXPECTED_FREQUENCY;
use crate::distribution::chi_square::{evaluate, evaluate_batch, try_evaluate};
use crate::distribution::{ChiSquarePvalue, ContingencyTable};
use crate::errors::StatError;
use crate::metrics::{ClassificationReport, ConfusionMatrix};
use crate::utils::{items_to_strings, validate_positive_float_parameter};
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when a ratio has a zero denominator.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DegeneratePolicy {
    /// Answer the non-finite value.
    #[default]
    Propagate,
    /// Fail with `StatError::ZeroDenominator`.
    Error,
}

impl FromStr for DegeneratePolicy {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Propagate" => Ok(DegeneratePolicy::Propagate),
            "Error" => Ok(DegeneratePolicy::Error),
            _ => Err(StatError::ParseString(
                s.to_string(),
                "DegeneratePolicy".to_string(),
                items_to_strings(vec!["Propagate", "Error"]),
            )),
        }
    }
}

fn default_min_expected() -> f64 {
    MIN_EXPECTED_FREQUENCY
}
fn default_degenerate() -> DegeneratePolicy {
    DegeneratePolicy::Propagate
}
fn default_parallel() -> bool {
    true
}

/// Configuration for evaluating contingency tables and confusion matrices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Smallest expected cell value for a reliable chi-square result.
    #[serde(default = "default_min_expected")]
    pub min_expected: f64,
    /// Handling of zero denominators.
    #[serde(default = "default_degenerate")]
    pub degenerate: DegeneratePolicy,
    /// Whether batches are evaluated in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            min_expected: MIN_EXPECTED_FREQUENCY,
            degenerate: DegeneratePolicy::Propagate,
            parallel: true,
        }
    }
}

impl TestConfig {
    pub fn validate(&self) -> Result<(), StatError> {
        validate_positive_float_parameter(self.min_expected, "min_expected")
    }

    /// Dump the configuration as a json object.
    pub fn json_dump(&self) -> Result<String, StatError> {
        serde_json::to_string(self).map_err(|e| StatError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from a json string. Missing fields take their defaults.
    pub fn from_json(json_str: &str) -> Result<Self, StatError> {
        let config = serde_json::from_str::<Self>(json_str).map_err(|e| StatError::UnableToRead(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Chi-square test of a single table under this configuration.
    pub fn chi_square_2x2(&self, table: &ContingencyTable) -> Result<ChiSquarePvalue, StatError> {
        self.validate()?;
        match self.degenerate {
            DegeneratePolicy::Propagate => {
                let result = evaluate(table, self.min_expected);
                if !result.chi_square.is_finite() {
                    warn!("Degenerate contingency table {:?}, chi-square is not finite.", table.cells());
                }
                Ok(result)
            }
            DegeneratePolicy::Error => try_evaluate(table, self.min_expected),
        }
    }

    /// Chi-square tests of many tables. Under `DegeneratePolicy::Error` the first
    /// failing table fails the whole batch.
    pub fn chi_square_2x2_batch(&self, tables: &[ContingencyTable]) -> Result<Vec<ChiSquarePvalue>, StatError> {
        self.validate()?;
        match self.degenerate {
            DegeneratePolicy::Propagate => {
                let results = evaluate_batch(tables, self.min_expected, self.parallel);
                let n_degenerate = results.iter().filter(|r| !r.chi_square.is_finite()).count();
                if n_degenerate > 0 {
                    warn!("{} of {} contingency tables are degenerate.", n_degenerate, tables.len());
                }
                Ok(results)
            }
            DegeneratePolicy::Error => {
                if self.parallel {
                    tables.par_iter().map(|t| try_evaluate(t, self.min_expected)).collect()
                } else {
                    tables.iter().map(|t| try_evaluate(t, self.min_expected)).collect()
                }
            }
        }
    }

    /// Sensitivity, specificity and MCC of a confusion matrix under this configuration.
    pub fn classify(&self, matrix: &ConfusionMatrix) -> Result<ClassificationReport, StatError> {
        match self.degenerate {
            DegeneratePolicy::Propagate => {
                let report = matrix.report();
                if report.sensitivity.is_nan() || report.specificity.is_nan() || report.mcc.is_nan() {
                    warn!("Degenerate confusion matrix {:?}, some measures are NaN.", matrix);
                }
                Ok(report)
            }
            DegeneratePolicy::Error => matrix.try_report(),
        }
    }
}
