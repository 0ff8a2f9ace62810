//! Errors
//!
//! Custom error types used throughout the `contingency` crate.
use thiserror::Error;

/// Errors that can occur while computing classification measures or contingency tests.
#[derive(Debug, Error, PartialEq)]
pub enum StatError {
    /// A ratio was requested whose denominator is zero. The value names the measure.
    #[error("Degenerate input for {0}: zero denominator.")]
    ZeroDenominator(String),
    /// A cell frequency was negative or not finite.
    #[error("Invalid frequency for cell {0}: {1}, expected a finite non-negative value.")]
    InvalidFrequency(String, f64),
    /// No row of the chi-square table covers these degrees of freedom.
    #[error("No chi-square table row for {0} degrees of freedom, expected a value from 1 to 10.")]
    DegreesOfFreedom(usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Unable to read a configuration.
    #[error("Unable to read configuration: {0}")]
    UnableToRead(String),
    /// Unable to write a configuration.
    #[error("Unable to write configuration: {0}")]
    UnableToWrite(String),
}
