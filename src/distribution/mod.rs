//! Distribution
//!
//! Pearson chi-square test for 2x2 contingency tables, with p-values bucketed from a
//! fixed table of critical values.

pub mod chi_square;
pub mod tables;

pub use chi_square::{
    chi_square_2x2, chi_square_2x2_batch, p_value, try_chi_square_2x2, ChiSquarePvalue, ContingencyTable,
};
pub use tables::{CHI_SQUARE_TABLE, PVALUE_TABLE};
