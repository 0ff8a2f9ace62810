use crate::constants::{MAX_DEGREES_OF_FREEDOM, MIN_EXPECTED_FREQUENCY, N_BUCKETS, TWO_BY_TWO_DEGREES_OF_FREEDOM};
use crate::distribution::tables::{CHI_SQUARE_TABLE, PVALUE_TABLE};
use crate::errors::StatError;
use crate::metrics::ConfusionMatrix;
use crate::utils::validate_frequency;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Computed chi-square statistic and p-value, together with a flag that is `true`
/// when every expected cell value reached the reliability threshold.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ChiSquarePvalue {
    pub chi_square: f64,
    pub p_value: f64,
    pub reliable: bool,
}

/// Observed frequencies of a 2x2 contingency table.
///
/// The table is represented as:
/// [[c11, c12],
///  [c21, c22]]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct ContingencyTable {
    pub c11: f64,
    pub c12: f64,
    pub c21: f64,
    pub c22: f64,
}

impl ContingencyTable {
    pub fn new(c11: f64, c12: f64, c21: f64, c22: f64) -> Self {
        ContingencyTable { c11, c12, c21, c22 }
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> [f64; 4] {
        [self.c11, self.c12, self.c21, self.c22]
    }

    pub fn row_totals(&self) -> [f64; 2] {
        [self.c11 + self.c12, self.c21 + self.c22]
    }

    pub fn column_totals(&self) -> [f64; 2] {
        [self.c11 + self.c21, self.c12 + self.c22]
    }

    pub fn total(&self) -> f64 {
        let [r1, r2] = self.row_totals();
        r1 + r2
    }

    /// Expected cell values under independence, in row-major order.
    pub fn expected(&self) -> [f64; 4] {
        let [r1, r2] = self.row_totals();
        let [k1, k2] = self.column_totals();
        let n = r1 + r2;
        [r1 * k1 / n, r1 * k2 / n, r2 * k1 / n, r2 * k2 / n]
    }

    pub fn chi_square(&self) -> ChiSquarePvalue {
        chi_square_2x2(self.c11, self.c12, self.c21, self.c22)
    }

    pub fn try_chi_square(&self) -> Result<ChiSquarePvalue, StatError> {
        try_chi_square_2x2(self.c11, self.c12, self.c21, self.c22)
    }
}

/// Rows hold the predicted class, columns the actual class.
impl From<ConfusionMatrix> for ContingencyTable {
    fn from(cm: ConfusionMatrix) -> Self {
        ContingencyTable::new(
            f64::from(cm.true_positive),
            f64::from(cm.false_positive),
            f64::from(cm.false_negative),
            f64::from(cm.true_negative),
        )
    }
}

/// Computes the chi-square value and p-value for the given 2x2 contingency table.
/// The result is reliable if all expected values are >= 5.0.
///
/// A table with an empty row or column has a zero expected cell. Its statistic is
/// `NaN`, it maps to the loosest p-value and it is never reliable. Use
/// [`try_chi_square_2x2`] to reject such tables instead.
///
/// * `c11` - Frequency value for cell (1,1).
/// * `c12` - Frequency value for cell (1,2).
/// * `c21` - Frequency value for cell (2,1).
/// * `c22` - Frequency value for cell (2,2).
pub fn chi_square_2x2(c11: f64, c12: f64, c21: f64, c22: f64) -> ChiSquarePvalue {
    evaluate(&ContingencyTable::new(c11, c12, c21, c22), MIN_EXPECTED_FREQUENCY)
}

/// Like [`chi_square_2x2`], but fails on negative or non-finite frequencies and on
/// tables with a zero expected cell.
pub fn try_chi_square_2x2(c11: f64, c12: f64, c21: f64, c22: f64) -> Result<ChiSquarePvalue, StatError> {
    try_evaluate(&ContingencyTable::new(c11, c12, c21, c22), MIN_EXPECTED_FREQUENCY)
}

/// Evaluate many tables at once. Results keep the order of `tables`.
///
/// * `parallel` - If `true`, tables are evaluated in parallel using Rayon.
pub fn chi_square_2x2_batch(tables: &[ContingencyTable], parallel: bool) -> Vec<ChiSquarePvalue> {
    evaluate_batch(tables, MIN_EXPECTED_FREQUENCY, parallel)
}

/// Bucketed p-value of a chi-square statistic for the given degrees of freedom.
pub fn p_value(chi_square: f64, degrees_of_freedom: usize) -> Result<f64, StatError> {
    if degrees_of_freedom == 0 || degrees_of_freedom > MAX_DEGREES_OF_FREEDOM {
        return Err(StatError::DegreesOfFreedom(degrees_of_freedom));
    }
    Ok(bucket_p_value(chi_square, &CHI_SQUARE_TABLE[degrees_of_freedom]))
}

// The first critical value not exceeded by the statistic stops the scan, and the
// p-value of the column before it is answered. Stopping at column 0 answers the
// loosest p-value, never stopping answers the tightest. NaN stops at column 0.
fn bucket_p_value(chi_square: f64, row: &[f64; N_BUCKETS]) -> f64 {
    match row.iter().position(|&critical| chi_square.is_nan() || chi_square <= critical) {
        Some(0) => PVALUE_TABLE[0],
        Some(i) => PVALUE_TABLE[i - 1],
        None => PVALUE_TABLE[N_BUCKETS - 1],
    }
}

pub(crate) fn evaluate(table: &ContingencyTable, min_expected: f64) -> ChiSquarePvalue {
    let observed = table.cells();
    let expected = table.expected();

    let chi_square: f64 = observed
        .iter()
        .zip(expected.iter())
        .map(|(o, e)| (o - e) * (o - e) / e)
        .sum();

    let p_value = bucket_p_value(chi_square, &CHI_SQUARE_TABLE[TWO_BY_TWO_DEGREES_OF_FREEDOM]);
    let reliable = expected.iter().all(|&e| e >= min_expected);

    debug!(
        "Chi-square: {:.3}, p-value: {}, reliable: {}",
        chi_square, p_value, reliable
    );

    ChiSquarePvalue {
        chi_square,
        p_value,
        reliable,
    }
}

pub(crate) fn try_evaluate(table: &ContingencyTable, min_expected: f64) -> Result<ChiSquarePvalue, StatError> {
    for (cell, value) in ["c11", "c12", "c21", "c22"].iter().zip(table.cells()) {
        validate_frequency(value, cell)?;
    }
    if table.expected().iter().any(|&e| e == 0.0 || e.is_nan()) {
        return Err(StatError::ZeroDenominator("chi-square".to_string()));
    }
    Ok(evaluate(table, min_expected))
}

pub(crate) fn evaluate_batch(tables: &[ContingencyTable], min_expected: f64, parallel: bool) -> Vec<ChiSquarePvalue> {
    if parallel {
        tables.par_iter().map(|t| evaluate(t, min_expected)).collect()
    } else {
        tables.iter().map(|t| evaluate(t, min_expected)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;

    /// n * (ad - bc)^2 / ((a+b)(c+d)(a+c)(b+d))
    fn closed_form(a: f64, b: f64, c: f64, d: f64) -> f64 {
        let n = a + b + c + d;
        n * (a * d - b * c).powi(2) / ((a + b) * (c + d) * (a + c) * (b + d))
    }

    #[test]
    fn test_strong_association() {
        let r = chi_square_2x2(50.0, 10.0, 10.0, 50.0);
        assert!((r.chi_square - 160.0 / 3.0).abs() < 1e-9);
        assert_eq!(r.p_value, 0.001);
        assert!(r.reliable);
    }

    #[test]
    fn test_sparse_table_is_unreliable() {
        let r = chi_square_2x2(2.0, 2.0, 2.0, 2.0);
        assert_eq!(ContingencyTable::new(2.0, 2.0, 2.0, 2.0).expected(), [2.0; 4]);
        assert_eq!(r.chi_square, 0.0);
        assert!(!r.reliable);
    }

    #[test]
    fn test_independent_table() {
        let r = chi_square_2x2(25.0, 25.0, 25.0, 25.0);
        assert_eq!(r.chi_square, 0.0);
        assert_eq!(r.p_value, 0.95);
        assert!(r.reliable);
    }

    #[test]
    fn test_reliability_threshold_is_inclusive() {
        // All expected values are exactly 5.
        let r = chi_square_2x2(5.0, 5.0, 5.0, 5.0);
        assert!(r.reliable);
        // Expected (1,1) = 10 * 9 / 20 = 4.5
        let r = chi_square_2x2(4.0, 6.0, 5.0, 5.0);
        assert!(!r.reliable);
    }

    #[test]
    fn test_example_from_drift_detection() {
        // [[10, 5], [10, 20]] -> 4.5, between 3.84 and 6.64.
        let r = chi_square_2x2(10.0, 5.0, 10.0, 20.0);
        assert!((r.chi_square - 4.5).abs() < 1e-9);
        assert_eq!(r.p_value, 0.05);
        assert!(r.reliable);
    }

    #[test]
    fn test_matches_closed_form() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1_000 {
            let c: Vec<f64> = (0..4).map(|_| rng.gen_range(1..500) as f64).collect();
            let r = chi_square_2x2(c[0], c[1], c[2], c[3]);
            let expected = closed_form(c[0], c[1], c[2], c[3]);
            assert!(
                (r.chi_square - expected).abs() <= 1e-9 * expected.max(1.0),
                "{:?}: {} vs {}",
                c,
                r.chi_square,
                expected
            );
            assert!(PVALUE_TABLE.contains(&r.p_value));
            assert!(r.chi_square >= 0.0);
        }
    }

    #[test]
    fn test_bucket_step_back() {
        let row = &CHI_SQUARE_TABLE[1];
        // Equal to a critical value stops at that column.
        assert_eq!(bucket_p_value(0.004, row), 0.95);
        assert_eq!(bucket_p_value(0.02, row), 0.95);
        assert_eq!(bucket_p_value(0.021, row), 0.90);
        assert_eq!(bucket_p_value(3.84, row), 0.10);
        assert_eq!(bucket_p_value(3.85, row), 0.05);
        assert_eq!(bucket_p_value(10.83, row), 0.01);
        assert_eq!(bucket_p_value(10.84, row), 0.001);
        assert_eq!(bucket_p_value(f64::INFINITY, row), 0.001);
        assert_eq!(bucket_p_value(f64::NAN, row), 0.95);
    }

    #[test]
    fn test_p_value_degrees_of_freedom() {
        assert_eq!(p_value(53.3, 1), Ok(0.001));
        assert_eq!(p_value(5.0, 2), Ok(0.10));
        assert_eq!(p_value(0.05, 10), Ok(0.95));
        assert_eq!(p_value(1.0, 0), Err(StatError::DegreesOfFreedom(0)));
        assert_eq!(p_value(1.0, 11), Err(StatError::DegreesOfFreedom(11)));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let x: f64 = rng.gen_range(0.0..40.0);
            let dof: usize = rng.gen_range(1..=10);
            assert!(PVALUE_TABLE.contains(&p_value(x, dof).unwrap()));
        }
    }

    #[test]
    fn test_monotone_in_imbalance() {
        // Margins fixed at 50 while the diagonal grows.
        let mut last_chi = -1.0;
        let mut last_p = f64::INFINITY;
        for d in 0..25 {
            let d = d as f64;
            let r = chi_square_2x2(25.0 + d, 25.0 - d, 25.0 - d, 25.0 + d);
            assert!(r.chi_square > last_chi);
            assert!(r.p_value <= last_p);
            last_chi = r.chi_square;
            last_p = r.p_value;
        }
    }

    #[test]
    fn test_degenerate_table_propagates() {
        let r = chi_square_2x2(0.0, 0.0, 3.0, 7.0);
        assert!(r.chi_square.is_nan());
        assert_eq!(r.p_value, 0.95);
        assert!(!r.reliable);

        let r = chi_square_2x2(0.0, 0.0, 0.0, 0.0);
        assert!(r.chi_square.is_nan());
        assert!(!r.reliable);
    }

    #[test]
    fn test_degenerate_table_checked() {
        assert_eq!(
            try_chi_square_2x2(0.0, 0.0, 3.0, 7.0),
            Err(StatError::ZeroDenominator("chi-square".to_string()))
        );
        assert_eq!(
            try_chi_square_2x2(0.0, 0.0, 0.0, 0.0),
            Err(StatError::ZeroDenominator("chi-square".to_string()))
        );
        assert_eq!(
            try_chi_square_2x2(1.0, -2.0, 3.0, 4.0),
            Err(StatError::InvalidFrequency("c12".to_string(), -2.0))
        );
        assert!(try_chi_square_2x2(1.0, 2.0, f64::NAN, 4.0).is_err());
        assert_eq!(
            try_chi_square_2x2(50.0, 10.0, 10.0, 50.0),
            Ok(chi_square_2x2(50.0, 10.0, 10.0, 50.0))
        );
    }

    #[test]
    fn test_table_totals() {
        let t = ContingencyTable::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(t.row_totals(), [3.0, 7.0]);
        assert_eq!(t.column_totals(), [4.0, 6.0]);
        assert_eq!(t.total(), 10.0);
        assert_eq!(t.chi_square(), chi_square_2x2(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_from_confusion_matrix() {
        let t = ContingencyTable::from(ConfusionMatrix::new(50, 10, 10, 50));
        assert_eq!(t, ContingencyTable::new(50.0, 10.0, 10.0, 50.0));
        assert_eq!(t.try_chi_square().unwrap().p_value, 0.001);
    }

    #[test]
    fn test_batch_matches_single() {
        let mut rng = StdRng::seed_from_u64(11);
        let tables: Vec<ContingencyTable> = (0..500)
            .map(|_| {
                ContingencyTable::new(
                    rng.gen_range(0..60) as f64,
                    rng.gen_range(0..60) as f64,
                    rng.gen_range(0..60) as f64,
                    rng.gen_range(0..60) as f64,
                )
            })
            .collect();
        let serial = chi_square_2x2_batch(&tables, false);
        let parallel = chi_square_2x2_batch(&tables, true);
        assert_eq!(serial.len(), tables.len());
        for ((t, s), p) in tables.iter().zip(&serial).zip(&parallel) {
            let single = t.chi_square();
            assert_eq!(single.chi_square.to_bits(), s.chi_square.to_bits());
            assert_eq!(single.chi_square.to_bits(), p.chi_square.to_bits());
            assert_eq!(single.p_value, p.p_value);
            assert_eq!(single.reliable, p.reliable);
        }
    }

    #[test]
    fn test_idempotent() {
        let a = chi_square_2x2(13.0, 7.0, 4.0, 21.0);
        let b = chi_square_2x2(13.0, 7.0, 4.0, 21.0);
        assert_eq!(a.chi_square.to_bits(), b.chi_square.to_bits());
        assert_eq!(a, b);
    }
}
