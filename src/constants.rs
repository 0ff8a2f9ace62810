/// Number of confidence buckets in every row of the chi-square table.
pub const N_BUCKETS: usize = 11;
/// Highest degrees of freedom covered by the chi-square table.
pub const MAX_DEGREES_OF_FREEDOM: usize = 10;
/// Degrees of freedom of a 2x2 contingency table.
pub const TWO_BY_TWO_DEGREES_OF_FREEDOM: usize = 1;
/// Smallest expected cell value for which the chi-square approximation is trusted.
pub const MIN_EXPECTED_FREQUENCY: f64 = 5.0;
