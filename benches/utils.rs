#![allow(dead_code)]
use contingency::ContingencyTable;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

pub(crate) fn create_tables(n_tables: usize) -> Vec<ContingencyTable> {
    // reproducible seed
    let mut rng = StdRng::seed_from_u64(1903);

    (0..n_tables)
        .map(|_| {
            ContingencyTable::new(
                rng.gen_range(0..1_000) as f64,
                rng.gen_range(0..1_000) as f64,
                rng.gen_range(0..1_000) as f64,
                rng.gen_range(0..1_000) as f64,
            )
        })
        .collect()
}
