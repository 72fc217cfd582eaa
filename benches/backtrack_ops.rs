use criterion::{criterion_group, criterion_main, Criterion};
use dispatch_dp::dispatch::{DispatchTables, Fleet, Unit};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn build_tables(units: usize) -> DispatchTables {
    let mut rng = StdRng::seed_from_u64(7);
    let units = (0..units)
        .map(|_| {
            let pl = rng.gen_range(5..30);
            let pu = pl + rng.gen_range(20..100);
            Unit::new(rng.gen_range(0.001..0.02), rng.gen_range(5.0..12.0), 100.0, pl, pu)
                .unwrap()
        })
        .collect();
    DispatchTables::solve(&Fleet::new(units).unwrap())
}

fn bench_backtrack(c: &mut Criterion) {
    let tables = build_tables(12);
    let p_max = tables.p_max();

    c.bench_function("dispatch_query_all_demands", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for x in 0..=p_max {
                if let Ok(Some(d)) = tables.dispatch(x) {
                    total += d.cost;
                }
            }
            criterion::black_box(total)
        })
    });

    c.bench_function("commitment_matrix", |b| {
        b.iter(|| criterion::black_box(tables.commitment_matrix()))
    });
}

criterion_group!(benches, bench_backtrack);
criterion_main!(benches);
