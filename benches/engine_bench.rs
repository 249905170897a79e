use bank_sim::engine::run_simulation;
use bank_sim::models::{DurationProfile, SimConfig};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

const TIME_LIMIT: i64 = 50_000;
const TELLER_COUNTS: &[usize] = &[1, 4, 16];

fn build_config(tellers: usize) -> SimConfig {
    SimConfig {
        tellers,
        arrival: DurationProfile::new(4, 2),
        service: DurationProfile::new(4 * tellers as i64, 2),
        time_limit: TIME_LIMIT,
        snapshot_period: 1_000,
        seed: Some(42),
    }
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for &tellers in TELLER_COUNTS {
        group.bench_with_input(
            BenchmarkId::new("run_to_limit", format!("{}x{}", TIME_LIMIT, tellers)),
            &tellers,
            |b, &tellers| {
                b.iter_batched(
                    || build_config(tellers),
                    |config| {
                        let result = run_simulation(&config).expect("simulation should succeed");
                        black_box(result);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
