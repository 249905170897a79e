use bank_sim::routing::shortest_queue;
use bank_sim::state::{Customer, TellerState};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const TELLER_COUNTS: &[usize] = &[2, 8, 64];

fn build_tellers(count: usize) -> Vec<TellerState> {
    (0..count)
        .map(|id| {
            let mut teller = TellerState::new(id);
            for customer in 0..(id % 5) + 1 {
                teller.enqueue(Customer {
                    id: customer,
                    arrival_time: 0,
                    service_time: 10,
                });
            }
            teller
        })
        .collect()
}

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");

    for &count in TELLER_COUNTS {
        let tellers = build_tellers(count);
        group.bench_with_input(
            BenchmarkId::new("shortest_queue", count),
            &tellers,
            |b, tellers| {
                b.iter(|| black_box(shortest_queue(black_box(tellers))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
