use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricing::{build_table, solve, SimulatorInputs};
use runtime::{benchmark::recomputes_per_sec, TARGET_RECOMPUTES_PER_SEC};
use std::time::Instant;

const BENCH_STEPS: u64 = 10_000;

fn bench_engine_throughput(c: &mut Criterion) {
    let inputs = SimulatorInputs {
        product_cost: 20_000.0,
        desired_margin_percent: 20.0,
        shipping_cost: 8_000.0,
        collection_commission_percent: 3.0,
        return_rate_percent: 20.0,
        other_expenses: 1_000.0,
        average_cpa: 5_000.0,
        pre_cancellation_percent: 10.0,
    };

    let mut group = c.benchmark_group("engine_throughput");
    group.throughput(Throughput::Elements(BENCH_STEPS));

    group.bench_function(BenchmarkId::new("solve", BENCH_STEPS), |b| {
        b.iter(|| {
            for _ in 0..BENCH_STEPS {
                let _ = black_box(solve(black_box(&inputs), None));
            }
        });
    });

    for max_quantity in [5_u32, 20] {
        group.bench_function(BenchmarkId::new("build_table", max_quantity), |b| {
            b.iter(|| {
                for _ in 0..BENCH_STEPS {
                    black_box(build_table(
                        black_box(54_000.0),
                        20_000.0,
                        10_781.0,
                        50.0,
                        max_quantity,
                    ));
                }
            });
        });
    }

    group.finish();

    let started = Instant::now();
    for _ in 0..BENCH_STEPS {
        let _ = black_box(solve(black_box(&inputs), None));
    }
    let achieved = recomputes_per_sec(BENCH_STEPS, started.elapsed());
    println!(
        "target_recomputes_per_sec={TARGET_RECOMPUTES_PER_SEC} achieved_recomputes_per_sec={achieved} meets_target={}",
        achieved >= TARGET_RECOMPUTES_PER_SEC
    );
}

criterion_group!(benches, bench_engine_throughput);
criterion_main!(benches);
