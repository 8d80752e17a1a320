use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debt_settlement::optimization::settlement::SettlementOptimizer;
use debt_settlement::simulation::random_ledger::{generate_random_intent, LedgerConfig};

fn bench_group(c: &mut Criterion, member_count: usize, transaction_count: usize) {
    let config = LedgerConfig {
        member_count,
        transaction_count,
        seed: Some(42),
        ..Default::default()
    };
    let intent = generate_random_intent(&config);
    let graph = intent.to_graph().expect("generated intent only names its members");
    let balances = graph.net_balances();
    let optimizer = SettlementOptimizer::default();

    c.bench_function(&format!("build_graph_{}_members", member_count), |b| {
        b.iter(|| black_box(&intent).to_graph())
    });
    c.bench_function(&format!("net_balances_{}_members", member_count), |b| {
        b.iter(|| black_box(&graph).net_balances())
    });
    c.bench_function(&format!("optimize_{}_members", member_count), |b| {
        b.iter(|| optimizer.optimize(black_box(&balances)))
    });
}

fn bench_settle_10_members(c: &mut Criterion) {
    bench_group(c, 10, 50);
}

fn bench_settle_100_members(c: &mut Criterion) {
    bench_group(c, 100, 1_000);
}

fn bench_settle_500_members(c: &mut Criterion) {
    bench_group(c, 500, 5_000);
}

criterion_group!(
    benches,
    bench_settle_10_members,
    bench_settle_100_members,
    bench_settle_500_members
);
criterion_main!(benches);
