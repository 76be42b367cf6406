use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bullcall_bot::core::{
    build_chains, enumerate_spreads, rank_spreads, BaseAsset, Chain, Contract, FilterThresholds,
    OptionType, SpreadFilter, DEFAULT_TOP_N,
};

/// One expiry with `strikes` calls 50 apart, delta falling with strike
fn make_chain(expiry: &str, strikes: usize) -> Vec<Contract> {
    (0..strikes)
        .map(|i| {
            let strike = 1500.0 + i as f64 * 50.0;
            let delta = (0.95 - i as f64 * 0.03).max(0.02);
            let mark = (2500.0 - strike).max(5.0) * 0.1 + 10.0;
            Contract {
                symbol: format!("ETH-{}-{}-C", expiry, strike),
                base_asset: BaseAsset::Eth,
                expiry: expiry.to_string(),
                strike,
                option_type: OptionType::Call,
                bid: mark * 0.97,
                ask: mark * 1.03,
                mark_price: mark,
                iv: 0.55,
                delta,
                gamma: 0.0005,
                vega: 1.2,
                theta: -2.5,
                open_interest: 10.0,
                volume_24h: 25.0,
            }
        })
        .collect()
}

fn make_chains(expiries: usize, strikes: usize) -> Vec<Chain> {
    let contracts: Vec<Contract> = (0..expiries)
        .flat_map(|e| make_chain(&format!("{}DEC25", e + 1), strikes))
        .collect();
    build_chains(&contracts)
}

fn bench_enumerate_single_chain(c: &mut Criterion) {
    c.bench_function("enumerate_single_chain_40", |b| {
        let chains = make_chains(1, 40);
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0003);

        b.iter(|| {
            black_box(enumerate_spreads(black_box(&chains), &filter));
        });
    });
}

fn bench_full_chain_rank(c: &mut Criterion) {
    c.bench_function("enumerate_and_rank_8x40", |b| {
        let chains = make_chains(8, 40);
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0003);

        b.iter(|| {
            let candidates = enumerate_spreads(black_box(&chains), &filter);
            black_box(rank_spreads(candidates, DEFAULT_TOP_N));
        });
    });
}

fn bench_build_chains(c: &mut Criterion) {
    c.bench_function("build_chains_8x40", |b| {
        let contracts: Vec<Contract> = (0..8)
            .flat_map(|e| make_chain(&format!("{}DEC25", e + 1), 40))
            .collect();

        b.iter(|| {
            black_box(build_chains(black_box(&contracts)));
        });
    });
}

criterion_group!(
    benches,
    bench_enumerate_single_chain,
    bench_full_chain_rank,
    bench_build_chains
);
criterion_main!(benches);
