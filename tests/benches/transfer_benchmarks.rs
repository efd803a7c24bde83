//! # Restricted Transfer Benchmarks
//!
//! | Path | Claim | Target |
//! |------|-------|--------|
//! | `send_coins` | Single linear pipeline, one ledger call | < 10μs |
//! | Chain fold | Linear in link count | < 100ns per link |
//! | Enablement check | One registry read per coin | < 1μs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_18_restricted_transfer::application::RestrictionChain;
use qc_18_restricted_transfer::prelude::*;
use rand::Rng;
use std::time::Duration;

fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn passthrough() -> Arc<dyn SendRestriction> {
    Arc::new(restriction_fn(|_, _, to: Address, _| Ok(to)))
}

// ============================================================================
// send_coins
// ============================================================================

fn bench_send_coins(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-send-coins");
    group.measurement_time(Duration::from_secs(5));

    for links in [0usize, 4, 16] {
        let backend = InMemoryBackend::new();
        let keeper = SendKeeper::new(&SendKeeperConfig::default(), backend.ports())
            .expect("default config is valid");
        let ctx = TransferContext::default();
        keeper.set_params(Params::default()).unwrap();
        keeper
            .init_balances(&ctx, &addr(1), &Coins::single("uatom", u64::MAX).unwrap())
            .unwrap();
        for _ in 0..links {
            keeper.append_send_restriction(passthrough());
        }
        let amount = Coins::single("uatom", 1u64).unwrap();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("links", links), &links, |b, _| {
            b.iter(|| {
                keeper
                    .send_coins(&ctx, &addr(1), &addr(2), black_box(&amount))
                    .unwrap();
                backend.events.take();
            })
        });
    }

    group.finish();
}

// ============================================================================
// Chain fold
// ============================================================================

fn bench_chain_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-restriction-chain");
    let ctx = TransferContext::default();
    let amount = Coins::single("uatom", 1u64).unwrap();

    for links in [1usize, 8, 64] {
        let chain = RestrictionChain::new();
        for _ in 0..links {
            chain.append(passthrough());
        }

        group.throughput(Throughput::Elements(links as u64));
        group.bench_with_input(BenchmarkId::new("apply", links), &links, |b, _| {
            b.iter(|| black_box(chain.apply(&ctx, &addr(1), addr(2), &amount)))
        });
    }

    group.finish();
}

// ============================================================================
// Enablement
// ============================================================================

fn bench_enablement(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-enablement");
    let backend = InMemoryBackend::new();
    let keeper = SendKeeper::new(&SendKeeperConfig::default(), backend.ports())
        .expect("default config is valid");

    let mut rng = rand::thread_rng();
    let denoms: Vec<Denom> = (0..1_000)
        .map(|i| Denom::new(format!("denom{i}")).unwrap())
        .collect();
    for denom in &denoms {
        keeper.set_send_enabled(denom, rng.gen_bool(0.9)).unwrap();
    }
    let coins: Vec<Coin> = denoms
        .iter()
        .take(8)
        .map(|d| Coin::new(d.as_str(), 1u64).unwrap())
        .collect();

    group.bench_function("is_send_enabled_coins_8", |b| {
        b.iter(|| black_box(keeper.is_send_enabled_coins(&coins)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_send_coins,
    bench_chain_apply,
    bench_enablement
);
criterion_main!(benches);
