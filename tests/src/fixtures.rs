//! Shared fixtures for integration tests and benches.

use qc_18_restricted_transfer::prelude::*;

/// Authority used by every fixture keeper.
pub const AUTHORITY: Address = Address::repeat_byte(0xee);

/// Deterministic test address.
pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Single-denom coin set.
pub fn coins(denom: &str, amount: u64) -> Coins {
    Coins::single(denom, amount).expect("valid test denom")
}

/// Keeper over fresh in-memory adapters, with default params stored.
pub fn keeper_with(config: SendKeeperConfig) -> (SendKeeper, InMemoryBackend) {
    let backend = InMemoryBackend::new();
    let keeper = SendKeeper::new(&config.with_authority(AUTHORITY), backend.ports())
        .expect("valid fixture config");
    keeper
        .set_params(Params::default())
        .expect("params store writable");
    (keeper, backend)
}

/// Keeper with default config and `funded` accounts holding `amount` of each
/// listed denom.
pub fn funded_keeper(
    funded: &[Address],
    denoms: &[&str],
    amount: u64,
) -> (SendKeeper, InMemoryBackend) {
    let (keeper, backend) = keeper_with(SendKeeperConfig::default());
    let ctx = TransferContext::default();
    for address in funded {
        for denom in denoms {
            keeper
                .init_balances(&ctx, address, &coins(denom, amount))
                .expect("mint succeeds");
        }
    }
    (keeper, backend)
}

/// Install a `RUST_LOG`-filtered subscriber that writes through the test
/// harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
