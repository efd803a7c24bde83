//! # Concurrency
//!
//! Transfers racing restriction-chain mutation. Each transfer must see a
//! single chain version, so every outcome is either a full success or a
//! clean rejection and the ledger stays conserved.

#[cfg(test)]
mod tests {
    use crate::fixtures::{addr, coins, funded_keeper};
    use qc_18_restricted_transfer::prelude::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::thread;

    const SENDERS: u8 = 4;
    const TRANSFERS_PER_SENDER: u64 = 200;

    #[test]
    fn test_chain_mutation_during_transfers_is_all_or_nothing() {
        let senders: Vec<Address> = (1..=SENDERS).map(addr).collect();
        let (keeper, backend) = funded_keeper(&senders, &["uatom"], 1_000);
        let recipient = addr(0xaa);
        let supply_before = backend.ledger.total_supply();

        let succeeded = AtomicU64::new(0);
        let rejected = AtomicU64::new(0);
        let done = AtomicBool::new(false);

        thread::scope(|s| {
            s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    keeper.append_send_restriction(Arc::new(FrozenSenders::new([addr(1)])));
                    keeper.prepend_send_restriction(Arc::new(restriction_fn(
                        |_, _, to: Address, _| Ok(to),
                    )));
                    keeper.clear_send_restriction();
                }
            });

            let workers: Vec<_> = senders
                .iter()
                .map(|sender| {
                    let (keeper, succeeded, rejected) = (&keeper, &succeeded, &rejected);
                    s.spawn(move || {
                        for height in 0..TRANSFERS_PER_SENDER {
                            let ctx = TransferContext::new(height);
                            match keeper.send_coins(&ctx, sender, &recipient, &coins("uatom", 1)) {
                                Ok(()) => succeeded.fetch_add(1, Ordering::Relaxed),
                                Err(SendError::Restriction(_)) => {
                                    rejected.fetch_add(1, Ordering::Relaxed)
                                }
                                Err(other) => panic!("unexpected error: {other}"),
                            };
                        }
                    })
                })
                .collect();

            for worker in workers {
                worker.join().unwrap();
            }
            done.store(true, Ordering::Relaxed);
        });

        let succeeded = succeeded.into_inner();
        let rejected = rejected.into_inner();

        assert_eq!(succeeded + rejected, u64::from(SENDERS) * TRANSFERS_PER_SENDER);
        assert_eq!(backend.ledger.total_supply(), supply_before);
        assert_eq!(backend.ledger.balance(&recipient), coins("uatom", succeeded));
        assert_eq!(backend.events.len() as u64, succeeded * 4);

        let stats = keeper.stats();
        assert_eq!(stats.transfers_succeeded, succeeded);
        assert_eq!(stats.transfers_rejected, rejected);
        assert_eq!(stats.new_accounts, 1);
    }

    #[test]
    fn test_concurrent_registry_reads_and_writes() {
        let (keeper, _backend) = funded_keeper(&[], &[], 0);
        let uatom = Denom::new("uatom").unwrap();

        thread::scope(|s| {
            for i in 0..4 {
                let (keeper, uatom) = (&keeper, &uatom);
                s.spawn(move || {
                    for n in 0..100 {
                        keeper.set_send_enabled(uatom, (i + n) % 2 == 0).unwrap();
                        let _ = keeper.is_send_enabled_denom(uatom);
                    }
                });
            }
        });

        assert_eq!(keeper.get_all_send_enabled_entries().unwrap().len(), 1);
    }
}
