//! # Transfer Flows
//!
//! Full pipeline over the in-memory adapters:
//!
//! 1. **Happy path**: balances move, value is conserved, the event trail is
//!    emitted in order and the recipient account is created.
//! 2. **Ledger failure**: insufficient funds surface verbatim with no events.
//! 3. **Enablement**: params and registry entries gate transfers.
//! 4. **Genesis**: import, transfer, export.

#[cfg(test)]
mod tests {
    use crate::fixtures::{addr, coins, funded_keeper, init_tracing, keeper_with, AUTHORITY};
    use qc_18_restricted_transfer::domain::invariants::{
        invariant_event_trail, invariant_no_events_on_rejection, invariant_value_conserved,
    };
    use qc_18_restricted_transfer::prelude::*;
    use std::ops::ControlFlow;

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[test]
    fn test_transfer_moves_balance_and_emits_trail() {
        init_tracing();
        let (keeper, backend) = funded_keeper(&[addr(1)], &["uatom"], 100);
        let amount = coins("uatom", 40);

        keeper
            .send_coins(&TransferContext::new(10), &addr(1), &addr(2), &amount)
            .unwrap();

        assert_eq!(backend.ledger.balance(&addr(1)), coins("uatom", 60));
        assert_eq!(backend.ledger.balance(&addr(2)), coins("uatom", 40));

        let (debited, credited) = backend.ledger.transfer_totals();
        assert!(invariant_value_conserved(&debited, &credited));
        assert_eq!(backend.ledger.total_supply(), Some(coins("uatom", 100)));

        assert!(invariant_event_trail(
            &backend.events.events(),
            &addr(1),
            &addr(2),
            &amount
        ));
        assert_eq!(keeper.stats().new_accounts, 1);
        assert_eq!(keeper.stats().transfers_succeeded, 1);
    }

    #[test]
    fn test_second_transfer_to_same_recipient_creates_no_account() {
        let (keeper, backend) = funded_keeper(&[addr(1)], &["uatom"], 100);
        let ctx = TransferContext::default();

        keeper
            .send_coins(&ctx, &addr(1), &addr(2), &coins("uatom", 1))
            .unwrap();
        keeper
            .send_coins(&ctx, &addr(1), &addr(2), &coins("uatom", 1))
            .unwrap();

        assert_eq!(keeper.stats().new_accounts, 1);
        assert_eq!(backend.events.len(), 8);
    }

    #[test]
    fn test_multi_denom_transfer() {
        let (keeper, backend) = funded_keeper(&[addr(1)], &["uatom", "uusdc"], 50);
        let amount = Coins::from_coins([
            Coin::new("uusdc", 20u64).unwrap(),
            Coin::new("uatom", 5u64).unwrap(),
        ])
        .unwrap();

        keeper
            .send_coins(&TransferContext::default(), &addr(1), &addr(3), &amount)
            .unwrap();

        assert_eq!(backend.ledger.balance(&addr(3)), amount);
        let transfer = backend
            .events
            .events()
            .into_iter()
            .find(|e| e.event_type() == "transfer")
            .unwrap();
        assert!(transfer
            .attributes()
            .contains(&("amount", "5uatom,20uusdc".to_string())));
    }

    // =============================================================================
    // LEDGER FAILURE
    // =============================================================================

    #[test]
    fn test_insufficient_funds_is_atomic() {
        let (keeper, backend) = funded_keeper(&[addr(1)], &["uatom"], 10);
        let before = backend.events.len();

        let err = keeper
            .send_coins(
                &TransferContext::default(),
                &addr(1),
                &addr(2),
                &coins("uatom", 11),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            SendError::Ledger(LedgerError::InsufficientFunds { .. })
        ));
        assert!(err.to_string().starts_with("insufficient funds"));
        assert!(invariant_no_events_on_rejection(before, backend.events.len()));
        assert_eq!(backend.ledger.balance(&addr(1)), coins("uatom", 10));
        assert!(backend.ledger.balance(&addr(2)).is_empty());
        assert!(!backend.accounts.has_account(&TransferContext::default(), &addr(2)));
        assert_eq!(keeper.stats().transfers_rejected, 1);
    }

    // =============================================================================
    // ENABLEMENT
    // =============================================================================

    #[test]
    fn test_default_disabled_with_explicit_enable() {
        let (keeper, backend) = funded_keeper(&[addr(1)], &["uatom", "uusdc"], 100);
        keeper.update_params(&AUTHORITY, Params::new(false)).unwrap();
        keeper
            .set_send_enabled(&Denom::new("uusdc").unwrap(), true)
            .unwrap();
        let ctx = TransferContext::default();

        keeper
            .send_coins(&ctx, &addr(1), &addr(2), &coins("uusdc", 10))
            .unwrap();
        let err = keeper
            .send_coins(&ctx, &addr(1), &addr(2), &coins("uatom", 10))
            .unwrap_err();

        assert_eq!(err.to_string(), "uatom transfers are currently disabled");
        assert_eq!(backend.ledger.balance(&addr(2)), coins("uusdc", 10));
    }

    #[test]
    fn test_keeper_without_stored_params_refuses_sends() {
        let backend = InMemoryBackend::new();
        let keeper = SendKeeper::new(&SendKeeperConfig::default(), backend.ports()).unwrap();
        let ctx = TransferContext::default();
        keeper
            .init_balances(&ctx, &addr(1), &coins("uatom", 10))
            .unwrap();

        let err = keeper
            .send_coins(&ctx, &addr(1), &addr(2), &coins("uatom", 1))
            .unwrap_err();

        assert_eq!(err.to_string(), "uatom transfers are currently disabled");
        assert_eq!(backend.ledger.balance(&addr(1)), coins("uatom", 10));
        assert!(backend.events.is_empty());
    }

    #[test]
    fn test_legacy_params_become_registry_entries() {
        let (keeper, backend) = keeper_with(SendKeeperConfig::default());
        let uatom = Denom::new("uatom").unwrap();
        let params = Params {
            default_send_enabled: true,
            send_enabled: vec![SendEnabled::new(uatom.clone(), false)],
        };

        keeper.update_params(&AUTHORITY, params).unwrap();

        assert!(keeper.get_params().send_enabled.is_empty());
        assert!(!keeper.is_send_enabled_denom(&uatom));

        // A later param set without the legacy list keeps the entry.
        keeper.update_params(&AUTHORITY, Params::new(true)).unwrap();
        assert_eq!(
            keeper.get_send_enabled_entry(&uatom),
            Some(SendEnabled::new(uatom, false))
        );
    }

    #[test]
    fn test_iterate_entries_stops_early() {
        let (keeper, _backend) = keeper_with(SendKeeperConfig::default());
        let entries: Vec<SendEnabled> = ["a", "b", "c", "d"]
            .iter()
            .map(|d| SendEnabled::new(Denom::new(*d).unwrap(), true))
            .collect();
        keeper.set_all_send_enabled(&entries).unwrap();

        let mut visited = Vec::new();
        keeper
            .iterate_send_enabled_entries(&mut |denom, _| {
                visited.push(denom.to_string());
                if visited.len() == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(visited, vec!["a", "b"]);
        assert_eq!(keeper.get_all_send_enabled_entries().unwrap(), entries);
    }

    // =============================================================================
    // GENESIS
    // =============================================================================

    #[test]
    fn test_genesis_round_trip_through_json() {
        let (keeper, backend) = keeper_with(SendKeeperConfig::default());
        let genesis: GenesisState = serde_json::from_value(serde_json::json!({
            "params": { "default_send_enabled": true },
            "send_enabled": [{ "denom": "ufrozen", "enabled": false }],
            "balances": [{
                "address": format_address(&addr(1)),
                "coins": { "uatom": "0x64" }
            }]
        }))
        .unwrap();

        keeper
            .init_genesis(&TransferContext::default(), &genesis)
            .unwrap();

        assert_eq!(backend.ledger.balance(&addr(1)), coins("uatom", 100));
        let exported = keeper.export_genesis().unwrap();
        assert_eq!(exported.send_enabled, genesis.send_enabled);
        assert_eq!(exported.params, genesis.params);
    }
}
