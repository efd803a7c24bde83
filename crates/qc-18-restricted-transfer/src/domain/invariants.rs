//! Domain invariants for Restricted Transfer
//!
//! Checks used by tests and by embedders auditing an event stream.

use super::value_objects::{Address, Coins};
use crate::events::TransferEvent;

/// INVARIANT-1: Conservation
/// What the sender was debited equals what the recipient was credited.
pub fn invariant_value_conserved(debited: &Coins, credited: &Coins) -> bool {
    debited == credited
}

/// INVARIANT-2: Event Trail
/// A successful transfer emits exactly spent, received, transfer, message,
/// and every event agrees on sender, final recipient and amount.
pub fn invariant_event_trail(
    events: &[TransferEvent],
    sender: &Address,
    recipient: &Address,
    amount: &Coins,
) -> bool {
    match events {
        [TransferEvent::CoinSpent {
            address: spender,
            amount: spent,
        }, TransferEvent::CoinReceived {
            address: receiver,
            amount: received,
        }, TransferEvent::Transfer {
            recipient: t_recipient,
            sender: t_sender,
            amount: t_amount,
        }, TransferEvent::Message { sender: m_sender }] => {
            spender == sender
                && spent == amount
                && receiver == recipient
                && received == amount
                && t_recipient == recipient
                && t_sender == sender
                && t_amount == amount
                && m_sender == sender
        }
        _ => false,
    }
}

/// INVARIANT-3: Atomic Rejection
/// A rejected transfer leaves the event stream untouched.
pub fn invariant_no_events_on_rejection(before: usize, after: usize) -> bool {
    before == after
}
