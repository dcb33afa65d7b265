mod common;

use alloy::primitives::{Bytes, U256};
use alloy::sol_types::SolValue;

use ousd_shell_adapters::config::{MAINNET_OGN_STAKING, MAINNET_OUSD};
use ousd_shell_adapters::TransactionLogKind;
use ousd_shell_core::{
    OptInFailure, StakeList, StakeRecord, TransactionOutcome, USER_REJECTED_CODE,
};

use common::{deterministic_harness, owner_address};

fn contract_bytecode() -> Bytes {
    Bytes::from(vec![0x60, 0x80, 0x60, 0x40])
}

fn seeded_stake() -> StakeRecord {
    StakeRecord {
        amount: U256::from(1_000u64),
        end: 1_700_000_000,
        duration: 7_776_000,
        rate: U256::ZERO,
        paid: false,
        stake_type: 0,
    }
}

#[tokio::test]
async fn default_provider_connects_and_refreshes() {
    let h = deterministic_harness();
    h.stores
        .session
        .set(h.provider.connect().await.expect("connect"));

    h.stores
        .refresh_account(&h.provider)
        .await
        .expect("refresh on fresh account");

    let state = h.stores.snapshot();
    assert!(!state.rebase_opted_out);
    assert!(state.stakes.is_empty());
}

#[tokio::test]
async fn undecodable_stakes_keep_previous_list() {
    let h = deterministic_harness();
    h.stores
        .session
        .set(h.provider.connect().await.expect("connect"));
    h.stores.stakes.set(StakeList {
        stakes: vec![seeded_stake()],
    });
    h.provider
        .debug_set_call_result(MAINNET_OGN_STAKING, Bytes::from(vec![0xde, 0xad]))
        .expect("garble getAllStakes");

    h.stores
        .refresh_account(&h.provider)
        .await
        .expect("stake failure does not fail the refresh");

    let stakes = h.stores.snapshot().stakes;
    assert_eq!(stakes.len(), 1);
    assert_eq!(stakes.stakes[0], seeded_stake());
}

#[tokio::test]
async fn submitted_opt_in_reloads_rebase_status() {
    let h = deterministic_harness();
    h.provider
        .debug_set_code(owner_address(), contract_bytecode())
        .expect("mark account as contract");
    h.stores
        .session
        .set(h.provider.connect().await.expect("connect"));
    h.stores
        .refresh_account(&h.provider)
        .await
        .expect("refresh");
    assert!(h.stores.snapshot().rebase_opted_out);

    // chain state after the opt-in lands
    h.provider
        .debug_set_call_result(MAINNET_OUSD, Bytes::from(U256::from(2u8).abi_encode()))
        .expect("rebaseState OptIn");

    let state = h.stores.snapshot();
    let outcome = h
        .stores
        .opt_in_and_refresh(&h.provider, &h.tx_log, &state)
        .await;

    assert!(matches!(outcome, TransactionOutcome::Submitted(_)));
    assert!(!h.stores.snapshot().rebase_opted_out);
    let entries = h.tx_log.entries().expect("entries");
    assert_eq!(entries.len(), 1);
    assert!(matches!(entries[0].kind, TransactionLogKind::Submitted(_)));
}

#[tokio::test]
async fn rejected_opt_in_does_not_reload() {
    let h = deterministic_harness();
    h.provider
        .debug_set_code(owner_address(), contract_bytecode())
        .expect("mark account as contract");
    h.stores
        .session
        .set(h.provider.connect().await.expect("connect"));
    h.stores
        .refresh_account(&h.provider)
        .await
        .expect("refresh");

    h.provider
        .debug_set_call_result(MAINNET_OUSD, Bytes::from(U256::from(2u8).abi_encode()))
        .expect("rebaseState OptIn");
    h.provider
        .debug_reject_next(USER_REJECTED_CODE, "User rejected the request.")
        .expect("arm rejection");

    let state = h.stores.snapshot();
    let outcome = h
        .stores
        .opt_in_and_refresh(&h.provider, &h.tx_log, &state)
        .await;

    assert!(matches!(
        outcome,
        TransactionOutcome::Failed(OptInFailure::UserRejected(_))
    ));
    assert!(h.stores.snapshot().rebase_opted_out);
    assert!(h.tx_log.entries().expect("entries").is_empty());
}
