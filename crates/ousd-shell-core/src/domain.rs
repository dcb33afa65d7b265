use std::collections::BTreeMap;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Registry key of the OUSD token contract.
pub const OUSD_CONTRACT: &str = "ousd";
/// Registry key of the legacy OGN staking contract.
pub const STAKING_CONTRACT: &str = "ognStaking";
/// Operation label recorded with every opt-in log entry.
pub const REBASE_OPT_IN_LABEL: &str = "rebaseOptIn";
/// Asset identifier recorded with every opt-in log entry.
pub const OUSD_ASSET: &str = "ousd";
/// EIP-1193 `code` of a request the user rejected in their wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorKind {
    Injected,
    Proxy,
    Deterministic,
}

/// Wallet connection as seen by the page shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub connector: Option<ConnectorKind>,
    pub account: Option<Address>,
    pub chain_id: u64,
}

impl Session {
    pub fn connected(connector: ConnectorKind, account: Address, chain_id: u64) -> Self {
        Self {
            connector: Some(connector),
            account: Some(account),
            chain_id,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connector.is_some() && self.account.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHandle {
    pub name: String,
    pub address: Address,
}

impl ContractHandle {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

/// Deployed contracts keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRegistry {
    contracts: BTreeMap<String, ContractHandle>,
}

impl ContractRegistry {
    pub fn insert(&mut self, handle: ContractHandle) {
        self.contracts.insert(handle.name.clone(), handle);
    }

    pub fn get(&self, name: &str) -> Option<&ContractHandle> {
        self.contracts.get(name)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFlags {
    pub rebase_opted_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    pub amount: U256,
    pub end: u64,
    pub duration: u64,
    pub rate: U256,
    pub paid: bool,
    pub stake_type: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeList {
    pub stakes: Vec<StakeRecord>,
}

impl StakeList {
    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stakes.len()
    }
}

pub type TxMetadata = BTreeMap<String, String>;

/// A write call handed to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
}

impl TxRequest {
    /// EIP-1193 `eth_sendTransaction` / `eth_call` parameter object.
    pub fn to_rpc_value(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "to": self.to.to_string(),
            "data": self.data.to_string(),
        });
        if let Some(from) = self.from {
            value["from"] = serde_json::Value::String(from.to_string());
        }
        value
    }
}

/// Result of a submitted transaction as handed to the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: B256,
    pub from: Address,
    pub to: Address,
    pub chain_id: u64,
}
