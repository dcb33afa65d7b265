use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{TransactionRecord, TxMetadata, TxRequest, USER_REJECTED_CODE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl PortError {
    pub fn code(&self) -> Option<i64> {
        match self {
            PortError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code() == Some(USER_REJECTED_CODE)
    }
}

/// EIP-1193 style wallet provider. Futures are not `Send`; callers drive them
/// on the task that created them.
#[async_trait(?Send)]
pub trait ProviderPort {
    async fn request_accounts(&self) -> Result<Vec<Address>, PortError>;
    async fn chain_id(&self) -> Result<u64, PortError>;
    async fn send_transaction(&self, tx: &TxRequest) -> Result<B256, PortError>;
    async fn call(&self, tx: &TxRequest) -> Result<Bytes, PortError>;
    async fn get_code(&self, address: Address) -> Result<Bytes, PortError>;
}

/// Sink for transaction lifecycle events; rendering them is someone else's job.
pub trait TransactionLogPort {
    fn store_transaction(
        &self,
        record: &TransactionRecord,
        label: &str,
        asset: &str,
        metadata: &TxMetadata,
    ) -> Result<(), PortError>;
    fn store_transaction_error(&self, label: &str, asset: &str) -> Result<(), PortError>;
}
