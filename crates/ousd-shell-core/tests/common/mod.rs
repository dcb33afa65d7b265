#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use ousd_shell_core::{
    ConnectorKind, ContractHandle, PortError, ProviderPort, Session, TransactionLogPort,
    TransactionRecord, TxMetadata, TxRequest, OUSD_CONTRACT,
};

/// Provider whose responses are fixed up front by the test.
#[derive(Debug)]
pub struct ScriptedProvider {
    pub send_result: Result<B256, PortError>,
    pub code: Bytes,
    pub call_output: Bytes,
    pub sent: Mutex<Vec<TxRequest>>,
}

impl ScriptedProvider {
    pub fn accepting() -> Self {
        Self::with_send_result(Ok(B256::repeat_byte(0xab)))
    }

    pub fn rejecting(code: i64) -> Self {
        Self::with_send_result(Err(PortError::Rpc {
            code,
            message: "wallet error".to_owned(),
        }))
    }

    pub fn with_send_result(send_result: Result<B256, PortError>) -> Self {
        Self {
            send_result,
            code: Bytes::new(),
            call_output: Bytes::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("sent lock").len()
    }
}

#[async_trait(?Send)]
impl ProviderPort for ScriptedProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        Ok(vec![owner_address()])
    }

    async fn chain_id(&self) -> Result<u64, PortError> {
        Ok(1)
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<B256, PortError> {
        self.sent.lock().expect("sent lock").push(tx.clone());
        self.send_result.clone()
    }

    async fn call(&self, _tx: &TxRequest) -> Result<Bytes, PortError> {
        Ok(self.call_output.clone())
    }

    async fn get_code(&self, _address: Address) -> Result<Bytes, PortError> {
        Ok(self.code.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogCall {
    Transaction {
        record: TransactionRecord,
        label: String,
        asset: String,
        metadata: TxMetadata,
    },
    Error {
        label: String,
        asset: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingLog {
    pub calls: Mutex<Vec<LogCall>>,
}

impl RecordingLog {
    pub fn calls(&self) -> Vec<LogCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl TransactionLogPort for RecordingLog {
    fn store_transaction(
        &self,
        record: &TransactionRecord,
        label: &str,
        asset: &str,
        metadata: &TxMetadata,
    ) -> Result<(), PortError> {
        self.calls.lock().expect("calls lock").push(LogCall::Transaction {
            record: record.clone(),
            label: label.to_owned(),
            asset: asset.to_owned(),
            metadata: metadata.clone(),
        });
        Ok(())
    }

    fn store_transaction_error(&self, label: &str, asset: &str) -> Result<(), PortError> {
        self.calls.lock().expect("calls lock").push(LogCall::Error {
            label: label.to_owned(),
            asset: asset.to_owned(),
        });
        Ok(())
    }
}

/// Counts ERROR level events emitted while installed.
#[derive(Debug, Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::registry().with(self.clone())
    }
}

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

pub fn ousd_handle() -> ContractHandle {
    ContractHandle::new(
        OUSD_CONTRACT,
        "0x2A8e1E676Ec238d8A992307B495b45B3fEAa5e86"
            .parse()
            .expect("valid ousd address"),
    )
}

pub fn connected_session() -> Session {
    Session::connected(ConnectorKind::Injected, owner_address(), 1)
}
