use std::sync::{Arc, Mutex};

use ousd_shell_core::{PortError, TimestampMs, TransactionLogPort, TransactionRecord, TxMetadata};

use crate::clock::now_ms;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionLogKind {
    Submitted(TransactionRecord),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionLogEntry {
    pub kind: TransactionLogKind,
    pub label: String,
    pub asset: String,
    pub metadata: TxMetadata,
    pub recorded_at: TimestampMs,
}

/// In-memory transaction log shared between the opt-in worker and the UI.
#[derive(Debug, Clone, Default)]
pub struct TransactionLogAdapter {
    entries: Arc<Mutex<Vec<TransactionLogEntry>>>,
}

impl TransactionLogAdapter {
    pub fn entries(&self) -> Result<Vec<TransactionLogEntry>, PortError> {
        Ok(self
            .entries
            .lock()
            .map_err(|e| PortError::Transport(format!("tx log lock poisoned: {e}")))?
            .clone())
    }

    fn push(&self, entry: TransactionLogEntry) -> Result<(), PortError> {
        self.entries
            .lock()
            .map_err(|e| PortError::Transport(format!("tx log lock poisoned: {e}")))?
            .push(entry);
        Ok(())
    }
}

impl TransactionLogPort for TransactionLogAdapter {
    fn store_transaction(
        &self,
        record: &TransactionRecord,
        label: &str,
        asset: &str,
        metadata: &TxMetadata,
    ) -> Result<(), PortError> {
        self.push(TransactionLogEntry {
            kind: TransactionLogKind::Submitted(record.clone()),
            label: label.to_owned(),
            asset: asset.to_owned(),
            metadata: metadata.clone(),
            recorded_at: now_ms()?,
        })
    }

    fn store_transaction_error(&self, label: &str, asset: &str) -> Result<(), PortError> {
        self.push(TransactionLogEntry {
            kind: TransactionLogKind::Failed,
            label: label.to_owned(),
            asset: asset.to_owned(),
            metadata: TxMetadata::new(),
            recorded_at: now_ms()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_submission_order() {
        let log = TransactionLogAdapter::default();
        log.store_transaction_error("rebaseOptIn", "ousd")
            .expect("store error");
        log.store_transaction(
            &TransactionRecord {
                hash: Default::default(),
                from: Default::default(),
                to: Default::default(),
                chain_id: 1,
            },
            "rebaseOptIn",
            "ousd",
            &TxMetadata::new(),
        )
        .expect("store tx");

        let entries = log.entries().expect("entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, TransactionLogKind::Failed);
        assert!(matches!(entries[1].kind, TransactionLogKind::Submitted(_)));
    }

    #[test]
    fn poisoned_log_reports_an_error() {
        let log = TransactionLogAdapter::default();
        let shared = log.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.entries.lock().expect("lock");
            panic!("poison the log");
        })
        .join();

        assert!(matches!(log.entries(), Err(PortError::Transport(_))));
        assert!(log.store_transaction_error("rebaseOptIn", "ousd").is_err());
    }
}
