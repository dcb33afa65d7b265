//! Rebase opt-in submission.
//!
//! `submit` talks to the wallet and `settle` applies the reporting rules to
//! its result; `rebase_opt_in` runs one after the other.

use crate::contracts;
use crate::domain::{
    ContractHandle, Session, TransactionRecord, TxMetadata, OUSD_ASSET, REBASE_OPT_IN_LABEL,
};
use crate::ports::{PortError, ProviderPort, TransactionLogPort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptInFailure {
    /// Wallet returned code 4001; a cancellation, not an error.
    UserRejected(PortError),
    Other(PortError),
}

impl OptInFailure {
    pub fn classify(error: PortError) -> Self {
        if error.is_user_rejection() {
            OptInFailure::UserRejected(error)
        } else {
            OptInFailure::Other(error)
        }
    }

    pub fn error(&self) -> &PortError {
        match self {
            OptInFailure::UserRejected(e) | OptInFailure::Other(e) => e,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Submitted(TransactionRecord),
    Failed(OptInFailure),
}

/// Sends `rebaseOptIn()` signed by the connected account.
async fn submit_rebase_opt_in<P: ProviderPort>(
    provider: &P,
    session: &Session,
    ousd: Option<&ContractHandle>,
) -> Result<TransactionRecord, PortError> {
    let account = session
        .account
        .filter(|_| session.is_connected())
        .ok_or_else(|| PortError::Precondition("no connected account".to_owned()))?;
    let ousd = ousd.ok_or_else(|| PortError::Precondition("ousd contract not loaded".to_owned()))?;

    let request = contracts::rebase_opt_in_request(account, ousd.address);
    tracing::debug!(from = %account, to = %ousd.address, "submitting rebaseOptIn");
    let hash = provider.send_transaction(&request).await?;
    Ok(TransactionRecord {
        hash,
        from: account,
        to: ousd.address,
        chain_id: session.chain_id,
    })
}

fn settle_rebase_opt_in<L: TransactionLogPort + ?Sized>(
    log: &L,
    result: Result<TransactionRecord, PortError>,
) -> TransactionOutcome {
    match result {
        Ok(record) => {
            if let Err(e) =
                log.store_transaction(&record, REBASE_OPT_IN_LABEL, OUSD_ASSET, &TxMetadata::new())
            {
                tracing::warn!(error = %e, "failed to record rebaseOptIn transaction");
            }
            tracing::info!(hash = %record.hash, "rebaseOptIn submitted");
            TransactionOutcome::Submitted(record)
        }
        Err(error) => {
            let failure = OptInFailure::classify(error);
            if let OptInFailure::Other(_) = failure {
                if let Err(e) = log.store_transaction_error(REBASE_OPT_IN_LABEL, OUSD_ASSET) {
                    tracing::warn!(error = %e, "failed to record rebaseOptIn error");
                }
            }
            tracing::error!(
                error = %failure.error(),
                code = ?failure.error().code(),
                "Error OUSD REBASE OPT IN"
            );
            TransactionOutcome::Failed(failure)
        }
    }
}

/// One click of the opt-in button. No retry; a failed attempt needs another click.
pub async fn rebase_opt_in<P, L>(
    provider: &P,
    log: &L,
    session: &Session,
    ousd: Option<&ContractHandle>,
) -> TransactionOutcome
where
    P: ProviderPort,
    L: TransactionLogPort + ?Sized,
{
    let result = submit_rebase_opt_in(provider, session, ousd).await;
    settle_rebase_opt_in(log, result)
}
