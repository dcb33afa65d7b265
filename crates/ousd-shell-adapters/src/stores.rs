//! Shared client-side stores.
//!
//! Readers take snapshots; writers bump a revision so the UI only re-snapshots
//! after a write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use ousd_shell_core::{
    fetch_account_flags, fetch_stakes, rebase_opt_in, AccountFlags, ContractRegistry, PortError,
    ProviderPort, Session, ShellState, StakeList, TransactionLogPort, TransactionOutcome,
    OUSD_CONTRACT, STAKING_CONTRACT,
};

use crate::ShellConfig;

#[derive(Debug)]
pub struct Store<T> {
    inner: Arc<RwLock<T>>,
    revision: Arc<AtomicU64>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn select<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
            f(&mut guard);
        }
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl<T: Clone> Store<T> {
    pub fn get(&self) -> T {
        self.select(T::clone)
    }

    pub fn set(&self, value: T) {
        self.update(|slot| *slot = value);
    }
}

/// The four slices the page shell reads.
#[derive(Debug, Clone, Default)]
pub struct ShellStores {
    pub session: Store<Session>,
    pub contracts: Store<ContractRegistry>,
    pub account: Store<AccountFlags>,
    pub stakes: Store<StakeList>,
}

impl ShellStores {
    pub fn from_config(config: &ShellConfig) -> Self {
        let stores = Self::default();
        stores.contracts.set(config.contract_registry());
        stores
    }

    pub fn snapshot(&self) -> ShellState {
        ShellState {
            session: self.session.get(),
            rebase_opted_out: self.account.select(|a| a.rebase_opted_out),
            ousd_contract: self.contracts.select(|c| c.get(OUSD_CONTRACT).cloned()),
            stakes: self.stakes.get(),
        }
    }

    /// Sum of slice revisions; changes whenever any slice is written.
    pub fn revision(&self) -> u64 {
        self.session.revision()
            + self.contracts.revision()
            + self.account.revision()
            + self.stakes.revision()
    }

    pub fn disconnect(&self) {
        self.session.set(Session::default());
        self.account.set(AccountFlags::default());
        self.stakes.set(StakeList::default());
    }

    /// Reloads account flags and stakes for the connected account.
    pub async fn refresh_account<P: ProviderPort>(&self, provider: &P) -> Result<(), PortError> {
        let Some(account) = self.session.select(|s| s.account) else {
            self.account.set(AccountFlags::default());
            self.stakes.set(StakeList::default());
            return Ok(());
        };
        let (ousd, staking) = self.contracts.select(|c| {
            (
                c.get(OUSD_CONTRACT).cloned(),
                c.get(STAKING_CONTRACT).cloned(),
            )
        });

        if let Some(ousd) = ousd {
            let flags = fetch_account_flags(provider, &ousd, account).await?;
            self.account.set(flags);
        }
        if let Some(staking) = staking {
            match fetch_stakes(provider, &staking, account).await {
                Ok(stakes) => self.stakes.set(stakes),
                Err(e) => {
                    tracing::warn!(error = %e, "stake list unavailable; keeping previous value")
                }
            }
        }
        Ok(())
    }

    /// Submits the opt-in against `state` (read at click time). A submitted
    /// transaction reloads the account so the opt-in notice can drop.
    pub async fn opt_in_and_refresh<P, L>(
        &self,
        provider: &P,
        log: &L,
        state: &ShellState,
    ) -> TransactionOutcome
    where
        P: ProviderPort,
        L: TransactionLogPort + ?Sized,
    {
        let outcome =
            rebase_opt_in(provider, log, &state.session, state.ousd_contract.as_ref()).await;
        if let TransactionOutcome::Submitted(_) = outcome {
            if let Err(e) = self.refresh_account(provider).await {
                tracing::warn!(error = %e, "account refresh after opt-in failed");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_bumps_revision_and_clones_share_state() {
        let store = Store::new(AccountFlags::default());
        let other = store.clone();
        assert_eq!(store.revision(), 0);
        other.update(|a| a.rebase_opted_out = true);
        assert!(store.get().rebase_opted_out);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn snapshot_resolves_ousd_from_registry() {
        let stores = ShellStores::from_config(&ShellConfig::default());
        let snapshot = stores.snapshot();
        assert_eq!(
            snapshot.ousd_contract.map(|c| c.address),
            Some(crate::config::MAINNET_OUSD)
        );
        assert!(!snapshot.rebase_opted_out);
        assert!(snapshot.stakes.is_empty());
    }

    #[test]
    fn any_slice_write_moves_the_combined_revision() {
        let stores = ShellStores::from_config(&ShellConfig::default());
        let before = stores.revision();
        assert_eq!(stores.revision(), before);
        stores.stakes.set(StakeList::default());
        assert_ne!(stores.revision(), before);
        let after_stakes = stores.revision();
        stores.disconnect();
        assert!(stores.revision() > after_stakes);
    }

    #[test]
    fn disconnect_clears_account_slices() {
        let stores = ShellStores::default();
        stores.account.set(AccountFlags {
            rebase_opted_out: true,
        });
        stores.disconnect();
        assert!(!stores.snapshot().rebase_opted_out);
        assert!(!stores.snapshot().session.is_connected());
    }
}
