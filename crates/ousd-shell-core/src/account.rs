//! Account-level reads that feed the account and stake stores.

use alloy::primitives::Address;

use crate::contracts;
use crate::domain::{AccountFlags, ContractHandle, StakeList};
use crate::ports::{PortError, ProviderPort};

/// OUSD `RebaseOptions` as stored per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseOption {
    NotSet,
    OptOut,
    OptIn,
    YieldDelegationSource,
    YieldDelegationTarget,
    Unknown(u8),
}

impl From<u8> for RebaseOption {
    fn from(raw: u8) -> Self {
        match raw {
            0 => RebaseOption::NotSet,
            1 => RebaseOption::OptOut,
            2 => RebaseOption::OptIn,
            3 => RebaseOption::YieldDelegationSource,
            4 => RebaseOption::YieldDelegationTarget,
            other => RebaseOption::Unknown(other),
        }
    }
}

impl RebaseOption {
    /// Contracts start out non-rebasing until they opt in. Delegation and
    /// unrecognised states never show the opt-in notice.
    pub fn is_opted_out(self, is_contract: bool) -> bool {
        match self {
            RebaseOption::OptOut => true,
            RebaseOption::NotSet => is_contract,
            RebaseOption::OptIn
            | RebaseOption::YieldDelegationSource
            | RebaseOption::YieldDelegationTarget
            | RebaseOption::Unknown(_) => false,
        }
    }
}

pub async fn fetch_account_flags<P: ProviderPort>(
    provider: &P,
    ousd: &ContractHandle,
    account: Address,
) -> Result<AccountFlags, PortError> {
    let code = provider.get_code(account).await?;
    let output = provider
        .call(&contracts::rebase_state_request(ousd.address, account))
        .await?;
    let option = RebaseOption::from(contracts::decode_rebase_state(&output)?);
    if let RebaseOption::Unknown(raw) = option {
        tracing::warn!(%account, raw, "unrecognised rebase option; treating as rebasing");
    }
    let flags = AccountFlags {
        rebase_opted_out: option.is_opted_out(!code.is_empty()),
    };
    tracing::debug!(%account, ?option, opted_out = flags.rebase_opted_out, "account flags refreshed");
    Ok(flags)
}

pub async fn fetch_stakes<P: ProviderPort>(
    provider: &P,
    staking: &ContractHandle,
    account: Address,
) -> Result<StakeList, PortError> {
    let output = provider
        .call(&contracts::all_stakes_request(staking.address, account))
        .await?;
    let stakes = contracts::decode_all_stakes(&output)?;
    tracing::debug!(%account, count = stakes.len(), "stakes loaded");
    Ok(StakeList { stakes })
}
