//! ABI surface of the contracts the shell talks to.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::domain::{StakeRecord, TxRequest};
use crate::ports::PortError;

sol! {
    #[allow(missing_docs)]
    interface IOUSD {
        function rebaseOptIn() external;
        function rebaseState(address account) external view returns (uint8);
    }

    #[allow(missing_docs)]
    struct Stake {
        uint256 amount;
        uint64 end;
        uint64 duration;
        uint240 rate;
        bool paid;
        uint8 stakeType;
    }

    #[allow(missing_docs)]
    interface ISingleAssetStaking {
        function getAllStakes(address account) external view returns (Stake[] memory);
    }
}

pub fn rebase_opt_in_request(from: Address, ousd: Address) -> TxRequest {
    TxRequest {
        from: Some(from),
        to: ousd,
        data: Bytes::from(IOUSD::rebaseOptInCall {}.abi_encode()),
    }
}

pub fn rebase_state_request(ousd: Address, account: Address) -> TxRequest {
    TxRequest {
        from: None,
        to: ousd,
        data: Bytes::from(IOUSD::rebaseStateCall { account }.abi_encode()),
    }
}

pub fn decode_rebase_state(output: &[u8]) -> Result<u8, PortError> {
    IOUSD::rebaseStateCall::abi_decode_returns(output, true)
        .map(|ret| ret._0)
        .map_err(|e| PortError::Validation(format!("rebaseState decode failed: {e}")))
}

pub fn all_stakes_request(staking: Address, account: Address) -> TxRequest {
    TxRequest {
        from: None,
        to: staking,
        data: Bytes::from(ISingleAssetStaking::getAllStakesCall { account }.abi_encode()),
    }
}

pub fn decode_all_stakes(output: &[u8]) -> Result<Vec<StakeRecord>, PortError> {
    let ret = ISingleAssetStaking::getAllStakesCall::abi_decode_returns(output, true)
        .map_err(|e| PortError::Validation(format!("getAllStakes decode failed: {e}")))?;
    Ok(ret
        ._0
        .into_iter()
        .map(|stake| StakeRecord {
            amount: stake.amount,
            end: stake.end,
            duration: stake.duration,
            rate: U256::from_limbs(stake.rate.into_limbs()),
            paid: stake.paid,
            stake_type: stake.stakeType,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use alloy::primitives::keccak256;
    use alloy::sol_types::SolValue;

    use super::*;

    #[test]
    fn opt_in_calldata_is_bare_selector() {
        let request = rebase_opt_in_request(Address::repeat_byte(1), Address::repeat_byte(2));
        assert_eq!(request.data.len(), 4);
        assert_eq!(&request.data[..], &keccak256("rebaseOptIn()")[..4]);
        assert_eq!(request.from, Some(Address::repeat_byte(1)));
    }

    #[test]
    fn rebase_state_decodes_single_word() {
        let output = U256::from(2u8).abi_encode();
        assert_eq!(decode_rebase_state(&output).expect("decode"), 2);
    }

    #[test]
    fn truncated_rebase_state_is_rejected() {
        let err = decode_rebase_state(&[0u8; 7]).expect_err("must fail");
        assert!(matches!(err, PortError::Validation(_)));
    }

    #[test]
    fn empty_stake_array_decodes() {
        let output = Vec::<Stake>::new().abi_encode();
        assert!(decode_all_stakes(&output).expect("decode").is_empty());
    }
}
