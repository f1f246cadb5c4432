//! ABI-encoded initialization parameters for the shaman contracts used in
//! integration tests.
//!
//! The literal argument tuples are fixtures; encoding them is deterministic,
//! so the same fixture always produces byte-identical params.

use alloy_primitives::{address, Address, U256};
use alloy_sol_types::SolValue;

/// The veto threshold baked into the mock veto shaman params
const MOCK_VETO_THRESHOLD: u64 = 100;

/// The royalty recipient baked into the NFT curator shaman params
const NFT_CURATOR_RECIPIENT: Address = address!("CED608Aa29bB92185D9b6340Adcbfa263DAe075b");

/// Encode the mock veto shaman's initialization params: a single `uint256`
/// threshold
pub fn mock_veto_shaman_params() -> Vec<u8> {
    U256::from(MOCK_VETO_THRESHOLD).abi_encode()
}

/// Encode the NFT curator shaman's initialization params:
/// `(string, string, uint256, uint256, uint256, uint256, address, string)`
pub fn nft_curator_shaman_params() -> Vec<u8> {
    (
        "test".to_string(),
        "TOK".to_string(),
        U256::from(1_000_000_000_000_000_000u64),
        U256::from(1_000_000_000_000_000_000u64),
        U256::from(42_000_000_000_000u64),
        U256::from(5u64),
        NFT_CURATOR_RECIPIENT,
        "test".to_string(),
    )
        .abi_encode_params()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::{mock_veto_shaman_params, nft_curator_shaman_params, MOCK_VETO_THRESHOLD};

    #[test]
    fn veto_params_are_a_single_threshold_word() {
        let params = mock_veto_shaman_params();

        assert_eq!(params.len(), 32);
        assert_eq!(U256::from_be_slice(&params), U256::from(MOCK_VETO_THRESHOLD));
    }

    #[test]
    fn veto_params_encode_deterministically() {
        assert_eq!(mock_veto_shaman_params(), mock_veto_shaman_params());
    }

    #[test]
    fn nft_curator_params_encode_deterministically() {
        let first = nft_curator_shaman_params();
        let second = nft_curator_shaman_params();

        assert_eq!(first, second);
        // Eight head words, the first of which offsets the leading string
        assert_eq!(U256::from_be_slice(&first[..32]), U256::from(8 * 32));
    }
}
