pub use alloy::primitives::{Address, B256, Bytes, U256, address, hex, keccak256};

/// Four byte function identifier.
pub type Selector = [u8; 4];

/// Computes the selector of a canonical signature such as `transfer(address,uint256)`.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    let mut result = [0; 4];
    result.copy_from_slice(&hash[..4]);
    result
}

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case("init()", hex!("e1c7392a"); "init")]
    #[test_case("transfer(address,uint256)", hex!("a9059cbb"); "erc20 transfer")]
    fn test_selector_is_first_four_bytes_of_signature_hash(signature: &str, expected: Selector) {
        let actual = selector(signature);

        assert_eq!(actual, expected);
    }
}
