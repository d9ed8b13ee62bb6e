use sysgen_shared::primitives::{Address, Bytes};

pub const EXTRA_VANITY_LENGTH: usize = 32;
pub const EXTRA_SEAL_LENGTH: usize = 65;
const ADDRESS_LENGTH: usize = 20;

/// Header extra-data carrying the initial validator set: vanity, packed addresses, seal.
/// Everything except the addresses is zeroed.
pub fn create_extra_data(validators: &[Address]) -> Bytes {
    let mut extra =
        vec![0u8; EXTRA_VANITY_LENGTH + ADDRESS_LENGTH * validators.len() + EXTRA_SEAL_LENGTH];
    let packed = extra[EXTRA_VANITY_LENGTH..].chunks_exact_mut(ADDRESS_LENGTH);
    for (validator, chunk) in validators.iter().zip(packed) {
        chunk.copy_from_slice(validator.as_slice());
    }
    extra.into()
}
