use {
    revm::state::EvmState,
    std::collections::{BTreeMap, HashMap},
    sysgen_shared::primitives::{Address, B256, U256},
};

/// Storage slots modified by successive executions, per account.
///
/// Later executions overwrite the values recorded by earlier ones, so the map always
/// holds the present value of every slot that was ever written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    accounts: HashMap<Address, BTreeMap<U256, U256>>,
}

impl WriteSet {
    pub fn record(&mut self, state: &EvmState) {
        for (address, account) in state {
            // If the account is not touched then there are no changes.
            if !account.is_touched() {
                continue;
            }
            let slots = account
                .changed_storage_slots()
                .map(|(index, slot)| (*index, slot.present_value));
            self.accounts.entry(*address).or_default().extend(slots);
        }
    }

    pub fn for_account(&self, address: &Address) -> BTreeMap<B256, B256> {
        self.accounts
            .get(address)
            .map(|slots| {
                slots
                    .iter()
                    .map(|(index, value)| (to_word(index), to_word(value)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn to_word(value: &U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}
