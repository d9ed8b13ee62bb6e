use {
    crate::config::{InitialStakes, NetworkProfile},
    sysgen_evm_ext::{ConstructorSpec, DynSolValue, INIT_SELECTOR},
    sysgen_shared::primitives::{Address, Selector, U256, address},
};

pub const STAKING_ADDRESS: Address = address!("0000000000000000000000000000000000001000");
pub const SLASHING_INDICATOR_ADDRESS: Address =
    address!("0000000000000000000000000000000000001001");
pub const SYSTEM_REWARD_ADDRESS: Address = address!("0000000000000000000000000000000000001002");
pub const STAKING_POOL_ADDRESS: Address = address!("0000000000000000000000000000000000007001");
pub const GOVERNANCE_ADDRESS: Address = address!("0000000000000000000000000000000000007002");
pub const CHAIN_CONFIG_ADDRESS: Address = address!("0000000000000000000000000000000000007003");
pub const RUNTIME_UPGRADE_ADDRESS: Address = address!("0000000000000000000000000000000000007004");
pub const DEPLOYER_PROXY_ADDRESS: Address = address!("0000000000000000000000000000000000007005");

/// Reserved account seeded with an empty state.
pub const INTERMEDIARY_SYSTEM_ADDRESS: Address =
    address!("fffffffffffffffffffffffffffffffffffffffe");

/// EVM hook the runtime upgrade contract hands control to.
pub const RUNTIME_UPGRADE_HOOK_ADDRESS: Address =
    address!("0000000000000000000000000000000000007f01");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemContract {
    Staking,
    SlashingIndicator,
    SystemReward,
    StakingPool,
    Governance,
    ChainConfig,
    RuntimeUpgrade,
    DeployerProxy,
}

impl SystemContract {
    /// The order in which the contracts are simulated.
    pub const DEPLOYMENT_ORDER: [Self; 8] = [
        Self::Staking,
        Self::ChainConfig,
        Self::SlashingIndicator,
        Self::StakingPool,
        Self::SystemReward,
        Self::Governance,
        Self::RuntimeUpgrade,
        Self::DeployerProxy,
    ];

    pub const fn address(&self) -> Address {
        match self {
            Self::Staking => STAKING_ADDRESS,
            Self::SlashingIndicator => SLASHING_INDICATOR_ADDRESS,
            Self::SystemReward => SYSTEM_REWARD_ADDRESS,
            Self::StakingPool => STAKING_POOL_ADDRESS,
            Self::Governance => GOVERNANCE_ADDRESS,
            Self::ChainConfig => CHAIN_CONFIG_ADDRESS,
            Self::RuntimeUpgrade => RUNTIME_UPGRADE_ADDRESS,
            Self::DeployerProxy => DEPLOYER_PROXY_ADDRESS,
        }
    }

    /// Contract name, also the file stem of its compiler artifact.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Staking => "Staking",
            Self::SlashingIndicator => "SlashingIndicator",
            Self::SystemReward => "SystemReward",
            Self::StakingPool => "StakingPool",
            Self::Governance => "Governance",
            Self::ChainConfig => "ChainConfig",
            Self::RuntimeUpgrade => "RuntimeUpgrade",
            Self::DeployerProxy => "DeployerProxy",
        }
    }

    pub const fn initializer(&self) -> Option<Selector> {
        Some(INIT_SELECTOR)
    }

    /// Constructor arguments for this contract on the network described by `profile`.
    ///
    /// Only Staking is funded, with the sum of the validators' initial stakes.
    pub fn constructor_spec(
        &self,
        profile: &NetworkProfile,
        stakes: &InitialStakes,
    ) -> ConstructorSpec {
        let spec = ConstructorSpec::new(self.address());
        match self {
            Self::Staking => spec
                .arg("address[]", addresses(&profile.validators))
                .arg(
                    "uint256[]",
                    DynSolValue::Array(stakes.amounts.iter().copied().map(uint256).collect()),
                )
                .arg("uint16", uint(profile.commission_rate, 16))
                .with_funding(stakes.total),
            Self::ChainConfig => {
                let params = &profile.consensus_params;
                spec.arg("uint32", uint(params.active_validators_length, 32))
                    .arg("uint32", uint(params.epoch_block_interval, 32))
                    .arg("uint32", uint(params.misdemeanor_threshold, 32))
                    .arg("uint32", uint(params.felony_threshold, 32))
                    .arg("uint32", uint(params.validator_jail_epoch_length, 32))
                    .arg("uint32", uint(params.undelegate_period, 32))
                    .arg("uint256", uint256(params.min_validator_stake_amount))
                    .arg("uint256", uint256(params.min_staking_amount))
            }
            Self::SlashingIndicator | Self::StakingPool => spec,
            Self::SystemReward => {
                let (accounts, shares): (Vec<_>, Vec<_>) = profile
                    .system_treasury
                    .iter()
                    .map(|(account, share)| (DynSolValue::Address(*account), uint(*share, 16)))
                    .unzip();
                spec.arg("address[]", DynSolValue::Array(accounts))
                    .arg("uint16[]", DynSolValue::Array(shares))
            }
            Self::Governance => spec.arg("uint256", uint256(U256::from(profile.voting_period))),
            Self::RuntimeUpgrade => {
                spec.arg("address", DynSolValue::Address(RUNTIME_UPGRADE_HOOK_ADDRESS))
            }
            Self::DeployerProxy => spec.arg("address[]", addresses(&profile.deployers)),
        }
    }
}

fn addresses(values: &[Address]) -> DynSolValue {
    DynSolValue::Array(values.iter().copied().map(DynSolValue::Address).collect())
}

fn uint(value: impl Into<u64>, bits: usize) -> DynSolValue {
    DynSolValue::Uint(U256::from(value.into()), bits)
}

fn uint256(value: U256) -> DynSolValue {
    DynSolValue::Uint(value, 256)
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashSet, test_case::test_case};

    #[test]
    fn test_deployment_order_covers_every_contract_once() {
        let addresses: HashSet<_> = SystemContract::DEPLOYMENT_ORDER
            .iter()
            .map(SystemContract::address)
            .collect();

        assert_eq!(addresses.len(), 8);
        assert!(!addresses.contains(&INTERMEDIARY_SYSTEM_ADDRESS));
        assert_eq!(SystemContract::DEPLOYMENT_ORDER[0], SystemContract::Staking);
    }

    #[test_case(SystemContract::Staking, "ctor(address[],uint256[],uint16)"; "staking")]
    #[test_case(
        SystemContract::ChainConfig,
        "ctor(uint32,uint32,uint32,uint32,uint32,uint32,uint256,uint256)";
        "chain config"
    )]
    #[test_case(SystemContract::SlashingIndicator, "ctor()"; "slashing indicator")]
    #[test_case(SystemContract::StakingPool, "ctor()"; "staking pool")]
    #[test_case(SystemContract::SystemReward, "ctor(address[],uint16[])"; "system reward")]
    #[test_case(SystemContract::Governance, "ctor(uint256)"; "governance")]
    #[test_case(SystemContract::RuntimeUpgrade, "ctor(address)"; "runtime upgrade")]
    #[test_case(SystemContract::DeployerProxy, "ctor(address[])"; "deployer proxy")]
    fn test_constructor_specs_encode_for_every_builtin_profile(
        contract: SystemContract,
        signature: &str,
    ) {
        for builtin in crate::profiles::BuiltinProfile::ALL {
            let profile = builtin.profile();
            let stakes = profile.initial_stakes().unwrap();

            let spec = contract.constructor_spec(&profile, &stakes);

            assert_eq!(spec.address, contract.address());
            assert_eq!(spec.signature(), signature);
            spec.encode().unwrap();
        }
    }

    #[test]
    fn test_only_staking_is_funded() {
        let profile = NetworkProfile::devnet();
        let stakes = profile.initial_stakes().unwrap();

        for contract in SystemContract::DEPLOYMENT_ORDER {
            let funding = contract.constructor_spec(&profile, &stakes).funding;
            match contract {
                SystemContract::Staking => assert_eq!(funding, Some(stakes.total)),
                _ => assert_eq!(funding, None),
            }
        }
    }

    #[test]
    fn test_treasury_arguments_are_sorted_by_address() {
        let mut profile = NetworkProfile::localnet();
        let low = address!("0000000000000000000000000000000000000001");
        let high = address!("00000000000000000000000000000000000000ff");
        profile.system_treasury = [(high, 2500), (low, 7500)].into_iter().collect();
        let stakes = profile.initial_stakes().unwrap();

        let spec = SystemContract::SystemReward.constructor_spec(&profile, &stakes);

        assert_eq!(
            spec.argument_values,
            vec![
                addresses(&[low, high]),
                DynSolValue::Array(vec![uint(7500u16, 16), uint(2500u16, 16)]),
            ]
        );
    }
}
