//! Built-in network profiles.
//!
//! Each profile is an immutable value built on demand; nothing here is global state.

use {
    crate::{
        config::{ConsensusParams, Forks, NetworkProfile},
        error::ConfigError,
    },
    std::{collections::BTreeMap, fmt, str::FromStr},
    sysgen_shared::primitives::{Address, U256, address},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinProfile {
    Localnet,
    Devnet,
    Testnet,
    Spicy,
    Mainnet,
}

impl BuiltinProfile {
    /// Every built-in profile, in regeneration order.
    pub const ALL: [Self; 5] = [
        Self::Localnet,
        Self::Devnet,
        Self::Testnet,
        Self::Spicy,
        Self::Mainnet,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Localnet => "localnet",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Spicy => "spicy",
            Self::Mainnet => "mainnet",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }

    pub fn profile(&self) -> NetworkProfile {
        match self {
            Self::Localnet => NetworkProfile::localnet(),
            Self::Devnet => NetworkProfile::devnet(),
            Self::Testnet => NetworkProfile::testnet(),
            Self::Spicy => NetworkProfile::spicy(),
            Self::Mainnet => NetworkProfile::mainnet(),
        }
    }
}

impl fmt::Display for BuiltinProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.name() == s)
            .ok_or_else(|| ConfigError::UnknownProfile(s.into()))
    }
}

fn quantities(entries: &[(Address, &str)]) -> BTreeMap<Address, String> {
    entries
        .iter()
        .map(|(address, value)| (*address, (*value).to_owned()))
        .collect()
}

fn all_forks_at_genesis() -> Forks {
    Forks {
        runtime_upgrade_block: Some(U256::ZERO),
        deploy_origin_block: Some(U256::ZERO),
        deployment_hook_fix_block: Some(U256::ZERO),
    }
}

impl NetworkProfile {
    pub fn localnet() -> Self {
        let owner = address!("00a601f45688dba8a070722073b015277cf36725");
        Self {
            chain_id: 1337,
            deployers: vec![owner],
            validators: vec![owner],
            system_treasury: BTreeMap::from([(owner, 10000)]),
            consensus_params: ConsensusParams {
                active_validators_length: 25,
                epoch_block_interval: 40,
                misdemeanor_threshold: 5,
                felony_threshold: 10,
                validator_jail_epoch_length: 3,
                undelegate_period: 2,
                min_validator_stake_amount: U256::from(0xde0b6b3a7640000u128),
                min_staking_amount: U256::from(0x1bc16d674ec800002u128),
            },
            voting_period: 20,
            faucet: quantities(&[
                (owner, "0x21e19e0c9bab2400000"),
                (
                    address!("57BA24bE2cF17400f37dB3566e839bfA6A2d018a"),
                    "0x21e19e0c9bab2400000",
                ),
                (
                    address!("EbCf9D06cf9333706E61213F17A795B2F7c55F1b"),
                    "0x21e19e0c9bab2400000",
                ),
            ]),
            commission_rate: 0,
            initial_stakes: quantities(&[(owner, "0x3635c9adc5dea00000")]),
            forks: Forks::default(),
        }
    }

    pub fn devnet() -> Self {
        let validators = vec![
            address!("08fae3885e299c24ff9841478eb946f41023ac69"),
            address!("751aaca849b09a3e347bbfe125cf18423cc24b40"),
            address!("a6ff33e3250cc765052ac9d7f7dfebda183c4b9b"),
            address!("49c0f7c8c11a4c80dc6449efe1010bb166818da8"),
            address!("8e1ea6eaa09c3b40f4a51fcd056a031870a0549a"),
        ];
        let initial_stakes = validators
            .iter()
            .map(|validator| (*validator, "0x3635c9adc5dea00000".to_owned()))
            .collect();
        Self {
            chain_id: 17243,
            deployers: Vec::new(),
            validators,
            system_treasury: BTreeMap::from([(Address::ZERO, 10000)]),
            consensus_params: ConsensusParams {
                active_validators_length: 25,
                epoch_block_interval: 1200,
                misdemeanor_threshold: 50,
                felony_threshold: 150,
                validator_jail_epoch_length: 7,
                undelegate_period: 6,
                min_validator_stake_amount: U256::from(0xde0b6b3a7640000u128),
                min_staking_amount: U256::from(0xde0b6b3a7640000u128),
            },
            voting_period: 60,
            faucet: quantities(&[
                (
                    address!("00a601f45688dba8a070722073b015277cf36725"),
                    "0x21e19e0c9bab2400000",
                ),
                (
                    address!("b891fe7b38f857f53a7b5529204c58d5c487280b"),
                    "0x52b7d2dcc80cd2e4000000",
                ),
            ]),
            commission_rate: 0,
            initial_stakes,
            forks: Forks::default(),
        }
    }

    pub fn testnet() -> Self {
        Self {
            chain_id: 3332199,
            deployers: vec![
                address!("Ef2AEf8927B2c2c4d9278F97b8c9dae0252dbeD6"),
                address!("7f91AB4e20cb5da54A7965F177Dab59624668027"),
                address!("A1765cE354E5F3515fB0BBb912ECaC3F04821f57"),
            ],
            validators: vec![
                address!("c2aCe5085D05732E80e41dFECF26AE0B60E60F04"),
                address!("73E46Db39D00a37efEf86621C6a5c33591A00ef5"),
                address!("e0579984bD4b3a1F8E1652C84411415A5887d310"),
                address!("C72FD6515FeE82e737b34eb8BA9DB4C4A35D47Ac"),
                address!("17EBd907EFFD60C83a3450689e1936AfeFaC38Da"),
            ],
            system_treasury: BTreeMap::from([(
                address!("9C9459Aaf90df6347D4585726F0e97802788f830"),
                10000,
            )]),
            consensus_params: ConsensusParams {
                active_validators_length: 13,
                epoch_block_interval: 1200,
                misdemeanor_threshold: 100,
                felony_threshold: 200,
                validator_jail_epoch_length: 6,
                undelegate_period: 1,
                min_validator_stake_amount: U256::from(0x3635c9adc5dea00000u128),
                min_staking_amount: U256::from(0xde0b6b3a7640000u128),
            },
            voting_period: 1200,
            faucet: quantities(&[(
                address!("Fc26e7Fe0FeF90e6D9F096EC0847259373402671"),
                "0x197D7361310E45C669F80000",
            )]),
            commission_rate: 0,
            initial_stakes: quantities(&[
                (
                    address!("c2aCe5085D05732E80e41dFECF26AE0B60E60F04"),
                    "0x152D02C7E14AF6800000",
                ),
                (
                    address!("73E46Db39D00a37efEf86621C6a5c33591A00ef5"),
                    "0x3635C9ADC5DEA00000",
                ),
                (
                    address!("e0579984bD4b3a1F8E1652C84411415A5887d310"),
                    "0x3635C9ADC5DEA00000",
                ),
                (
                    address!("C72FD6515FeE82e737b34eb8BA9DB4C4A35D47Ac"),
                    "0x3635C9ADC5DEA00000",
                ),
                (
                    address!("17EBd907EFFD60C83a3450689e1936AfeFaC38Da"),
                    "0x2B5E3AF16B1880000",
                ),
            ]),
            forks: all_forks_at_genesis(),
        }
    }

    pub fn spicy() -> Self {
        let validators = vec![
            address!("b1b5a8b8E2a263C0F497BC32a7cb6D27AEA921fc"),
            address!("4dD74707f22b74EC872CA6AEB2a065E3d006B9d9"),
            address!("BD6D190548bbF5C6920a826dF063A970Bd18f307"),
            address!("eC2e502f77c4811f2ef477397235976b1371FCd3"),
            address!("1cB3FC9e10fB5b845e53e5EaAE0bD561e662b0A5"),
            address!("bdBF08393b66130B4b243863150A265b2A5Df642"),
            address!("86f2BB174c450917A1b560c66525E64A1c9B6a04"),
        ];
        // The first validator bootstraps the network with a larger stake.
        let initial_stakes = validators
            .iter()
            .enumerate()
            .map(|(i, validator)| {
                let stake = if i == 0 {
                    "0x152D02C7E14AF6800000"
                } else {
                    "0x3635C9ADC5DEA00000"
                };
                (*validator, stake.to_owned())
            })
            .collect();
        Self {
            chain_id: 88882,
            deployers: vec![address!("02880217b082cC24D371eB5Bad0827D208bcBC6D")],
            validators,
            system_treasury: BTreeMap::from([(
                address!("060eA461Cf7E78A38400dE9255687beb9b2c7298"),
                10000,
            )]),
            consensus_params: ConsensusParams {
                active_validators_length: 5,
                epoch_block_interval: 7200,
                misdemeanor_threshold: 400,
                felony_threshold: 800,
                validator_jail_epoch_length: 4,
                undelegate_period: 1,
                min_validator_stake_amount: U256::from(0x3635c9adc5dea00000u128),
                min_staking_amount: U256::from(0xde0b6b3a7640000u128),
            },
            voting_period: 1200,
            faucet: quantities(&[
                (
                    address!("77c6DC8fC511Bf2Fa594c47DdC336C69D745e73A"),
                    "0x197D7361310E45C669F80000",
                ),
                (
                    address!("a6779032c48127f362244AADD80E3A6E1b50BA93"),
                    "0x33B2E3C9FD0803CE8000000",
                ),
            ]),
            commission_rate: 0,
            initial_stakes,
            forks: all_forks_at_genesis(),
        }
    }

    pub fn mainnet() -> Self {
        let validators = vec![
            address!("Ac3448af2B124d70F5A93aDa08B3EE69c5C9eA0B"),
            address!("4fC485Fc2668170033abE0c421F74a5d8CFF4281"),
            address!("544EB49544319ee63BC3c7115e45Bf1B3e23c2c2"),
            address!("053b4d178AdFA5b8C06d55A7765D6d1486d5c6a0"),
            address!("aF3aD38D80E5D4668ddF8CA170Cb941ff5f02244"),
        ];
        let treasury = address!("FddAc11E0072e3377775345D58de0dc88A964837");
        let initial_stakes = validators
            .iter()
            .map(|validator| (*validator, "0x84595161401484A000000".to_owned()))
            .collect();
        // Validator owners get 100 tokens each on top of the treasury and relayer supply.
        let mut faucet: BTreeMap<_, _> = validators
            .iter()
            .map(|validator| (*validator, "0x56BC75E2D63100000".to_owned()))
            .collect();
        faucet.extend(quantities(&[
            (treasury, "0x1C3CA1E1AAC1A93AF8800000"),
            (
                address!("252B5CA6c838ae47508c1eA72Dd73b58c607Af0f"),
                "0x3635C9ADC5DEA00000",
            ),
        ]));
        Self {
            chain_id: 32199,
            deployers: vec![address!("Ac3448af2B124d70F5A93aDa08B3EE69c5C9eA0B")],
            validators,
            system_treasury: BTreeMap::from([(treasury, 10000)]),
            consensus_params: ConsensusParams {
                active_validators_length: 5,
                epoch_block_interval: 300,
                misdemeanor_threshold: 14400,
                felony_threshold: 21600,
                validator_jail_epoch_length: 7,
                undelegate_period: 7,
                min_validator_stake_amount: U256::from(0x84595161401484a000000u128),
                min_staking_amount: U256::from(0x56bc75e2d63100000u128),
            },
            voting_period: 271600,
            faucet,
            commission_rate: 0,
            initial_stakes,
            forks: all_forks_at_genesis(),
        }
    }
}
