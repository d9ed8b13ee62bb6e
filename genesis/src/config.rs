use {
    crate::error::{ConfigError, Error, Result},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, fs, path::Path},
    sysgen_shared::{
        primitives::{Address, U256},
        quantity::{self, hex_or_decimal, opt_hex_or_decimal},
    },
};

/// Parameters of one network, as read from a JSON profile or built in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub chain_id: u64,
    /// Accounts allowed to deploy contracts from the genesis block.
    #[serde(default)]
    pub deployers: Vec<Address>,
    #[serde(default)]
    pub validators: Vec<Address>,
    /// Share of system rewards per treasury account, in basis points.
    #[serde(default)]
    pub system_treasury: BTreeMap<Address, u16>,
    pub consensus_params: ConsensusParams,
    #[serde(default)]
    pub voting_period: u64,
    /// Hex balances credited at genesis.
    #[serde(default)]
    pub faucet: BTreeMap<Address, String>,
    #[serde(default)]
    pub commission_rate: u16,
    /// Hex stake of every validator.
    #[serde(default)]
    pub initial_stakes: BTreeMap<Address, String>,
    #[serde(default)]
    pub forks: Forks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusParams {
    pub active_validators_length: u32,
    pub epoch_block_interval: u32,
    pub misdemeanor_threshold: u32,
    pub felony_threshold: u32,
    pub validator_jail_epoch_length: u32,
    pub undelegate_period: u32,
    #[serde(with = "hex_or_decimal")]
    pub min_validator_stake_amount: U256,
    #[serde(with = "hex_or_decimal")]
    pub min_staking_amount: U256,
}

/// Activation heights of the runtime forks; `None` leaves a fork disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forks {
    #[serde(default, with = "opt_hex_or_decimal")]
    pub runtime_upgrade_block: Option<U256>,
    #[serde(default, with = "opt_hex_or_decimal")]
    pub deploy_origin_block: Option<U256>,
    #[serde(default, with = "opt_hex_or_decimal")]
    pub deployment_hook_fix_block: Option<U256>,
}

/// Validator stakes in validator order, plus their sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialStakes {
    pub amounts: Vec<U256>,
    pub total: U256,
}

impl NetworkProfile {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ConfigError::ProfileRead {
            path: path.into(),
            source,
        })?;
        serde_json::from_slice(&contents).map_err(|source| {
            Error::Config(ConfigError::MalformedProfile {
                path: path.into(),
                source,
            })
        })
    }

    /// Looks up the stake of every validator; fails on the first one without an entry.
    pub fn initial_stakes(&self) -> Result<InitialStakes> {
        let mut amounts = Vec::with_capacity(self.validators.len());
        let mut total = U256::ZERO;
        for validator in &self.validators {
            let raw = self
                .initial_stakes
                .get(validator)
                .ok_or(ConfigError::MissingInitialStake(*validator))?;
            let amount =
                quantity::parse_hex(raw).map_err(|source| ConfigError::InvalidQuantity {
                    field: format!("initial stake of {validator}"),
                    source,
                })?;
            total = total
                .checked_add(amount)
                .ok_or(ConfigError::InitialStakeOverflow)?;
            amounts.push(amount);
        }
        Ok(InitialStakes { amounts, total })
    }

    /// Faucet balances, ordered by address.
    pub fn faucet_balances(&self) -> Result<Vec<(Address, U256)>> {
        self.faucet
            .iter()
            .map(|(address, raw)| -> Result<(Address, U256)> {
                let balance =
                    quantity::parse_hex(raw).map_err(|source| ConfigError::InvalidQuantity {
                        field: format!("faucet balance of {address}"),
                        source,
                    })?;
                Ok((*address, balance))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        sysgen_shared::{primitives::address, quantity::QuantityError},
    };

    const PROFILE_JSON: &str = r#"{
        "chainId": 1337,
        "deployers": ["0x00a601f45688dba8a070722073b015277cf36725"],
        "validators": [
            "0x00a601f45688dba8a070722073b015277cf36725",
            "0x57BA24bE2cF17400f37dB3566e839bfA6A2d018a"
        ],
        "systemTreasury": {"0x00a601f45688dba8a070722073b015277cf36725": 10000},
        "consensusParams": {
            "activeValidatorsLength": 25,
            "epochBlockInterval": 40,
            "misdemeanorThreshold": 5,
            "felonyThreshold": 10,
            "validatorJailEpochLength": 3,
            "undelegatePeriod": 2,
            "minValidatorStakeAmount": "0xde0b6b3a7640000",
            "minStakingAmount": "1000000000000000000"
        },
        "votingPeriod": 20,
        "faucet": {"0x57BA24bE2cF17400f37dB3566e839bfA6A2d018a": "0x21e19e0c9bab2400000"},
        "initialStakes": {
            "0x00a601f45688dba8a070722073b015277cf36725": "0x3635c9adc5dea00000",
            "0x57BA24bE2cF17400f37dB3566e839bfA6A2d018a": "0x3635c9adc5dea00000"
        },
        "forks": {"runtimeUpgradeBlock": 0, "deployOriginBlock": "0x10"}
    }"#;

    fn profile() -> NetworkProfile {
        serde_json::from_str(PROFILE_JSON).unwrap()
    }

    #[test]
    fn test_profile_parses_from_camel_case_json() {
        let profile = profile();

        assert_eq!(profile.chain_id, 1337);
        assert_eq!(profile.validators.len(), 2);
        assert_eq!(profile.consensus_params.epoch_block_interval, 40);
        assert_eq!(
            profile.consensus_params.min_validator_stake_amount,
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(
            profile.consensus_params.min_staking_amount,
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(profile.commission_rate, 0);
        assert_eq!(
            profile.forks,
            Forks {
                runtime_upgrade_block: Some(U256::ZERO),
                deploy_origin_block: Some(U256::from(16)),
                deployment_hook_fix_block: None,
            }
        );
    }

    #[test]
    fn test_initial_stakes_follow_validator_order_and_sum() {
        let stakes = profile().initial_stakes().unwrap();
        let stake = U256::from(1_000_000_000_000_000_000_000u128);

        assert_eq!(stakes.amounts, vec![stake, stake]);
        assert_eq!(stakes.total, stake * U256::from(2));
    }

    #[test]
    fn test_missing_initial_stake_names_the_validator() {
        let mut profile = profile();
        let validator = address!("57BA24bE2cF17400f37dB3566e839bfA6A2d018a");
        profile.initial_stakes.remove(&validator);

        let err = profile.initial_stakes().unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingInitialStake(v)) if v == validator
        ));
    }

    #[test]
    fn test_malformed_stake_is_a_config_error() {
        let mut profile = profile();
        let validator = address!("00a601f45688dba8a070722073b015277cf36725");
        profile.initial_stakes.insert(validator, "1000".into());

        let err = profile.initial_stakes().unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidQuantity {
                source: QuantityError::MissingPrefix(_),
                ..
            })
        ));
    }

    #[test]
    fn test_faucet_balances_are_parsed_as_hex() {
        let balances = profile().faucet_balances().unwrap();

        assert_eq!(
            balances,
            vec![(
                address!("57BA24bE2cF17400f37dB3566e839bfA6A2d018a"),
                U256::from(10_000_000_000_000_000_000_000u128)
            )]
        );
    }

    #[test]
    fn test_profile_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, serde_json::to_vec(&profile()).unwrap()).unwrap();

        let loaded = NetworkProfile::from_file(&path).unwrap();

        assert_eq!(loaded, profile());
    }

    #[test]
    fn test_unreadable_profile_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = NetworkProfile::from_file(dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::ProfileRead { .. })));
    }
}
