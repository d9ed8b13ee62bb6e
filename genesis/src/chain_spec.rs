use {
    crate::{
        config::NetworkProfile,
        error::{ConfigError, Result},
    },
    alloy::{
        genesis::{ChainConfig, Genesis},
        serde::OtherFields,
    },
    serde_json::{Value, json},
    std::collections::BTreeMap,
    sysgen_evm_ext::{HeaderForExecution, SimulationConfig},
    sysgen_shared::{primitives::U256, quantity},
};

pub const GENESIS_TIMESTAMP: u64 = 0x65CF9B5C;
pub const GENESIS_GAS_LIMIT: u64 = 0x2625a00;
/// Block period in seconds of the parlia consensus engine.
pub const PARLIA_PERIOD: u64 = 3;

/// Forks of the BSC lineage, all active from the genesis block.
const BSC_FORK_BLOCKS: [&str; 10] = [
    "ramanujanBlock",
    "nielsBlock",
    "mirrorSyncBlock",
    "brunoBlock",
    "eulerBlock",
    "nanoBlock",
    "moranBlock",
    "gibbsBlock",
    "planckBlock",
    "hertzBlock",
];

/// The genesis document of `profile` before any account is allocated and with empty
/// extra-data.
pub fn default_genesis(profile: &NetworkProfile) -> Result<Genesis> {
    Ok(Genesis {
        config: chain_config(profile)?,
        nonce: 0,
        timestamp: GENESIS_TIMESTAMP,
        gas_limit: GENESIS_GAS_LIMIT,
        difficulty: U256::from(1),
        ..Default::default()
    })
}

/// Fails when a runtime fork height does not fit in a block number.
pub fn chain_config(profile: &NetworkProfile) -> Result<ChainConfig> {
    let mut extra: BTreeMap<String, Value> = BSC_FORK_BLOCKS
        .iter()
        .map(|name| ((*name).to_owned(), json!(0)))
        .collect();

    let forks = &profile.forks;
    let runtime_forks = [
        ("runtimeUpgradeBlock", forks.runtime_upgrade_block),
        ("deployOriginBlock", forks.deploy_origin_block),
        ("deploymentHookFixBlock", forks.deployment_hook_fix_block),
    ];
    for (name, block) in runtime_forks {
        if let Some(block) = block {
            let block =
                quantity::to_u64(&block).map_err(|source| ConfigError::InvalidQuantity {
                    field: format!("{name} fork height"),
                    source,
                })?;
            extra.insert(name.to_owned(), json!(block));
        }
    }

    // Epoch length is owned by the consensus parameters of the profile.
    extra.insert(
        "parlia".to_owned(),
        json!({
            "period": PARLIA_PERIOD,
            "epoch": profile.consensus_params.epoch_block_interval,
        }),
    );

    Ok(ChainConfig {
        chain_id: profile.chain_id,
        homestead_block: Some(0),
        eip150_block: Some(0),
        eip155_block: Some(0),
        eip158_block: Some(0),
        byzantium_block: Some(0),
        constantinople_block: Some(0),
        petersburg_block: Some(0),
        istanbul_block: Some(0),
        muir_glacier_block: Some(0),
        berlin_block: Some(0),
        london_block: Some(0),
        shanghai_time: Some(0),
        extra_fields: OtherFields::new(extra),
        ..Default::default()
    })
}

/// Chain configuration the system contracts are simulated under.
pub fn simulation_config(profile: &NetworkProfile) -> SimulationConfig {
    SimulationConfig {
        block: HeaderForExecution {
            timestamp: GENESIS_TIMESTAMP,
            ..Default::default()
        },
        block_gas_limit: GENESIS_GAS_LIMIT,
        ..SimulationConfig::new(profile.chain_id)
    }
}
