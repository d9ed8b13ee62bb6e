pub use {
    artifacts::{ArtifactDir, ArtifactSource, DEFAULT_ARTIFACTS_DIR, InMemoryArtifacts},
    chain_spec::{chain_config, default_genesis, simulation_config},
    config::{ConsensusParams, Forks, InitialStakes, NetworkProfile},
    error::{ConfigError, Error, Result},
    extra_data::create_extra_data,
    output::{OutputSink, render},
    profiles::BuiltinProfile,
    system_contracts::{
        INTERMEDIARY_SYSTEM_ADDRESS, RUNTIME_UPGRADE_HOOK_ADDRESS, STAKING_ADDRESS, SystemContract,
    },
};

use {
    alloy::genesis::{Genesis, GenesisAccount},
    sysgen_evm_ext::simulate_isolated,
    tracing::{debug, info},
};

mod artifacts;
mod chain_spec;
mod config;
mod error;
mod extra_data;
mod output;
mod profiles;
mod system_contracts;

/// Assembles the genesis document of `profile`.
///
/// Every system contract is simulated in its own empty world state, in
/// [`SystemContract::DEPLOYMENT_ORDER`]. Faucet entries are applied last and replace whatever
/// account was allocated at the same address.
pub fn build(profile: &NetworkProfile, artifacts: &impl ArtifactSource) -> Result<Genesis> {
    // Validate the whole profile before running anything.
    let stakes = profile.initial_stakes()?;
    let faucet = profile.faucet_balances()?;

    let mut genesis = default_genesis(profile)?;
    genesis.extra_data = create_extra_data(&profile.validators);

    let config = simulation_config(profile);
    for contract in SystemContract::DEPLOYMENT_ORDER {
        let creation_code = artifacts.creation_code(contract)?;
        let spec = contract.constructor_spec(profile, &stakes);
        info!(contract = contract.name(), address = %spec.address, "simulating system contract");
        let state = simulate_isolated(&config, &spec, &creation_code, contract.initializer())?;
        genesis.alloc.insert(state.address, state.into());
    }

    genesis
        .alloc
        .insert(INTERMEDIARY_SYSTEM_ADDRESS, GenesisAccount::default());
    if let Some(staking) = genesis.alloc.get_mut(&STAKING_ADDRESS) {
        staking.balance = stakes.total;
    }

    for (address, balance) in faucet {
        debug!(%address, %balance, "applying faucet");
        genesis.alloc.insert(
            address,
            GenesisAccount {
                balance,
                ..Default::default()
            },
        );
    }

    Ok(genesis)
}

/// Builds the genesis document of `profile` and writes it to `sink`.
pub fn generate(
    profile: &NetworkProfile,
    artifacts: &impl ArtifactSource,
    sink: &OutputSink,
) -> Result<()> {
    let genesis = build(profile, artifacts)?;
    sink.write(&genesis)?;
    info!(
        chain_id = profile.chain_id,
        accounts = genesis.alloc.len(),
        %sink,
        "genesis written"
    );
    Ok(())
}
