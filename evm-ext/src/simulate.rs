use {
    crate::{
        engine::{ExecutionEngine, ExecutionOutcome, RevmEngine, SimulationConfig},
        error::{Error, Result},
        solidity_abi::ConstructorSpec,
    },
    alloy::genesis::GenesisAccount,
    std::collections::BTreeMap,
    sysgen_shared::primitives::{Address, B256, Bytes, Selector, U256, hex},
    tracing::{debug, error, info},
};

/// Caller of every constructor and initializer.
pub const DEPLOYER: Address = Address::ZERO;

/// Selector of `init()`, the post-deploy initializer of the system contracts.
pub const INIT_SELECTOR: Selector = hex!("e1c7392a");

/// Account state of a contract after its constructor and initializer ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedAccountState {
    pub address: Address,
    /// Runtime code returned by the constructor.
    pub code: Bytes,
    pub storage: BTreeMap<B256, B256>,
    pub balance: U256,
    pub nonce: u64,
}

impl From<SimulatedAccountState> for GenesisAccount {
    fn from(value: SimulatedAccountState) -> Self {
        Self {
            nonce: Some(value.nonce),
            balance: value.balance,
            code: Some(value.code),
            storage: Some(value.storage),
            ..Default::default()
        }
    }
}

/// Simulates a deployment in a brand new [`RevmEngine`], so that nothing from any other
/// simulation is observable.
pub fn simulate_isolated(
    config: &SimulationConfig,
    spec: &ConstructorSpec,
    creation_code: &[u8],
    initializer: Option<Selector>,
) -> Result<SimulatedAccountState> {
    simulate_deployment(
        RevmEngine::new(config.clone()),
        spec,
        creation_code,
        initializer,
    )
}

/// Deploys `creation_code` with the encoded constructor payload at `spec.address`, then
/// runs `initializer` if there is one.
///
/// The engine is consumed: each simulation must start from an empty world state.
/// The reported balance is the funding from `spec`, not whatever the engine ends up with.
pub fn simulate_deployment<E: ExecutionEngine>(
    mut engine: E,
    spec: &ConstructorSpec,
    creation_code: &[u8],
    initializer: Option<Selector>,
) -> Result<SimulatedAccountState> {
    let payload = spec.encode()?;
    let address = spec.address;
    info!(
        %address,
        signature = %payload.signature,
        selector = %hex::encode_prefixed(payload.selector),
        ctor = %hex::encode_prefixed(&payload.encoded),
        "calling constructor"
    );

    if let Some(balance) = spec.funding {
        engine.set_balance(address, balance);
    }

    let init_code: Bytes = [creation_code, &payload.encoded[..]].concat().into();
    let code = match engine.create_at(DEPLOYER, address, init_code)? {
        ExecutionOutcome::Success(code) => code,
        failure => {
            let reason = failure.reason();
            error!(%address, %reason, "constructor failed");
            return Err(Error::Deployment { address, reason });
        }
    };
    let mut storage = engine.pending_storage(&address);
    debug!(%address, slots = storage.len(), code_len = code.len(), "constructor finished");

    if let Some(selector) = initializer {
        let outcome = engine.call(DEPLOYER, address, Bytes::copy_from_slice(&selector))?;
        if !matches!(outcome, ExecutionOutcome::Success(_)) {
            let reason = outcome.reason();
            error!(%address, %reason, "initializer failed");
            return Err(Error::Initialization { address, reason });
        }
        storage = engine.pending_storage(&address);
        debug!(%address, slots = storage.len(), "initializer finished");
    }

    Ok(SimulatedAccountState {
        address,
        code,
        storage,
        balance: spec.funding.unwrap_or_default(),
        nonce: 0,
    })
}
