pub use self::{
    engine::{
        ExecutionEngine, ExecutionOutcome, HeaderForExecution, RevmEngine, SimulationConfig,
        decode_revert_reason,
    },
    error::{EncodingError, Error, Result},
    simulate::{
        DEPLOYER, INIT_SELECTOR, SimulatedAccountState, simulate_deployment, simulate_isolated,
    },
    solidity_abi::{ConstructorSpec, CtorPayload, encode_ctor_payload},
    state_changes::WriteSet,
};

/// Re-exported so callers can build constructor arguments without depending on alloy directly.
pub use alloy::dyn_abi::DynSolValue;

/// Re-exported so callers can pick the hard fork without depending on revm directly.
pub use revm::primitives::hardfork::SpecId;

mod engine;
mod error;
mod simulate;
mod solidity_abi;
mod state_changes;
