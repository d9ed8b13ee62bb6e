use {
    crate::{
        error::{Error, Result},
        state_changes::WriteSet,
    },
    alloy::eips::eip2930::AccessList,
    revm::{
        Journal, JournalEntry, MainBuilder, MainContext,
        bytecode::Bytecode,
        context::{
            BlockEnv, CfgEnv, Context, Evm, TxEnv,
            result::{ExecutionResult, HaltReason, OutOfGasError, ResultAndState},
        },
        context_interface::{block::BlobExcessGasAndPrice, result::EVMError},
        database::in_memory_db::CacheDB,
        database_interface::{DatabaseCommit, DatabaseRef, EmptyDB},
        handler::{
            EthFrame, EthPrecompiles, Handler, MainnetHandler, instructions::EthInstructions,
        },
        interpreter::{
            FrameInput, MAX_CODE_SIZE, gas::CODEDEPOSIT, interpreter::EthInterpreter,
        },
        primitives::{TxKind, hardfork::SpecId},
        state::{AccountInfo, EvmState},
    },
    std::{collections::BTreeMap, convert::Infallible},
    sysgen_shared::primitives::{Address, B256, Bytes, U256},
};

/// Gas available to a single constructor or initializer call.
pub const DEFAULT_CALL_GAS_LIMIT: u64 = 10_000_000;
pub const DEFAULT_BLOCK_GAS_LIMIT: u64 = 0x2625a00;
pub const DEFAULT_BLOCK_TIMESTAMP: u64 = 0x65CF9B5C;

/// A subset of the `Header` fields that are visible to the code being simulated.
#[derive(Debug, Clone)]
pub struct HeaderForExecution {
    pub number: u64,
    pub timestamp: u64,
    pub difficulty: U256,
    pub prev_randao: B256,
}

impl Default for HeaderForExecution {
    fn default() -> Self {
        Self {
            number: 0,
            timestamp: DEFAULT_BLOCK_TIMESTAMP,
            difficulty: U256::from(1),
            prev_randao: B256::ZERO,
        }
    }
}

/// Chain configuration every simulation runs under.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub chain_id: u64,
    pub spec_id: SpecId,
    pub block: HeaderForExecution,
    pub block_gas_limit: u64,
    pub call_gas_limit: u64,
}

impl SimulationConfig {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            ..Default::default()
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            spec_id: SpecId::SHANGHAI,
            block: HeaderForExecution::default(),
            block_gas_limit: DEFAULT_BLOCK_GAS_LIMIT,
            call_gas_limit: DEFAULT_CALL_GAS_LIMIT,
        }
    }
}

/// How a single top-level execution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success(Bytes),
    Revert(Bytes),
    Halt(String),
}

impl ExecutionOutcome {
    /// Best-effort human-readable reason for a failed execution.
    pub fn reason(&self) -> String {
        match self {
            Self::Success(_) => String::new(),
            Self::Revert(output) => decode_revert_reason(output),
            Self::Halt(reason) => reason.clone(),
        }
    }
}

/// Interprets revert output as printable ASCII after skipping the 64 byte
/// `Error(string)` head (selector, offset and length are not validated).
pub fn decode_revert_reason(output: &[u8]) -> String {
    output
        .get(64..)
        .unwrap_or_default()
        .iter()
        .filter(|c| (32..=127).contains(*c))
        .map(|c| char::from(*c))
        .collect()
}

/// The operations a deployment simulation needs from an EVM.
///
/// Every instance owns a private world state. Nothing it does is ever persisted, so the
/// state visible through [`ExecutionEngine::pending_storage`] is the uncommitted write-set
/// of the scope.
pub trait ExecutionEngine {
    fn set_balance(&mut self, address: Address, balance: U256);

    /// Runs `init_code` as a constructor whose contract lives at exactly `address`,
    /// independent of the caller's nonce. On success the returned bytes are installed as
    /// the account's code.
    fn create_at(
        &mut self,
        caller: Address,
        address: Address,
        init_code: Bytes,
    ) -> Result<ExecutionOutcome>;

    /// Zero-value message call.
    fn call(&mut self, caller: Address, to: Address, data: Bytes) -> Result<ExecutionOutcome>;

    /// Every storage slot written at `address` so far, with its latest value.
    fn pending_storage(&self, address: &Address) -> BTreeMap<B256, B256>;
}

/// [`ExecutionEngine`] backed by `revm` over a disposable in-memory database.
///
/// Forced-address creation runs the creation code as a top-level call whose execution context
/// is the target account while the code itself is read from a scratch account. The target
/// therefore has no code and a nonce of one while its constructor runs, as after `CREATE`.
pub struct RevmEngine {
    config: SimulationConfig,
    db: CacheDB<EmptyDB>,
    write_set: WriteSet,
}

/// Scratch account holding the creation code during [`ExecutionEngine::create_at`].
const CODE_HOLDER_ADDRESS: Address = Address::new([0xee; 20]);

impl RevmEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            db: CacheDB::new(EmptyDB::default()),
            write_set: WriteSet::default(),
        }
    }

    pub fn account_info(&self, address: Address) -> AccountInfo {
        match self.db.basic_ref(address) {
            Ok(info) => info.unwrap_or_default(),
            Err(never) => match never {},
        }
    }

    fn install_code(&mut self, address: Address, code: Bytes) {
        let code = Bytecode::new_legacy(code);
        let info = AccountInfo {
            code_hash: code.hash_slow(),
            code: Some(code),
            ..self.account_info(address)
        };
        self.db.insert_account_info(address, info);
    }

    /// Runs one top-level call without committing its state changes.
    ///
    /// With a `code_source` the code of that account is executed in the context of `to`.
    fn execute(
        &mut self,
        caller: Address,
        to: Address,
        data: Bytes,
        code_source: Option<Address>,
    ) -> Result<ResultAndState> {
        let chain_id = self.config.chain_id;
        let spec_id = self.config.spec_id;
        let header = &self.config.block;

        let mut evm = Context::mainnet()
            .with_db(&mut self.db)
            .with_tx(TxEnv {
                caller,
                gas_limit: self.config.call_gas_limit,
                // Nobody pays for genesis
                gas_price: 0,
                tx_type: 0,
                kind: TxKind::Call(to),
                value: U256::ZERO,
                data,
                nonce: 0,
                chain_id: None,
                access_list: AccessList::default(),
                gas_priority_fee: None,
                blob_hashes: Vec::new(),
                max_fee_per_blob_gas: 0,
                authorization_list: Vec::new(),
            })
            .with_block(BlockEnv {
                number: header.number,
                beneficiary: Address::ZERO,
                timestamp: header.timestamp,
                gas_limit: self.config.block_gas_limit,
                basefee: 0,
                difficulty: header.difficulty,
                prevrandao: Some(header.prev_randao),
                blob_excess_gas_and_price: Some(BlobExcessGasAndPrice {
                    excess_blob_gas: 0,
                    blob_gasprice: 0,
                }),
            })
            .modify_cfg_chained(|env| {
                env.chain_id = chain_id;
                env.spec = spec_id;
                // The zero address caller holds no funds and never signs anything.
                env.disable_balance_check = true;
                env.disable_nonce_check = true;
            })
            .build_mainnet();

        let mut handler = CodeSourceHandler {
            inner: EngineHandler::default(),
            code_source,
        };
        handler
            .run(&mut evm)
            .map_err(|e| Error::Engine(format!("{e:?}")))
    }

    fn commit(&mut self, state: EvmState) {
        self.write_set.record(&state);
        self.db.commit(state);
    }

    /// Applies the checks `CREATE` performs on returned runtime code.
    fn check_runtime_code(&self, code: &[u8], gas_used: u64) -> Option<HaltReason> {
        if code.len() > MAX_CODE_SIZE {
            return Some(HaltReason::CreateContractSizeLimit);
        }
        if code.first() == Some(&0xef) && self.config.spec_id.is_enabled_in(SpecId::LONDON) {
            return Some(HaltReason::CreateContractStartingWithEF);
        }
        let deposit = CODEDEPOSIT.saturating_mul(code.len() as u64);
        if gas_used.saturating_add(deposit) > self.config.call_gas_limit {
            return Some(HaltReason::OutOfGas(OutOfGasError::Basic));
        }
        None
    }
}

fn halt_reason(reason: HaltReason) -> String {
    format!("{reason:?}")
}

impl ExecutionEngine for RevmEngine {
    fn set_balance(&mut self, address: Address, balance: U256) {
        let info = AccountInfo {
            balance,
            ..self.account_info(address)
        };
        self.db.insert_account_info(address, info);
    }

    fn create_at(
        &mut self,
        caller: Address,
        address: Address,
        init_code: Bytes,
    ) -> Result<ExecutionOutcome> {
        let before = self.account_info(address);
        // EIP-161: a contract under construction already has nonce 1.
        self.db.insert_account_info(
            address,
            AccountInfo {
                nonce: 1,
                ..before.clone()
            },
        );
        self.install_code(CODE_HOLDER_ADDRESS, init_code);

        let executed = self.execute(caller, address, Bytes::new(), Some(CODE_HOLDER_ADDRESS));
        let outcome = executed.map(|ResultAndState { result, state }| match result {
            ExecutionResult::Success {
                output, gas_used, ..
            } => {
                let code = output.into_data();
                match self.check_runtime_code(&code, gas_used) {
                    Some(reason) => ExecutionOutcome::Halt(halt_reason(reason)),
                    None => {
                        self.commit(state);
                        ExecutionOutcome::Success(code)
                    }
                }
            }
            ExecutionResult::Revert { output, .. } => ExecutionOutcome::Revert(output),
            ExecutionResult::Halt { reason, .. } => ExecutionOutcome::Halt(halt_reason(reason)),
        });

        self.db
            .insert_account_info(CODE_HOLDER_ADDRESS, AccountInfo::default());
        match &outcome {
            Ok(ExecutionOutcome::Success(code)) => self.install_code(address, code.clone()),
            // A failed creation leaves the account as it was.
            _ => self.db.insert_account_info(address, before),
        }
        outcome
    }

    fn call(&mut self, caller: Address, to: Address, data: Bytes) -> Result<ExecutionOutcome> {
        let ResultAndState { result, state } = self.execute(caller, to, data, None)?;
        Ok(match result {
            ExecutionResult::Success { output, .. } => {
                self.commit(state);
                ExecutionOutcome::Success(output.into_data())
            }
            ExecutionResult::Revert { output, .. } => ExecutionOutcome::Revert(output),
            ExecutionResult::Halt { reason, .. } => ExecutionOutcome::Halt(halt_reason(reason)),
        })
    }

    fn pending_storage(&self, address: &Address) -> BTreeMap<B256, B256> {
        self.write_set.for_account(address)
    }
}

/// Mainnet handler whose first frame may execute code borrowed from another account.
struct CodeSourceHandler<'a> {
    inner: EngineHandler<'a>,
    code_source: Option<Address>,
}

impl<'a> Handler for CodeSourceHandler<'a> {
    type Evm = <EngineHandler<'a> as Handler>::Evm;
    type Error = <EngineHandler<'a> as Handler>::Error;
    type Frame = <EngineHandler<'a> as Handler>::Frame;
    type HaltReason = <EngineHandler<'a> as Handler>::HaltReason;

    fn first_frame_input(
        &mut self,
        evm: &mut Self::Evm,
        gas_limit: u64,
    ) -> std::result::Result<FrameInput, Self::Error> {
        let mut input = self.inner.first_frame_input(evm, gas_limit)?;
        if let (FrameInput::Call(inputs), Some(source)) = (&mut input, self.code_source) {
            inputs.bytecode_address = source;
        }
        Ok(input)
    }
}

// Type aliases to make the `revm` types more tractable
type EngineDB<'a> = &'a mut CacheDB<EmptyDB>;
type EngineCtx<'a> = Context<BlockEnv, TxEnv, CfgEnv, EngineDB<'a>, Journal<EngineDB<'a>, JournalEntry>>;
type EngineEvm<'a> = Evm<EngineCtx<'a>, (), EthInstructions<EthInterpreter, EngineCtx<'a>>, EthPrecompiles>;
type EngineHandler<'a> = MainnetHandler<
    EngineEvm<'a>,
    EVMError<Infallible>,
    EthFrame<EngineEvm<'a>, EVMError<Infallible>, EthInterpreter>,
>;

#[cfg(test)]
mod tests {
    use {
        super::*,
        revm::primitives::KECCAK_EMPTY,
        sysgen_shared::primitives::{address, hex},
        test_case::test_case,
    };

    const TARGET: Address = address!("0000000000000000000000000000000000001000");

    /// `sstore(0, 0x2a)` then returns the runtime `sstore(1, 1); stop`.
    const STORING_INIT_CODE: [u8; 23] =
        hex!("602a6000556006601160003960066000f3600160015500");

    /// `return(0, 0)` without touching storage, leaving an account with empty code.
    const EMPTY_INIT_CODE: [u8; 5] = hex!("60006000f3");

    /// `sstore(0, extcodesize(address()))` then returns the runtime `stop`.
    const CODE_SIZE_INIT_CODE: [u8; 18] = hex!("303b6000556001601160003960016000f300");

    /// Returns 0x6001 zero bytes, one more than the contract size limit.
    const OVERSIZED_INIT_CODE: [u8; 6] = hex!("6160016000f3");

    /// Returns exactly 0x6000 zero bytes.
    const MAX_SIZE_INIT_CODE: [u8; 6] = hex!("6160006000f3");

    /// Returns the single byte `0xef`.
    const EF_INIT_CODE: [u8; 10] = hex!("60ef60005360016000f3");

    fn slot(n: u64) -> B256 {
        B256::from(U256::from(n).to_be_bytes::<32>())
    }

    #[test]
    fn test_create_at_places_contract_at_requested_address() {
        let mut engine = RevmEngine::new(SimulationConfig::default());

        let outcome = engine
            .create_at(Address::ZERO, TARGET, STORING_INIT_CODE.into())
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::Success(hex!("600160015500").into()));
        let info = engine.account_info(TARGET);
        assert_eq!(info.code_hash, Bytecode::new_legacy(hex!("600160015500").into()).hash_slow());
        assert_eq!(
            engine.pending_storage(&TARGET),
            BTreeMap::from([(slot(0), slot(0x2a))])
        );
    }

    #[test]
    fn test_call_after_create_extends_write_set() {
        let mut engine = RevmEngine::new(SimulationConfig::default());
        engine
            .create_at(Address::ZERO, TARGET, STORING_INIT_CODE.into())
            .unwrap();

        let outcome = engine.call(Address::ZERO, TARGET, Bytes::new()).unwrap();

        assert_eq!(outcome, ExecutionOutcome::Success(Bytes::new()));
        assert_eq!(
            engine.pending_storage(&TARGET),
            BTreeMap::from([(slot(0), slot(0x2a)), (slot(1), slot(1))])
        );
    }

    #[test]
    fn test_balance_survives_creation() {
        let mut engine = RevmEngine::new(SimulationConfig::default());
        engine.set_balance(TARGET, U256::from(1234));

        engine
            .create_at(Address::ZERO, TARGET, EMPTY_INIT_CODE.into())
            .unwrap();

        assert_eq!(engine.account_info(TARGET).balance, U256::from(1234));
    }

    #[test]
    fn test_fresh_engines_share_no_state() {
        let mut first = RevmEngine::new(SimulationConfig::default());
        first
            .create_at(Address::ZERO, TARGET, STORING_INIT_CODE.into())
            .unwrap();

        let second = RevmEngine::new(SimulationConfig::default());

        assert!(second.pending_storage(&TARGET).is_empty());
        assert_eq!(second.account_info(TARGET), AccountInfo::default());
    }

    #[test]
    fn test_constructor_sees_target_without_code() {
        let mut engine = RevmEngine::new(SimulationConfig::default());

        let outcome = engine
            .create_at(Address::ZERO, TARGET, CODE_SIZE_INIT_CODE.into())
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::Success(hex!("00").into()));
        // Writing a zero code size leaves slot 0 untouched.
        assert!(engine.pending_storage(&TARGET).is_empty());
    }

    #[test]
    fn test_created_account_has_nonce_one_and_no_leftover_code_holder() {
        let mut engine = RevmEngine::new(SimulationConfig::default());

        engine
            .create_at(Address::ZERO, TARGET, STORING_INIT_CODE.into())
            .unwrap();

        assert_eq!(engine.account_info(TARGET).nonce, 1);
        assert_eq!(
            engine.account_info(CODE_HOLDER_ADDRESS).code_hash,
            KECCAK_EMPTY
        );
    }

    #[test_case(&OVERSIZED_INIT_CODE, SimulationConfig::default(), "CreateContractSizeLimit"; "code size limit")]
    #[test_case(&EF_INIT_CODE, SimulationConfig::default(), "CreateContractStartingWithEF"; "ef prefix")]
    #[test_case(
        &MAX_SIZE_INIT_CODE,
        SimulationConfig { call_gas_limit: 1_000_000, ..Default::default() },
        "OutOfGas(Basic)";
        "code deposit out of gas"
    )]
    fn test_invalid_runtime_code_is_rejected(
        init_code: &[u8],
        config: SimulationConfig,
        expected: &str,
    ) {
        let mut engine = RevmEngine::new(config);
        engine.set_balance(TARGET, U256::from(7));

        let outcome = engine
            .create_at(Address::ZERO, TARGET, Bytes::copy_from_slice(init_code))
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::Halt(expected.into()));
        let info = engine.account_info(TARGET);
        assert_eq!(info.code_hash, KECCAK_EMPTY);
        assert_eq!(info.nonce, 0);
        assert_eq!(info.balance, U256::from(7));
    }

    #[test_case(&MAX_SIZE_INIT_CODE, SpecId::SHANGHAI; "largest allowed code")]
    #[test_case(&EF_INIT_CODE, SpecId::BERLIN; "ef prefix before london")]
    fn test_accepted_runtime_code_is_installed(init_code: &[u8], spec_id: SpecId) {
        let mut engine = RevmEngine::new(SimulationConfig {
            spec_id,
            ..Default::default()
        });

        let outcome = engine
            .create_at(Address::ZERO, TARGET, Bytes::copy_from_slice(init_code))
            .unwrap();

        let ExecutionOutcome::Success(code) = outcome else {
            panic!("Unexpected outcome {outcome:?}");
        };
        assert_eq!(
            engine.account_info(TARGET).code_hash,
            Bytecode::new_legacy(code).hash_slow()
        );
    }

    #[test]
    fn test_revert_reason_skips_sixty_four_byte_head() {
        let mut output = vec![0u8; 64];
        output.extend(b"not allowed\x00\x01");

        assert_eq!(decode_revert_reason(&output), "not allowed");
    }

    #[test]
    fn test_revert_reason_of_short_output_is_empty() {
        assert_eq!(decode_revert_reason(&[0x08, 0xc3, 0x79, 0xa0]), "");
    }
}
