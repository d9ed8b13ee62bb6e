use {
    crate::error::EncodingError,
    alloy::{
        dyn_abi::{DynSolType, DynSolValue},
        primitives::I256,
    },
    sysgen_shared::primitives::{Address, Bytes, Selector, U256, selector},
};

/// Name of the logical initializer every system contract dispatches to from its
/// `constructor(bytes ctorCalldata)` shim.
pub const CTOR_FN_NAME: &str = "ctor";

/// Everything needed to run one system contract's logical constructor at a fixed address.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorSpec {
    pub address: Address,
    pub argument_types: Vec<String>,
    pub argument_values: Vec<DynSolValue>,
    pub funding: Option<U256>,
}

/// The bytes appended to the creation code, together with the pieces it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtorPayload {
    pub signature: String,
    pub selector: Selector,
    /// `selector ‖ abi_encode(arguments)`
    pub calldata: Bytes,
    /// `calldata` encoded as a single ABI `bytes` value.
    pub encoded: Bytes,
}

impl ConstructorSpec {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            argument_types: Vec::new(),
            argument_values: Vec::new(),
            funding: None,
        }
    }

    pub fn arg(mut self, type_name: impl Into<String>, value: DynSolValue) -> Self {
        self.argument_types.push(type_name.into());
        self.argument_values.push(value);
        self
    }

    pub fn with_funding(mut self, balance: U256) -> Self {
        self.funding = Some(balance);
        self
    }

    pub fn signature(&self) -> String {
        format!("{CTOR_FN_NAME}({})", self.argument_types.join(","))
    }

    pub fn encode(&self) -> Result<CtorPayload, EncodingError> {
        encode_ctor_payload(&self.argument_types, &self.argument_values)
    }
}

/// Builds the payload a `constructor(bytes)` shim needs to run `ctor(types...)` with `values`.
pub fn encode_ctor_payload(
    types: &[String],
    values: &[DynSolValue],
) -> Result<CtorPayload, EncodingError> {
    if types.len() != values.len() {
        return Err(EncodingError::MismatchedArgumentCount {
            types: types.len(),
            values: values.len(),
        });
    }
    for (index, (type_name, value)) in types.iter().zip(values).enumerate() {
        let sol_type = DynSolType::parse(type_name)
            .map_err(|_| EncodingError::UnknownType(type_name.clone()))?;
        if !sol_type.matches(value) || !fits_width(value) {
            return Err(EncodingError::MismatchedArgumentType {
                index,
                expected: type_name.clone(),
            });
        }
    }

    let signature = format!("{CTOR_FN_NAME}({})", types.join(","));
    let selector = selector(&signature);
    let arguments = if values.is_empty() {
        Vec::new()
    } else {
        DynSolValue::Tuple(values.to_vec()).abi_encode_params()
    };
    let calldata: Vec<u8> = selector.iter().copied().chain(arguments).collect();
    let encoded = DynSolValue::Tuple(vec![DynSolValue::Bytes(calldata.clone())]).abi_encode_params();

    Ok(CtorPayload {
        signature,
        selector,
        calldata: calldata.into(),
        encoded: encoded.into(),
    })
}

/// Whether every integer and fixed-size byte string in `value` fits its declared width.
/// `DynSolType::matches` compares the widths but not the values.
fn fits_width(value: &DynSolValue) -> bool {
    match value {
        DynSolValue::Uint(value, bits) => value.bit_len() <= *bits,
        DynSolValue::Int(value, bits) => {
            let sign = value.asr(bits.saturating_sub(1));
            sign == I256::ZERO || sign == I256::MINUS_ONE
        }
        DynSolValue::FixedBytes(word, size) => word
            .get(*size..)
            .is_some_and(|padding| padding.iter().all(|b| *b == 0)),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => values.iter().all(fits_width),
        _ => true,
    }
}
