//! # The error module
//!
//! Structured errors for constructor encoding and isolated deployment. They implement
//! [`Display`] and [`Debug`] so they can be logged, but no logic should depend on the
//! rendered messages.
//!
//! [`Display`]: std::fmt::Display

use {sysgen_shared::primitives::Address, thiserror::Error};

/// The result type with its error type set to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error for encoding and simulating a single system contract.
///
/// # Variants
/// * [`Error::Encoding`] the constructor arguments do not fit the declared types.
/// * [`Error::Deployment`] the creation code reverted or halted.
/// * [`Error::Initialization`] the post-deploy initializer reverted or halted.
/// * [`Error::Engine`] the execution engine rejected the environment itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Encoding(#[from] EncodingError),
    #[error("Deployment of {address} failed: {reason}")]
    Deployment { address: Address, reason: String },
    #[error("Initialization of {address} failed: {reason}")]
    Initialization { address: Address, reason: String },
    #[error("EVM Error: {0}")]
    Engine(String),
}

/// The error caused by a constructor signature that does not match its arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Unrecognized ABI type: {0}")]
    UnknownType(String),
    #[error("Incorrect number of arguments: types={types} values={values}")]
    MismatchedArgumentCount { types: usize, values: usize },
    #[error("Argument {index} does not match type {expected}")]
    MismatchedArgumentType { index: usize, expected: String },
}
