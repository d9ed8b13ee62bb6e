//! # The error module
//!
//! Everything that can go wrong while assembling a genesis document. Each error is fatal
//! for the profile being built; none of them is retried.

use {
    std::path::PathBuf,
    sysgen_shared::{primitives::Address, quantity::QuantityError},
    thiserror::Error,
};

/// The result type with its error type set to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error for assembling a genesis document.
///
/// # Variants
/// * [`Error::Config`] the profile or the contract artifacts are missing or malformed.
/// * [`Error::Simulation`] a constructor could not be encoded, deployed or initialized.
/// * [`Error::Serialization`] the document could not be rendered as JSON.
/// * [`Error::Io`] the document could not be written to its destination.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Simulation(#[from] sysgen_evm_ext::Error),
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// The error caused by missing or malformed profile data and artifacts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial stake is not found for validator: {0}")]
    MissingInitialStake(Address),
    #[error("sum of initial stakes does not fit in 256 bits")]
    InitialStakeOverflow,
    #[error("invalid {field}: {source}")]
    InvalidQuantity {
        field: String,
        #[source]
        source: QuantityError,
    },
    #[error("failed to read network profile {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse network profile {path}: {source}")]
    MalformedProfile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read artifact of {contract} from {path}: {source}")]
    ArtifactRead {
        contract: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact of {contract}: {reason}")]
    MalformedArtifact {
        contract: &'static str,
        reason: String,
    },
    #[error("unknown network profile: {0}")]
    UnknownProfile(String),
}
