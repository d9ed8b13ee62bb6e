use {
    crate::{
        error::{ConfigError, Result},
        system_contracts::SystemContract,
    },
    serde::Deserialize,
    std::{collections::HashMap, fs, path::PathBuf},
    sysgen_shared::primitives::Bytes,
};

/// Default location of the compiled system contracts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// Supplies the creation bytecode of the system contracts.
pub trait ArtifactSource {
    fn creation_code(&self, contract: SystemContract) -> Result<Bytes>;
}

/// Subset of a compiler artifact that is relevant to genesis generation.
#[derive(Debug, Deserialize)]
struct ArtifactData {
    bytecode: Bytes,
}

/// A directory with one `<ContractName>.json` compiler artifact per system contract.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, contract: SystemContract) -> PathBuf {
        self.root.join(format!("{}.json", contract.name()))
    }
}

impl Default for ArtifactDir {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACTS_DIR)
    }
}

impl ArtifactSource for ArtifactDir {
    fn creation_code(&self, contract: SystemContract) -> Result<Bytes> {
        let path = self.path_of(contract);
        let contents = fs::read(&path).map_err(|source| ConfigError::ArtifactRead {
            contract: contract.name(),
            path,
            source,
        })?;
        parse_artifact(contract, &contents)
    }
}

/// Creation bytecode held in memory, keyed by contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifacts {
    codes: HashMap<SystemContract, Bytes>,
}

impl InMemoryArtifacts {
    pub fn with_code(mut self, contract: SystemContract, code: impl Into<Bytes>) -> Self {
        self.codes.insert(contract, code.into());
        self
    }
}

impl FromIterator<(SystemContract, Bytes)> for InMemoryArtifacts {
    fn from_iter<T: IntoIterator<Item = (SystemContract, Bytes)>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl ArtifactSource for InMemoryArtifacts {
    fn creation_code(&self, contract: SystemContract) -> Result<Bytes> {
        self.codes.get(&contract).cloned().ok_or_else(|| {
            ConfigError::MalformedArtifact {
                contract: contract.name(),
                reason: "no creation code provided".into(),
            }
            .into()
        })
    }
}

fn parse_artifact(contract: SystemContract, contents: &[u8]) -> Result<Bytes> {
    let artifact: ArtifactData =
        serde_json::from_slice(contents).map_err(|e| ConfigError::MalformedArtifact {
            contract: contract.name(),
            reason: e.to_string(),
        })?;
    if artifact.bytecode.is_empty() {
        return Err(ConfigError::MalformedArtifact {
            contract: contract.name(),
            reason: "empty bytecode".into(),
        }
        .into());
    }
    Ok(artifact.bytecode)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::error::Error,
        std::path::Path,
        sysgen_shared::primitives::hex,
        test_case::test_case,
    };

    #[test]
    fn test_artifact_dir_reads_creation_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Staking.json"),
            r#"{"contractName": "Staking", "bytecode": "0x6001600c60003960016000f300", "deployedBytecode": "0x00"}"#,
        )
        .unwrap();
        let artifacts = ArtifactDir::new(dir.path());

        let code = artifacts.creation_code(SystemContract::Staking).unwrap();

        assert_eq!(code, Bytes::from(hex!("6001600c60003960016000f300")));
    }

    #[test]
    fn test_missing_artifact_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ArtifactDir::new(dir.path());

        let err = artifacts
            .creation_code(SystemContract::Governance)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::ArtifactRead { contract: "Governance", .. })
        ));
    }

    #[test_case(r#"{"deployedBytecode": "0x00"}"#; "missing bytecode")]
    #[test_case(r#"{"bytecode": "0xzz"}"#; "invalid hex")]
    #[test_case(r#"{"bytecode": "0x"}"#; "empty bytecode")]
    #[test_case("not json"; "not json")]
    fn test_malformed_artifact_is_rejected(contents: &str) {
        let err = parse_artifact(SystemContract::StakingPool, contents.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MalformedArtifact { contract: "StakingPool", .. })
        ));
    }

    #[test]
    fn test_default_dir_is_build_contracts() {
        let artifacts = ArtifactDir::default();

        assert_eq!(
            artifacts.path_of(SystemContract::DeployerProxy),
            Path::new("build/contracts/DeployerProxy.json")
        );
    }
}
