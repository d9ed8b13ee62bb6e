use {
    clap::Parser,
    std::{io, path::PathBuf},
    sysgen_genesis::{ArtifactDir, BuiltinProfile, DEFAULT_ARTIFACTS_DIR, NetworkProfile, OutputSink},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter},
};

/// Generates genesis documents with pre-deployed system contracts.
///
/// Without arguments every built-in profile is written to `<name>.json` in the current
/// directory.
#[derive(Parser, Debug)]
#[command(name = "genesis-builder", version, about, long_about = None)]
struct Args {
    /// JSON network profile to build instead of the built-in ones
    profile: Option<PathBuf>,

    /// `stdout`, `stderr` or a file path
    #[arg(default_value = "stdout")]
    output: OutputSink,

    /// Build a single built-in profile (`localnet`, `devnet`, `testnet`, `spicy` or `mainnet`)
    /// into `<name>.json`
    #[arg(long, conflicts_with = "profile")]
    network: Option<BuiltinProfile>,

    /// Directory with one `<ContractName>.json` compiler artifact per system contract
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,
}

/// Logs go to whichever standard stream does not carry the document.
fn log_writer(output: &OutputSink) -> BoxMakeWriter {
    match output {
        OutputSink::Stderr => BoxMakeWriter::new(io::stdout),
        _ => BoxMakeWriter::new(io::stderr),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(log_writer(&args.output))
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let artifacts = ArtifactDir::new(args.artifacts);
    let builtins = match (args.profile, args.network) {
        (Some(path), _) => {
            let profile = NetworkProfile::from_file(&path)?;
            info!(profile = %path.display(), output = %args.output, "building genesis");
            sysgen_genesis::generate(&profile, &artifacts, &args.output)?;
            return Ok(());
        }
        (None, Some(network)) => vec![network],
        (None, None) => BuiltinProfile::ALL.to_vec(),
    };

    for builtin in builtins {
        info!(profile = %builtin, "building genesis");
        let sink = OutputSink::File(builtin.file_name().into());
        sysgen_genesis::generate(&builtin.profile(), &artifacts, &sink)?;
    }

    Ok(())
}
