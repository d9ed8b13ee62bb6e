use {
    crate::error::Result,
    alloy::genesis::Genesis,
    std::{
        convert::Infallible,
        fmt, fs,
        io::{self, Write},
        path::PathBuf,
        str::FromStr,
    },
};

/// Where a rendered genesis document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl OutputSink {
    pub fn write(&self, genesis: &Genesis) -> Result<()> {
        let json = render(genesis)?;
        match self {
            Self::Stdout => io::stdout().lock().write_all(json.as_bytes())?,
            Self::Stderr => io::stderr().lock().write_all(json.as_bytes())?,
            Self::File(path) => fs::write(path, json)?,
        }
        Ok(())
    }
}

/// Pretty-printed JSON with two space indentation.
pub fn render(genesis: &Genesis) -> Result<String> {
    Ok(serde_json::to_string_pretty(genesis)?)
}

impl FromStr for OutputSink {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "stdout" => Self::Stdout,
            "stderr" => Self::Stderr,
            path => Self::File(path.into()),
        })
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
