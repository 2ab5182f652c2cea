use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid markdown: unclosed delimiter `{delimiter}`")]
    UnclosedDelimiter { delimiter: String },

    #[error("leaf node has neither a tag nor a value")]
    MissingContent,

    #[error("invalid node structure: {0}")]
    InvalidStructure(String),

    #[error("document has no top-level `# ` heading to use as a title")]
    NoTitle,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("output directory {} would overwrite input {}", output.display(), input.display())]
    UnsafeOutputDir { output: PathBuf, input: PathBuf },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
