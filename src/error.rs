use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Run-aborting failures. Anything local to one entry is rendered inline instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Le chemin '{}' n'existe pas.", .0.display())]
    RootNotFound(PathBuf),

    #[error("cannot write report to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value for {key} in config: '{value}'")]
    ConfigValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
