use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("invalid problem file {}: {source}", path.display())]
    Problem {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("snippet library not found: {}", .0.display())]
    LibraryNotFound(PathBuf),

    #[error("unknown snippet module: {0}")]
    UnknownModule(String),

    #[error("no library markers in {}", path.display())]
    MissingMarkers { path: PathBuf },

    #[error("{} already exists (pass --force to overwrite)", path.display())]
    Exists { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
