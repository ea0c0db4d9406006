use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("--percent \"{0}\" must be between 0 and 1")]
    InvalidPercent(f64),
    #[error("cannot open input file {path:?}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input path {path:?} has no file name")]
    NoFileName { path: PathBuf },
    #[error("cannot create output directory {path:?}: {source}")]
    CreateOutdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create output file {path:?}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
