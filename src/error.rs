//src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a consensus run.
#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
