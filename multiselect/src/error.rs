//! Configuration errors.
//!
//! Selection, filtering and panel operations cannot fail; only building a
//! control from options can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("row height must be greater than zero")]
    ZeroRowHeight,
    #[error("invalid options document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read options from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
