//! Error types for the ledger engine.

use std::path::PathBuf;

use hoard_core::CoreError;
use hoard_dsl::CommandError;
use thiserror::Error;

use crate::config::Lock;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Broad class of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A key did not match.
    Authorization,
    /// An account or item does not exist.
    NotFound,
    /// Bad amounts, bad syntax, or a request the ledger does not support.
    Validation,
    /// A policy lock is set.
    Locked,
    /// The ledger is not in a state where the request makes sense.
    State,
    /// Reading or writing save files failed.
    Persistence,
}

/// Errors raised by a [`Ledger`](crate::Ledger).
///
/// `Display` gives the message shown to the person who issued the command.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A key did not match.
    #[error("{0}")]
    Authorization(String),

    /// An account or item does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A request the ledger refuses on its content.
    #[error("{0}")]
    Validation(String),

    /// A policy lock is set.
    #[error("{}", .0.refusal())]
    Locked(Lock),

    /// The ledger is not in a state where the request makes sense.
    #[error("{0}")]
    State(String),

    /// Account or library failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The command text did not parse.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A save file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A save file was readable but not in the expected format.
    #[error("corrupt save file {}: {message}", path.display())]
    Corrupt {
        /// File involved.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },
}

impl LedgerError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) | Self::Command(_) => ErrorKind::Validation,
            Self::Locked(_) => ErrorKind::Locked,
            Self::State(_) => ErrorKind::State,
            Self::Core(e) if e.is_authorization() => ErrorKind::Authorization,
            Self::Core(_) => ErrorKind::Validation,
            Self::Io { .. } | Self::Corrupt { .. } => ErrorKind::Persistence,
        }
    }

    pub(crate) fn account_missing() -> Self {
        Self::NotFound("Account does not exist.".to_string())
    }

    pub(crate) fn invalid_key() -> Self {
        Self::Authorization("Invalid Key.".to_string())
    }
}
