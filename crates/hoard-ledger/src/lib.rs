//! The Hoard ledger engine.
//!
//! A [`Ledger`] tracks currency and items for the accounts of one location,
//! plus three reserved accounts: the Bank, which mints and burns; the
//! Store, which trades items at library value; and the Pot, which anyone
//! may pay into or draw from. Commands arrive as text in the grammar of
//! [`hoard_dsl`] and either commit completely or change nothing.

pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod registry;
pub mod report;

pub use config::{LedgerConfig, Lock, LockState};
pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use registry::LedgerRegistry;
pub use report::{AccountSummary, Balance, LedgerReport, Rectification};
