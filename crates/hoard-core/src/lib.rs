//! Core types for Hoard: accounts, inventories, and the item library.
//!
//! This crate knows nothing about the command grammar or the ledger's
//! account roles. It provides the credit/debit primitives that the ledger
//! composes into all-or-nothing transactions, and the registry of item
//! values the Store prices against.

/// Accounts: balance, inventory, and the key guarding them.
pub mod account;
/// Error types used throughout the crate.
pub mod error;
/// The item library and item values.
pub mod item;

/// Re-export account types.
pub use account::{Account, Inventory, format_items};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{ItemLibrary, ItemValue};

/// Names that can never be taken by an ordinary user account.
pub const RESERVED_NAMES: [&str; 3] = ["Bank", "Store", "Pot"];

/// Whether `name` is one of the ledger's pseudo-account names.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}
