//! Ledger configuration and policy locks.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Configuration for a new ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Ledger name, part of the save file name.
    pub name: String,
    /// Location the ledger serves, e.g. a game server id.
    pub location: String,
    /// Identity of the admin, owner of the Bank and Store.
    pub admin: String,
    /// Key that opens the Bank.
    pub admin_key: String,
    /// Key that opens the Store.
    pub store_key: String,
    /// Directory holding the save files.
    pub save_dir: PathBuf,
}

impl LedgerConfig {
    /// Configuration for `location` administered by `admin`.
    ///
    /// The Store key defaults to the admin key.
    pub fn new(
        location: impl Into<String>,
        admin: impl Into<String>,
        admin_key: impl Into<String>,
    ) -> Self {
        let admin_key = admin_key.into();
        Self {
            name: "ledger".to_string(),
            location: location.into(),
            admin: admin.into(),
            store_key: admin_key.clone(),
            admin_key,
            save_dir: PathBuf::from("."),
        }
    }

    /// Set the ledger name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the Store key.
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    /// Set the save directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

/// One of the four policy locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    /// Blocks `add_user`.
    User,
    /// Blocks every transaction and value change.
    Transaction,
    /// Blocks trades with the Store.
    Store,
    /// Blocks the Bank from acting.
    Bank,
}

impl Lock {
    /// All locks, in config-file order.
    pub const ALL: [Lock; 4] = [Lock::User, Lock::Transaction, Lock::Store, Lock::Bank];

    /// Message returned when the lock refuses a request.
    pub fn refusal(self) -> &'static str {
        match self {
            Lock::User => "No new Users allowed.",
            Lock::Transaction => "Transactions are locked.",
            Lock::Store => "The Store is closed.",
            Lock::Bank => "The Bank is locked.",
        }
    }

    /// Parse a lock name as typed on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" | "users" => Some(Lock::User),
            "transaction" | "transactions" => Some(Lock::Transaction),
            "store" => Some(Lock::Store),
            "bank" => Some(Lock::Bank),
            _ => None,
        }
    }
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lock::User => "user",
            Lock::Transaction => "transaction",
            Lock::Store => "store",
            Lock::Bank => "bank",
        };
        write!(f, "{name}")
    }
}

/// State of the four locks. All clear by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LockState {
    /// `add_user` is refused.
    pub user: bool,
    /// Transactions are refused.
    pub transaction: bool,
    /// Store trades are refused.
    pub store: bool,
    /// The Bank cannot act.
    pub bank: bool,
}

impl LockState {
    /// Whether `lock` is set.
    pub fn is_set(&self, lock: Lock) -> bool {
        match lock {
            Lock::User => self.user,
            Lock::Transaction => self.transaction,
            Lock::Store => self.store,
            Lock::Bank => self.bank,
        }
    }

    /// Flip `lock`, returning its new state.
    pub fn toggle(&mut self, lock: Lock) -> bool {
        let slot = match lock {
            Lock::User => &mut self.user,
            Lock::Transaction => &mut self.transaction,
            Lock::Store => &mut self.store,
            Lock::Bank => &mut self.bank,
        };
        *slot = !*slot;
        *slot
    }

    /// Encode as four `True`/`False` lines.
    pub fn to_config(&self) -> String {
        Lock::ALL
            .iter()
            .map(|lock| if self.is_set(*lock) { "True" } else { "False" })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Decode the config file. Anything other than exactly four
    /// `True`/`False` lines is an error.
    pub fn from_config(text: &str) -> Result<Self, String> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() != Lock::ALL.len() {
            return Err(format!("expected 4 lock lines, found {}", lines.len()));
        }

        let mut state = LockState::default();
        for (lock, line) in Lock::ALL.iter().zip(lines) {
            match line {
                "True" => {
                    state.toggle(*lock);
                }
                "False" => {}
                other => return Err(format!("{lock} lock: expected True or False, got {other:?}")),
            }
        }
        Ok(state)
    }
}
