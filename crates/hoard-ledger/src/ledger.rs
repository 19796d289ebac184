//! The ledger: accounts, item library, history and locks for one location.

use std::path::{Path, PathBuf};

use hoard_core::{Account, CoreError, Inventory, ItemLibrary, ItemValue, is_reserved_name};
use hoard_dsl::{Command, CommandError, is_single_word, parse_command};
use tracing::{debug, info};

use crate::config::{LedgerConfig, Lock, LockState};
use crate::error::{LedgerError, LedgerResult};

/// Which account a transfer leg touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccountRef {
    Bank,
    Store,
    Pot,
    User(usize),
}

/// Accounting engine for one location.
///
/// Every mutating method takes `&mut self`, so one ledger handles one
/// request at a time. Hosts that share a ledger between threads wrap it
/// in a `Mutex`.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) save_dir: PathBuf,
    pub(crate) users: Vec<Account>,
    pub(crate) bank: Account,
    pub(crate) store: Account,
    pub(crate) pot: Account,
    pub(crate) library: ItemLibrary,
    pub(crate) history: Vec<String>,
    pub(crate) locks: LockState,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            bank: Account::new(config.admin.clone(), "Bank", config.admin_key),
            store: Account::new(config.admin, "Store", config.store_key),
            pot: Account::new("", "Pot", ""),
            name: config.name,
            location: config.location,
            save_dir: config.save_dir,
            users: Vec::new(),
            library: ItemLibrary::new(),
            history: Vec::new(),
            locks: LockState::default(),
        }
    }

    /// Ledger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location the ledger serves.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Directory the save files live in.
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Identity of the admin.
    pub fn admin(&self) -> &str {
        &self.bank.owner
    }

    /// Whether `key` opens the Bank.
    pub fn is_admin_key(&self, key: &str) -> bool {
        self.bank.key() == key
    }

    /// Ordinary user accounts, in creation order.
    pub fn users(&self) -> &[Account] {
        &self.users
    }

    /// The item library.
    pub fn library(&self) -> &ItemLibrary {
        &self.library
    }

    /// Committed history, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Current lock state.
    pub fn locks(&self) -> LockState {
        self.locks
    }

    // -----------------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------------

    /// Whether `name` is a reserved account or a registered user.
    pub fn is_account_name(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Look up an account by name. The Bank, Store and Pot always resolve.
    pub fn get_account(&self, name: &str) -> Option<&Account> {
        self.resolve(name).map(|r| self.account(r))
    }

    pub(crate) fn resolve(&self, name: &str) -> Option<AccountRef> {
        match name {
            "Bank" => Some(AccountRef::Bank),
            "Store" => Some(AccountRef::Store),
            "Pot" => Some(AccountRef::Pot),
            _ => self
                .users
                .iter()
                .position(|u| u.name == name)
                .map(AccountRef::User),
        }
    }

    pub(crate) fn account(&self, r: AccountRef) -> &Account {
        match r {
            AccountRef::Bank => &self.bank,
            AccountRef::Store => &self.store,
            AccountRef::Pot => &self.pot,
            AccountRef::User(i) => &self.users[i],
        }
    }

    pub(crate) fn account_mut(&mut self, r: AccountRef) -> &mut Account {
        match r {
            AccountRef::Bank => &mut self.bank,
            AccountRef::Store => &mut self.store,
            AccountRef::Pot => &mut self.pot,
            AccountRef::User(i) => &mut self.users[i],
        }
    }

    /// Every account, reserved ones first.
    pub(crate) fn all_accounts(&self) -> impl Iterator<Item = &Account> {
        [&self.bank, &self.store, &self.pot]
            .into_iter()
            .chain(self.users.iter())
    }

    /// Open a new user account.
    ///
    /// Items the library has not seen yet are registered as unvalued. On
    /// success an audit line is appended to the history and the
    /// confirmation message is returned.
    pub fn add_user(
        &mut self,
        owner: &str,
        name: &str,
        key: &str,
        value: f64,
        items: &Inventory,
    ) -> LedgerResult<String> {
        let result = self.open_account(owner, name, key, value, items);
        if let Err(e) = &result {
            debug!(location = %self.location, ledger = %self.name, account = name, error = %e, "add_user refused");
        }
        result
    }

    fn open_account(
        &mut self,
        owner: &str,
        name: &str,
        key: &str,
        value: f64,
        items: &Inventory,
    ) -> LedgerResult<String> {
        if self.locks.user {
            return Err(LedgerError::Locked(Lock::User));
        }
        if is_reserved_name(name) || self.users.iter().any(|u| u.name == name) {
            return Err(LedgerError::Validation("User already exists.".to_string()));
        }
        if !is_single_word(name) {
            return Err(LedgerError::Validation(
                "Account names must be a single word without ':' or ','.".to_string(),
            ));
        }
        if has_line_breaks(owner) || has_line_breaks(key) {
            return Err(LedgerError::Validation(
                "Owner and key cannot contain tabs or line breaks.".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(LedgerError::Validation(
                "Cannot start with negative value.".to_string(),
            ));
        }
        if !value.is_finite() {
            return Err(CoreError::NonFinite.into());
        }
        if let Some((item, _)) = items.iter().find(|(_, qty)| **qty < 1) {
            return Err(LedgerError::Validation(format!(
                "Cannot start with a negative number of {item}."
            )));
        }
        if let Some(item) = items.keys().find(|item| !is_valid_item_name(item)) {
            return Err(invalid_item_name(item));
        }

        let mut account = Account::new(owner, name, key);
        if value > 0.0 || !items.is_empty() {
            account.add(value, items)?;
        }
        for item in items.keys() {
            self.library.register(item);
        }

        self.history.push(format!(
            "{name} account added with {value}gp and {}.",
            account.item_list()
        ));
        self.users.push(account);
        info!(location = %self.location, ledger = %self.name, account = name, owner, "account added");
        Ok(format!("{name} account added."))
    }

    // -----------------------------------------------------------------------
    // Locks
    // -----------------------------------------------------------------------

    /// Flip `lock`, returning its new state.
    pub fn toggle_lock(&mut self, lock: Lock) -> bool {
        let set = self.locks.toggle(lock);
        info!(location = %self.location, ledger = %self.name, %lock, set, "lock toggled");
        set
    }

    /// Flip the lock on new users.
    pub fn toggle_user_lock(&mut self) -> bool {
        self.toggle_lock(Lock::User)
    }

    /// Flip the global transaction lock.
    pub fn toggle_transaction_lock(&mut self) -> bool {
        self.toggle_lock(Lock::Transaction)
    }

    /// Flip the Store lock.
    pub fn toggle_store_lock(&mut self) -> bool {
        self.toggle_lock(Lock::Store)
    }

    /// Flip the Bank lock.
    pub fn toggle_bank_lock(&mut self) -> bool {
        self.toggle_lock(Lock::Bank)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Register a new item with an explicit value. Admin only.
    pub fn create_item(&mut self, name: &str, value: ItemValue, key: &str) -> LedgerResult<()> {
        if !self.is_admin_key(key) {
            return Err(LedgerError::invalid_key());
        }
        if !is_valid_item_name(name) {
            return Err(invalid_item_name(name));
        }
        if let ItemValue::Valued(v) = value
            && (v < 0.0 || !v.is_finite())
        {
            return Err(LedgerError::Validation("Value cannot be negative.".to_string()));
        }
        if !self.library.new_item(name, value) {
            return Err(LedgerError::Validation("Item already exists.".to_string()));
        }
        self.history.push(format!("{name} item created at {value}."));
        info!(location = %self.location, ledger = %self.name, item = name, %value, "item created");
        Ok(())
    }

    /// Remove an item from the library. Admin only, and refused while any
    /// account still holds the item.
    pub fn delete_item(&mut self, name: &str, key: &str) -> LedgerResult<()> {
        if !self.is_admin_key(key) {
            return Err(LedgerError::invalid_key());
        }
        if !self.library.contains(name) {
            return Err(LedgerError::NotFound("Item does not exist.".to_string()));
        }
        if let Some(holder) = self.all_accounts().find(|a| a.quantity(name) > 0) {
            return Err(LedgerError::State(format!(
                "{name} is still held by {}.",
                holder.name
            )));
        }
        self.library.delete_item(name);
        self.history.push(format!("{name} item deleted."));
        info!(location = %self.location, ledger = %self.name, item = name, "item deleted");
        Ok(())
    }

    /// Apply a `Set Value ITEM: VALUE` command. Returns an empty string on
    /// success and the reason otherwise.
    pub fn set_value(&mut self, command: &str, key: &str) -> String {
        match self.try_set_value(command, key) {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// [`Ledger::set_value`] with a typed error.
    ///
    /// Unvalued items may be priced by anyone. Changing a valued item,
    /// and anything involving `Priceless`, needs the admin key.
    pub fn try_set_value(&mut self, command: &str, key: &str) -> LedgerResult<()> {
        if self.locks.transaction {
            return Err(LedgerError::Locked(Lock::Transaction));
        }
        let result = match parse_command(command)? {
            Command::SetValue { item, value } => self.apply_set_value(&item, value, key),
            _ => Err(CommandError::NotRecognized {
                span: 0..command.len(),
            }
            .into()),
        };
        if let Err(e) = &result {
            debug!(location = %self.location, ledger = %self.name, command, error = %e, "value change refused");
        }
        result
    }

    pub(crate) fn apply_set_value(
        &mut self,
        item: &str,
        value: ItemValue,
        key: &str,
    ) -> LedgerResult<()> {
        let current = self
            .library
            .get(item)
            .ok_or_else(|| LedgerError::NotFound("Item does not exist.".to_string()))?;

        let needs_admin = !current.is_unvalued() || value == ItemValue::Priceless;
        if needs_admin && !self.is_admin_key(key) {
            return Err(LedgerError::Authorization(format!(
                "Only the Bank can change the value of {item}."
            )));
        }

        self.library.change_value(item, value);
        let entry = Command::SetValue {
            item: item.to_string(),
            value,
        }
        .to_string();
        info!(location = %self.location, ledger = %self.name, command = %entry, "value set");
        self.history.push(entry);
        Ok(())
    }
}

fn has_line_breaks(text: &str) -> bool {
    text.contains(['\t', '\n', '\r'])
}

/// Whether `name` can be stored in save files and written in commands.
pub(crate) fn is_valid_item_name(name: &str) -> bool {
    !name.trim().is_empty() && name.trim() == name && !name.contains([',', ':', '\t', '\n', '\r'])
}

fn invalid_item_name(name: &str) -> LedgerError {
    LedgerError::Validation(format!(
        "Item name {name:?} cannot contain commas, colons or line breaks."
    ))
}
