//! Read-only reporting over a ledger.

use hoard_core::{Account, Inventory, ItemLibrary, ItemValue, format_items};
use serde::Serialize;

use crate::config::LockState;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// What an account, or a group of accounts, is worth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Balance {
    /// Currency held.
    pub value: f64,
    /// Items held.
    pub items: Inventory,
    /// Currency plus the library value of every valued item.
    pub total_value: f64,
}

impl Balance {
    fn of(account: &Account, library: &ItemLibrary) -> Self {
        Self {
            value: account.value(),
            items: account.inventory().clone(),
            total_value: account.value() + items_value(account.inventory(), library),
        }
    }

    fn merge(mut self, other: Balance) -> Self {
        self.value += other.value;
        self.total_value += other.total_value;
        for (item, qty) in other.items {
            let held = self.items.entry(item).or_insert(0);
            *held = held.saturating_add(qty);
        }
        self
    }

    /// Items as a comma-joined `item:quantity` list.
    pub fn item_list(&self) -> String {
        format_items(&self.items)
    }
}

/// One user's distance from an even split of the ledger's wealth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rectification {
    /// Account name.
    pub name: String,
    /// The account's total value.
    pub total_value: f64,
    /// Amount the account must receive (positive) or give up (negative) to
    /// reach the average.
    pub delta: f64,
}

/// Public view of one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    /// Account name.
    pub name: String,
    /// Owner identity.
    pub owner: String,
    /// Holdings.
    pub balance: Balance,
}

/// Everything a ledger reports, for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    /// Ledger name.
    pub name: String,
    /// Location served.
    pub location: String,
    /// Bank, Store, Pot, then users.
    pub accounts: Vec<AccountSummary>,
    /// Item values, unvalued and priceless items included.
    pub items: Vec<(String, ItemValue)>,
    /// Lock state.
    pub locks: LockState,
    /// Committed history.
    pub history: Vec<String>,
}

fn items_value(items: &Inventory, library: &ItemLibrary) -> f64 {
    items
        .iter()
        .filter_map(|(item, qty)| {
            library
                .get(item)
                .and_then(ItemValue::unit_value)
                .map(|v| v * *qty as f64)
        })
        .sum()
}

impl Ledger {
    /// Holdings of the named account.
    pub fn show_balance(&self, account: &str) -> LedgerResult<Balance> {
        self.get_account(account)
            .map(|a| Balance::of(a, &self.library))
            .ok_or_else(LedgerError::account_missing)
    }

    /// Holdings of every user plus the Pot. The Bank and Store are left out.
    pub fn total_value(&self) -> Balance {
        self.users
            .iter()
            .chain(std::iter::once(&self.pot))
            .map(|a| Balance::of(a, &self.library))
            .fold(Balance::default(), Balance::merge)
    }

    /// For each user, `T / N - user_total`, where `T` is
    /// [`Ledger::total_value`] and `N` the number of users.
    pub fn show_rectify(&self) -> LedgerResult<Vec<Rectification>> {
        if self.users.is_empty() {
            return Err(LedgerError::State("There are no users to rectify.".to_string()));
        }
        let share = self.total_value().total_value / self.users.len() as f64;
        Ok(self
            .users
            .iter()
            .map(|user| {
                let total_value = Balance::of(user, &self.library).total_value;
                Rectification {
                    name: user.name.clone(),
                    total_value,
                    delta: share - total_value,
                }
            })
            .collect())
    }

    /// Every item and its value, in name order.
    pub fn item_list(&self) -> Vec<(String, ItemValue)> {
        self.library
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// `(name, owner)` of every user, in creation order.
    pub fn show_users(&self) -> Vec<(&str, &str)> {
        self.users
            .iter()
            .map(|u| (u.name.as_str(), u.owner.as_str()))
            .collect()
    }

    /// The last `n` history entries, or all of them when `n` is 0.
    pub fn transaction_log(&self, n: usize) -> &[String] {
        if n == 0 || n >= self.history.len() {
            &self.history
        } else {
            &self.history[self.history.len() - n..]
        }
    }

    /// Snapshot of the whole ledger for export.
    pub fn report(&self) -> LedgerReport {
        LedgerReport {
            name: self.name.clone(),
            location: self.location.clone(),
            accounts: self
                .all_accounts()
                .map(|a| AccountSummary {
                    name: a.name.clone(),
                    owner: a.owner.clone(),
                    balance: Balance::of(a, &self.library),
                })
                .collect(),
            items: self.item_list(),
            locks: self.locks,
            history: self.history.clone(),
        }
    }
}
