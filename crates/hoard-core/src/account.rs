use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Item name → quantity held or requested.
///
/// Quantities are signed so that a request for `-1` units can be reported
/// back to the user instead of failing to parse. A stored inventory never
/// contains an entry below 1.
pub type Inventory = BTreeMap<String, i64>;

/// A named balance and item inventory guarded by a secret key.
///
/// Every mutation validates the whole request before touching any state,
/// so a failed `add` or `take` leaves the account exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Account {
    /// Identity of the person who controls the account.
    pub owner: String,
    /// Account name, unique within a ledger.
    pub name: String,
    #[serde(skip)]
    key: String,
    value: f64,
    inventory: Inventory,
}

impl Account {
    /// Create an empty account.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            key: key.into(),
            value: 0.0,
            inventory: Inventory::new(),
        }
    }

    /// The account's key. An empty key means no authorization is required.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current currency balance.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Items currently held.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Units of `item` held, zero if absent.
    pub fn quantity(&self, item: &str) -> i64 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Credit
    // -----------------------------------------------------------------------

    /// Check that a credit of `value` and `items` would succeed.
    pub fn validate_add(&self, value: f64, items: &Inventory) -> CoreResult<()> {
        if value == 0.0 && items.is_empty() {
            return Err(CoreError::NothingGiven);
        }
        if value < 0.0 {
            return Err(CoreError::NegativeCredit);
        }
        if !value.is_finite() {
            return Err(CoreError::NonFinite);
        }
        if let Some((item, _)) = items.iter().find(|(_, amount)| **amount < 1) {
            return Err(CoreError::NegativeItemCredit(item.clone()));
        }
        if let Some((item, _)) = items
            .iter()
            .find(|(item, amount)| self.quantity(item).checked_add(**amount).is_none())
        {
            return Err(CoreError::TooManyItems(item.clone()));
        }
        Ok(())
    }

    /// Credit currency and items to the account.
    ///
    /// Item existence is not checked here; callers register items in the
    /// library beforehand.
    pub fn add(&mut self, value: f64, items: &Inventory) -> CoreResult<()> {
        self.validate_add(value, items)?;
        self.value += value;
        for (item, amount) in items {
            let held = self.inventory.entry(item.clone()).or_insert(0);
            *held = held.saturating_add(*amount);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Debit
    // -----------------------------------------------------------------------

    /// Check that a debit of `value` and `items` would succeed.
    pub fn validate_take(&self, value: f64, items: &Inventory) -> CoreResult<()> {
        if value == 0.0 && items.is_empty() {
            return Err(CoreError::NothingPassed);
        }
        if value < 0.0 {
            return Err(CoreError::NegativeDebit);
        }
        if !value.is_finite() {
            return Err(CoreError::NonFinite);
        }
        if value > self.value {
            return Err(CoreError::InsufficientFunds);
        }
        for (item, amount) in items {
            if *amount < 1 {
                return Err(CoreError::ItemQuantityTooSmall);
            }
            match self.inventory.get(item) {
                None => return Err(CoreError::MissingItem(item.clone())),
                Some(held) if held < amount => {
                    return Err(CoreError::InsufficientItem(item.clone()));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Debit currency and items without checking the key.
    pub fn take(&mut self, value: f64, items: &Inventory) -> CoreResult<()> {
        self.validate_take(value, items)?;
        for (item, amount) in items {
            if let Some(held) = self.inventory.get_mut(item) {
                *held -= amount;
                if *held == 0 {
                    self.inventory.remove(item);
                }
            }
        }
        self.value -= value;
        Ok(())
    }

    /// Check `key` against the account's key.
    ///
    /// An account with an empty key accepts any key.
    pub fn authorize(&self, key: &str) -> CoreResult<()> {
        if self.key.is_empty() || self.key == key {
            Ok(())
        } else {
            Err(CoreError::InvalidKey(self.name.clone()))
        }
    }

    /// Debit currency and items on behalf of the holder of `key`.
    pub fn remove(&mut self, key: &str, value: f64, items: &Inventory) -> CoreResult<()> {
        self.authorize(key)?;
        self.take(value, items)
    }

    // -----------------------------------------------------------------------
    // Reporting and persistence
    // -----------------------------------------------------------------------

    /// The balance and the serialized item listing.
    pub fn balance(&self) -> (f64, String) {
        (self.value, self.item_list())
    }

    /// Items as a comma-joined `item:quantity` list.
    pub fn item_list(&self) -> String {
        format_items(&self.inventory)
    }

    /// Encode the account as a single tab-delimited save record.
    pub fn to_record(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.owner,
            self.name,
            self.key,
            self.value,
            self.item_list()
        )
    }

    /// Decode a record written by [`Account::to_record`].
    ///
    /// The record is trusted: balances and quantities are taken as written.
    /// Only records that cannot be split into fields or whose numbers do not
    /// parse are rejected.
    pub fn from_record(line: &str) -> CoreResult<Self> {
        let malformed = || CoreError::MalformedRecord(line.to_string());

        let mut fields = line.splitn(5, '\t');
        let owner = fields.next().ok_or_else(malformed)?;
        let name = fields.next().ok_or_else(malformed)?;
        let key = fields.next().ok_or_else(malformed)?;
        let value = fields
            .next()
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(malformed)?;
        let items = fields.next().unwrap_or("");

        let mut inventory = Inventory::new();
        for pair in items.split(',').filter(|p| !p.is_empty()) {
            let (item, amount) = pair.split_once(':').ok_or_else(malformed)?;
            let amount = amount.parse::<i64>().map_err(|_| malformed())?;
            inventory.insert(item.to_string(), amount);
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            key: key.to_string(),
            value,
            inventory,
        })
    }
}

/// Render an inventory as `item:quantity` pairs joined by commas.
pub fn format_items(items: &Inventory) -> String {
    items
        .iter()
        .map(|(item, amount)| format!("{item}:{amount}"))
        .collect::<Vec<_>>()
        .join(",")
}
