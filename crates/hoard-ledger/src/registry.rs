//! Ledgers keyed by location, owned by the hosting service.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// The set of open ledgers, one per location.
#[derive(Debug, Default)]
pub struct LedgerRegistry {
    ledgers: BTreeMap<String, Ledger>,
}

impl LedgerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ledger for `location`, loading it from `dir` if it is not open.
    pub fn open(&mut self, dir: &Path, location: &str, name: &str) -> LedgerResult<&mut Ledger> {
        match self.ledgers.entry(location.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => Ok(e.insert(Ledger::load(dir, location, name)?)),
        }
    }

    /// Add a ledger under its own location, returning any ledger it replaces.
    pub fn insert(&mut self, ledger: Ledger) -> Option<Ledger> {
        self.ledgers.insert(ledger.location().to_string(), ledger)
    }

    /// The ledger for `location`.
    pub fn get(&self, location: &str) -> Option<&Ledger> {
        self.ledgers.get(location)
    }

    /// The ledger for `location`, mutably.
    pub fn get_mut(&mut self, location: &str) -> Option<&mut Ledger> {
        self.ledgers.get_mut(location)
    }

    /// Close the ledger for `location` without saving it.
    pub fn remove(&mut self, location: &str) -> Option<Ledger> {
        self.ledgers.remove(location)
    }

    /// Locations with an open ledger, in order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.ledgers.keys().map(String::as_str)
    }

    /// Save every open ledger. Stops at the first failure.
    pub fn save_all(&self) -> LedgerResult<()> {
        self.ledgers.values().try_for_each(Ledger::save)
    }
}
