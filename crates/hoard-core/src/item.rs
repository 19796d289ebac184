use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The value of one unit of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum ItemValue {
    /// Not yet valued. Anyone may set the first value.
    #[default]
    Unvalued,
    /// Cannot be priced; the Store will not trade it.
    Priceless,
    /// Worth this much currency per unit.
    Valued(f64),
}

impl ItemValue {
    /// Side-file encoding of [`ItemValue::Unvalued`].
    pub const UNVALUED_FIELD: &'static str = "-1";
    /// Side-file encoding of [`ItemValue::Priceless`].
    pub const PRICELESS_FIELD: &'static str = "-2";

    /// The per-unit price, if the item is valued.
    pub fn unit_value(self) -> Option<f64> {
        match self {
            Self::Valued(v) => Some(v),
            Self::Unvalued | Self::Priceless => None,
        }
    }

    /// Whether the item is still unvalued.
    pub fn is_unvalued(self) -> bool {
        matches!(self, Self::Unvalued)
    }

    /// Encode for the item-library side file.
    pub fn to_field(self) -> String {
        match self {
            Self::Unvalued => Self::UNVALUED_FIELD.to_string(),
            Self::Priceless => Self::PRICELESS_FIELD.to_string(),
            Self::Valued(v) => v.to_string(),
        }
    }

    /// Decode a side-file field. Negative numbers other than the two
    /// sentinels are rejected.
    pub fn from_field(field: &str) -> Option<Self> {
        match field.trim() {
            Self::UNVALUED_FIELD => Some(Self::Unvalued),
            Self::PRICELESS_FIELD => Some(Self::Priceless),
            other => {
                let v = other.parse::<f64>().ok()?;
                (v >= 0.0 && v.is_finite()).then_some(Self::Valued(v))
            }
        }
    }
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unvalued => write!(f, "Unvalued"),
            Self::Priceless => write!(f, "Priceless"),
            Self::Valued(v) => write!(f, "{v}"),
        }
    }
}

/// Registry of every item known to a ledger and its value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemLibrary {
    items: BTreeMap<String, ItemValue>,
}

impl ItemLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns `false` if the name is already taken.
    pub fn new_item(&mut self, name: impl Into<String>, value: ItemValue) -> bool {
        let name = name.into();
        if self.items.contains_key(&name) {
            return false;
        }
        self.items.insert(name, value);
        true
    }

    /// Add `name` as unvalued unless it is already known.
    pub fn register(&mut self, name: &str) -> bool {
        if self.items.contains_key(name) {
            return false;
        }
        self.items.insert(name.to_string(), ItemValue::Unvalued);
        true
    }

    /// Overwrite the value of an existing item. Returns `false` if absent.
    ///
    /// No permission or sign checks happen here.
    pub fn change_value(&mut self, name: &str, value: ItemValue) -> bool {
        match self.items.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Remove an item. Returns `false` if absent.
    pub fn delete_item(&mut self, name: &str) -> bool {
        self.items.remove(name).is_some()
    }

    /// Look up an item's value.
    pub fn get(&self, name: &str) -> Option<ItemValue> {
        self.items.get(name).copied()
    }

    /// Whether the item is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Iterate over items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemValue)> {
        self.items.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize as `name,value,` lines.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.items {
            out.push_str(&format!("{name},{},\n", value.to_field()));
        }
        out
    }

    /// Parse a table written by [`ItemLibrary::to_table`].
    ///
    /// Malformed lines are skipped and returned alongside the library so
    /// that one bad line does not lose the rest of the table.
    pub fn from_table(table: &str) -> (Self, Vec<String>) {
        let mut library = Self::new();
        let mut rejected = Vec::new();

        for line in table.lines().filter(|l| !l.trim().is_empty()) {
            let mut fields = line.split(',');
            let parsed = match (fields.next(), fields.next()) {
                (Some(name), Some(value)) if !name.trim().is_empty() => {
                    ItemValue::from_field(value).map(|v| (name.trim(), v))
                }
                _ => None,
            };
            match parsed {
                Some((name, value)) => {
                    library.items.insert(name.to_string(), value);
                }
                None => rejected.push(line.to_string()),
            }
        }

        (library, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ItemLibrary {
        let mut lib = ItemLibrary::new();
        lib.new_item("Normal", ItemValue::Valued(1.0));
        lib.new_item("Unvalued", ItemValue::Unvalued);
        lib.new_item("Priceless", ItemValue::Priceless);
        lib
    }

    #[test]
    fn new_item() {
        let mut lib = library();
        assert!(lib.new_item("Bolt", ItemValue::Valued(20.0)));
        assert!(!lib.new_item("Normal", ItemValue::Unvalued));
        assert_eq!(lib.get("Normal"), Some(ItemValue::Valued(1.0)));
    }

    #[test]
    fn register_defaults_to_unvalued() {
        let mut lib = library();
        assert!(lib.register("Rope"));
        assert!(!lib.register("Rope"));
        assert_eq!(lib.get("Rope"), Some(ItemValue::Unvalued));
    }

    #[test]
    fn change_value() {
        let mut lib = library();
        assert!(lib.change_value("Normal", ItemValue::Valued(2.0)));
        assert_eq!(lib.get("Normal"), Some(ItemValue::Valued(2.0)));
        assert!(!lib.change_value("DNE", ItemValue::Valued(2.0)));
    }

    #[test]
    fn delete_item() {
        let mut lib = library();
        assert!(lib.delete_item("Normal"));
        assert!(!lib.delete_item("Normal"));
        assert!(!lib.contains("Normal"));
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn table_roundtrip() {
        let mut lib = library();
        lib.new_item("Half Ration", ItemValue::Valued(0.5));
        let table = lib.to_table();
        assert_eq!(
            table,
            "Half Ration,0.5,\nNormal,1,\nPriceless,-2,\nUnvalued,-1,\n"
        );
        let (loaded, rejected) = ItemLibrary::from_table(&table);
        assert!(rejected.is_empty());
        assert_eq!(loaded, lib);
    }

    #[test]
    fn table_tolerates_bad_lines() {
        let (lib, rejected) =
            ItemLibrary::from_table("Silly Goose: 15000\nBolt,20,\nOdd,-7,\n,3,\n");
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get("Bolt"), Some(ItemValue::Valued(20.0)));
        assert_eq!(rejected, vec!["Silly Goose: 15000", "Odd,-7,", ",3,"]);
    }

    #[test]
    fn value_fields() {
        assert_eq!(ItemValue::from_field("-1"), Some(ItemValue::Unvalued));
        assert_eq!(ItemValue::from_field("-2"), Some(ItemValue::Priceless));
        assert_eq!(ItemValue::from_field("12.5"), Some(ItemValue::Valued(12.5)));
        assert_eq!(ItemValue::from_field("-3"), None);
        assert_eq!(ItemValue::from_field("inf"), None);
        assert_eq!(ItemValue::Valued(3.0).to_field(), "3");
    }

    #[test]
    fn unit_value() {
        assert_eq!(ItemValue::Valued(4.0).unit_value(), Some(4.0));
        assert_eq!(ItemValue::Priceless.unit_value(), None);
        assert!(ItemValue::Unvalued.is_unvalued());
        assert_eq!(ItemValue::Priceless.to_string(), "Priceless");
    }
}
