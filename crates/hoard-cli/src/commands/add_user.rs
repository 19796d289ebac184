use colored::Colorize;
use hoard_core::Inventory;

use crate::Target;

/// Parse a `Name:Quantity` starting item.
pub fn parse_item(s: &str) -> Result<(String, i64), String> {
    let (name, qty) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("'{s}' is not Name:Quantity"))?;
    let qty = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("quantity of '{}' must be a whole number", name.trim()))?;
    Ok((name.trim().to_string(), qty))
}

pub fn run(
    target: &Target,
    account: &str,
    owner: &str,
    key: &str,
    value: f64,
    items: Vec<(String, i64)>,
) -> Result<(), String> {
    let mut ledger = super::load(target)?;

    let mut inventory = Inventory::new();
    for (name, qty) in items {
        let slot = inventory.entry(name).or_insert(0);
        *slot = slot
            .checked_add(qty)
            .ok_or_else(|| "item quantity out of range".to_string())?;
    }

    let message = ledger
        .add_user(owner, account, key, value, &inventory)
        .map_err(|e| e.to_string())?;
    super::save(&ledger)?;

    println!("  {}", message.green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_argument() {
        assert_eq!(parse_item("Gem:3"), Ok(("Gem".to_string(), 3)));
        assert_eq!(
            parse_item("Potion of Healing: 2"),
            Ok(("Potion of Healing".to_string(), 2))
        );
        assert_eq!(parse_item("Arrow:-1"), Ok(("Arrow".to_string(), -1)));
    }

    #[test]
    fn bad_item_argument() {
        assert!(parse_item("Gem").is_err());
        assert!(parse_item("Gem:1.5").unwrap_err().contains("whole number"));
    }
}
