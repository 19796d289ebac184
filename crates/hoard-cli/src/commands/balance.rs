use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::Target;

pub fn run(target: &Target, account: &str) -> Result<(), String> {
    let ledger = super::load(target)?;
    let balance = ledger.show_balance(account).map_err(|e| e.to_string())?;

    println!("  {}", account.bold());
    println!("  {}", super::gp(balance.value));

    if balance.items.is_empty() {
        println!("  {}", "No items.".dimmed());
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Item", "Quantity", "Value"]);
        for (item, qty) in &balance.items {
            let value = ledger
                .library()
                .get(item)
                .map(|v| v.to_string())
                .unwrap_or_default();
            table.add_row(vec![item.clone(), qty.to_string(), value]);
        }
        println!("{table}");
    }

    println!();
    println!("  Total value: {}", super::gp(balance.total_value).yellow());
    Ok(())
}
