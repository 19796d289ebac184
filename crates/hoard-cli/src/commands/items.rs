use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hoard_core::ItemValue;

use crate::Target;

pub fn run(target: &Target) -> Result<(), String> {
    let ledger = super::load(target)?;
    let items = ledger.item_list();

    if items.is_empty() {
        println!("  No items yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Value"]);
    for (name, value) in &items {
        let value = match value {
            ItemValue::Valued(v) => super::gp(*v),
            ItemValue::Unvalued => "unvalued".dimmed().to_string(),
            ItemValue::Priceless => "priceless".yellow().to_string(),
        };
        table.add_row(vec![name.clone(), value]);
    }

    println!("{table}");
    println!();
    println!("  {} items", items.len());
    Ok(())
}
