use colored::Colorize;

use crate::Target;

pub fn run(target: &Target) -> Result<(), String> {
    let ledger = super::load(target)?;
    let total = ledger.total_value();

    println!("  {}", "Users and Pot".bold());
    println!("  Currency:    {}", super::gp(total.value));
    if total.items.is_empty() {
        println!("  Items:       {}", "none".dimmed());
    } else {
        println!("  Items:       {}", total.item_list());
    }
    println!("  Total value: {}", super::gp(total.total_value).yellow());
    Ok(())
}
