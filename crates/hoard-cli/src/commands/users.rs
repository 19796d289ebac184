use comfy_table::{ContentArrangement, Table};

use crate::Target;

pub fn run(target: &Target) -> Result<(), String> {
    let ledger = super::load(target)?;
    let users = ledger.users();

    if users.is_empty() {
        println!("  No users yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Account", "Owner", "Balance", "Items"]);
    for account in users {
        table.add_row(vec![
            account.name.clone(),
            account.owner.clone(),
            super::gp(account.value()),
            account.item_list(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} users", users.len());
    Ok(())
}
