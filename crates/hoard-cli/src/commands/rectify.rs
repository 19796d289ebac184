use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::Target;

pub fn run(target: &Target) -> Result<(), String> {
    let ledger = super::load(target)?;
    let rows = ledger.show_rectify().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Account", "Total value", "Adjustment"]);
    for row in &rows {
        let delta = if row.delta > 0.0 {
            format!("receives {}", super::gp(row.delta)).green().to_string()
        } else if row.delta < 0.0 {
            format!("gives {}", super::gp(-row.delta)).red().to_string()
        } else {
            "even".dimmed().to_string()
        };
        table.add_row(vec![row.name.clone(), super::gp(row.total_value), delta]);
    }

    println!("{table}");
    Ok(())
}
