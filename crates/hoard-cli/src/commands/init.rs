use colored::Colorize;
use hoard_ledger::{Ledger, LedgerConfig};

use crate::Target;

pub fn run(target: &Target, admin: &str, key: &str, store_key: Option<&str>) -> Result<(), String> {
    let mut config = LedgerConfig::new(target.location.as_str(), admin, key)
        .with_name(target.name.as_str())
        .with_save_dir(&target.dir);
    if let Some(store_key) = store_key {
        config = config.with_store_key(store_key);
    }
    let ledger = Ledger::new(config);

    let path = ledger.save_path();
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }
    super::save(&ledger)?;

    println!(
        "  {} ledger '{}' for {} in {}",
        "Created".green(),
        ledger.name(),
        ledger.location(),
        target.dir.display()
    );
    println!("  Bank and Store belong to {}.", admin.bold());

    Ok(())
}
