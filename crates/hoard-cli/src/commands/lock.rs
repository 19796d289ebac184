use colored::Colorize;
use hoard_ledger::Lock;

use crate::Target;

pub fn run(target: &Target, lock: &str, key: &str) -> Result<(), String> {
    let lock = Lock::from_name(lock).ok_or_else(|| {
        format!("unknown lock '{lock}' (expected user, transaction, store or bank)")
    })?;

    let mut ledger = super::load(target)?;
    if !ledger.is_admin_key(key) {
        return Err("Invalid Key.".into());
    }
    let set = ledger.toggle_lock(lock);
    super::save(&ledger)?;

    if set {
        println!("  {} {} lock set: {}", "Locked".yellow(), lock, lock.refusal());
    } else {
        println!("  {} {} lock cleared", "Unlocked".green(), lock);
    }
    Ok(())
}
