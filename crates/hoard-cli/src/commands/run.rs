use colored::Colorize;
use hoard_dsl::Diagnostic;
use hoard_ledger::LedgerError;

use crate::Target;

pub fn run(target: &Target, command: &str, key: &str) -> Result<(), String> {
    let mut ledger = super::load(target)?;

    match ledger.try_transaction(command, key) {
        Ok(()) => {}
        Err(LedgerError::Command(err)) => {
            super::print_diagnostic(command, Diagnostic::from(&err));
            return Err(err.to_string());
        }
        Err(e) => return Err(e.to_string()),
    }
    super::save(&ledger)?;

    let entry = ledger.transaction_log(1).join("");
    println!("  {} {}", "Done:".green(), entry);
    Ok(())
}
