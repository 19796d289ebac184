pub mod add_user;
pub mod balance;
pub mod check;
pub mod export;
pub mod init;
pub mod items;
pub mod lock;
pub mod log;
pub mod rectify;
pub mod run;
pub mod total;
pub mod users;

use hoard_dsl::{Diagnostic, render_diagnostics};
use hoard_ledger::Ledger;

use crate::Target;

/// Load the target ledger from its save files.
fn load(target: &Target) -> Result<Ledger, String> {
    Ledger::load(&target.dir, &target.location, &target.name).map_err(|e| e.to_string())
}

fn save(ledger: &Ledger) -> Result<(), String> {
    ledger.save().map_err(|e| e.to_string())
}

/// Print a rejected command line to stderr using ariadne.
fn print_diagnostic(source: &str, diagnostic: Diagnostic) {
    let rendered = render_diagnostics(source, "command", &[diagnostic]);
    eprint!("{rendered}");
}

/// Format a currency amount the way the ledger records it.
fn gp(value: f64) -> String {
    format!("{value}gp")
}
