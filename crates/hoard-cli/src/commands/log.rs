use crate::Target;

pub fn run(target: &Target, count: usize) -> Result<(), String> {
    let ledger = super::load(target)?;
    let entries = ledger.transaction_log(count);

    if entries.is_empty() {
        println!("  No transactions yet.");
        return Ok(());
    }

    let first = ledger.history().len() - entries.len() + 1;
    for (n, entry) in entries.iter().enumerate() {
        println!("  {:>4}  {entry}", first + n);
    }
    Ok(())
}
