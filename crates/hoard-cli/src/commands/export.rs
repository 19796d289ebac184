use std::path::Path;

use crate::Target;

pub fn run(target: &Target, output: Option<&Path>) -> Result<(), String> {
    let ledger = super::load(target)?;

    let json = serde_json::to_string_pretty(&ledger.report())
        .map_err(|e| format!("serialization failed: {e}"))?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!("  Exported to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
