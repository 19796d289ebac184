use colored::Colorize;
use hoard_dsl::{Command, Diagnostic};

pub fn run(command: &str) -> Result<(), String> {
    let parsed = hoard_dsl::parse_command(command).map_err(|err| {
        super::print_diagnostic(command, Diagnostic::from(&err));
        err.to_string()
    })?;

    println!("  {} {}", "OK".green(), parsed);
    match &parsed {
        Command::SetValue { item, value } => {
            println!("  sets the value of {} to {}", item.bold(), value);
        }
        _ => {
            if let (Some(action), Some(payload)) = (parsed.action(), parsed.payload()) {
                println!(
                    "  {} {}, {}",
                    action,
                    super::gp(payload.value),
                    if payload.items.is_empty() {
                        "no items".dimmed().to_string()
                    } else {
                        hoard_core::format_items(&payload.items)
                    }
                );
            }
        }
    }

    Ok(())
}
