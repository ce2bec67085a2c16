use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

const USAGE_WIDTH: usize = 44;

/// Lists every command with its usage line.
pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    for entry in registry.list() {
        output::plain(format!("  {:<width$} {}", entry.usage, entry.description, width = USAGE_WIDTH));
    }
    output::hint("Amounts accept grouping commas (10,000); dates are YYYY-MM-DD.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(entry.name);
    output::plain(format!("  {}", entry.description));
    output::plain(format!("  usage: {}", entry.usage));
}
