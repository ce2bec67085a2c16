use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::{Config, CONFIG_KEYS};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change display preferences",
        "config [show|path|reset|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().copied().unwrap_or("show") {
        "show" => {
            show(context);
            Ok(())
        }
        "path" => {
            io::print_info(format!(
                "Config file: {}",
                context.config_manager.path().display()
            ));
            Ok(())
        }
        "set" => {
            let (key, value) = match args {
                [_, key, rest @ ..] if !rest.is_empty() => (*key, rest.join(" ")),
                _ => {
                    return Err(CommandError::InvalidArguments(format!(
                        "usage: config set <key> <value> (keys: {})",
                        CONFIG_KEYS.join(", ")
                    )))
                }
            };
            context.config.set(key, &value)?;
            apply(context);
            context.persist_config()?;
            io::print_success(format!("Set `{}` to `{}`.", key, value));
            Ok(())
        }
        "reset" => {
            context.config = Config::default();
            apply(context);
            context.persist_config()?;
            io::print_success("Preferences restored to defaults.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn show(context: &ShellContext) {
    output::section("Preferences");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<18} {}", key, value));
    }
}

fn apply(context: &mut ShellContext) {
    let separator = context.config.locale_config().grouping_separator;
    context.session.set_grouping_separator(separator);
    context.session.set_mode(context.config.recalc_mode);
    context.apply_output_preferences();
}
