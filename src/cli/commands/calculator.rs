use crate::calendar::SettlementDate;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{DialoguerPrompter, FormResult, SettlementForm};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::input::AmountField;
use crate::proration::{
    prorate, prorate_settlement, FeeKind, SettlementProration, MAX_MONTHLY_AMOUNT,
};
use crate::report;
use crate::session::RecalcMode;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "date",
            "Set the settlement date",
            "date <YYYY-MM-DD|today>",
            cmd_date,
        ),
        CommandEntry::new(
            "fee",
            "Set a monthly amount",
            "fee <management|reserve> <amount>",
            cmd_fee,
        ),
        CommandEntry::new(
            "calculate",
            "Recalculate from the current inputs",
            "calculate",
            cmd_calculate,
        ),
        CommandEntry::new("show", "Show the current result", "show", cmd_show),
        CommandEntry::new(
            "calc",
            "Prorate without touching the current inputs",
            "calc <YYYY-MM-DD> <amount> [reserve]",
            cmd_calc,
        ),
        CommandEntry::new("json", "Print the current result as JSON", "json", cmd_json),
        CommandEntry::new(
            "form",
            "Fill in every field with prompts",
            "form",
            cmd_form,
        ),
        CommandEntry::new(
            "reset",
            "Clear amounts and return to today",
            "reset",
            cmd_reset,
        ),
        CommandEntry::new(
            "mode",
            "Show or switch recalculation mode",
            "mode [auto|manual]",
            cmd_mode,
        ),
    ]
}

fn cmd_date(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let text = match args {
        [] => {
            io::print_info(format!("Settlement date: {}", context.session.date_text()));
            return Ok(());
        }
        ["today"] => SettlementDate::today(context.clock.as_ref()).to_string(),
        [value] => value.to_string(),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: date <YYYY-MM-DD|today>".into(),
            ))
        }
    };

    match context.session.set_date_text(&text) {
        Ok(date) => {
            io::print_success(format!(
                "Settlement date set to {}.",
                context.formatter().date(date)
            ));
            after_change(context);
        }
        Err(err) => {
            io::print_warning(format!("{}. No result until the date is valid.", err));
        }
    }
    Ok(())
}

fn cmd_fee(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, amount) = match args {
        [kind, amount @ ..] if !amount.is_empty() => {
            let kind = FeeKind::parse(kind).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown fee `{}` (expected `management` or `reserve`)",
                    kind
                ))
            })?;
            (kind, amount.concat())
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: fee <management|reserve> <amount>".into(),
            ))
        }
    };

    context.session.set_fee_text(kind, &amount);
    let field = context.session.fee_field(kind);
    let shown = if field.is_empty() {
        "0".to_string()
    } else {
        field.display()
    };
    io::print_success(format!("{} set to {}.", kind, shown));
    warn_if_clamped(context, field.value());
    after_change(context);
    Ok(())
}

fn cmd_calculate(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.calculate().is_none() {
        io::print_warning(format!(
            "`{}` is not a valid settlement date; nothing to calculate.",
            context.session.date_text()
        ));
        return Ok(());
    }
    print_current(context);
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_current(context);
    Ok(())
}

fn cmd_calc(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parse_date = |text: &str| {
        SettlementDate::parse(text).map_err(|err| CommandError::InvalidArguments(err.to_string()))
    };
    let separator = context.session.grouping_separator();
    let amount = |text: &str| {
        let value = AmountField::with_text(text, separator).value();
        warn_if_clamped(context, value);
        value
    };
    match args {
        [date, monthly] => {
            let date = parse_date(*date)?;
            let result = prorate(date, amount(*monthly));
            output::section("Proration result");
            for line in context.formatter().single_lines(date, &result) {
                output::plain(line);
            }
        }
        [date, management, reserve] => {
            let date = parse_date(*date)?;
            let settlement = prorate_settlement(date, amount(*management), amount(*reserve));
            print_report(context, &settlement);
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: calc <YYYY-MM-DD> <amount> [reserve]".into(),
            ))
        }
    }
    Ok(())
}

fn cmd_json(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session.result() {
        Some(settlement) => {
            output::plain(report::to_json(settlement)?);
            Ok(())
        }
        None => Err(CommandError::Message(
            "No result to print. Set a valid date first.".into(),
        )),
    }
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode == CliMode::Script {
        io::print_warning("`form` needs an interactive terminal; use `fee` and `date` instead.");
        return Ok(());
    }

    let outcome = {
        let mut prompter = DialoguerPrompter::new(&context.theme);
        SettlementForm::run(&mut prompter, &context.session)?
    };
    match outcome {
        FormResult::Completed(data) => {
            SettlementForm::apply(&data, &mut context.session)?;
            if context.session.mode() == RecalcMode::Manual {
                context.session.calculate();
            }
            print_current(context);
        }
        FormResult::Cancelled => io::print_info("Form cancelled; inputs unchanged."),
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.reset(context.clock.as_ref());
    io::print_success(format!(
        "Inputs cleared; settlement date is {}.",
        context.session.date_text()
    ));
    Ok(())
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(value) = args.first() else {
        io::print_info(format!(
            "Recalculation mode: {}",
            context.session.mode().as_str()
        ));
        return Ok(());
    };
    let mode = RecalcMode::parse(value).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown mode `{}` (expected `auto` or `manual`)",
            value
        ))
    })?;
    context.session.set_mode(mode);
    context.config.recalc_mode = mode;
    context.persist_config()?;
    io::print_success(format!("Recalculation mode set to {}.", mode.as_str()));
    Ok(())
}

fn warn_if_clamped(context: &ShellContext, value: f64) {
    if value > MAX_MONTHLY_AMOUNT {
        io::print_warning(format!(
            "Amount exceeds the {} limit and is prorated at the limit.",
            context.formatter().money(MAX_MONTHLY_AMOUNT as i64)
        ));
    }
}

/// One-line summary after an input change; manual mode only hints.
fn after_change(context: &ShellContext) {
    if context.session.mode() == RecalcMode::Manual {
        if context.session.is_stale() {
            io::print_hint("Inputs changed. Run `calculate` to refresh the result.");
        }
        return;
    }
    if let Some(settlement) = context.session.result() {
        let formatter = context.formatter();
        let seller = settlement.seller_burden();
        let buyer = settlement.buyer_burden();
        output::plain(format!(
            "Seller {} ({} days) | Buyer {} ({} days)",
            formatter.money(seller.total),
            seller.days,
            formatter.money(buyer.total),
            buyer.days
        ));
    }
}

fn print_current(context: &ShellContext) {
    match context.session.result() {
        Some(settlement) => {
            print_report(context, settlement);
            if context.session.is_stale() {
                io::print_hint("Inputs changed since this result. Run `calculate` to refresh.");
            }
        }
        None if context.session.settlement_date().is_none() => io::print_warning(format!(
            "`{}` is not a valid settlement date; no result.",
            context.session.date_text()
        )),
        None => io::print_info("No result yet. Run `calculate`."),
    }
}

fn print_report(context: &ShellContext, settlement: &SettlementProration) {
    output::section("Proration result");
    for line in context.formatter().render(settlement) {
        output::plain(line);
    }
}
