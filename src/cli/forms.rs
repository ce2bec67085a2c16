//! Prompt wizard that fills in the settlement form.
//!
//! Amount fields are edited as bare digits and shown grouped once entered.
//! The wizard only collects text; applying it to the session goes through the
//! same lenient parsing as the `fee` and `date` commands.

use std::collections::VecDeque;

use dialoguer::theme::ColorfulTheme;

use crate::calendar::SettlementDate;
use crate::cli::core::CommandError;
use crate::cli::io;
use crate::errors::Result as CoreResult;
use crate::input::AmountField;
use crate::proration::FeeKind;
use crate::session::CalculatorSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Built-in field checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Date,
    Amount,
}

impl Validator {
    pub fn check(&self, input: &str) -> Result<(), String> {
        (self.as_fn())(input)
    }

    fn as_fn(&self) -> fn(&str) -> Result<(), String> {
        match self {
            Validator::Date => check_date,
            Validator::Amount => check_amount,
        }
    }
}

fn check_date(input: &str) -> Result<(), String> {
    SettlementDate::parse(input)
        .map(|_| ())
        .map_err(|_| "Use YYYY-MM-DD format".to_string())
}

fn check_amount(input: &str) -> Result<(), String> {
    if input
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch == ',' || ch.is_whitespace())
    {
        Ok(())
    } else {
        Err("Enter digits only (e.g., 10,000)".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub validator: Validator,
}

/// Source of answers for the wizard.
pub trait FormPrompter {
    fn text(&mut self, field: &FieldDescriptor, initial: &str) -> Result<String, CommandError>;
    fn confirm(&mut self, prompt: &str) -> Result<bool, CommandError>;
}

/// Terminal prompts through `dialoguer`.
pub struct DialoguerPrompter<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> DialoguerPrompter<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl FormPrompter for DialoguerPrompter<'_> {
    fn text(&mut self, field: &FieldDescriptor, initial: &str) -> Result<String, CommandError> {
        io::prompt_text(self.theme, field.label, initial, field.validator.as_fn())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, CommandError> {
        io::confirm_action(self.theme, prompt, true)
    }
}

/// Pre-recorded answers, used where no terminal is attached.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    confirm: bool,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I, confirm: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            confirm,
        }
    }
}

impl FormPrompter for ScriptedPrompter {
    fn text(&mut self, field: &FieldDescriptor, _initial: &str) -> Result<String, CommandError> {
        let answer = self.answers.pop_front().ok_or_else(|| {
            CommandError::Message(format!("no answer provided for `{}`", field.key))
        })?;
        field
            .validator
            .check(&answer)
            .map_err(|message| CommandError::InvalidArguments(format!("{}: {}", field.label, message)))?;
        Ok(answer)
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool, CommandError> {
        Ok(self.confirm)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementFormData {
    pub date: String,
    pub management_fee: String,
    pub reserve_fund: String,
}

pub struct SettlementForm;

impl SettlementForm {
    pub const DATE: FieldDescriptor = FieldDescriptor {
        key: "date",
        label: "Settlement date (YYYY-MM-DD)",
        validator: Validator::Date,
    };
    pub const MANAGEMENT_FEE: FieldDescriptor = FieldDescriptor {
        key: "management_fee",
        label: "Management fee (monthly)",
        validator: Validator::Amount,
    };
    pub const RESERVE_FUND: FieldDescriptor = FieldDescriptor {
        key: "reserve_fund",
        label: "Reserve fund (monthly)",
        validator: Validator::Amount,
    };

    /// Asks for every field, starting from the session's current values.
    pub fn run(
        prompter: &mut dyn FormPrompter,
        session: &CalculatorSession,
    ) -> Result<FormResult<SettlementFormData>, CommandError> {
        let management_fee =
            Self::ask_amount(prompter, &Self::MANAGEMENT_FEE, session.fee_field(FeeKind::ManagementFee))?;
        let reserve_fund =
            Self::ask_amount(prompter, &Self::RESERVE_FUND, session.fee_field(FeeKind::ReserveFund))?;
        let date = prompter.text(&Self::DATE, session.date_text())?.trim().to_string();

        let summary = format!(
            "Calculate for {} with management fee {} and reserve fund {}?",
            date,
            display_or_zero(&management_fee),
            display_or_zero(&reserve_fund)
        );
        if !prompter.confirm(&summary)? {
            return Ok(FormResult::Cancelled);
        }

        Ok(FormResult::Completed(SettlementFormData {
            date,
            management_fee: management_fee.digits().to_string(),
            reserve_fund: reserve_fund.digits().to_string(),
        }))
    }

    /// Writes collected values into the session; the date goes last so one recalculation covers all.
    pub fn apply(
        data: &SettlementFormData,
        session: &mut CalculatorSession,
    ) -> CoreResult<SettlementDate> {
        session.set_fee_text(FeeKind::ManagementFee, &data.management_fee);
        session.set_fee_text(FeeKind::ReserveFund, &data.reserve_fund);
        session.set_date_text(&data.date)
    }

    fn ask_amount(
        prompter: &mut dyn FormPrompter,
        descriptor: &FieldDescriptor,
        current: &AmountField,
    ) -> Result<AmountField, CommandError> {
        let mut field = current.clone();
        field.focus();
        let answer = prompter.text(descriptor, &field.display())?;
        field.set_text(&answer);
        field.blur();
        Ok(field)
    }
}

fn display_or_zero(field: &AmountField) -> String {
    if field.is_empty() {
        "0".to_string()
    } else {
        field.display()
    }
}
