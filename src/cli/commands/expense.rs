use chrono::Datelike;
use kakeibo_core::{storage::checked_total, time, CoreError};
use kakeibo_domain::{Category, ExpenseId, NewExpense};
use tracing::warn;

use crate::cli::core::{parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn};
use crate::cli::{io, output};

const ADD_USAGE: &str = "add <amount> <category> [memo...] [--at <YYYY-MM-DD HH:MM>]";
const MEMO_WIDTH: usize = 28;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an expense", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Delete an expense by id", "delete <id>", cmd_delete),
        CommandEntry::new(
            "list",
            "List a month's expenses, newest first (default: this month)",
            "list [YYYY-MM]",
            cmd_list,
        ),
        CommandEntry::new(
            "sum",
            "Total spending from <start> up to, not including, <end>",
            "sum <start> <end>",
            cmd_sum,
        ),
    ]
}

pub(crate) fn describe_category(category: Category) -> String {
    format!("{} ({})", category.label(), category.key())
}

/// Splits `--at <timestamp>` out of the argument list.
fn split_at_option<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, Option<&'a str>), CommandError> {
    let mut positional = Vec::with_capacity(args.len());
    let mut at = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "--at" {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments("--at needs a timestamp".into())
            })?;
            at = Some(*value);
        } else {
            positional.push(*arg);
        }
    }
    Ok((positional, at))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, at) = split_at_option(args)?;
    let [amount, category, memo @ ..] = positional.as_slice() else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };

    let amount = parse_amount(amount)?;
    let category: Category = category.parse().map_err(CoreError::from)?;
    let timestamp = match at {
        Some(raw) => time::parse_civil_timestamp(raw, context.ledger.offset())?,
        None => context.clock.now(),
    };
    let memo = (!memo.is_empty()).then(|| memo.join(" "));

    let stored = context
        .ledger
        .record(NewExpense::new(timestamp, category, amount, memo))?;
    io::print_success(format!(
        "Added expense #{}: {} {} at {}",
        stored.id,
        context.formatters.format_amount(stored.amount),
        describe_category(stored.category),
        context.formatters.format_timestamp(&stored.timestamp),
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete <id>".into()))?;
    let id = raw
        .parse::<i64>()
        .map(ExpenseId)
        .map_err(|_| CommandError::InvalidArguments(format!("invalid expense id `{raw}`")))?;

    if id.is_placeholder() {
        warn!("delete requested without selecting an expense");
        io::print_warning("Select an expense id to delete");
        return Ok(());
    }

    if context.can_prompt()
        && !io::confirm_action(&context.theme, &format!("Delete expense #{id}?"), false)?
    {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    match context.ledger.delete(id) {
        Ok(removed) => {
            io::print_success(format!(
                "Deleted expense #{}: {} {}",
                removed.id,
                context.formatters.format_amount(removed.amount),
                describe_category(removed.category),
            ));
            Ok(())
        }
        Err(CoreError::NotFound(missing)) => {
            warn!(id = missing.value(), "delete of unknown expense");
            Err(CoreError::NotFound(missing).into())
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (year, month) = match args.first() {
        Some(raw) => time::parse_year_month(raw)?,
        None => {
            let today = context.today();
            (today.year(), today.month())
        }
    };
    let label = format!("{year:04}-{month:02}");
    let expenses = context.ledger.month_expenses(year, month)?;

    output::section(format!("Expenses for {label}"));
    if expenses.is_empty() {
        io::print_info(format!("No expenses recorded for {label} yet."));
        return Ok(());
    }

    let formatters = &context.formatters;
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Time"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Memo").max_width(MEMO_WIDTH),
    ]);
    for expense in &expenses {
        table.add_row(vec![
            expense.id.to_string(),
            formatters.format_timestamp(&expense.timestamp),
            describe_category(expense.category),
            formatters.format_amount(expense.amount),
            expense.memo.clone().unwrap_or_default(),
        ]);
    }
    table.print();

    let total = checked_total(expenses.iter().map(|expense| expense.amount))?;
    let noun = if expenses.len() == 1 { "expense" } else { "expenses" };
    io::print_info(format!(
        "Total: {} ({} {noun})",
        formatters.format_amount(total),
        expenses.len()
    ));
    Ok(())
}

fn cmd_sum(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [start, end] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: sum <start> <end> (YYYY-MM-DD or YYYY-MM-DD HH:MM)".into(),
        ));
    };
    let offset = context.ledger.offset();
    let from = time::parse_civil_timestamp(start, offset)?;
    let until = time::parse_civil_timestamp(end, offset)?;
    let total = context.ledger.sum_in_range(from, until)?;
    io::print_info(format!(
        "Spent from {start} until {end}: {}",
        context.formatters.format_amount(total)
    ));
    Ok(())
}
