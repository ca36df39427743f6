use kakeibo_config::MonthlyPlan;
use kakeibo_core::{time::days_left_in_month, BudgetService, SpendablePolicy};
use kakeibo_domain::{Judgement, LimitBasis};

use crate::cli::core::{parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_decimal;
use crate::cli::registry::CommandEntry;
use crate::cli::{io, output};

const PLAN_USAGE: &str = "plan [set <income> <fixed_costs>|clear]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Judge today's spending against the daily limit",
            "status",
            cmd_status,
        ),
        CommandEntry::new("goal", "Show or set the monthly savings goal", "goal [amount]", cmd_goal),
        CommandEntry::new(
            "days",
            "Show or set the days the limit is spread over",
            "days [<n>|auto]",
            cmd_days,
        ),
        CommandEntry::new(
            "plan",
            "Manage the monthly income plan behind the remaining-budget limit",
            PLAN_USAGE,
            cmd_plan,
        ),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let now = context.now_civil();
    let report = BudgetService::daily_report(
        &context.ledger,
        &context.calculator,
        now.date_naive(),
        context.config.days_remaining,
    )?;
    let formatters = &context.formatters;

    output::section("Today's judgement");
    io::print_info(format!(
        "Fetched at {} ({})",
        now.format("%Y-%m-%d %H:%M:%S"),
        formatters.offset_label()
    ));

    match report.judgement {
        Judgement::Ok => io::print_success(format!(
            "OK: spent today {} / limit {}",
            formatters.format_amount(report.spent_today),
            formatters.format_rounded(report.limit)
        )),
        Judgement::Over => io::print_error(format!(
            "OVER: spent today {} ({} over)",
            formatters.format_amount(report.spent_today),
            formatters.format_rounded(report.overage)
        )),
    }

    output::caption(format!(
        "limit = {} {} / {} days = {} per day",
        report.basis,
        formatters.format_amount(report.basis_amount),
        report.days_remaining,
        format_decimal(report.limit)
    ));
    if report.basis == LimitBasis::RemainingBudget {
        let before = context.ledger.month_spent_before(now.date_naive())?;
        output::caption(format!(
            "spent this month before today: {}",
            formatters.format_amount(before)
        ));
    }
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        io::print_info(format!(
            "Savings goal: {}",
            context.formatters.format_amount(context.config.savings_goal)
        ));
        return Ok(());
    };
    let goal = parse_amount(raw)?;
    context.update_config(|config| config.set_savings_goal(goal))?;
    io::print_success(format!(
        "Savings goal set to {}.",
        context.formatters.format_amount(goal)
    ));
    Ok(())
}

fn cmd_days(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        context.update_config(|config| config.apply_setting("days", raw))?;
    }
    let calendar = days_left_in_month(context.today());
    let message = match context.config.days_remaining {
        Some(days) => format!("Limit is spread over {days} days."),
        None => format!("Limit follows the calendar: {calendar} days left this month."),
    };
    if args.is_empty() {
        io::print_info(message);
    } else {
        io::print_success(message);
    }
    Ok(())
}

fn cmd_plan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_plan(context);
            Ok(())
        }
        ["set", income, fixed_costs] => {
            let plan = MonthlyPlan {
                income: parse_amount(income)?,
                fixed_costs: parse_amount(fixed_costs)?,
            };
            context.update_config(|config| config.set_monthly_plan(Some(plan)))?;
            io::print_success("Monthly plan saved; the daily limit now spreads the remaining budget.");
            show_plan(context);
            Ok(())
        }
        ["clear"] => {
            context.update_config(|config| config.set_monthly_plan(None))?;
            io::print_success("Monthly plan cleared; the daily limit spreads the savings goal.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {PLAN_USAGE}"))),
    }
}

fn show_plan(context: &ShellContext) {
    let Some(plan) = context.config.monthly_plan else {
        io::print_info("No monthly plan set; the daily limit spreads the savings goal.");
        return;
    };
    let policy = SpendablePolicy {
        income: plan.income,
        fixed_costs: plan.fixed_costs,
        goal_saving: context.config.savings_goal,
    };
    let formatters = &context.formatters;
    output::section("Monthly plan");
    io::print_two_column(&[
        ("Income", formatters.format_amount(plan.income)),
        ("Fixed costs", formatters.format_amount(plan.fixed_costs)),
        ("Savings goal", formatters.format_amount(policy.goal_saving)),
        ("Spendable", formatters.format_amount(policy.spendable())),
    ]);
}
