use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::{io, output};

const CONFIG_USAGE: &str =
    "config [show|set <offset|currency|backend|data_dir|goal|days> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change settings",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!("usage: {CONFIG_USAGE}")));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            context.update_config(|config| config.apply_setting(key, &value))?;
            io::print_success(format!("Updated `{}`.", key.to_lowercase()));
            show_config(context);
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    let formatters = &context.formatters;
    let days = config
        .days_remaining
        .map_or_else(|| "auto (calendar)".to_string(), |days| days.to_string());
    let plan = config.monthly_plan.map_or_else(
        || "none".to_string(),
        |plan| {
            format!(
                "income {} / fixed costs {}",
                formatters.format_amount(plan.income),
                formatters.format_amount(plan.fixed_costs)
            )
        },
    );

    output::section("Configuration");
    io::print_two_column(&[
        ("Home", context.base_dir.display().to_string()),
        (
            "Config file",
            context.config_manager.config_path().display().to_string(),
        ),
        (
            "Data dir",
            config.resolve_data_dir(&context.base_dir).display().to_string(),
        ),
        ("Backend", config.storage_backend.to_string()),
        ("UTC offset", formatters.offset_label()),
        ("Currency", config.currency.clone()),
        ("Savings goal", formatters.format_amount(config.savings_goal)),
        ("Days remaining", days),
        ("Monthly plan", plan),
    ]);
}
