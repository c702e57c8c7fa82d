use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::dashboard::{Action, Dashboard, Draft, FilterChange, Selector};
use crate::models::{timestamp, Category, Division, TxnType};
use crate::ui::util::{format_amount, truncate};

pub(crate) fn as_cli(args: &[String], dashboard: &mut Dashboard) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(args, dashboard, &mut out, prompt_stdin)
}

/// Handle `--help` and `--version`, which need no backend. Returns whether
/// one of them was given.
pub(crate) fn print_info(args: &[String]) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    info_command(args, &mut out)
}

fn info_command(args: &[String], out: &mut dyn Write) -> Result<bool> {
    match args.get(1).map(String::as_str) {
        Some("--help" | "-h" | "help") => {
            print_usage(out)?;
            Ok(true)
        }
        Some("--version" | "-V" | "version") => {
            writeln!(out, "findash {}", env!("CARGO_PKG_VERSION"))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Dispatch `args[1]`. `confirm` answers the delete prompt unless `--yes`
/// was given.
fn run_command(
    args: &[String],
    dashboard: &mut Dashboard,
    out: &mut dyn Write,
    confirm: impl FnOnce(&str) -> bool,
) -> Result<()> {
    if info_command(args, out)? {
        return Ok(());
    }
    let Some(command) = args.get(1) else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[2..];
    match command.as_str() {
        "summary" | "s" => cli_summary(dashboard, out),
        "list" | "ls" => cli_list(rest, dashboard, out),
        "add" => cli_add(rest, dashboard, out),
        "edit" => cli_edit(rest, dashboard, out),
        "delete" | "rm" => cli_delete(rest, dashboard, out, confirm),
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "FinDash: income and expense dashboard for a transactions API")?;
    writeln!(out)?;
    writeln!(out, "Usage: findash [--api-url <url>] [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                        Launch interactive TUI")?;
    writeln!(out, "  summary                       Print income, expenses and balance")?;
    writeln!(out, "  list                          Print transactions")?;
    writeln!(out, "    --division <Office|Personal>")?;
    writeln!(out, "    --category <name>           Salary, Fuel, Food, Movie, Medical, Loan")?;
    writeln!(out, "    --from <YYYY-MM-DD>         Range start (needs --to)")?;
    writeln!(out, "    --to <YYYY-MM-DD>           Range end, inclusive")?;
    writeln!(out, "  add                           Create a transaction")?;
    writeln!(out, "    --type <income|expense>     (default: income)")?;
    writeln!(out, "    --division, --category      (default: Office, Salary)")?;
    writeln!(out, "    --amount <n>                Required, not negative")?;
    writeln!(out, "    --description <text>        Required")?;
    writeln!(out, "    --date <YYYY-MM-DDTHH:MM>   (default: now)")?;
    writeln!(out, "  edit <id> [add flags]         Change fields of a transaction")?;
    writeln!(out, "  delete <id> [--yes]           Delete a transaction")?;
    writeln!(out, "  --help, -h                    Show this help")?;
    writeln!(out, "  --version, -V                 Show version")?;
    writeln!(out)?;
    writeln!(
        out,
        "Environment: {} (backend base URL), {} (log filter)",
        crate::config::BASE_URL_VAR,
        crate::config::LOG_VAR
    )?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn prompt_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
}

fn load(dashboard: &mut Dashboard) -> Result<()> {
    dashboard
        .try_load()
        .context("Could not load data from the backend")
}

fn cli_summary(dashboard: &mut Dashboard, out: &mut dyn Write) -> Result<()> {
    load(dashboard)?;
    let state = dashboard.state();
    let stats = state.stats;

    writeln!(out, "Total Income:      {:>16}", format_amount(stats.income))?;
    writeln!(out, "Total Expenses:    {:>16}", format_amount(stats.expense))?;
    writeln!(out, "──────────────────────────────────")?;
    let label = if stats.is_overdrawn() {
        "Overdrawn:"
    } else {
        "Available Balance:"
    };
    writeln!(out, "{label:<19}{:>16}", format_amount(stats.net.abs()))?;
    writeln!(out, "Transactions:      {:>16}", state.transactions.len())?;
    Ok(())
}

fn cli_list(args: &[String], dashboard: &mut Dashboard, out: &mut dyn Write) -> Result<()> {
    for change in filter_changes(args)? {
        dashboard.dispatch(Action::FilterChanged(change));
    }
    load(dashboard)?;

    let state = dashboard.state();
    let visible = state.visible();
    if visible.is_empty() {
        writeln!(out, "No transactions found")?;
    } else {
        writeln!(
            out,
            "{:<26} {:<24} {:<9} {:<8} {:<16} {:>14}",
            "ID", "Description", "Division", "Category", "Date", "Amount"
        )?;
        for txn in &visible {
            let sign = if txn.is_income() { "+" } else { "" };
            writeln!(
                out,
                "{:<26} {:<24} {:<9} {:<8} {:<16} {:>14}",
                txn.id,
                truncate(&txn.description, 24),
                txn.division.as_str(),
                txn.category.as_str(),
                timestamp::format_display(&txn.date),
                format!("{sign}{}", format_amount(txn.signed_amount())),
            )?;
        }
    }
    writeln!(
        out,
        "{} of {} transactions",
        visible.len(),
        state.transactions.len()
    )?;
    Ok(())
}

fn filter_changes(args: &[String]) -> Result<Vec<FilterChange>> {
    let mut changes = Vec::new();
    if let Some(v) = flag_value(args, "--division") {
        let selector = Selector::<Division>::parse(v)
            .with_context(|| format!("Unknown division: {v}"))?;
        changes.push(FilterChange::Division(selector));
    }
    if let Some(v) = flag_value(args, "--category") {
        let selector = Selector::<Category>::parse(v)
            .with_context(|| format!("Unknown category: {v}"))?;
        changes.push(FilterChange::Category(selector));
    }
    if let Some(v) = flag_value(args, "--from") {
        let date = timestamp::parse_date(v).with_context(|| format!("Invalid --from date: {v}"))?;
        changes.push(FilterChange::StartDate(Some(date)));
    }
    if let Some(v) = flag_value(args, "--to") {
        let date = timestamp::parse_date(v).with_context(|| format!("Invalid --to date: {v}"))?;
        changes.push(FilterChange::EndDate(Some(date)));
    }
    Ok(changes)
}

/// Overwrite draft fields with whichever flags were given.
fn apply_flags(draft: &mut Draft, args: &[String]) -> Result<()> {
    if let Some(v) = flag_value(args, "--type") {
        draft.kind = TxnType::parse(v).with_context(|| format!("Unknown type: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--division") {
        draft.division = Division::parse(v).with_context(|| format!("Unknown division: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--category") {
        draft.category = Category::parse(v).with_context(|| format!("Unknown category: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--amount") {
        draft.amount = v.to_string();
    }
    if let Some(v) = flag_value(args, "--description") {
        draft.description = v.to_string();
    }
    if let Some(v) = flag_value(args, "--date") {
        draft.date = v.to_string();
    }
    Ok(())
}

/// Fill the open form from flags and submit it, turning any notice into an error.
fn submit_with_flags(args: &[String], dashboard: &mut Dashboard) -> Result<()> {
    let applied = match dashboard.state_mut().form.draft_mut() {
        Some(draft) => apply_flags(draft, args),
        None => anyhow::bail!("No form open"),
    };
    if let Err(e) = applied {
        dashboard.dispatch(Action::CancelForm);
        return Err(e);
    }

    if let Some(effect) = dashboard.submit() {
        dashboard.run(effect);
    }
    if let Some(message) = dashboard.state_mut().notice.take() {
        anyhow::bail!(message);
    }
    Ok(())
}

fn cli_add(args: &[String], dashboard: &mut Dashboard, out: &mut dyn Write) -> Result<()> {
    dashboard.dispatch(Action::OpenCreate {
        now: timestamp::now_minute(),
    });
    submit_with_flags(args, dashboard)?;
    writeln!(out, "Transaction added")?;
    Ok(())
}

fn cli_edit(args: &[String], dashboard: &mut Dashboard, out: &mut dyn Write) -> Result<()> {
    let id = match args.first() {
        Some(id) if !id.starts_with("--") => id.clone(),
        _ => anyhow::bail!("Usage: findash edit <id> [--amount <n>] [--description <text>] ..."),
    };

    load(dashboard)?;
    dashboard.dispatch(Action::OpenEdit { id: id.clone() });
    if !dashboard.state().form.is_editing() {
        anyhow::bail!("No transaction with id {id}");
    }
    submit_with_flags(&args[1..], dashboard)?;
    writeln!(out, "Transaction updated")?;
    Ok(())
}

fn cli_delete(
    args: &[String],
    dashboard: &mut Dashboard,
    out: &mut dyn Write,
    confirm: impl FnOnce(&str) -> bool,
) -> Result<()> {
    let id = match args.first() {
        Some(id) if !id.starts_with("--") => id.clone(),
        _ => anyhow::bail!("Usage: findash delete <id> [--yes]"),
    };
    let assume_yes = has_flag(args, "--yes") || has_flag(args, "-y");

    let effect = dashboard.delete(&id, |prompt| assume_yes || confirm(prompt));
    if let Some(message) = dashboard.state_mut().notice.take() {
        anyhow::bail!(message);
    }
    if effect.is_some() {
        writeln!(out, "Deleted {id}")?;
    } else {
        writeln!(out, "Cancelled")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
