//! Terminal rendering of tracker snapshots.

use colored::Colorize;

use crate::{
    currency::{format_compact_with, CurrencyStyle},
    tracker::{BudgetStatus, ClientBudget, Direction, Rollover, TrackerSnapshot},
};

pub const NO_BUDGET_DATA: &str = "No budget data available";

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub color: bool,
    pub currency: CurrencyStyle,
}

pub fn render_missing() -> String {
    NO_BUDGET_DATA.to_string()
}

pub fn render_tracker(snapshot: &TrackerSnapshot, options: &RenderOptions) -> String {
    let mut out = Vec::new();
    out.push(heading(
        &format!("{} ({})", snapshot.client_name, snapshot.client_code),
        options,
    ));
    out.push(render_dots(snapshot, options));
    out.push(String::new());

    let marker = match snapshot.direction {
        Some(Direction::Forward) => "» ",
        Some(Direction::Backward) => "« ",
        None => "",
    };
    out.push(heading(
        &format!("{}{}", marker, snapshot.active_month),
        options,
    ));
    out.extend(render_status(&snapshot.month, options));
    out.push(String::new());

    out.push(heading(
        &format!("{} ({})", snapshot.quarter_label, snapshot.quarter_range),
        options,
    ));
    out.extend(render_status(&snapshot.quarter, options));

    if let Some(rollover) = &snapshot.rollover {
        out.push(String::new());
        out.extend(render_rollover(rollover, options));
    }
    out.join("\n")
}

pub fn render_client_list<'a>(
    clients: impl Iterator<Item = &'a ClientBudget>,
    options: &RenderOptions,
) -> String {
    let lines: Vec<String> = clients
        .map(|client| {
            format!(
                "{:<10} {:<24} {} / month  {}",
                client.code,
                client.name,
                format_compact_with(client.committed_monthly, &options.currency),
                client.quarter_label
            )
        })
        .collect();
    if lines.is_empty() {
        render_missing()
    } else {
        lines.join("\n")
    }
}

fn render_dots(snapshot: &TrackerSnapshot, options: &RenderOptions) -> String {
    snapshot
        .dots
        .iter()
        .zip(snapshot.months.iter())
        .map(|(active, month)| {
            let label = format!("{} {}", if *active { "●" } else { "○" }, month.short_name());
            if *active && options.color {
                label.bold().to_string()
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_status(status: &BudgetStatus, options: &RenderOptions) -> Vec<String> {
    let money = |amount: f64| format_compact_with(amount, &options.currency);
    let (label, balance) = if status.over {
        ("Over", format!("-{}", money(status.remaining_or_over)))
    } else {
        ("Remaining", money(status.remaining_or_over))
    };
    let balance = match (options.color, status.over) {
        (true, true) => balance.red().to_string(),
        (true, false) => balance.green().to_string(),
        (false, _) => balance,
    };
    vec![
        row("Budget", &money(status.budget)),
        row("Spent", &money(status.spent)),
        row(label, &balance),
        format!(
            "  {} {}% used",
            progress_bar(status.progress_percent, status.over, options),
            status.progress_percent
        ),
    ]
}

fn render_rollover(rollover: &Rollover, options: &RenderOptions) -> Vec<String> {
    let credit = format!("+{}", format_compact_with(rollover.amount, &options.currency));
    let credit = if options.color {
        credit.green().to_string()
    } else {
        credit
    };
    vec![
        heading("Rollover Credit", options),
        format!(
            "  From last quarter ({})  {}",
            rollover.from_quarter, credit
        ),
    ]
}

fn progress_bar(percent: u8, over: bool, options: &RenderOptions) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH + 50) / 100;
    let fill = "#".repeat(filled);
    let fill = match (options.color, over) {
        (true, true) => fill.red().to_string(),
        (true, false) => fill.cyan().to_string(),
        (false, _) => fill,
    };
    format!("[{}{}]", fill, "-".repeat(BAR_WIDTH - filled))
}

fn row(label: &str, value: &str) -> String {
    format!("  {:<width$}{}", label, value, width = LABEL_WIDTH)
}

fn heading(text: &str, options: &RenderOptions) -> String {
    if options.color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
