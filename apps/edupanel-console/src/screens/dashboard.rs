use anyhow::{Context, Result};
use chrono::Local;
use console::{Alignment, measure_text_width, pad_str, style};

use edupanel_api::messages::Alert;
use edupanel_shared::dashboard::{DashboardStats, resolve_window};

use super::Console;
use crate::cli::DashboardArgs;
use crate::ui::alert;

pub async fn show(console: &Console, args: &DashboardArgs) -> Result<()> {
    let selected = args.day.unwrap_or_else(|| Local::now().date_naive());
    let range = resolve_window(args.window, selected, (args.from, args.to))?;
    let stats = console
        .services
        .dashboard
        .statistics(range)
        .await
        .context("Failed to load dashboard statistics")?;

    alert::heading(&format!("Dashboard · {} · {} .. {}", args.window, range.from, range.to));
    if stats.is_zero() {
        alert::notify(Alert::NoData, console.lang);
        return Ok(());
    }
    println!("{}", render_cards(&stats));
    Ok(())
}

/// One card per line: a right-aligned label and its value.
fn render_cards(stats: &DashboardStats) -> String {
    let cards = stats.cards();
    let width = cards.iter().map(|(label, _)| measure_text_width(label)).max().unwrap_or(0);
    cards
        .iter()
        .map(|(label, value)| {
            format!(
                "{}  {}",
                style(pad_str(label, width, Alignment::Right, None)).dim(),
                style(value).bold()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_are_aligned() {
        let stats = DashboardStats {
            users: 120,
            courses: 8,
            revenue: 1500000.0,
            ..Default::default()
        };
        let out = console::strip_ansi_codes(&render_cards(&stats)).into_owned();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "      Users  120");
        assert_eq!(lines[6], "Permissions  0");
        assert_eq!(lines[7], "    Revenue  1500000.00");
    }
}
