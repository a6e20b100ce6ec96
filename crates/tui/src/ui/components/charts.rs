use engine::{Currency, Distribution, Money, analytics::DailyPoint};
use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::{Modifier, Style},
    symbols,
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
};

use crate::ui::{components::card::Card, theme::Theme};

/// Horizontal income/expense bars, one per distribution entry.
pub fn render_distribution(
    frame: &mut Frame<'_>,
    area: Rect,
    distribution: &Distribution,
    currency: Currency,
    theme: &Theme,
) {
    let colors = [theme.positive, theme.negative];
    let bars: Vec<Bar<'_>> = distribution
        .entries()
        .into_iter()
        .zip(colors)
        .map(|((label, value), color)| {
            Bar::default()
                .label(Line::from(label))
                .value(bar_value(value))
                .text_value(value.format(currency))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));

    Card::new("Distribution", theme).render_with(frame, area, chart);
}

/// Bars cannot go below zero; negative totals render as an empty bar.
fn bar_value(value: Money) -> u64 {
    u64::try_from(value.cents()).unwrap_or(0)
}

/// `████░░░░` scaled against `max`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// `████░░░░  40%`, for values already expressed in whole percent.
#[must_use]
pub fn percentage_bar(percentage: i64, width: usize) -> String {
    let clamped = percentage.clamp(0, 100) as u64;
    format!("{} {:>3}%", ascii_bar(clamped, 100, width), percentage)
}

/// Block-glyph strip like `▁▂▃▅▇`, one glyph per value.
#[must_use]
pub fn mini_bar_chart(values: &[u64]) -> String {
    let Some(&max) = values.iter().max() else {
        return String::new();
    };
    if max == 0 {
        return " ".repeat(values.len());
    }

    let bars = [
        symbols::bar::ONE_EIGHTH,
        symbols::bar::ONE_QUARTER,
        symbols::bar::THREE_EIGHTHS,
        symbols::bar::HALF,
        symbols::bar::FIVE_EIGHTHS,
        symbols::bar::THREE_QUARTERS,
        symbols::bar::SEVEN_EIGHTHS,
        symbols::bar::FULL,
    ];

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                " "
            } else {
                let index = ((v as f64 / max as f64) * 7.0) as usize;
                bars[index.min(7)]
            }
        })
        .collect()
}

/// Running balance as a glyph strip. The lowest balance maps to the floor so
/// negative stretches still show their shape.
#[must_use]
pub fn balance_trend(points: &[DailyPoint]) -> String {
    let Some(min) = points.iter().map(|p| p.balance.cents()).min() else {
        return String::new();
    };
    let shifted: Vec<u64> = points
        .iter()
        .map(|p| (p.balance.cents() - min).unsigned_abs() + 1)
        .collect();
    mini_bar_chart(&shifted)
}
