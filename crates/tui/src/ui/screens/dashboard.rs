use engine::{Currency, Dashboard, LoadStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{balance_trend, percentage_bar, render_distribution},
            money::{UNKNOWN, status_amount, styled_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(5),
        ])
        .split(area);

    render_status(frame, layout[0], &state.dashboard, &theme);
    render_totals(frame, layout[1], &state.dashboard, state.currency, &theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[2]);
    render_distribution(
        frame,
        middle[0],
        state.dashboard.distribution(),
        state.currency,
        &theme,
    );
    render_breakdown(frame, middle[1], &state.dashboard, state.currency, &theme);

    render_outlook(frame, layout[3], &state.dashboard, state.currency, &theme);
}

fn window_label(dashboard: &Dashboard) -> String {
    match dashboard.window_days() {
        Some(days) => format!("last {days} days"),
        None => "all movements".to_string(),
    }
}

fn render_status(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let mut spans = vec![
        Span::styled("Window", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", window_label(dashboard))),
    ];
    match dashboard.status() {
        LoadStatus::Pending => {
            spans.push(Span::styled("Loading...", Style::default().fg(theme.text_muted)))
        }
        LoadStatus::Ready => {}
        LoadStatus::Failed(err) => spans.push(Span::styled(
            format!("Load failed: {err}"),
            Style::default().fg(theme.error),
        )),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_totals(
    frame: &mut Frame<'_>,
    area: Rect,
    dashboard: &Dashboard,
    currency: Currency,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let status = dashboard.status();
    let summary = dashboard.summary();

    StatCard::new(
        "Income",
        status_amount(summary.total_income, status, currency, theme),
        theme,
    )
    .render(frame, cols[0]);
    StatCard::new(
        "Expense",
        status_amount(summary.total_expense, status, currency, theme),
        theme,
    )
    .render(frame, cols[1]);
    StatCard::new(
        "Balance",
        status_amount(summary.balance(), status, currency, theme),
        theme,
    )
    .render(frame, cols[2]);
}

fn render_breakdown(
    frame: &mut Frame<'_>,
    area: Rect,
    dashboard: &Dashboard,
    currency: Currency,
    theme: &Theme,
) {
    let card = Card::new("Expenses by tag", theme);

    if !dashboard.status().is_ready() || dashboard.breakdown().is_empty() {
        let text = if dashboard.status().is_ready() {
            "No expenses in this window."
        } else {
            UNKNOWN
        };
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(text, Style::default().fg(theme.dim))),
        );
        return;
    }

    let items: Vec<ListItem<'_>> = dashboard
        .breakdown()
        .iter()
        .map(|share| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14} ", truncate(&share.tag, 14)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{} ", percentage_bar(share.percentage, 10)),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    share.total.format(currency),
                    Style::default().fg(theme.negative),
                ),
                Span::styled(
                    format!("  ({})", share.count),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect();

    card.render_with(frame, area, List::new(items));
}

fn render_outlook(
    frame: &mut Frame<'_>,
    area: Rect,
    dashboard: &Dashboard,
    currency: Currency,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let ready = dashboard.status().is_ready();

    let mut evolution = Vec::new();
    match dashboard.evolution().last() {
        Some(last) if ready => {
            evolution.push(Line::from(Span::styled(
                balance_trend(dashboard.evolution()),
                Style::default().fg(theme.accent),
            )));
            evolution.push(Line::from(vec![
                Span::styled("Balance ", Style::default().fg(theme.dim)),
                styled_amount(last.balance, currency, theme),
            ]));
        }
        _ => evolution.push(Line::from(Span::styled(
            UNKNOWN,
            Style::default().fg(theme.dim),
        ))),
    }
    Card::new("Daily evolution", theme).render_with(frame, cols[0], Paragraph::new(evolution));

    let forecast = match dashboard.forecast() {
        Some(forecast) if ready => vec![
            Line::from(vec![
                Span::styled("Income  ", Style::default().fg(theme.dim)),
                styled_amount(forecast.projected_income, currency, theme),
            ]),
            Line::from(vec![
                Span::styled("Expense ", Style::default().fg(theme.dim)),
                styled_amount(-forecast.projected_expense, currency, theme),
            ]),
            Line::from(vec![
                Span::styled("Balance ", Style::default().fg(theme.dim)),
                styled_amount(forecast.projected_balance(), currency, theme),
            ]),
        ],
        _ => vec![Line::from(Span::styled(
            UNKNOWN,
            Style::default().fg(theme.dim),
        ))],
    };
    let title = dashboard
        .forecast()
        .map(|f| format!("Forecast {}", f.period()))
        .unwrap_or_else(|| "Forecast".to_string());
    Card::new(&title, theme).render_with(frame, cols[1], Paragraph::new(forecast));
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
