pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::TerminalSession;
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // info bar
            Constraint::Length(2), // tabs
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, layout[2], state),
        Section::Movements => screens::movements::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn connection_ok(state: &AppState) -> bool {
    state.dashboard.status().error().is_none() && state.movements.list.status().error().is_none()
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = if connection_ok(state) {
        ("OK", Style::default().fg(theme.positive))
    } else {
        ("ERR", Style::default().fg(theme.error))
    };

    let line = Line::from(vec![
        Span::styled("Source", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.source)),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let separator = || Span::styled("  │  ", Style::default().fg(theme.border));
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));

    let mut parts = components::tabs::tab_shortcuts(theme);
    parts.push(separator());
    parts.push(key("r"));
    parts.push(Span::raw(" refresh"));

    if state.section == Section::Movements {
        parts.push(separator());
        parts.push(key("j/k"));
        parts.push(Span::raw(" select"));
    }

    parts.push(separator());
    parts.push(key("q"));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
