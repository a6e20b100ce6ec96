use engine::{Column, LoadStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.movements.list;
    let mut line = vec![
        Span::styled("Count", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", list.len())),
        Span::styled("Currency", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.currency.code())),
    ];

    match list.status() {
        LoadStatus::Pending => {
            line.push(Span::raw("   "));
            line.push(Span::styled("Loading...", Style::default().fg(theme.text_muted)));
        }
        LoadStatus::Ready => {}
        LoadStatus::Failed(err) => {
            line.push(Span::raw("   "));
            line.push(Span::styled(
                format!("Load failed: {err}"),
                Style::default().fg(theme.error),
            ));
        }
    }

    let block = Block::default().borders(Borders::ALL).title("Movements");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Description => Constraint::Min(20),
        Column::Amount => Constraint::Length(16),
        Column::Category => Constraint::Length(12),
        Column::Date => Constraint::Length(12),
    }
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.movements.list;
    let columns = list.columns();

    let header = Row::new(columns.iter().map(|c| {
        Cell::from(c.header()).style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = list
        .movements()
        .iter()
        .zip(list.rows(state.currency))
        .map(|(movement, cells)| {
            let amount_color = if movement.is_income() {
                theme.positive
            } else if movement.is_expense() {
                theme.negative
            } else {
                theme.text_muted
            };
            Row::new(columns.iter().zip(cells).map(|(column, text)| {
                let style = match column {
                    Column::Amount => Style::default().fg(amount_color),
                    _ => Style::default().fg(theme.text),
                };
                Cell::from(text).style(style)
            }))
        });

    let table = Table::new(rows, columns.iter().copied().map(column_width))
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !list.is_empty() {
        table_state.select(Some(state.movements.selected));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}
