use engine::{Currency, LoadStatus, Money};
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Placeholder shown instead of a figure that has not been loaded.
pub const UNKNOWN: &str = "--";

/// Amount in the display currency, green when positive and red when negative.
#[must_use]
pub fn styled_amount(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let color = if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(amount.format(currency), Style::default().fg(color))
}

/// Like [`styled_amount`], but totals are only shown once the data is ready.
#[must_use]
pub fn status_amount(
    amount: Money,
    status: &LoadStatus,
    currency: Currency,
    theme: &Theme,
) -> Span<'static> {
    if status.is_ready() {
        styled_amount(amount, currency, theme)
    } else {
        Span::styled(UNKNOWN, Style::default().fg(theme.dim))
    }
}
