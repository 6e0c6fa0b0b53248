// Run list rendering.
// Provides the workflow run list with duration bars and loading/empty states.

use chrono::{DateTime, Local, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::state::{StatusTone, ViewState};

/// Format a timestamp in the user's local time and locale.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%c").to_string()
}

/// Bar color for a run status.
pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Green => Color::Green,
        StatusTone::Blue => Color::Blue,
        StatusTone::Red => Color::Red,
        StatusTone::Gray => Color::Gray,
    }
}

/// Split a bar of `width` cells into filled and empty counts.
pub fn bar_cells(fraction: f64, width: usize) -> (usize, usize) {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    (filled, width - filled)
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Render the recent runs for the selected repository.
pub fn render_runs_list(frame: &mut Frame, view: &mut ViewState, area: Rect, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .title(" Recent Workflow Runs ");

    if let Some(message) = view.list_placeholder() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if view.ui.is_loading_list {
            render_loading(frame, inner, message);
        } else {
            render_empty(frame, inner, message);
        }
        return;
    }

    // Leave room for borders and the highlight symbol
    let bar_width = area.width.saturating_sub(6) as usize;
    let workflows = &view.workflows;
    let items: Vec<ListItem> = workflows
        .runs()
        .iter()
        .map(|run| {
            let color = tone_color(StatusTone::from(run.status));
            let (filled, empty) = bar_cells(workflows.bar_fraction(run), bar_width);

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        run.display_name().to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", run.status.label()),
                        Style::default().fg(color),
                    ),
                ]),
                Line::from(Span::styled(
                    format_timestamp(&run.created_at),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(vec![
                    Span::styled("█".repeat(filled), Style::default().fg(color)),
                    Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
                ]),
            ])
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut view.workflows.list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(0.0, 20), (0, 20));
        assert_eq!(bar_cells(0.5, 20), (10, 10));
        assert_eq!(bar_cells(1.0, 20), (20, 0));
        assert_eq!(bar_cells(1.5, 20), (20, 0));
        assert_eq!(bar_cells(0.5, 0), (0, 0));
    }

    #[test]
    fn test_tone_colors() {
        assert_eq!(tone_color(StatusTone::Green), Color::Green);
        assert_eq!(tone_color(StatusTone::Blue), Color::Blue);
        assert_eq!(tone_color(StatusTone::Red), Color::Red);
        assert_eq!(tone_color(StatusTone::Gray), Color::Gray);
    }
}
