// Session gate screens.
// Rendered instead of the dashboard until the session is confirmed.

use ratatui::{prelude::*, widgets::*};

use crate::state::ViewState;

/// Placeholder while the auth status request is in flight.
pub fn draw_checking(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("Checking authentication...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, centered_rows(area, 1));
}

/// Login prompt with the URL that starts the OAuth flow.
pub fn draw_login(frame: &mut Frame, view: &ViewState, login_url: &str, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Login Required",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Please login with GitHub to continue:"),
        Line::from(Span::styled(
            login_url.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
    ];

    if let Some(error) = &view.ui.error_message {
        lines.push(Line::from(Span::styled(
            format!("❌ {}", error),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::raw("r "),
        Span::styled("Check again", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ]));

    let height = lines.len() as u16 + 2;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" cinder ");
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, centered_rows(area, height));
}

fn centered_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}
