// UI module for rendering the TUI.
// Contains the session gate, repository selector, run list, and summary view.

mod gate;
mod list;
mod summary;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::state::ActiveView;
use crate::store::KeyValueStore;

/// Main draw function that renders the entire UI.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    match app.dashboard.view.active_view() {
        ActiveView::CheckingSession => gate::draw_checking(frame, area),
        ActiveView::LoginRequired => {
            gate::draw_login(frame, &app.dashboard.view, &app.login_url, area)
        }
        view @ (ActiveView::List | ActiveView::Summary) => draw_dashboard(frame, app, view),
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_dashboard<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, view: ActiveView) {
    let has_error = app.dashboard.view.ui.error_message.is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                              // Selector
            Constraint::Length(if has_error { 1 } else { 0 }), // Error line
            Constraint::Min(1),                                 // Main content
            Constraint::Length(1),                              // Status bar
        ])
        .split(frame.area());

    draw_selector(frame, app, chunks[0]);

    if let Some(error) = &app.dashboard.view.ui.error_message {
        let text = Paragraph::new(format!(" ❌ {}", error)).style(Style::default().fg(Color::Red));
        frame.render_widget(text, chunks[1]);
    }

    match view {
        ActiveView::Summary => summary::render_summary(frame, &app.dashboard.view, chunks[2]),
        _ => {
            let focused = app.focus == Focus::Runs;
            list::render_runs_list(frame, &mut app.dashboard.view, chunks[2], focused);
        }
    }

    draw_status_bar(frame, app, view, chunks[3]);
}

/// Owner and repository inputs side by side.
fn draw_selector<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let selection = &app.dashboard.view.selection;
    draw_input(
        frame,
        " Owner ",
        &selection.owner,
        app.focus == Focus::Owner,
        chunks[0],
    );
    draw_input(
        frame,
        " Repository ",
        &selection.name,
        app.focus == Focus::Repo,
        chunks[1],
    );
}

fn draw_input(frame: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title.to_string()),
    );
    frame.render_widget(input, area);
}

fn draw_status_bar<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    view: ActiveView,
    area: Rect,
) {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::raw(key),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]
    };

    let hints: Vec<Span> = if view == ActiveView::Summary {
        [
            hint(" Esc ", "Back"),
            hint("  L ", "Logout"),
            hint("  ? ", "Help"),
            hint("  q ", "Quit"),
        ]
        .concat()
    } else if app.focus.is_editing() {
        [
            hint(" Tab ", "Next field"),
            hint("  ↵ ", "Load"),
            hint("  Esc ", "Done"),
        ]
        .concat()
    } else {
        [
            hint(" ↑↓ ", "Navigate"),
            hint("  ↵ ", "Summary"),
            hint("  o ", "Owner"),
            hint("  Tab ", "Switch"),
            hint("  r ", "Refresh"),
            hint("  L ", "Logout"),
            hint("  ? ", "Help"),
            hint("  q ", "Quit"),
        ]
        .concat()
    };

    let mut line = hints;
    let selection = &app.dashboard.view.selection;
    if selection.is_complete() {
        line.push(Span::styled(
            format!("  {}", selection.slug()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50u16.min(area.width);
    let popup_height = 17u16.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let shortcut = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        shortcut("↑/↓ or j/k", "Navigate runs"),
        shortcut("Enter", "Open run summary"),
        shortcut("Esc / b", "Back to runs"),
        shortcut("Tab", "Cycle owner / repo / runs"),
        shortcut("o", "Edit owner"),
        shortcut("r", "Reload runs"),
        shortcut("L", "Logout"),
        shortcut("?", "Show/hide this help"),
        shortcut("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DashboardApi, WorkflowDetail, WorkflowRunRef};
    use crate::dashboard::Dashboard;
    use crate::error::{CinderError, Result};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct NoApi;

    #[async_trait]
    impl DashboardApi for NoApi {
        async fn auth_status(&self) -> Result<bool> {
            Ok(false)
        }
        async fn logout(&self) -> Result<()> {
            Ok(())
        }
        async fn list_workflow_runs(&self, _: &str, _: &str) -> Result<Vec<WorkflowRunRef>> {
            Err(CinderError::Unauthorized)
        }
        async fn workflow_summary(&self, _: &str, _: &str, _: u64) -> Result<WorkflowDetail> {
            Err(CinderError::Unauthorized)
        }
    }

    fn render(app: &mut App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn app() -> App<MemoryStore> {
        App::new(
            Dashboard::new(MemoryStore::new()),
            Arc::new(NoApi),
            "http://localhost:3000/auth/github/login".to_string(),
        )
    }

    #[test]
    fn test_checking_screen() {
        let mut app = app();
        app.dashboard.begin_session_check();
        assert!(render(&mut app).contains("Checking authentication..."));
    }

    #[test]
    fn test_login_screen_shows_url() {
        let mut app = app();
        let generation = app.dashboard.begin_session_check();
        app.dashboard.finish_session_check(generation, Ok(false));
        let screen = render(&mut app);
        assert!(screen.contains("Login Required"));
        assert!(screen.contains("auth/github/login"));
    }

    #[test]
    fn test_blank_selection_prompt() {
        let mut app = app();
        let generation = app.dashboard.begin_session_check();
        app.dashboard.finish_session_check(generation, Ok(true));
        let screen = render(&mut app);
        assert!(screen.contains("Enter a GitHub owner and repository to begin."));
    }
}
