// Run summary rendering.
// Shows totals, the carbon estimate, and the per-job breakdown for one run.

use ratatui::{prelude::*, widgets::*};

use crate::state::ViewState;
use crate::state::summary::{
    MSG_LOADING_SUMMARY, format_carbon, format_duration, job_duration_label,
};

use super::list::render_loading;

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Render the summary view.
pub fn render_summary(frame: &mut Frame, view: &ViewState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Workflow Summary ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let detail = match (&view.summary.detail, view.ui.is_loading_summary) {
        (_, true) | (None, false) => {
            render_loading(frame, inner, MSG_LOADING_SUMMARY);
            return;
        }
        (Some(detail), false) => detail,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(inner);

    let header = Paragraph::new(vec![
        field("ID", detail.workflow_run_id.to_string()),
        field("Total Jobs", detail.total_jobs.to_string()),
        field("CO₂", format!("{} grams", format_carbon(detail.carbon_grams))),
        field("Duration", format_duration(detail.total_duration_seconds)),
    ]);
    frame.render_widget(header, chunks[0]);

    let jobs_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Jobs ");

    if detail.jobs.is_empty() {
        let text = Paragraph::new("No jobs reported for this run")
            .style(Style::default().fg(Color::DarkGray))
            .block(jobs_block);
        frame.render_widget(text, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = detail
        .jobs
        .iter()
        .map(|job| {
            let duration_style = if job.in_progress {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    job.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  @ {}", job.runner),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("  "),
                Span::styled(job_duration_label(job), duration_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(jobs_block), chunks[1]);
}
