use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tycoon::core::Snapshot;

/// Draws the most recent activity, newest first
pub fn draw_log_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let lines: Vec<Line> = snapshot
        .log
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::styled(entry.clone(), style)
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Activity"));
    frame.render_widget(paragraph, area);
}
