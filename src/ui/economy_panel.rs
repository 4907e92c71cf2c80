use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tycoon::core::Snapshot;

/// Draws the header with currencies, player level and the opponent
pub fn draw_economy_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            format!("Coins: {}", snapshot.coins),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Gems: {}", snapshot.gems),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(" | "),
        Span::styled(
            format!(
                "Level {} ({}/{} XP)",
                snapshot.level, snapshot.exp, snapshot.required_exp
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!(
                "Enemy Lv.{} (power {})",
                snapshot.enemy_level, snapshot.enemy_power
            ),
            Style::default().fg(Color::Red),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Hero Training Tycoon"),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}
