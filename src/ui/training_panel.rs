use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tycoon::core::Snapshot;

/// Draws one gauge per training slot and the encounter bar underneath
pub fn draw_training_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mut constraints: Vec<Constraint> = snapshot
        .slots
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Length(3)); // Encounter
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, chunk) in snapshot.slots.iter().zip(chunks.iter()) {
        let title = format!("Slot {}", slot.index + 1);
        match &slot.unit_name {
            Some(name) => {
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .gauge_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .label(format!("{} {:.0}%", name, slot.progress * 100.0))
                    .ratio(slot.progress.clamp(0.0, 1.0));
                frame.render_widget(gauge, *chunk);
            }
            None => {
                let empty = Paragraph::new("Empty")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(Block::default().borders(Borders::ALL).title(title));
                frame.render_widget(empty, *chunk);
            }
        }
    }

    let battle_area = chunks[snapshot.slots.len()];
    let auto = if snapshot.settings.auto_battle { " [auto]" } else { "" };
    match &snapshot.encounter {
        Some(encounter) => {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Battle{}", auto)),
                )
                .gauge_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .label(format!(
                    "{} vs Lv.{} enemy - {:.1}s left",
                    encounter.unit_name,
                    encounter.enemy_level,
                    encounter.remaining_ms as f64 / 1000.0
                ))
                .ratio(encounter.progress);
            frame.render_widget(gauge, battle_area);
        }
        None => {
            let idle = Paragraph::new(format!(
                "No battle. Victory pays {} coins",
                snapshot.reward_preview
            ))
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Battle{}", auto)),
            );
            frame.render_widget(idle, battle_area);
        }
    }
}
