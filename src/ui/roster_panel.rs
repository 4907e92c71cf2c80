use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tycoon::core::Snapshot;
use tycoon::units::UnitStatus;

/// Draws the unit roster with the cursor and selection markers
pub fn draw_roster_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: usize) {
    let title = format!(
        "Heroes ({}) - selected {}/{}",
        snapshot.units.len(),
        snapshot.selection.len(),
        snapshot.upgrades.training_slots
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if snapshot.units.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
            "No heroes yet. Press R to recruit one (500 coins).",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = snapshot
        .units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let marker = if i == cursor { "> " } else { "  " };
            let check = if snapshot.is_selected(unit.id) { "[x] " } else { "[ ] " };
            let status_color = match unit.status {
                UnitStatus::Idle => Color::Green,
                UnitStatus::Training => Color::Cyan,
                UnitStatus::Battling => Color::Red,
            };
            let name_style = if i == cursor {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(check),
                Span::styled(unit.name.clone(), name_style),
                Span::raw(format!(
                    " Lv.{} ATK {} DEF {} SPD {} (power {}) ",
                    unit.level,
                    unit.attack,
                    unit.defense,
                    unit.speed,
                    unit.power()
                )),
                Span::styled(unit.status.label(), Style::default().fg(status_color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
