use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tycoon::core::{Snapshot, UpgradeKind};

/// Draws the upgrade shop with current levels and prices
pub fn draw_upgrades_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let upgrades = &snapshot.upgrades;
    let mut lines = Vec::new();

    for (i, offer) in snapshot.offers.iter().enumerate() {
        let current = match offer.kind {
            UpgradeKind::TrainingSpeed => format!("x{:.1}", upgrades.training_speed),
            UpgradeKind::BattleRewards => format!("x{:.2}", upgrades.battle_rewards),
            UpgradeKind::TrainingSlots => format!("{}", upgrades.training_slots),
        };
        let (price, price_style) = if offer.maxed {
            ("MAX".to_string(), Style::default().fg(Color::DarkGray))
        } else if offer.can_buy() {
            (format!("{} coins", offer.cost), Style::default().fg(Color::Green))
        } else {
            (format!("{} coins", offer.cost), Style::default().fg(Color::Red))
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", i + 1),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:<15}", offer.kind.name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:<6} ", current)),
            Span::styled(price, price_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Auto Battle: "),
        on_off(snapshot.settings.auto_battle),
        Span::raw("  Auto Trainer: "),
        on_off(snapshot.settings.auto_trainer),
    ]));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Upgrades"));
    frame.render_widget(paragraph, area);
}

fn on_off(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("ON", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("OFF", Style::default().fg(Color::DarkGray))
    }
}
