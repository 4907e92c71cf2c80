//! Terminal rendering. Holds the latest snapshot and the roster cursor;
//! everything else is derived from the snapshot at draw time.

mod economy_panel;
mod log_panel;
mod roster_panel;
mod training_panel;
mod upgrades_panel;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tycoon::core::{RenderSink, Snapshot};
use tycoon::units::UnitId;

/// View-side state between frames.
#[derive(Debug, Default)]
pub struct UiState {
    snapshot: Option<Snapshot>,
    cursor: usize,
    status: Option<String>,
}

impl RenderSink for UiState {
    fn render(&mut self, snapshot: &Snapshot) {
        let last = snapshot.units.len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
        self.snapshot = Some(snapshot.clone());
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.snapshot.as_ref().map_or(0, |s| s.units.len());
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Unit under the roster cursor.
    pub fn unit_at_cursor(&self) -> Option<UnitId> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.units.get(self.cursor))
            .map(|u| u.id)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, ui: &UiState) {
    let Some(snapshot) = ui.snapshot.as_ref() else {
        return;
    };
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Economy header
            Constraint::Min(10),   // Roster | training
            Constraint::Length(8), // Upgrades | log
            Constraint::Length(2), // Footer
        ])
        .split(size);

    economy_panel::draw_economy_panel(frame, v_chunks[0], snapshot);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[1]);
    roster_panel::draw_roster_panel(frame, middle[0], snapshot, ui.cursor);
    training_panel::draw_training_panel(frame, middle[1], snapshot);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[2]);
    upgrades_panel::draw_upgrades_panel(frame, bottom[0], snapshot);
    log_panel::draw_log_panel(frame, bottom[1], snapshot);

    draw_footer(frame, v_chunks[3], snapshot, ui.status());
}

fn draw_footer(frame: &mut Frame, area: Rect, snapshot: &Snapshot, status: Option<&str>) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim = |enabled: bool| {
        if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let controls = Line::from(vec![
        key("[R]"),
        Span::styled(" Recruit  ", dim(snapshot.can_recruit)),
        key("[Space]"),
        Span::raw(" Select  "),
        key("[T]"),
        Span::styled(
            format!(" {}  ", snapshot.training_button.label()),
            dim(snapshot.training_button.enabled),
        ),
        key("[B]"),
        Span::styled(" Battle  ", dim(snapshot.can_battle)),
        key("[A]"),
        Span::raw(" Auto Battle  "),
        key("[U]"),
        Span::raw(" Auto Trainer  "),
        key("[1-3]"),
        Span::raw(" Upgrade  "),
        key("[Q]"),
        Span::raw(" Quit"),
    ]);

    let status_line = match status {
        Some(text) => Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )),
        None => Line::from(""),
    };

    let footer = Paragraph::new(vec![controls, status_line]).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
