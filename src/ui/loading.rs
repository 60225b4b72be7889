//! Full-screen loading indicator shown while the saved application loads

use crate::state::LoadingState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, loading: &LoadingState) {
    // Pulse between a dim and a bright cyan
    let level = 90 + (165.0 * loading.intensity) as u8;
    let style = Style::default()
        .fg(Color::Rgb(0, level, level))
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(loading.spinner(), style)),
        Line::from(""),
        Line::from(Span::styled(
            "Loading your application...",
            Style::default().fg(Color::Gray),
        )),
    ];

    let height = lines.len() as u16;
    let text_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height: height.min(area.height),
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_area,
    );
}
