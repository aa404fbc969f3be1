//! Journal scrollback panel: the most recent messages, oldest first.

use fable_core::{PcgRng, Session};
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect, session: &Session<PcgRng>) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<ratatui::text::Line> = session
        .journal()
        .recent(visible)
        .map(ratatui::text::Line::from)
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Journal")),
        area,
    );
}
