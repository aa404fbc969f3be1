//! Actor stats panel: player gauges plus the opponent during combat.

use fable_core::{Actor, PcgRng, Session};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, session: &Session<PcgRng>) {
    let block = Block::default().borders(Borders::ALL).title("Party");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // name and level
            Constraint::Length(1), // hp gauge
            Constraint::Length(1), // mp gauge
            Constraint::Length(1), // exp / gold
            Constraint::Length(1), // spacer
            Constraint::Min(0),    // opponent
        ])
        .split(inner);

    let player = session.player();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(player.name.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(format!("  Lv {}", player.level)),
        ])),
        rows[0],
    );
    frame.render_widget(hp_gauge(player), rows[1]);
    if player.max_mp > 0 {
        frame.render_widget(mp_gauge(player), rows[2]);
    }
    frame.render_widget(
        Paragraph::new(format!("EXP {}   Gold {}", player.exp, player.gold)),
        rows[3],
    );

    if let Some(opponent) = session.opponent() {
        let opponent_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(rows[5]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{}  Lv {}", opponent.name, opponent.level),
                Style::default().fg(Color::Red),
            ))),
            opponent_rows[0],
        );
        frame.render_widget(hp_gauge(opponent), opponent_rows[1]);
    }
}

fn hp_gauge(actor: &Actor) -> Gauge<'_> {
    let ratio = if actor.max_hp == 0 {
        0.0
    } else {
        f64::from(actor.hp) / f64::from(actor.max_hp)
    };
    let color = if ratio < 0.3 {
        Color::Red
    } else if ratio < 0.6 {
        Color::Yellow
    } else {
        Color::Green
    };
    Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("HP {}/{}", actor.hp, actor.max_hp))
}

fn mp_gauge(actor: &Actor) -> Gauge<'_> {
    let ratio = if actor.max_mp == 0 {
        0.0
    } else {
        f64::from(actor.mp) / f64::from(actor.max_mp)
    };
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(ratio)
        .label(format!("MP {}/{}", actor.mp, actor.max_mp))
}
