//! Context menu panel: the selectable actions for the current phase.

use fable_core::{PcgRng, Session, SessionPhase, TurnPhase};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::menu::{MenuEntry, Screen};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    session: &Session<PcgRng>,
    screen: Screen,
    entries: &[MenuEntry],
    cursor: usize,
    notice: Option<&str>,
) {
    let title = match screen {
        Screen::SkillTree => "Unlock",
        Screen::Main => match session.phase() {
            SessionPhase::Exploring => "Travel",
            SessionPhase::InCombat { .. } => "Battle",
        },
    };

    let mut items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let style = if entry.enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Span::styled(entry.label.clone(), style))
        })
        .collect();

    if matches!(
        session.phase(),
        SessionPhase::InCombat {
            turn: TurnPhase::AwaitingOpponentResolution
        }
    ) && screen == Screen::Main
    {
        items.push(ListItem::new(Span::styled(
            "The enemy readies its attack...",
            Style::default().fg(Color::Red),
        )));
    }

    if let Some(notice) = notice {
        items.push(ListItem::new(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ))));
    }

    if session.is_cleared() {
        items.push(ListItem::new(Span::styled(
            "Cleared! Keep exploring or press q.",
            Style::default().fg(Color::Green),
        )));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !entries.is_empty() {
        state.select(Some(cursor.min(entries.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
