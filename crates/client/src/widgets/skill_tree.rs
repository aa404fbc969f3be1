//! Skill tree panel: the fixed three-level tree with unlock state.

use fable_core::{PcgRng, Session, SkillId, SkillNode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, session: &Session<PcgRng>) {
    let tree = session.skills();
    let mut lines = Vec::new();

    // Pre-order walk with indentation, mirroring the tree shape.
    let mut stack: Vec<(SkillId, usize)> = vec![(SkillId::ROOT, 0)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else { continue };
        lines.push(node_line(node, depth));
        if let Some(right) = node.def.right {
            stack.push((right, depth + 1));
        }
        if let Some(left) = node.def.left {
            stack.push((left, depth + 1));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(format!("Gold: {}", session.player().gold)));
    if let Some(bonus) = tree.unlock_bonus() {
        lines.push(Line::from(format!(
            "Each unlock: +{} ATK, +{} max HP",
            bonus.attack, bonus.max_hp
        )));
    }
    lines.push(Line::from(Span::styled(
        "Enter to unlock, t to return",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Skill Tree")),
        area,
    );
}

fn node_line(node: &SkillNode, depth: usize) -> Line<'static> {
    let indent = "  ".repeat(depth);
    let (marker, style) = if node.unlocked {
        ("[*]", Style::default().fg(Color::Green))
    } else {
        ("[ ]", Style::default().fg(Color::DarkGray))
    };
    let cost = if node.unlocked {
        String::new()
    } else {
        format!("  ({} gold)", node.def.unlock_cost)
    };
    Line::from(Span::styled(
        format!("{indent}{marker} {}{cost}", node.def.name),
        style,
    ))
}
