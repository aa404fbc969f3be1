//! Context menu construction.
//!
//! The bottom panel always shows a cursor-driven menu; which entries it
//! holds depends on the session phase and the active screen. Entries are
//! rebuilt from the latest snapshot on every redraw, so counts and costs
//! are always current.

use fable_core::{
    Command, GameConfig, ItemKind, PcgRng, Session, SessionPhase, SkillKind, TurnPhase,
};
use strum::IntoEnumIterator;

/// One selectable row of the context menu.
pub struct MenuEntry {
    pub label: String,
    pub command: Command,
    /// Greyed-out entries stay visible but do nothing on activation.
    pub enabled: bool,
}

/// Which screen the menu belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Main,
    SkillTree,
}

pub fn entries(session: &Session<PcgRng>, screen: Screen) -> Vec<MenuEntry> {
    match screen {
        Screen::SkillTree => skill_tree_entries(session),
        Screen::Main => match session.phase() {
            SessionPhase::Exploring => explore_entries(session),
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingPlayerAction,
            } => combat_entries(session),
            // The opponent is mid-swing; nothing to choose.
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingOpponentResolution,
            } => Vec::new(),
        },
    }
}

fn explore_entries(session: &Session<PcgRng>) -> Vec<MenuEntry> {
    let world = session.world();
    let here = session.location();
    let threshold = session.content().config.danger_threshold;

    let mut entries = Vec::new();
    if let Ok(neighbors) = world.neighbors(here) {
        for &id in neighbors {
            let Ok(def) = world.def(id) else { continue };
            let visited = world.is_visited(id).unwrap_or(false);
            let marker = if visited { '+' } else { '?' };
            let danger = if def.danger >= threshold { " (!)" } else { "" };
            entries.push(MenuEntry {
                label: format!("[{marker}] {}{danger}", def.name),
                command: Command::Travel(id),
                enabled: true,
            });
        }
    }
    entries.push(MenuEntry {
        label: "Backtrack".to_string(),
        command: Command::Backtrack,
        enabled: session.history_depth() > 1,
    });
    entries
}

fn combat_entries(session: &Session<PcgRng>) -> Vec<MenuEntry> {
    let player = session.player();
    let mut entries = vec![
        MenuEntry {
            label: "Attack".to_string(),
            command: Command::Attack,
            enabled: true,
        },
        MenuEntry {
            label: format!("Defend (+{} DEF)", GameConfig::DEFEND_BONUS),
            command: Command::Defend,
            enabled: true,
        },
    ];

    for kind in ItemKind::iter() {
        let count = player.item_count(kind);
        if count > 0 {
            entries.push(MenuEntry {
                label: format!("Use {kind} x{count}"),
                command: Command::UseItem(kind),
                enabled: true,
            });
        }
    }

    for (id, node) in session.skills().nodes() {
        // Upgrade-tree nodes (power 0) are passive; nothing to cast.
        if !node.unlocked || node.def.power == 0 {
            continue;
        }
        let suffix = match node.def.kind {
            SkillKind::Offense => format!("{} DMG", node.def.power),
            SkillKind::Heal => format!("+{} HP", node.def.power),
            SkillKind::Buff => format!("{}/turn", node.def.power),
        };
        entries.push(MenuEntry {
            label: format!("{} ({} MP, {suffix})", node.def.name, node.def.cast_cost),
            command: Command::CastSkill(id),
            enabled: player.mp >= node.def.cast_cost,
        });
    }
    entries
}

fn skill_tree_entries(session: &Session<PcgRng>) -> Vec<MenuEntry> {
    session
        .skills()
        .nodes()
        .map(|(id, node)| {
            let state = if node.unlocked {
                "unlocked".to_string()
            } else {
                format!("{} gold", node.def.unlock_cost)
            };
            MenuEntry {
                label: format!("{} [{state}]", node.def.name),
                command: Command::UnlockSkill(id),
                enabled: !node.unlocked && session.player().gold >= node.def.unlock_cost,
            }
        })
        .collect()
}
