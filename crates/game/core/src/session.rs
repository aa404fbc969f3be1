//! Session state machine: the controller that ties everything together.
//!
//! A [`Session`] owns the world, the skill tree, the player, the travel
//! history, the journal, and (during an encounter) the current opponent.
//! All mutation flows through [`Session::handle`], a reducer that validates
//! the command against the current phase, applies it, journals the result,
//! and returns the events it produced.
//!
//! The deferred "enemy turn" is modeled as an explicit two-phase turn
//! machine: a player combat action moves the
//! session to [`TurnPhase::AwaitingOpponentResolution`], and the runtime is
//! expected to deliver exactly one [`Command::ResolveOpponentTurn`] after
//! its fixed delay. A stale resolution arriving in any other phase is
//! rejected as an invalid transition, which callers drop silently.

use crate::actor::{Actor, ItemKind, StatusEffect, StatusEffectKind};
use crate::combat::{self, CastReport};
use crate::config::GameConfig;
use crate::error::{CoreError, PhaseName};
use crate::history::History;
use crate::journal::Journal;
use crate::rng::RngOracle;
use crate::skills::{SkillId, SkillNodeDef, SkillTree, UnlockBonus};
use crate::topology::{LocationDef, LocationId, MonsterDef, WorldMap};

/// A wild species that can appear in random encounters.
#[derive(Clone, Copy, Debug)]
pub struct SpeciesDef {
    pub name: &'static str,
}

/// Everything static that defines one of the two applications' worlds.
#[derive(Clone, Debug)]
pub struct WorldContent {
    pub name: &'static str,
    pub locations: &'static [LocationDef],
    pub start: LocationId,
    pub skills: &'static [SkillNodeDef],
    pub unlock_bonus: Option<UnlockBonus>,
    /// Species pool for random encounters; empty disables wild spawns.
    pub species: &'static [SpeciesDef],
    /// Item that opponents may drop on victory.
    pub drop_item: ItemKind,
    /// Claiming this location's treasure clears the session.
    pub victory_location: Option<LocationId>,
    pub config: GameConfig,
}

/// Where the current session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionPhase {
    /// No active opponent: travel, backtrack, and unlocks are enabled.
    Exploring,
    /// An opponent exists and is alive: combat actions only.
    InCombat { turn: TurnPhase },
}

/// Whose half of the combat turn is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    AwaitingPlayerAction,
    AwaitingOpponentResolution,
}

/// How the current encounter came to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EncounterSource {
    /// Random spawn; disappears entirely when the encounter ends.
    Wild,
    /// An authored monster; residual health persists in the world.
    Lair(LocationId),
}

/// The opponent the controller owns for the duration of one encounter.
#[derive(Clone, Debug)]
pub struct Encounter {
    pub opponent: Actor,
    source: EncounterSource,
}

/// Player input and the runtime's scheduled opponent resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Attack,
    Defend,
    UseItem(ItemKind),
    CastSkill(SkillId),
    UnlockSkill(SkillId),
    Travel(LocationId),
    Backtrack,
    /// Delivered by the runtime's turn scheduler, never by the player.
    ResolveOpponentTurn,
}

impl Command {
    /// Short label used in invalid-transition errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::UseItem(_) => "use an item",
            Self::CastSkill(_) => "cast a skill",
            Self::UnlockSkill(_) => "unlock a skill",
            Self::Travel(_) => "travel",
            Self::Backtrack => "backtrack",
            Self::ResolveOpponentTurn => "resolve the opponent's turn",
        }
    }
}

/// Observable outcomes of one handled command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Traveled {
        to: LocationId,
    },
    Backtracked {
        to: LocationId,
    },
    EncounterStarted {
        opponent: String,
        level: u32,
    },
    AttackLanded {
        dealt: u32,
    },
    SkillCast {
        skill: &'static str,
        report: CastReport,
    },
    Defended,
    ItemUsed {
        item: ItemKind,
    },
    OpponentStruck {
        dealt: u32,
    },
    RegenTicked {
        restored: u32,
    },
    Victory {
        exp: u32,
        gold: u32,
        leveled_up: bool,
    },
    ItemDropped {
        item: ItemKind,
    },
    Defeated,
    SkillUnlocked {
        skill: &'static str,
    },
    TreasureFound {
        gold: u32,
    },
    SessionCleared,
}

/// One full game session. See the module docs for the control flow.
#[derive(Clone, Debug)]
pub struct Session<R> {
    content: WorldContent,
    world: WorldMap,
    skills: SkillTree,
    player: Actor,
    encounter: Option<Encounter>,
    phase: SessionPhase,
    history: History,
    journal: Journal,
    cleared: bool,
    rng: R,
}

impl<R: RngOracle> Session<R> {
    pub fn new(content: WorldContent, player: Actor, rng: R) -> Self {
        let mut world = WorldMap::new(content.locations);
        // The starting location counts as visited from the first frame.
        world
            .mark_visited(content.start)
            .expect("starting location exists in the world tables");
        let history = History::new(content.start);
        let journal = Journal::new(content.config.journal_capacity);
        let skills = SkillTree::new(content.skills, content.unlock_bonus);
        Self {
            content,
            world,
            skills,
            player,
            encounter: None,
            phase: SessionPhase::Exploring,
            history,
            journal,
            cleared: false,
            rng,
        }
    }

    // ========================================================================
    // Read-only accessors for presentation layers
    // ========================================================================

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn location(&self) -> LocationId {
        self.history.current()
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn opponent(&self) -> Option<&Actor> {
        self.encounter.as_ref().map(|e| &e.opponent)
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn skills(&self) -> &SkillTree {
        &self.skills
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn content(&self) -> &WorldContent {
        &self.content
    }

    fn phase_name(&self) -> PhaseName {
        match self.phase {
            SessionPhase::Exploring => PhaseName::Exploring,
            SessionPhase::InCombat { turn } => turn.into(),
        }
    }

    fn invalid(&self, cmd: Command) -> CoreError {
        CoreError::InvalidTransition {
            attempted: cmd.name(),
            phase: self.phase_name(),
        }
    }

    // ========================================================================
    // The reducer
    // ========================================================================

    /// Apply one command to the session.
    ///
    /// On success the returned events describe everything that happened,
    /// in order, and the same text has been appended to the journal. On
    /// error nothing changed.
    pub fn handle(&mut self, cmd: Command) -> Result<Vec<SessionEvent>, CoreError> {
        let events = match (self.phase, cmd) {
            (SessionPhase::Exploring, Command::Travel(to)) => self.travel(to)?,
            (SessionPhase::Exploring, Command::Backtrack) => self.backtrack()?,
            (SessionPhase::Exploring, Command::UnlockSkill(id)) => self.unlock_skill(id)?,
            (
                SessionPhase::InCombat {
                    turn: TurnPhase::AwaitingPlayerAction,
                },
                Command::Attack,
            ) => self.player_attack(),
            (
                SessionPhase::InCombat {
                    turn: TurnPhase::AwaitingPlayerAction,
                },
                Command::Defend,
            ) => self.player_defend(),
            (
                SessionPhase::InCombat {
                    turn: TurnPhase::AwaitingPlayerAction,
                },
                Command::UseItem(kind),
            ) => self.player_use_item(kind)?,
            (
                SessionPhase::InCombat {
                    turn: TurnPhase::AwaitingPlayerAction,
                },
                Command::CastSkill(id),
            ) => self.player_cast(id)?,
            (
                SessionPhase::InCombat {
                    turn: TurnPhase::AwaitingOpponentResolution,
                },
                Command::ResolveOpponentTurn,
            ) => self.resolve_opponent_turn(),
            (_, cmd) => return Err(self.invalid(cmd)),
        };

        for event in &events {
            if let Some(line) = journal_line(event, &self.world) {
                self.journal.append(line);
            }
        }
        Ok(events)
    }

    // ========================================================================
    // Exploring handlers
    // ========================================================================

    fn travel(&mut self, to: LocationId) -> Result<Vec<SessionEvent>, CoreError> {
        if !self.world.is_neighbor(self.location(), to)? {
            // Only direct neighbors are reachable; anything else is a UI
            // glitch and is dropped like any other invalid transition.
            return Err(CoreError::InvalidTransition {
                attempted: "travel to a non-adjacent location",
                phase: PhaseName::Exploring,
            });
        }

        let first_visit = !self.world.is_visited(to)?;
        self.history.visit(to);
        self.world.mark_visited(to)?;

        let mut events = vec![SessionEvent::Traveled { to }];

        if let Some(event) = self.maybe_start_encounter(to, first_visit)? {
            // A living guardian keeps the room's treasure out of reach;
            // it stays unclaimed for a later, quieter visit.
            events.push(event);
            return Ok(events);
        }

        if self.world.has_treasure(to)? {
            self.world.claim_treasure(to)?;
            let gold = 20 + self.rng.range(0, 29);
            self.player.gain_gold(gold);
            events.push(SessionEvent::TreasureFound { gold });
            if self.content.victory_location == Some(to) {
                self.cleared = true;
                events.push(SessionEvent::SessionCleared);
            }
        }
        Ok(events)
    }

    /// Encounter triggering on entry: deterministic for a location whose
    /// authored monster still has health, probabilistic otherwise for
    /// unvisited or dangerous locations.
    fn maybe_start_encounter(
        &mut self,
        at: LocationId,
        first_visit: bool,
    ) -> Result<Option<SessionEvent>, CoreError> {
        let residual = self.world.monster_hp(at)?;
        if residual > 0 {
            let def = self
                .world
                .def(at)?
                .monster
                .expect("residual health implies an authored monster");
            return Ok(Some(self.start_lair_encounter(at, def, residual)));
        }

        let chance = self.content.config.encounter_chance;
        if chance == 0 || self.content.species.is_empty() {
            return Ok(None);
        }
        let dangerous = self.world.danger_level(at)? >= self.content.config.danger_threshold;
        if (first_visit || dangerous) && self.rng.percent_roll(chance) {
            return Ok(Some(self.start_wild_encounter(at)?));
        }
        Ok(None)
    }

    fn start_lair_encounter(
        &mut self,
        at: LocationId,
        def: MonsterDef,
        residual: u32,
    ) -> SessionEvent {
        let mut opponent =
            Actor::new(def.name, def.max_hp, 0, def.attack, def.defense).with_level(def.level);
        opponent.hp = residual;
        let event = SessionEvent::EncounterStarted {
            opponent: opponent.name.clone(),
            level: opponent.level,
        };
        self.encounter = Some(Encounter {
            opponent,
            source: EncounterSource::Lair(at),
        });
        self.phase = SessionPhase::InCombat {
            turn: TurnPhase::AwaitingPlayerAction,
        };
        event
    }

    fn start_wild_encounter(&mut self, at: LocationId) -> Result<SessionEvent, CoreError> {
        let level = u32::from(self.world.danger_level(at)?);
        let species = *self.rng.pick(self.content.species);
        // Wild stats scale linearly with the location's danger rating.
        let opponent = Actor::new(
            species.name,
            40 + level * 15,
            20 + level * 5,
            10 + level * 5,
            5 + level * 2,
        )
        .with_level(level);
        let event = SessionEvent::EncounterStarted {
            opponent: opponent.name.clone(),
            level,
        };
        self.encounter = Some(Encounter {
            opponent,
            source: EncounterSource::Wild,
        });
        self.phase = SessionPhase::InCombat {
            turn: TurnPhase::AwaitingPlayerAction,
        };
        Ok(event)
    }

    fn backtrack(&mut self) -> Result<Vec<SessionEvent>, CoreError> {
        match self.history.backtrack() {
            Some(to) => Ok(vec![SessionEvent::Backtracked { to }]),
            None => Err(CoreError::InvalidTransition {
                attempted: "backtrack past the starting location",
                phase: PhaseName::Exploring,
            }),
        }
    }

    fn unlock_skill(&mut self, id: SkillId) -> Result<Vec<SessionEvent>, CoreError> {
        if !self.skills.try_unlock(id, &mut self.player.gold)? {
            return Ok(Vec::new());
        }
        let name = self
            .skills
            .get(id)
            .map(|node| node.def.name)
            .unwrap_or_default();
        if let Some(UnlockBonus { attack, max_hp }) = self.skills.unlock_bonus() {
            self.player.attack += attack;
            self.player.max_hp += max_hp;
            self.player.hp += max_hp;
        }
        Ok(vec![SessionEvent::SkillUnlocked { skill: name }])
    }

    // ========================================================================
    // Combat handlers (player half)
    // ========================================================================

    fn player_attack(&mut self) -> Vec<SessionEvent> {
        let encounter = self
            .encounter
            .as_mut()
            .expect("in combat without an opponent");
        let report = combat::physical_attack(&self.player, &mut encounter.opponent, &mut self.rng);
        let mut events = vec![SessionEvent::AttackLanded {
            dealt: report.dealt,
        }];
        self.after_player_action(report.defeated, &mut events);
        events
    }

    fn player_defend(&mut self) -> Vec<SessionEvent> {
        self.player.add_status(StatusEffect {
            kind: StatusEffectKind::Guard {
                bonus: GameConfig::DEFEND_BONUS,
            },
            remaining: 1,
        });
        let mut events = vec![SessionEvent::Defended];
        self.after_player_action(false, &mut events);
        events
    }

    fn player_use_item(&mut self, kind: ItemKind) -> Result<Vec<SessionEvent>, CoreError> {
        self.player.consume_item(kind)?;
        self.player.heal(kind.heal_amount());
        self.player.restore_mana(kind.mana_amount());
        let mut events = vec![SessionEvent::ItemUsed { item: kind }];
        self.after_player_action(false, &mut events);
        Ok(events)
    }

    fn player_cast(&mut self, id: SkillId) -> Result<Vec<SessionEvent>, CoreError> {
        if !self.skills.is_unlocked(id) {
            return Err(CoreError::InvalidTransition {
                attempted: "cast a locked skill",
                phase: self.phase_name(),
            });
        }
        let def = self
            .skills
            .get(id)
            .map(|node| node.def)
            .expect("unlocked id exists in the arena");
        let encounter = self
            .encounter
            .as_mut()
            .expect("in combat without an opponent");
        let report = combat::cast_skill(&mut self.player, &mut encounter.opponent, def)?;
        let defeated = matches!(report, CastReport::Damage { defeated: true, .. });
        let mut events = vec![SessionEvent::SkillCast {
            skill: def.name,
            report,
        }];
        self.after_player_action(defeated, &mut events);
        Ok(events)
    }

    /// Common tail of every player combat action: either the opponent is
    /// down and the encounter ends in victory, or the turn passes to the
    /// opponent.
    fn after_player_action(&mut self, opponent_defeated: bool, events: &mut Vec<SessionEvent>) {
        if opponent_defeated {
            self.finish_victory(events);
        } else {
            self.phase = SessionPhase::InCombat {
                turn: TurnPhase::AwaitingOpponentResolution,
            };
        }
    }

    fn finish_victory(&mut self, events: &mut Vec<SessionEvent>) {
        let encounter = self.encounter.take().expect("victory without an opponent");
        if let EncounterSource::Lair(at) = encounter.source {
            // The authored monster is gone for the rest of the session.
            self.world
                .set_monster_hp(at, 0)
                .expect("lair id was valid when the encounter started");
        }
        let loot = combat::roll_loot(
            encounter.opponent.level,
            self.content.drop_item,
            &mut self.rng,
        );
        let leveled_up = self.player.grant_experience(loot.exp);
        self.player.gain_gold(loot.gold);
        events.push(SessionEvent::Victory {
            exp: loot.exp,
            gold: loot.gold,
            leveled_up,
        });
        if let Some(item) = loot.drop {
            self.player.add_item(item);
            events.push(SessionEvent::ItemDropped { item });
        }
        self.player.clear_guard();
        self.phase = SessionPhase::Exploring;
    }

    // ========================================================================
    // Combat handlers (opponent half)
    // ========================================================================

    fn resolve_opponent_turn(&mut self) -> Vec<SessionEvent> {
        let encounter = self
            .encounter
            .as_mut()
            .expect("in combat without an opponent");
        let report = combat::physical_attack(&encounter.opponent, &mut self.player, &mut self.rng);
        // Guard covers exactly this resolution.
        self.player.clear_guard();

        let mut events = vec![SessionEvent::OpponentStruck {
            dealt: report.dealt,
        }];

        if !self.player.is_alive() {
            self.finish_defeat(&mut events);
            return events;
        }

        let restored = self.player.tick_regen();
        if restored > 0 {
            events.push(SessionEvent::RegenTicked { restored });
        }
        self.phase = SessionPhase::InCombat {
            turn: TurnPhase::AwaitingPlayerAction,
        };
        events
    }

    /// Defeat is a wholesale soft reset, not a terminal state: the player
    /// is restored in place, the location returns to the start, and the
    /// history collapses to its pinned bottom entry.
    fn finish_defeat(&mut self, events: &mut Vec<SessionEvent>) {
        if let Some(encounter) = self.encounter.take() {
            if let EncounterSource::Lair(at) = encounter.source {
                // The monster keeps its residual health for the next visit.
                self.world
                    .set_monster_hp(at, encounter.opponent.hp)
                    .expect("lair id was valid when the encounter started");
            }
        }
        self.player.restore_fully();
        self.history.reset();
        self.phase = SessionPhase::Exploring;
        events.push(SessionEvent::Defeated);
    }
}

/// Text appended to the journal for an event, if any.
fn journal_line(event: &SessionEvent, world: &WorldMap) -> Option<String> {
    let name = |id: LocationId| {
        world
            .def(id)
            .map(|def| def.name)
            .unwrap_or("an unknown place")
    };
    let line = match event {
        SessionEvent::Traveled { to } => {
            let description = world.describe(*to).unwrap_or_default();
            format!("Traveled to {}. {description}", name(*to))
        }
        SessionEvent::Backtracked { to } => format!("Backtracked to {}", name(*to)),
        SessionEvent::EncounterStarted { opponent, level } => {
            format!("A wild {opponent} (level {level}) appears!")
        }
        SessionEvent::AttackLanded { dealt } => format!("You attack for {dealt} damage!"),
        SessionEvent::SkillCast { skill, report } => match report {
            CastReport::Damage { dealt, .. } => format!("Cast {skill} for {dealt} damage!"),
            CastReport::Healed { restored } => format!("Cast {skill}! Restored {restored} HP!"),
            CastReport::RegenApplied { per_turn } => {
                format!("Cast {skill}! Regenerating {per_turn} HP a turn.")
            }
        },
        SessionEvent::Defended => "You brace for impact! Defense increased!".to_string(),
        SessionEvent::ItemUsed { item } => format!("Used {item}!"),
        SessionEvent::OpponentStruck { dealt } => format!("The enemy attacks for {dealt} damage!"),
        SessionEvent::RegenTicked { restored } => format!("Regen restores {restored} HP."),
        SessionEvent::Victory { exp, gold, .. } => {
            format!("Victory! Gained {exp} EXP and {gold} gold!")
        }
        SessionEvent::ItemDropped { item } => format!("Found a {item}!"),
        SessionEvent::Defeated => "You have been defeated! The journey restarts...".to_string(),
        SessionEvent::SkillUnlocked { skill } => format!("Unlocked: {skill}"),
        SessionEvent::TreasureFound { gold } => format!("Found treasure: {gold} gold!"),
        SessionEvent::SessionCleared => "LEGENDARY TREASURE! You win!".to_string(),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::ScriptedRng;
    use crate::skills::SkillKind;

    const START: LocationId = LocationId::new(0);
    const GLADE: LocationId = LocationId::new(1);
    const LAIR: LocationId = LocationId::new(2);
    const VAULT: LocationId = LocationId::new(3);

    static LOCATIONS: [LocationDef; 4] = [
        LocationDef {
            id: START,
            name: "Village",
            description: "Home.",
            danger: 1,
            neighbors: &[GLADE, LAIR],
            monster: None,
            treasure: false,
            position: (0, 0),
        },
        LocationDef {
            id: GLADE,
            name: "Glade",
            description: "Quiet trees.",
            danger: 2,
            neighbors: &[START, VAULT],
            monster: None,
            treasure: false,
            position: (1, 0),
        },
        LocationDef {
            id: LAIR,
            name: "Lair",
            description: "Something breathes here.",
            danger: 4,
            neighbors: &[START],
            monster: Some(MonsterDef {
                name: "Troll",
                max_hp: 40,
                attack: 12,
                defense: 2,
                level: 3,
            }),
            treasure: true,
            position: (0, 1),
        },
        LocationDef {
            id: VAULT,
            name: "Vault",
            description: "Glittering dark.",
            danger: 2,
            neighbors: &[GLADE],
            monster: None,
            treasure: true,
            position: (2, 0),
        },
    ];

    static SKILLS: [SkillNodeDef; 7] = [
        SkillNodeDef {
            name: "Strike",
            unlock_cost: 0,
            cast_cost: 0,
            power: 20,
            kind: SkillKind::Offense,
            left: Some(SkillId(1)),
            right: Some(SkillId(2)),
        },
        SkillNodeDef {
            name: "Fire",
            unlock_cost: 10,
            cast_cost: 10,
            power: 35,
            kind: SkillKind::Offense,
            left: Some(SkillId(3)),
            right: Some(SkillId(4)),
        },
        SkillNodeDef {
            name: "Heal",
            unlock_cost: 10,
            cast_cost: 8,
            power: 30,
            kind: SkillKind::Heal,
            left: Some(SkillId(5)),
            right: Some(SkillId(6)),
        },
        SkillNodeDef {
            name: "A",
            unlock_cost: 25,
            cast_cost: 25,
            power: 60,
            kind: SkillKind::Offense,
            left: None,
            right: None,
        },
        SkillNodeDef {
            name: "B",
            unlock_cost: 15,
            cast_cost: 15,
            power: 45,
            kind: SkillKind::Offense,
            left: None,
            right: None,
        },
        SkillNodeDef {
            name: "C",
            unlock_cost: 20,
            cast_cost: 20,
            power: 50,
            kind: SkillKind::Heal,
            left: None,
            right: None,
        },
        SkillNodeDef {
            name: "D",
            unlock_cost: 12,
            cast_cost: 12,
            power: 20,
            kind: SkillKind::Buff,
            left: None,
            right: None,
        },
    ];

    static WILD: [SpeciesDef; 1] = [SpeciesDef { name: "Goblin" }];

    fn content(encounter_chance: u8) -> WorldContent {
        WorldContent {
            name: "test world",
            locations: &LOCATIONS,
            start: START,
            skills: &SKILLS,
            unlock_bonus: None,
            species: &WILD,
            drop_item: ItemKind::Potion,
            victory_location: Some(VAULT),
            config: GameConfig {
                encounter_chance,
                danger_threshold: 2,
                journal_capacity: 50,
            },
        }
    }

    fn hero() -> Actor {
        Actor::new("Hero", 100, 50, 20, 10)
            .with_variance(15)
            .with_item(ItemKind::Potion, 3)
    }

    fn peaceful_session() -> Session<ScriptedRng> {
        // Encounter chance 0: travel never spawns anything.
        Session::new(content(0), hero(), ScriptedRng::new([99]))
    }

    #[test]
    fn starting_location_begins_visited() {
        let session = peaceful_session();
        assert!(session.world().is_visited(START).unwrap());
        assert_eq!(session.location(), START);
    }

    #[test]
    fn travel_requires_adjacency() {
        let mut session = peaceful_session();
        let err = session.handle(Command::Travel(VAULT)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(session.location(), START);
    }

    #[test]
    fn travel_and_backtrack_round_trip() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(GLADE)).unwrap();
        // VAULT holds treasure; entering it claims the gold and clears.
        session.handle(Command::Travel(VAULT)).unwrap();
        session.handle(Command::Backtrack).unwrap();
        session.handle(Command::Backtrack).unwrap();
        assert_eq!(session.location(), START);
        assert_eq!(session.history_depth(), 1);
        let err = session.handle(Command::Backtrack).unwrap_err();
        assert!(err.is_silent());
    }

    #[test]
    fn treasure_claims_once_and_clears_the_session() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(GLADE)).unwrap();
        let events = session.handle(Command::Travel(VAULT)).unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::TreasureFound { .. }
        )));
        assert!(events.contains(&SessionEvent::SessionCleared));
        assert!(session.is_cleared());
        let gold_after = session.player().gold;

        // Leaving and returning finds the vault already looted.
        session.handle(Command::Backtrack).unwrap();
        let events = session.handle(Command::Travel(VAULT)).unwrap();
        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::TreasureFound { .. }
        )));
        assert_eq!(session.player().gold, gold_after);
    }

    #[test]
    fn combat_commands_rejected_while_exploring() {
        let mut session = peaceful_session();
        for cmd in [
            Command::Attack,
            Command::Defend,
            Command::UseItem(ItemKind::Potion),
            Command::CastSkill(SkillId::ROOT),
            Command::ResolveOpponentTurn,
        ] {
            let err = session.handle(cmd).unwrap_err();
            assert!(err.is_silent(), "{cmd:?} should be silently invalid");
        }
    }

    #[test]
    fn entering_a_lair_starts_combat_deterministically() {
        let mut session = peaceful_session();
        let events = session.handle(Command::Travel(LAIR)).unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::EncounterStarted { level: 3, .. }
        )));
        assert_eq!(
            session.phase(),
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingPlayerAction
            }
        );
        assert_eq!(session.opponent().unwrap().name, "Troll");
        // Travel is now locked out.
        assert!(session.handle(Command::Travel(START)).unwrap_err().is_silent());
    }

    #[test]
    fn wild_encounter_scales_with_danger() {
        // Roll order on travel: percent_roll, then species pick.
        let rng = ScriptedRng::new([0, 0]);
        let mut session = Session::new(content(60), hero(), rng);
        session.handle(Command::Travel(GLADE)).unwrap();
        let opponent = session.opponent().unwrap();
        assert_eq!(opponent.name, "Goblin");
        assert_eq!(opponent.level, 2);
        assert_eq!(opponent.hp, 70); // 40 + 2*15
        assert_eq!(opponent.attack, 20); // 10 + 2*5
        assert_eq!(opponent.defense, 9); // 5 + 2*2
    }

    #[test]
    fn player_action_passes_the_turn() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(LAIR)).unwrap();
        session.handle(Command::Attack).unwrap();
        assert_eq!(
            session.phase(),
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingOpponentResolution
            }
        );
        // A second player action before the opponent resolves is invalid.
        assert!(session.handle(Command::Attack).unwrap_err().is_silent());
        session.handle(Command::ResolveOpponentTurn).unwrap();
        assert_eq!(
            session.phase(),
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingPlayerAction
            }
        );
    }

    #[test]
    fn fight_to_victory_grants_scaled_rewards() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(LAIR)).unwrap();
        let start_gold = session.player().gold;
        let mut guard = 0;
        loop {
            let events = session.handle(Command::Attack).unwrap();
            if let Some(SessionEvent::Victory { exp, gold, .. }) = events
                .iter()
                .find(|e| matches!(e, SessionEvent::Victory { .. }))
            {
                assert_eq!(*exp, 90); // level 3 * 30
                assert_eq!(*gold, 60); // level 3 * 20
                break;
            }
            session.handle(Command::ResolveOpponentTurn).unwrap();
            guard += 1;
            assert!(guard < 50, "fight should end");
        }
        assert_eq!(session.phase(), SessionPhase::Exploring);
        assert!(session.opponent().is_none());
        assert_eq!(session.player().gold, start_gold + 60);
        // The authored monster stays dead: re-entering is peaceful, and
        // the hoard it was guarding is finally claimable.
        session.handle(Command::Backtrack).unwrap();
        let events = session.handle(Command::Travel(LAIR)).unwrap();
        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::EncounterStarted { .. }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::TreasureFound { .. }
        )));
    }

    #[test]
    fn a_living_guardian_blocks_its_treasure() {
        let mut session = peaceful_session();
        let gold_before = session.player().gold;
        let events = session.handle(Command::Travel(LAIR)).unwrap();
        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::TreasureFound { .. }
        )));
        assert_eq!(session.player().gold, gold_before);
        assert!(session.world().has_treasure(LAIR).unwrap());
    }

    #[test]
    fn cast_with_insufficient_mana_is_a_surfaced_noop() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(LAIR)).unwrap();
        let mut gold = 100;
        // Unlock Fire directly on the tree for the test setup.
        session.skills.try_unlock(SkillId(1), &mut gold).unwrap();
        session.player.mp = 5;
        let opponent_hp = session.opponent().unwrap().hp;
        let err = session.handle(Command::CastSkill(SkillId(1))).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientResource {
                needed: 10,
                available: 5
            }
        );
        assert_eq!(session.player().mp, 5);
        assert_eq!(session.opponent().unwrap().hp, opponent_hp);
        // Still the player's turn.
        assert_eq!(
            session.phase(),
            SessionPhase::InCombat {
                turn: TurnPhase::AwaitingPlayerAction
            }
        );
    }

    #[test]
    fn casting_a_locked_skill_is_silently_rejected() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(LAIR)).unwrap();
        assert!(session
            .handle(Command::CastSkill(SkillId(3)))
            .unwrap_err()
            .is_silent());
    }

    #[test]
    fn defend_absorbs_the_next_strike_only() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(LAIR)).unwrap();
        session.handle(Command::Defend).unwrap();
        assert_eq!(session.player().effective_defense(), 20);
        session.handle(Command::ResolveOpponentTurn).unwrap();
        assert_eq!(session.player().effective_defense(), 10);
    }

    #[test]
    fn defeat_soft_resets_the_session() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(GLADE)).unwrap();
        session.handle(Command::Backtrack).unwrap();
        session.handle(Command::Travel(LAIR)).unwrap();
        session.handle(Command::Attack).unwrap();
        session.player.hp = 1;
        let residual = session.opponent().unwrap().hp;
        let events = session.handle(Command::ResolveOpponentTurn).unwrap();
        assert!(events.contains(&SessionEvent::Defeated));
        assert_eq!(session.phase(), SessionPhase::Exploring);
        assert_eq!(session.location(), START);
        assert_eq!(session.history_depth(), 1);
        assert!(session.opponent().is_none());
        assert_eq!(session.player().hp, session.player().max_hp);
        // The wounded monster remembers its health.
        assert_eq!(session.world().monster_hp(LAIR).unwrap(), residual);
        // And re-entering restarts the fight at that health.
        session.handle(Command::Travel(LAIR)).unwrap();
        assert_eq!(session.opponent().unwrap().hp, residual);
    }

    #[test]
    fn unlock_bonus_applies_per_node() {
        let mut content = content(0);
        content.unlock_bonus = Some(UnlockBonus {
            attack: 5,
            max_hp: 20,
        });
        let mut player = hero();
        player.gold = 25;
        let mut session = Session::new(content, player, ScriptedRng::new([99]));
        session.handle(Command::UnlockSkill(SkillId(1))).unwrap();
        assert_eq!(session.player().attack, 25);
        assert_eq!(session.player().max_hp, 120);
        assert_eq!(session.player().hp, 120);
        assert_eq!(session.player().gold, 15);
        // Unlocking the same node again changes nothing.
        let events = session.handle(Command::UnlockSkill(SkillId(1))).unwrap();
        assert!(events.is_empty());
        assert_eq!(session.player().attack, 25);
    }

    #[test]
    fn journal_records_the_fight() {
        let mut session = peaceful_session();
        session.handle(Command::Travel(LAIR)).unwrap();
        session.handle(Command::Attack).unwrap();
        let lines: Vec<_> = session.journal().iter().collect();
        assert!(lines.iter().any(|l| l.contains("Troll")));
        assert!(lines.iter().any(|l| l.contains("You attack for")));
    }
}
