/// Game configuration constants and tunable parameters.
///
/// Compile-time constants cover the fixed shapes of the teaching data
/// structures (skill arena size, journal capacities); the struct fields are
/// the knobs that differ between the two applications.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Percent chance (0-100) that travel into a qualifying location starts
    /// an encounter. Zero disables random encounters entirely.
    pub encounter_chance: u8,

    /// Danger rating at or above which a visited location still rolls for
    /// an encounter on entry.
    pub danger_threshold: u8,

    /// Capacity of the session journal.
    pub journal_capacity: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of nodes in a skill tree: root + 2 children + 4 grandchildren.
    pub const SKILL_TREE_SIZE: usize = 7;
    /// Maximum simultaneous status effects on one actor.
    pub const MAX_STATUS_EFFECTS: usize = 4;

    // ===== journal capacities =====
    /// Battle-log capacity used by the turn-based battle demo.
    pub const BATTLE_JOURNAL_CAPACITY: usize = 100;
    /// Event-log capacity used by the dungeon crawler.
    pub const EVENT_JOURNAL_CAPACITY: usize = 10;

    // ===== combat tuning =====
    /// Damage variance rolled on top of the opponent's attack stat.
    pub const OPPONENT_VARIANCE: u32 = 10;
    /// Defense granted by the Defend action for one opponent resolution.
    pub const DEFEND_BONUS: u32 = 10;
    /// Turns a Regen status effect persists after being cast.
    pub const REGEN_DURATION: u8 = 3;

    // ===== progression =====
    /// Experience needed to level: `level * EXP_THRESHOLD_PER_LEVEL`.
    pub const EXP_THRESHOLD_PER_LEVEL: u32 = 100;
    /// Experience awarded on victory: `opponent_level * EXP_PER_LEVEL`.
    pub const EXP_PER_LEVEL: u32 = 30;
    /// Gold awarded on victory: `opponent_level * GOLD_PER_LEVEL`.
    pub const GOLD_PER_LEVEL: u32 = 20;
    /// One-in-N chance of an item drop on victory.
    pub const DROP_ONE_IN: u32 = 3;

    // ===== level-up deltas =====
    pub const LEVEL_UP_HP: u32 = 20;
    pub const LEVEL_UP_MP: u32 = 10;
    pub const LEVEL_UP_ATTACK: u32 = 5;
    pub const LEVEL_UP_DEFENSE: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENCOUNTER_CHANCE: u8 = 60;
    pub const DEFAULT_DANGER_THRESHOLD: u8 = 2;

    pub fn new() -> Self {
        Self {
            encounter_chance: Self::DEFAULT_ENCOUNTER_CHANCE,
            danger_threshold: Self::DEFAULT_DANGER_THRESHOLD,
            journal_capacity: Self::BATTLE_JOURNAL_CAPACITY,
        }
    }

    /// Configuration with random encounters disabled, for worlds where
    /// combat only starts in fixed monster locations.
    pub fn without_encounters() -> Self {
        Self {
            encounter_chance: 0,
            danger_threshold: u8::MAX,
            journal_capacity: Self::EVENT_JOURNAL_CAPACITY,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
