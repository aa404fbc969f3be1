//! Deterministic game logic shared by the two fable applications.
//!
//! `fable-core` defines the canonical rules: the world topology, the skill
//! tree, actor stats and combat resolution, the travel history stack, the
//! bounded journal, and the session state machine that ties them together.
//! All state mutation flows through [`session::Session::handle`], and the
//! runtime and clients depend on the types re-exported here.
pub mod actor;
pub mod combat;
pub mod config;
pub mod error;
pub mod history;
pub mod journal;
pub mod rng;
pub mod session;
pub mod skills;
pub mod topology;

pub use actor::{Actor, ItemKind, StatusEffect, StatusEffectKind};
pub use combat::{AttackReport, CastReport, Loot, cast_skill, physical_attack, roll_loot};
pub use config::GameConfig;
pub use error::{CoreError, CoreResult};
pub use history::History;
pub use journal::Journal;
pub use rng::{PcgRng, RngOracle};
pub use session::{
    Command, Encounter, Session, SessionEvent, SessionPhase, SpeciesDef, TurnPhase, WorldContent,
};
pub use skills::{SkillId, SkillKind, SkillNode, SkillNodeDef, SkillTree, UnlockBonus};
pub use topology::{LocationDef, LocationFlags, LocationId, LocationState, MonsterDef, WorldMap};
