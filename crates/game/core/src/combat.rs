//! Combat resolution: pure functions over two actors.
//!
//! Each function either fully applies its effect or returns an error with
//! both actors untouched. The session layer decides what the outcomes mean
//! (victory, defeat, journal text); nothing here looks at session phase.

use crate::actor::{Actor, ItemKind, StatusEffect, StatusEffectKind};
use crate::config::GameConfig;
use crate::error::CoreError;
use crate::rng::RngOracle;
use crate::skills::{SkillKind, SkillNodeDef};

/// Outcome of one physical attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackReport {
    /// Raw damage before the defender's reduction: attack + variance roll.
    pub raw: u32,
    /// Damage actually dealt after defense and the chip floor.
    pub dealt: u32,
    /// Whether the defender dropped to 0 health.
    pub defeated: bool,
}

/// Outcome of casting a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastReport {
    /// Flat damage dealt to the target, defense ignored.
    Damage { dealt: u32, defeated: bool },
    /// Health restored to the caster.
    Healed { restored: u32 },
    /// A regeneration effect was applied to the caster.
    RegenApplied { per_turn: u32 },
}

/// Rewards rolled on victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loot {
    pub exp: u32,
    pub gold: u32,
    pub drop: Option<ItemKind>,
}

/// Resolve a basic physical attack.
///
/// Damage is `attack + uniform(0, variance)`, reduced by the defender's
/// effective defense with a chip floor of 1; the defender's health floors
/// at 0.
pub fn physical_attack(
    attacker: &Actor,
    defender: &mut Actor,
    rng: &mut impl RngOracle,
) -> AttackReport {
    let raw = attacker.attack + rng.range(0, attacker.variance);
    let dealt = defender.take_damage(raw);
    AttackReport {
        raw,
        dealt,
        defeated: !defender.is_alive(),
    }
}

/// Resolve casting a skill from the ability tree.
///
/// Fails with `InsufficientResource` when the caster lacks the mana,
/// leaving caster and target untouched. Offensive skills deal their flat
/// power to the target ignoring defense; heals restore the caster; buffs
/// attach a regeneration effect to the caster.
pub fn cast_skill(
    caster: &mut Actor,
    target: &mut Actor,
    def: &SkillNodeDef,
) -> Result<CastReport, CoreError> {
    caster.spend_mana(def.cast_cost)?;

    let report = match def.kind {
        SkillKind::Offense => {
            let dealt = target.take_true_damage(def.power);
            CastReport::Damage {
                dealt,
                defeated: !target.is_alive(),
            }
        }
        SkillKind::Heal => CastReport::Healed {
            restored: caster.heal(def.power),
        },
        SkillKind::Buff => {
            caster.add_status(StatusEffect {
                kind: StatusEffectKind::Regen {
                    per_turn: def.power,
                },
                remaining: GameConfig::REGEN_DURATION,
            });
            CastReport::RegenApplied {
                per_turn: def.power,
            }
        }
    };
    Ok(report)
}

/// Roll the rewards for defeating an opponent of the given level.
pub fn roll_loot(level: u32, drop: ItemKind, rng: &mut impl RngOracle) -> Loot {
    Loot {
        exp: level * GameConfig::EXP_PER_LEVEL,
        gold: level * GameConfig::GOLD_PER_LEVEL,
        drop: rng.one_in(GameConfig::DROP_ONE_IN).then_some(drop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::ScriptedRng;
    use crate::skills::SkillId;

    fn hero() -> Actor {
        Actor::new("Hero", 100, 50, 20, 10).with_variance(15)
    }

    fn goblin() -> Actor {
        Actor::new("Goblin", 55, 25, 15, 7)
    }

    const FIRE: SkillNodeDef = SkillNodeDef {
        name: "Fire",
        unlock_cost: 10,
        cast_cost: 10,
        power: 35,
        kind: SkillKind::Offense,
        left: None,
        right: None,
    };

    const HEAL: SkillNodeDef = SkillNodeDef {
        name: "Heal",
        unlock_cost: 10,
        cast_cost: 8,
        power: 30,
        kind: SkillKind::Heal,
        left: Some(SkillId(5)),
        right: None,
    };

    const REGEN: SkillNodeDef = SkillNodeDef {
        name: "Regen",
        unlock_cost: 10,
        cast_cost: 12,
        power: 20,
        kind: SkillKind::Buff,
        left: None,
        right: None,
    };

    #[test]
    fn attack_formula_matches_the_book() {
        // Fresh hero vs level-1 goblin: damage = 20 + roll(0..=15) - 7.
        let hero = hero();
        let mut target = goblin();
        let mut rng = ScriptedRng::new([6]);
        let report = physical_attack(&hero, &mut target, &mut rng);
        assert_eq!(report.raw, 26);
        assert_eq!(report.dealt, 19);
        assert_eq!(target.hp, 36);
        assert!(!report.defeated);
    }

    #[test]
    fn attack_always_chips_at_least_one() {
        let weakling = Actor::new("Mouse", 10, 0, 1, 0).with_variance(0);
        let mut tank = Actor::new("Wall", 50, 0, 0, 999);
        let mut rng = ScriptedRng::zeros();
        let report = physical_attack(&weakling, &mut tank, &mut rng);
        assert_eq!(report.dealt, 1);
        assert_eq!(tank.hp, 49);
    }

    #[test]
    fn attack_reports_defeat() {
        let hero = hero();
        let mut target = goblin();
        target.hp = 5;
        let mut rng = ScriptedRng::zeros();
        assert!(physical_attack(&hero, &mut target, &mut rng).defeated);
        assert_eq!(target.hp, 0);
    }

    #[test]
    fn offense_cast_ignores_defense() {
        let mut caster = hero();
        let mut target = goblin();
        let report = cast_skill(&mut caster, &mut target, &FIRE).unwrap();
        assert_eq!(
            report,
            CastReport::Damage {
                dealt: 35,
                defeated: false
            }
        );
        assert_eq!(target.hp, 20);
        assert_eq!(caster.mp, 40);
    }

    #[test]
    fn cast_without_mana_leaves_everything_unchanged() {
        let mut caster = hero();
        caster.mp = 5;
        let mut target = goblin();
        let err = cast_skill(&mut caster, &mut target, &FIRE).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientResource {
                needed: 10,
                available: 5
            }
        );
        assert_eq!(caster.mp, 5);
        assert_eq!(target.hp, 55);
    }

    #[test]
    fn heal_cast_restores_the_caster() {
        let mut caster = hero();
        caster.hp = 50;
        let mut target = goblin();
        let report = cast_skill(&mut caster, &mut target, &HEAL).unwrap();
        assert_eq!(report, CastReport::Healed { restored: 30 });
        assert_eq!(caster.hp, 80);
        assert_eq!(target.hp, 55);
    }

    #[test]
    fn buff_cast_applies_regen() {
        let mut caster = hero();
        let mut target = goblin();
        let report = cast_skill(&mut caster, &mut target, &REGEN).unwrap();
        assert_eq!(report, CastReport::RegenApplied { per_turn: 20 });
        assert_eq!(caster.status.len(), 1);
    }

    #[test]
    fn loot_scales_with_level() {
        let mut rng = ScriptedRng::new([1]); // one_in(3) fails
        let loot = roll_loot(4, ItemKind::Potion, &mut rng);
        assert_eq!(loot.exp, 120);
        assert_eq!(loot.gold, 80);
        assert_eq!(loot.drop, None);

        let mut rng = ScriptedRng::zeros(); // one_in(3) succeeds
        let loot = roll_loot(1, ItemKind::Potion, &mut rng);
        assert_eq!(loot.exp, 30);
        assert_eq!(loot.drop, Some(ItemKind::Potion));
    }
}
