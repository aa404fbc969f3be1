//! Actor state: the player and the current opponent.
//!
//! Both sides of a fight use the same record; the player simply persists
//! for the whole session (reset in place on defeat) while an opponent is
//! created at encounter start and dropped at encounter end.
//!
//! Invariants maintained by the helper methods:
//! - `0 <= hp <= max_hp` and `0 <= mp <= max_mp`
//! - inventory counts never go negative
//! - resource debits either fully apply or leave the actor untouched

use std::collections::HashMap;

use arrayvec::ArrayVec;
use strum::{Display, EnumIter};

use crate::config::GameConfig;
use crate::error::CoreError;

/// Consumable items carried in an actor's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Restores 40 health.
    Potion,
    /// Restores 20 mana.
    Ether,
    /// Restores 30 health; the crawler's smaller brew.
    #[strum(serialize = "Health Potion")]
    HealthPotion,
}

impl ItemKind {
    /// Health restored when consumed.
    pub const fn heal_amount(self) -> u32 {
        match self {
            Self::Potion => 40,
            Self::Ether => 0,
            Self::HealthPotion => 30,
        }
    }

    /// Mana restored when consumed.
    pub const fn mana_amount(self) -> u32 {
        match self {
            Self::Ether => 20,
            Self::Potion | Self::HealthPotion => 0,
        }
    }
}

/// Kinds of temporary effects an actor can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Heals `per_turn` health at the start of each player combat turn.
    Regen { per_turn: u32 },
    /// Extra defense for exactly one opponent resolution.
    Guard { bonus: u32 },
}

/// One active status effect with its remaining duration in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining: u8,
}

/// A combatant: the player or the current opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub level: u32,
    pub exp: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u32,
    /// Upper bound of the uniform damage variance rolled on attacks.
    pub variance: u32,
    pub inventory: HashMap<ItemKind, u32>,
    pub status: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl Actor {
    /// A fresh level-1 actor at full health and mana.
    pub fn new(name: impl Into<String>, hp: u32, mp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            max_hp: hp,
            mp,
            max_mp: mp,
            level: 1,
            exp: 0,
            attack,
            defense,
            gold: 0,
            variance: GameConfig::OPPONENT_VARIANCE,
            inventory: HashMap::new(),
            status: ArrayVec::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_variance(mut self, variance: u32) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_item(mut self, kind: ItemKind, count: u32) -> Self {
        self.inventory.insert(kind, count);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Effective defense: base stat plus any active Guard bonus.
    pub fn effective_defense(&self) -> u32 {
        let guard: u32 = self
            .status
            .iter()
            .map(|s| match s.kind {
                StatusEffectKind::Guard { bonus } => bonus,
                StatusEffectKind::Regen { .. } => 0,
            })
            .sum();
        self.defense + guard
    }

    /// Apply raw physical damage: defense reduces it, but never below the
    /// chip floor of 1, and health floors at 0.
    ///
    /// Returns the damage actually dealt.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let dealt = raw.saturating_sub(self.effective_defense()).max(1);
        self.hp = self.hp.saturating_sub(dealt);
        dealt
    }

    /// Apply damage that ignores defense entirely (offensive abilities).
    pub fn take_true_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restore health, capped at the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    /// Restore mana, capped at the maximum. Returns the amount restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mp - self.mp);
        self.mp += restored;
        restored
    }

    /// Debit mana, or fail leaving the pool untouched.
    pub fn spend_mana(&mut self, cost: u32) -> Result<(), CoreError> {
        if self.mp < cost {
            return Err(CoreError::InsufficientResource {
                needed: cost,
                available: self.mp,
            });
        }
        self.mp -= cost;
        Ok(())
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    pub fn add_item(&mut self, kind: ItemKind) {
        *self.inventory.entry(kind).or_insert(0) += 1;
    }

    pub fn item_count(&self, kind: ItemKind) -> u32 {
        self.inventory.get(&kind).copied().unwrap_or(0)
    }

    /// Remove one of an item, or fail leaving the inventory untouched.
    pub fn consume_item(&mut self, kind: ItemKind) -> Result<(), CoreError> {
        match self.inventory.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(CoreError::InsufficientResource {
                needed: 1,
                available: 0,
            }),
        }
    }

    /// Grant experience and check the level threshold once.
    ///
    /// A single grant advances at most one level even if it crosses
    /// several thresholds; the source material behaves this way and the
    /// behavior is preserved as-is. Returns true if a level-up happened.
    pub fn grant_experience(&mut self, amount: u32) -> bool {
        self.exp += amount;
        if self.exp >= self.level * GameConfig::EXP_THRESHOLD_PER_LEVEL {
            self.level_up();
            true
        } else {
            false
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.exp = 0;
        self.max_hp += GameConfig::LEVEL_UP_HP;
        self.max_mp += GameConfig::LEVEL_UP_MP;
        self.attack += GameConfig::LEVEL_UP_ATTACK;
        self.defense += GameConfig::LEVEL_UP_DEFENSE;
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    /// Attach a status effect. When the bounded list is full the oldest
    /// effect is displaced.
    pub fn add_status(&mut self, effect: StatusEffect) {
        if self.status.is_full() {
            self.status.remove(0);
        }
        self.status.push(effect);
    }

    /// Tick Regen effects: heal, age them, and drop the expired ones.
    /// Returns the total health restored.
    pub fn tick_regen(&mut self) -> u32 {
        let mut restored = 0;
        for effect in &mut self.status {
            if let StatusEffectKind::Regen { per_turn } = effect.kind {
                restored += per_turn;
                effect.remaining = effect.remaining.saturating_sub(1);
            }
        }
        let restored = self.heal(restored);
        self.status.retain(|s| {
            !matches!(s.kind, StatusEffectKind::Regen { .. }) || s.remaining > 0
        });
        restored
    }

    /// Drop any Guard effect; called once the opponent's turn resolves.
    pub fn clear_guard(&mut self) {
        self.status
            .retain(|s| !matches!(s.kind, StatusEffectKind::Guard { .. }));
    }

    /// Wholesale reset on defeat: full health and mana, statuses cleared.
    /// Level, experience, gold, and inventory are kept.
    pub fn restore_fully(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
        self.status.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Actor {
        Actor::new("Hero", 100, 50, 20, 10).with_variance(15)
    }

    #[test]
    fn damage_is_reduced_by_defense_with_chip_floor() {
        let mut actor = hero();
        assert_eq!(actor.take_damage(25), 15);
        assert_eq!(actor.hp, 85);
        // Defense above the raw damage still chips 1.
        assert_eq!(actor.take_damage(3), 1);
        assert_eq!(actor.hp, 84);
    }

    #[test]
    fn health_floors_at_zero() {
        let mut actor = hero();
        actor.take_damage(5000);
        assert_eq!(actor.hp, 0);
        assert!(!actor.is_alive());
    }

    #[test]
    fn true_damage_ignores_defense() {
        let mut actor = hero();
        assert_eq!(actor.take_true_damage(35), 35);
        assert_eq!(actor.hp, 65);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut actor = hero();
        actor.take_damage(30);
        assert_eq!(actor.heal(500), 20);
        assert_eq!(actor.hp, actor.max_hp);
    }

    #[test]
    fn spend_mana_insufficient_is_a_noop() {
        let mut actor = hero();
        actor.mp = 5;
        let err = actor.spend_mana(10).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientResource {
                needed: 10,
                available: 5
            }
        );
        assert_eq!(actor.mp, 5);
    }

    #[test]
    fn consume_missing_item_fails() {
        let mut actor = hero();
        assert!(actor.consume_item(ItemKind::Potion).is_err());
        actor.add_item(ItemKind::Potion);
        assert!(actor.consume_item(ItemKind::Potion).is_ok());
        assert_eq!(actor.item_count(ItemKind::Potion), 0);
        assert!(actor.consume_item(ItemKind::Potion).is_err());
    }

    #[test]
    fn exact_threshold_levels_exactly_once() {
        let mut actor = hero();
        assert!(actor.grant_experience(100));
        assert_eq!(actor.level, 2);
        assert_eq!(actor.exp, 0);
        assert_eq!(actor.max_hp, 120);
        assert_eq!(actor.max_mp, 60);
        assert_eq!(actor.attack, 25);
        assert_eq!(actor.defense, 13);
        assert_eq!(actor.hp, actor.max_hp);
        assert_eq!(actor.mp, actor.max_mp);
    }

    #[test]
    fn oversized_grant_levels_only_once() {
        // Documented quirk: one grant, one level, even across thresholds.
        let mut actor = hero();
        assert!(actor.grant_experience(1000));
        assert_eq!(actor.level, 2);
        assert_eq!(actor.exp, 0);
    }

    #[test]
    fn sub_threshold_grant_accumulates() {
        let mut actor = hero();
        assert!(!actor.grant_experience(60));
        assert_eq!(actor.exp, 60);
        assert!(actor.grant_experience(40));
        assert_eq!(actor.level, 2);
    }

    #[test]
    fn guard_raises_defense_until_cleared() {
        let mut actor = hero();
        actor.add_status(StatusEffect {
            kind: StatusEffectKind::Guard { bonus: 10 },
            remaining: 1,
        });
        assert_eq!(actor.effective_defense(), 20);
        actor.clear_guard();
        assert_eq!(actor.effective_defense(), 10);
    }

    #[test]
    fn regen_ticks_and_expires() {
        let mut actor = hero();
        actor.take_damage(60);
        actor.add_status(StatusEffect {
            kind: StatusEffectKind::Regen { per_turn: 20 },
            remaining: 2,
        });
        assert_eq!(actor.tick_regen(), 20);
        assert_eq!(actor.tick_regen(), 20);
        assert!(actor.status.is_empty());
        assert_eq!(actor.tick_regen(), 0);
    }

    #[test]
    fn status_list_is_bounded() {
        let mut actor = hero();
        for i in 0..6 {
            actor.add_status(StatusEffect {
                kind: StatusEffectKind::Regen { per_turn: i },
                remaining: 3,
            });
        }
        assert_eq!(actor.status.len(), GameConfig::MAX_STATUS_EFFECTS);
    }

    #[test]
    fn restore_fully_keeps_progression() {
        let mut actor = hero();
        actor.grant_experience(40);
        actor.gain_gold(30);
        actor.take_damage(70);
        actor.restore_fully();
        assert_eq!(actor.hp, actor.max_hp);
        assert_eq!(actor.exp, 40);
        assert_eq!(actor.gold, 30);
    }
}
