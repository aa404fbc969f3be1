//! The ability/skill tree: a fixed seven-node binary tree.
//!
//! The tree shape never changes at runtime, so nodes live in an arena of
//! fixed indices with integer child links instead of owned pointers. Only
//! the `unlocked` flags mutate, and a flag never clears once set.
//!
//! There is deliberately no parent-prerequisite chain: unlocking is gated
//! per node by the resource cost alone, matching the source material.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::CoreError;

/// Index of a node in the skill arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u8);

impl SkillId {
    /// The root node, unlocked from initialization.
    pub const ROOT: SkillId = SkillId(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What casting (or, for upgrade trees, owning) a skill does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Flat damage to the opponent, ignoring defense.
    Offense,
    /// Restores the caster's own health, capped at the maximum.
    Heal,
    /// Applies a regeneration status effect to the caster.
    Buff,
}

/// Static definition of one node, authored by the content crate.
#[derive(Clone, Copy, Debug)]
pub struct SkillNodeDef {
    pub name: &'static str,
    /// Gold required to unlock the node.
    pub unlock_cost: u32,
    /// Mana required to cast the skill in combat.
    pub cast_cost: u32,
    /// Effect magnitude: damage, healing, or regen-per-turn.
    pub power: u32,
    pub kind: SkillKind,
    pub left: Option<SkillId>,
    pub right: Option<SkillId>,
}

/// One node of the arena: its static definition plus the unlock flag.
#[derive(Clone, Copy, Debug)]
pub struct SkillNode {
    pub def: &'static SkillNodeDef,
    pub unlocked: bool,
}

/// Flat stat bonus granted each time a node of this tree is unlocked.
///
/// Used by the crawler's upgrade tree; the battle demo's ability tree has
/// no unlock bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnlockBonus {
    pub attack: u32,
    pub max_hp: u32,
}

/// The fixed-shape binary skill tree.
#[derive(Clone, Debug)]
pub struct SkillTree {
    nodes: ArrayVec<SkillNode, { GameConfig::SKILL_TREE_SIZE }>,
    unlock_bonus: Option<UnlockBonus>,
}

impl SkillTree {
    /// Build a tree from its static node table. The root starts unlocked.
    ///
    /// Panics if the table is not exactly [`GameConfig::SKILL_TREE_SIZE`]
    /// nodes; tree shape is a content-authoring invariant, not an input.
    pub fn new(defs: &'static [SkillNodeDef], unlock_bonus: Option<UnlockBonus>) -> Self {
        assert_eq!(defs.len(), GameConfig::SKILL_TREE_SIZE);
        let mut nodes: ArrayVec<SkillNode, { GameConfig::SKILL_TREE_SIZE }> = defs
            .iter()
            .map(|def| SkillNode {
                def,
                unlocked: false,
            })
            .collect();
        nodes[SkillId::ROOT.index()].unlocked = true;
        Self {
            nodes,
            unlock_bonus,
        }
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillNode> {
        self.nodes.get(id.index())
    }

    pub fn is_unlocked(&self, id: SkillId) -> bool {
        self.get(id).is_some_and(|node| node.unlocked)
    }

    /// All nodes in arena order, for the tree view.
    pub fn nodes(&self) -> impl Iterator<Item = (SkillId, &SkillNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (SkillId(i as u8), node))
    }

    /// Stat bonus applied on each unlock, if this tree grants one.
    pub fn unlock_bonus(&self) -> Option<UnlockBonus> {
        self.unlock_bonus
    }

    /// Lazy pre-order walk over the unlocked nodes.
    ///
    /// Finite and restartable: each call returns a fresh iterator starting
    /// at the root.
    pub fn unlocked(&self) -> UnlockedSkills<'_> {
        UnlockedSkills {
            tree: self,
            stack: vec![SkillId::ROOT],
        }
    }

    /// Attempt to unlock a node against a gold pool.
    ///
    /// Already unlocked: `Ok(false)`, nothing changes. Enough gold: the
    /// pool is debited by the node's cost, the flag is set, `Ok(true)`.
    /// Otherwise `InsufficientResource` with all state untouched.
    pub fn try_unlock(&mut self, id: SkillId, gold: &mut u32) -> Result<bool, CoreError> {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return Ok(false);
        };
        if node.unlocked {
            return Ok(false);
        }
        if *gold < node.def.unlock_cost {
            return Err(CoreError::InsufficientResource {
                needed: node.def.unlock_cost,
                available: *gold,
            });
        }
        *gold -= node.def.unlock_cost;
        node.unlocked = true;
        Ok(true)
    }
}

/// Iterator produced by [`SkillTree::unlocked`].
///
/// Walks the tree pre-order (node, left subtree, right subtree) using an
/// explicit stack, yielding only unlocked nodes.
pub struct UnlockedSkills<'a> {
    tree: &'a SkillTree,
    stack: Vec<SkillId>,
}

impl<'a> Iterator for UnlockedSkills<'a> {
    type Item = (SkillId, &'a SkillNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = self.tree.get(id)?;
            // Right first so the left subtree pops before it.
            if let Some(right) = node.def.right {
                self.stack.push(right);
            }
            if let Some(left) = node.def.left {
                self.stack.push(left);
            }
            if node.unlocked {
                return Some((id, node));
            }
        }
        None
    }
}
