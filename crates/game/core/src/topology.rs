//! World/dungeon topology: a fixed undirected graph of locations.
//!
//! The static side (names, descriptions, adjacency, authored monsters and
//! treasure) lives in `&'static` tables supplied by the content crate and
//! never changes. The dynamic side (which locations the player has seen,
//! how much health an authored monster has left, whether treasure was
//! claimed) is tracked per session in [`LocationState`].
//!
//! The graph is never traversed algorithmically. The only query is direct
//! adjacency, used to populate the travel menu and to validate a travel
//! target.

use bitflags::bitflags;

use crate::error::CoreError;

/// Identity of a location in the fixed topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationId(pub u8);

impl LocationId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A monster authored into a location.
///
/// Its health lives in [`LocationState`] so it survives defeat resets and
/// partial fights; the definition itself is static.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterDef {
    pub name: &'static str,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
}

/// Static description of one location. Built once, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct LocationDef {
    pub id: LocationId,
    pub name: &'static str,
    pub description: &'static str,
    /// Danger rating; scales encounter stats and gates random encounters.
    pub danger: u8,
    /// Direct neighbors. Must be symmetric across the whole table.
    pub neighbors: &'static [LocationId],
    /// Monster authored into this location, if any.
    pub monster: Option<MonsterDef>,
    /// Whether this location starts with unclaimed treasure.
    pub treasure: bool,
    /// Hand-authored coordinates for the map view.
    pub position: (u16, u16),
}

bitflags! {
    /// Per-location session flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LocationFlags: u8 {
        const VISITED = 1 << 0;
        const TREASURE_CLAIMED = 1 << 1;
    }
}

/// Mutable per-location session state, keyed by the same id as the defs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationState {
    pub flags: LocationFlags,
    /// Remaining health of the authored monster; 0 if slain or absent.
    pub monster_hp: u32,
}

/// The fixed topology plus its per-session state.
#[derive(Clone, Debug)]
pub struct WorldMap {
    defs: &'static [LocationDef],
    states: Vec<LocationState>,
}

impl WorldMap {
    /// Build a world from a static location table.
    ///
    /// Debug builds assert the table's invariants: ids match indices and
    /// the neighbor relation is symmetric.
    pub fn new(defs: &'static [LocationDef]) -> Self {
        debug_assert!(defs.iter().enumerate().all(|(i, d)| d.id.index() == i));
        debug_assert!(defs.iter().all(|d| {
            d.neighbors.iter().all(|&n| {
                defs.get(n.index())
                    .is_some_and(|other| other.neighbors.contains(&d.id))
            })
        }));

        let states = defs
            .iter()
            .map(|def| LocationState {
                flags: LocationFlags::empty(),
                monster_hp: def.monster.map_or(0, |m| m.max_hp),
            })
            .collect();

        Self { defs, states }
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// All static definitions, for presentation layers.
    pub fn defs(&self) -> &'static [LocationDef] {
        self.defs
    }

    pub fn def(&self, id: LocationId) -> Result<&'static LocationDef, CoreError> {
        self.defs
            .get(id.index())
            .ok_or(CoreError::NotFound { location: id })
    }

    pub fn state(&self, id: LocationId) -> Result<&LocationState, CoreError> {
        self.states
            .get(id.index())
            .ok_or(CoreError::NotFound { location: id })
    }

    fn state_mut(&mut self, id: LocationId) -> Result<&mut LocationState, CoreError> {
        self.states
            .get_mut(id.index())
            .ok_or(CoreError::NotFound { location: id })
    }

    /// Direct neighbors of a location, in authored order.
    pub fn neighbors(&self, id: LocationId) -> Result<&'static [LocationId], CoreError> {
        Ok(self.def(id)?.neighbors)
    }

    pub fn describe(&self, id: LocationId) -> Result<&'static str, CoreError> {
        Ok(self.def(id)?.description)
    }

    pub fn danger_level(&self, id: LocationId) -> Result<u8, CoreError> {
        Ok(self.def(id)?.danger)
    }

    /// Whether `to` can be reached from `from` in one step.
    pub fn is_neighbor(&self, from: LocationId, to: LocationId) -> Result<bool, CoreError> {
        Ok(self.neighbors(from)?.contains(&to))
    }

    pub fn mark_visited(&mut self, id: LocationId) -> Result<(), CoreError> {
        self.state_mut(id)?.flags.insert(LocationFlags::VISITED);
        Ok(())
    }

    pub fn is_visited(&self, id: LocationId) -> Result<bool, CoreError> {
        Ok(self.state(id)?.flags.contains(LocationFlags::VISITED))
    }

    /// Remaining health of the location's authored monster (0 = none left).
    pub fn monster_hp(&self, id: LocationId) -> Result<u32, CoreError> {
        Ok(self.state(id)?.monster_hp)
    }

    pub fn set_monster_hp(&mut self, id: LocationId, hp: u32) -> Result<(), CoreError> {
        self.state_mut(id)?.monster_hp = hp;
        Ok(())
    }

    /// Whether the location still holds unclaimed treasure.
    pub fn has_treasure(&self, id: LocationId) -> Result<bool, CoreError> {
        let claimed = self
            .state(id)?
            .flags
            .contains(LocationFlags::TREASURE_CLAIMED);
        Ok(self.def(id)?.treasure && !claimed)
    }

    pub fn claim_treasure(&mut self, id: LocationId) -> Result<(), CoreError> {
        self.state_mut(id)?
            .flags
            .insert(LocationFlags::TREASURE_CLAIMED);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: LocationId = LocationId::new(0);
    const B: LocationId = LocationId::new(1);
    const C: LocationId = LocationId::new(2);

    static TRIANGLE: [LocationDef; 3] = [
        LocationDef {
            id: A,
            name: "Gate",
            description: "Where it starts.",
            danger: 1,
            neighbors: &[B, C],
            monster: None,
            treasure: false,
            position: (0, 0),
        },
        LocationDef {
            id: B,
            name: "Hall",
            description: "Echoes.",
            danger: 3,
            neighbors: &[A],
            monster: Some(MonsterDef {
                name: "Ghoul",
                max_hp: 25,
                attack: 5,
                defense: 0,
                level: 2,
            }),
            treasure: false,
            position: (1, 0),
        },
        LocationDef {
            id: C,
            name: "Vault",
            description: "Gold glints.",
            danger: 2,
            neighbors: &[A],
            monster: None,
            treasure: true,
            position: (0, 1),
        },
    ];

    #[test]
    fn adjacency_lookup() {
        let world = WorldMap::new(&TRIANGLE);
        assert_eq!(world.neighbors(A).unwrap(), &[B, C]);
        assert!(world.is_neighbor(A, B).unwrap());
        assert!(!world.is_neighbor(B, C).unwrap());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let world = WorldMap::new(&TRIANGLE);
        let missing = LocationId::new(9);
        assert_eq!(
            world.describe(missing),
            Err(CoreError::NotFound { location: missing })
        );
    }

    #[test]
    fn visited_flag_is_idempotent() {
        let mut world = WorldMap::new(&TRIANGLE);
        assert!(!world.is_visited(B).unwrap());
        world.mark_visited(B).unwrap();
        world.mark_visited(B).unwrap();
        assert!(world.is_visited(B).unwrap());
    }

    #[test]
    fn monster_health_tracks_per_session() {
        let mut world = WorldMap::new(&TRIANGLE);
        assert_eq!(world.monster_hp(B).unwrap(), 25);
        world.set_monster_hp(B, 4).unwrap();
        assert_eq!(world.monster_hp(B).unwrap(), 4);
        assert_eq!(world.monster_hp(A).unwrap(), 0);
    }

    #[test]
    fn treasure_claimed_once() {
        let mut world = WorldMap::new(&TRIANGLE);
        assert!(world.has_treasure(C).unwrap());
        world.claim_treasure(C).unwrap();
        assert!(!world.has_treasure(C).unwrap());
    }
}
