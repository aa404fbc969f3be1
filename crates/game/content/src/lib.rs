//! Static game content for the two bundled adventures.
//!
//! All content is authored as `&'static` tables consumed by
//! [`fable_core::WorldContent`]; nothing here is loaded at runtime and
//! nothing here appears in mutable game state. Each module exposes the
//! world definition plus a starting-player factory.

pub mod delve;
pub mod quest;

#[cfg(test)]
mod tests {
    use fable_core::{PcgRng, Session};

    /// Constructing a session exercises the adjacency/id debug checks in
    /// the world map, so a bad table fails loudly here.
    #[test]
    fn both_worlds_construct() {
        let _ = Session::new(crate::quest::world(), crate::quest::player(), PcgRng::new(1));
        let _ = Session::new(crate::delve::world(), crate::delve::player(), PcgRng::new(1));
    }

    #[test]
    fn quest_tables_are_consistent() {
        let world = crate::quest::world();
        assert_eq!(world.locations.len(), 8);
        assert_eq!(world.skills.len(), 7);
        // Random encounters are the point of the quest world.
        assert!(world.config.encounter_chance > 0);
        assert!(!world.species.is_empty());
        assert!(world.victory_location.is_none());
        for def in world.locations {
            for n in def.neighbors {
                let back = world.locations[n.index()].neighbors;
                assert!(back.contains(&def.id), "{} -> {n} is one-way", def.id);
            }
        }
    }

    #[test]
    fn delve_tables_are_consistent() {
        let world = crate::delve::world();
        assert_eq!(world.locations.len(), 10);
        assert_eq!(world.skills.len(), 7);
        // Monster rooms are authored; wild spawns stay off.
        assert_eq!(world.config.encounter_chance, 0);
        assert!(world.species.is_empty());
        let lair = world.victory_location.unwrap();
        assert!(world.locations[lair.index()].treasure);
        assert!(world.locations[lair.index()].monster.is_some());
        assert_eq!(
            world
                .locations
                .iter()
                .filter(|d| d.monster.is_some())
                .count(),
            4
        );
        assert_eq!(world.locations.iter().filter(|d| d.treasure).count(), 3);
    }
}
