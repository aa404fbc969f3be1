//! The `quest` adventure: a turn-based journey across eight locations with
//! random encounters, a mana-driven ability tree, and a consumable pouch.

use fable_core::{
    Actor, GameConfig, ItemKind, LocationDef, LocationId, SkillId, SkillKind, SkillNodeDef,
    SpeciesDef, WorldContent,
};

const VILLAGE: LocationId = LocationId::new(0);
const FOREST_PATH: LocationId = LocationId::new(1);
const DARK_WOODS: LocationId = LocationId::new(2);
const CRYSTAL_CAVE: LocationId = LocationId::new(3);
const OLD_MINE: LocationId = LocationId::new(4);
const ANCIENT_RUINS: LocationId = LocationId::new(5);
const MOUNTAIN_PEAK: LocationId = LocationId::new(6);
const FINAL_CASTLE: LocationId = LocationId::new(7);

static LOCATIONS: [LocationDef; 8] = [
    LocationDef {
        id: VILLAGE,
        name: "Starting Village",
        description: "A peaceful village where your journey begins.",
        danger: 1,
        neighbors: &[FOREST_PATH, OLD_MINE],
        monster: None,
        treasure: false,
        position: (60, 300),
    },
    LocationDef {
        id: FOREST_PATH,
        name: "Forest Path",
        description: "A winding path through dense trees.",
        danger: 2,
        neighbors: &[VILLAGE, DARK_WOODS, CRYSTAL_CAVE],
        monster: None,
        treasure: false,
        position: (220, 180),
    },
    LocationDef {
        id: DARK_WOODS,
        name: "Dark Woods",
        description: "Dangerous woods filled with monsters.",
        danger: 4,
        neighbors: &[FOREST_PATH, ANCIENT_RUINS],
        monster: None,
        treasure: false,
        position: (400, 100),
    },
    LocationDef {
        id: CRYSTAL_CAVE,
        name: "Crystal Cave",
        description: "A mystical cave with glowing crystals.",
        danger: 3,
        neighbors: &[FOREST_PATH, MOUNTAIN_PEAK],
        monster: None,
        treasure: false,
        position: (400, 280),
    },
    LocationDef {
        id: OLD_MINE,
        name: "Old Mine",
        description: "An abandoned mine with treasures.",
        danger: 3,
        neighbors: &[VILLAGE, ANCIENT_RUINS],
        monster: None,
        treasure: false,
        position: (220, 420),
    },
    LocationDef {
        id: ANCIENT_RUINS,
        name: "Ancient Ruins",
        description: "Crumbling ruins of an ancient civilization.",
        danger: 5,
        neighbors: &[DARK_WOODS, OLD_MINE, FINAL_CASTLE],
        monster: None,
        treasure: false,
        position: (560, 340),
    },
    LocationDef {
        id: MOUNTAIN_PEAK,
        name: "Mountain Peak",
        description: "The highest point with a breathtaking view.",
        danger: 5,
        neighbors: &[CRYSTAL_CAVE, FINAL_CASTLE],
        monster: None,
        treasure: false,
        position: (560, 160),
    },
    LocationDef {
        id: FINAL_CASTLE,
        name: "Final Castle",
        description: "The dark lord's fortress.",
        danger: 7,
        neighbors: &[ANCIENT_RUINS, MOUNTAIN_PEAK],
        monster: None,
        treasure: false,
        position: (720, 250),
    },
];

static SKILLS: [SkillNodeDef; 7] = [
    SkillNodeDef {
        name: "Attack",
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
        name: "Firaga",
        unlock_cost: 30,
        cast_cost: 25,
        power: 60,
        kind: SkillKind::Offense,
        left: None,
        right: None,
    },
    SkillNodeDef {
        name: "Thunder",
        unlock_cost: 20,
        cast_cost: 15,
        power: 45,
        kind: SkillKind::Offense,
        left: None,
        right: None,
    },
    SkillNodeDef {
        name: "Cura",
        unlock_cost: 25,
        cast_cost: 20,
        power: 50,
        kind: SkillKind::Heal,
        left: None,
        right: None,
    },
    SkillNodeDef {
        name: "Regen",
        unlock_cost: 15,
        cast_cost: 12,
        power: 20,
        kind: SkillKind::Buff,
        left: None,
        right: None,
    },
];

static SPECIES: [SpeciesDef; 5] = [
    SpeciesDef { name: "Goblin" },
    SpeciesDef { name: "Wolf" },
    SpeciesDef { name: "Skeleton" },
    SpeciesDef { name: "Orc" },
    SpeciesDef { name: "Dragon" },
];

pub fn world() -> WorldContent {
    WorldContent {
        name: "Fantasy Quest",
        locations: &LOCATIONS,
        start: VILLAGE,
        skills: &SKILLS,
        unlock_bonus: None,
        species: &SPECIES,
        drop_item: ItemKind::Potion,
        victory_location: None,
        config: GameConfig::new(),
    }
}

pub fn player() -> Actor {
    Actor::new("Hero", 100, 50, 20, 10)
        .with_variance(15)
        .with_item(ItemKind::Potion, 3)
        .with_item(ItemKind::Ether, 2)
}
