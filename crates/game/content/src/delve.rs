//! The `delve` adventure: a ten-room dungeon crawl with authored monsters,
//! treasure rooms, and a gold-funded upgrade tree. Entering the Dragon
//! Lair's hoard clears the run.
//!
//! Positions place rooms on the map canvas, west entrance to east lair.

use fable_core::{
    Actor, GameConfig, ItemKind, LocationDef, LocationId, MonsterDef, SkillId, SkillKind,
    SkillNodeDef, UnlockBonus, WorldContent,
};

const ENTRANCE: LocationId = LocationId::new(0);
const ARMORY: LocationId = LocationId::new(1);
const LIBRARY: LocationId = LocationId::new(2);
const TREASURY: LocationId = LocationId::new(3);
const KITCHEN: LocationId = LocationId::new(4);
const CRYPT: LocationId = LocationId::new(5);
const THRONE_ROOM: LocationId = LocationId::new(6);
const GARDEN: LocationId = LocationId::new(7);
const TOWER: LocationId = LocationId::new(8);
const DRAGON_LAIR: LocationId = LocationId::new(9);

static LOCATIONS: [LocationDef; 10] = [
    LocationDef {
        id: ENTRANCE,
        name: "Entrance",
        description: "Torchlight flickers over the dungeon gate.",
        danger: 1,
        neighbors: &[ARMORY, LIBRARY],
        monster: None,
        treasure: false,
        position: (200, 400),
    },
    LocationDef {
        id: ARMORY,
        name: "Armory",
        description: "Racks of rusted weapons line the walls.",
        danger: 1,
        neighbors: &[ENTRANCE, TREASURY, KITCHEN],
        monster: None,
        treasure: false,
        position: (350, 250),
    },
    LocationDef {
        id: LIBRARY,
        name: "Library",
        description: "Moldering tomes and a heavy silence.",
        danger: 1,
        neighbors: &[ENTRANCE, KITCHEN, CRYPT],
        monster: None,
        treasure: false,
        position: (350, 550),
    },
    LocationDef {
        id: TREASURY,
        name: "Treasury",
        description: "A guarded vault of coin and gemstone.",
        danger: 2,
        neighbors: &[ARMORY, THRONE_ROOM],
        monster: Some(MonsterDef {
            name: "Treasury Guardian",
            max_hp: 30,
            attack: 5,
            defense: 0,
            level: 1,
        }),
        treasure: true,
        position: (500, 150),
    },
    LocationDef {
        id: KITCHEN,
        name: "Kitchen",
        description: "Cold hearths and the smell of old grease.",
        danger: 1,
        neighbors: &[ARMORY, LIBRARY, THRONE_ROOM, GARDEN],
        monster: None,
        treasure: false,
        position: (500, 400),
    },
    LocationDef {
        id: CRYPT,
        name: "Crypt",
        description: "Stone coffins, and something stirring among them.",
        danger: 3,
        neighbors: &[LIBRARY, GARDEN],
        monster: Some(MonsterDef {
            name: "Crypt Horror",
            max_hp: 40,
            attack: 5,
            defense: 0,
            level: 2,
        }),
        treasure: false,
        position: (500, 650),
    },
    LocationDef {
        id: THRONE_ROOM,
        name: "Throne Room",
        description: "A cracked throne beneath a vaulted ceiling.",
        danger: 1,
        neighbors: &[TREASURY, KITCHEN, TOWER],
        monster: None,
        treasure: true,
        position: (650, 300),
    },
    LocationDef {
        id: GARDEN,
        name: "Garden",
        description: "An overgrown courtyard open to gray sky.",
        danger: 1,
        neighbors: &[KITCHEN, CRYPT, DRAGON_LAIR],
        monster: None,
        treasure: false,
        position: (650, 500),
    },
    LocationDef {
        id: TOWER,
        name: "Tower",
        description: "A spiral stair climbing into darkness.",
        danger: 4,
        neighbors: &[THRONE_ROOM, DRAGON_LAIR],
        monster: Some(MonsterDef {
            name: "Tower Sentinel",
            max_hp: 50,
            attack: 5,
            defense: 0,
            level: 3,
        }),
        treasure: false,
        position: (800, 200),
    },
    LocationDef {
        id: DRAGON_LAIR,
        name: "Dragon Lair",
        description: "Heat, gold, and a pair of slitted eyes.",
        danger: 5,
        neighbors: &[GARDEN, TOWER],
        monster: Some(MonsterDef {
            name: "Dragon",
            max_hp: 80,
            attack: 5,
            defense: 0,
            level: 4,
        }),
        treasure: true,
        position: (800, 600),
    },
];

static SKILLS: [SkillNodeDef; 7] = [
    SkillNodeDef {
        name: "Warrior",
        unlock_cost: 0,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: Some(SkillId(1)),
        right: Some(SkillId(2)),
    },
    SkillNodeDef {
        name: "Shield",
        unlock_cost: 5,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: Some(SkillId(3)),
        right: Some(SkillId(4)),
    },
    SkillNodeDef {
        name: "Sword",
        unlock_cost: 5,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: Some(SkillId(5)),
        right: Some(SkillId(6)),
    },
    SkillNodeDef {
        name: "Iron Shield",
        unlock_cost: 10,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: None,
        right: None,
    },
    SkillNodeDef {
        name: "Magic Shield",
        unlock_cost: 10,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: None,
        right: None,
    },
    SkillNodeDef {
        name: "Fire Sword",
        unlock_cost: 10,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: None,
        right: None,
    },
    SkillNodeDef {
        name: "Ice Sword",
        unlock_cost: 10,
        cast_cost: 0,
        power: 0,
        kind: SkillKind::Buff,
        left: None,
        right: None,
    },
];

pub fn world() -> WorldContent {
    WorldContent {
        name: "Dungeon Delve",
        locations: &LOCATIONS,
        start: ENTRANCE,
        skills: &SKILLS,
        unlock_bonus: Some(UnlockBonus {
            attack: 5,
            max_hp: 20,
        }),
        species: &[],
        drop_item: ItemKind::HealthPotion,
        victory_location: Some(DRAGON_LAIR),
        config: GameConfig::without_encounters(),
    }
}

pub fn player() -> Actor {
    Actor::new("Adventurer", 100, 0, 10, 0).with_variance(10)
}
