//! Rendering widgets. Each takes the latest session snapshot and draws
//! one panel; none of them mutate anything.

pub mod journal;
pub mod map;
pub mod menu_panel;
pub mod skill_tree;
pub mod stats;
