//! Group combat engine and headless skirmish harness.
//!
//! `CombatEngine` groups one side's units, decides an intent per group and
//! hands each group to the micro layer. `Skirmish` runs two engines against
//! each other in a hecs world at a fixed step rate.

pub mod cache;
pub mod cooldowns;
pub mod engagement;
pub mod engine;
pub mod grouping;
pub mod pathing;
pub mod resolver;
pub mod scenario;
pub mod skirmish;
pub mod systems;
pub mod world_setup;

pub use engine::CombatEngine;
pub use skirmish::{Skirmish, SkirmishConfig};
pub use skirmish_core as core;
