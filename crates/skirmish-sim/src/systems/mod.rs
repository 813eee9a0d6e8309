//! ECS systems that operate on the skirmish world each step.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only). They do not own state. All state lives in components.

pub mod abilities;
pub mod cleanup;
pub mod movement;
pub mod orders;
pub mod snapshot;
pub mod weapons;
