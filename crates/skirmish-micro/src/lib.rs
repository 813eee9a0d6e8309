//! Unit micro for the skirmish combat engine.
//!
//! Implements the three-hook policy contract, the closed registry of
//! per-archetype policies, the generic fallback micro (focus fire, kite,
//! push) and scored target selection.

pub mod context;
pub mod generic;
pub mod modes;
pub mod policies;
pub mod policy;
pub mod profiles;
pub mod targeting;

pub use context::{GroupOrder, MicroContext};
pub use policy::{GroupSolution, MicroPolicy, MicroRegistry, Policy, PolicyKind};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
