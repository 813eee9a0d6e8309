//! Core types and definitions for the skirmish combat engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! unit snapshots, unit data tables, the power model, actions, commands,
//! collaborator contracts, configuration and constants.
//! It has no dependency on any runtime or ECS framework.

pub mod action;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod power;
pub mod services;
pub mod spatial;
pub mod state;
pub mod types;
pub mod unit;
pub mod unit_data;

pub use error::{CombatError, Result};

#[cfg(test)]
mod tests;
