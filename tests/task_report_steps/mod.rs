//! Step definitions for task report BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
