//! Task report generation.
//!
//! Fetches task records from a hosted project-management service and
//! flattens them into one row per task and assignee, with container names,
//! custom-field columns and assignee groups resolved. The module follows
//! hexagonal architecture:
//!
//! - Domain types and pure projections in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
