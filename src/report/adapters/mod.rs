//! Adapter implementations for report ports.

pub mod json;
pub mod memory;
