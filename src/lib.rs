//! Taskflat: per-assignee task reports from a hosted project-management
//! service.
//!
//! The crate fetches task records from a list, resolves the names of the
//! list, folder and space each task lives in, projects the custom fields a
//! report cares about, and emits one flat row per task and assignee with the
//! assignee's group attached.
//!
//! # Architecture
//!
//! Taskflat follows hexagonal architecture principles:
//!
//! - **Domain**: Pure projections with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task source and row sinks
//! - **Adapters**: In-memory and JSON implementations of ports
//!
//! # Modules
//!
//! - [`report`]: Timestamp codec, custom-field projection, group index and
//!   task flattening

pub mod report;
