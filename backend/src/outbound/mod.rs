//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: booking document stores (JSON file, in-memory)
//! - **notification**: reservation notices
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod notification;
pub mod persistence;
