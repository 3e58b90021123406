//! Directory domain model: buildings, the activity taxonomy, organizations.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Normalize and validate create inputs before they reach storage.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID that is never reused.
//! - Create inputs are validated with `normalize()` before persistence.

pub mod activity;
pub mod building;
pub mod organization;
pub mod validation;
