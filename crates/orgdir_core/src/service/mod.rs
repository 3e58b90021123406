//! Directory use-case services.
//!
//! # Responsibility
//! - Validate inputs and referential integrity above the repository layer.
//! - Resolve activity hierarchies and run geospatial searches.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod activity_service;
pub mod building_service;
pub mod error;
pub mod hierarchy;
pub mod organization_service;
