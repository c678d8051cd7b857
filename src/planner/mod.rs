//! Roadmap planning: ranks servers, schedules their phases and derives
//! risks, costs and project-level views.
//!
//! Data flows one way:
//! 1. `priority` orders servers by migration priority
//! 2. `scheduler` expands each server's strategy template into dated phases
//! 3. `risk` attaches threshold-driven risks and mitigations
//! 4. `timeline` lays servers out back to back and gathers cost estimates
//! 5. `summary` aggregates the finished timeline

pub mod catalog;
pub mod priority;
pub mod risk;
pub mod scheduler;
pub mod summary;
pub mod timeline;
pub mod types;

pub use timeline::RoadmapGenerator;
pub use types::ProjectPlan;
