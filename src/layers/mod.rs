pub mod assignment;
pub mod base;
pub mod builder;
pub mod filter;
pub mod manager;

// Re-export the essential types
pub use assignment::{AssignmentPass, CategoryAssignment};
pub use base::{LayerSpec, LayerType, LayerUpdate, Visibility};
pub use builder::PredicateBuilder;
pub use filter::Filter;
pub use manager::{LayerManager, ManagedLayer};
