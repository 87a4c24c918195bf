pub mod events;
pub mod handler;
pub mod state;

// Re-export the essential types
pub use events::{ControlEvent, ControlId, EventHandled};
pub use handler::Explorer;
pub use state::{FilterContext, Transition, VisibilityState};
