pub mod icons;

pub use icons::{IconImage, IconRegistry};
