pub mod controls;
pub mod popup;

pub use controls::{FilterSelection, ToggleLabel};
pub use popup::{Popup, PopupContent, PopupEntry, PopupOptions};
