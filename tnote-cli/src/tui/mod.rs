pub mod picker;
pub mod theme;
