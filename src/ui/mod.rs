pub mod event;
pub mod render;
pub mod theme;
