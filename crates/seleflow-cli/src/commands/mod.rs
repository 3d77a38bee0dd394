pub mod actions;
pub mod build;
pub mod render;
pub mod shell;
