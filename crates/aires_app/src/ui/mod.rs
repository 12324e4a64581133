pub mod render;
pub mod terminal;
