pub mod document;
pub mod graph;
pub mod render;
pub mod scene;
pub mod style;
