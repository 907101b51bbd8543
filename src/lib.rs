//! Map Encoder - compiles annotated SVG maps into territory graph documents

pub mod batch;
pub mod compiler;
pub mod core;
pub mod geometry;
pub mod source;
