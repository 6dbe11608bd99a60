//! Terminal front end: line input parsing and text rendering of the current screen.

pub mod input;
pub mod render;
