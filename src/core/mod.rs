//! Document model: the wire schema, the closed component set, grid placement
//! and document sources.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod color;
pub mod component;
pub mod document;
pub mod grid;
pub mod sample;
pub mod source;
