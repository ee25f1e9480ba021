//! UI / rendering layer: the component dispatcher and everything that
//! touches Ratatui widgets.
//!
//! This layer turns the *core* document model into widget nodes and draws
//! them.  No I/O happens here.

pub mod grid_widget;
pub mod layout;
pub mod node;
pub mod renderer;
pub mod stack;
pub mod theme;
pub mod title_bar;
pub mod toast;
