//! Application orchestration: state management, events, and input handling.

pub mod event;
pub mod handler;
pub mod state;
pub mod toast;
