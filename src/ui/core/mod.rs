//! Core UI functionality for commit2act.
//!
//! This module contains the fundamental building blocks for the user interface:
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait and rendering abstractions
//! - [`event_handler`] - Terminal event polling
//! - [`task_manager`] - Background gateway calls and their lifetimes
//!
//! Components turn key presses into [`Action`]s; the app component executes them,
//! spawning network work on the [`TaskManager`], whose results come back as
//! further actions on the next tick.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

// Re-export core types for easier access from other modules
pub use actions::{Action, DialogType, Screen, SessionId};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
