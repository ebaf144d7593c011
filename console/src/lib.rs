//! Role-gated dashboard consoles over the records client.
//!
//! Mounting a console runs the session guard, builds its tab set, and loads
//! each panel independently; renderers are pure functions from records to
//! display text.

pub mod controllers;
pub mod guard;
pub mod panel;
pub mod render;
pub mod tabs;
