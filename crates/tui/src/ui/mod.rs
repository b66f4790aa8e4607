//! UI rendering module for the TUI application.
//!
//! This module provides the components, focus identifiers, theme, and the
//! terminal runtime that drives them.

pub mod components;
pub mod focus;
pub mod runtime;
pub mod theme;
pub mod utils;
