//! Glyphrun Core
//!
//! Shared utilities for the glyphrun workspace: logging setup, profiling
//! scopes, math re-exports and the small geometry types used by the layout
//! engine.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
