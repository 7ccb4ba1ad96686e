//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and placements
//! - Colors as written in scene documents
//! - Logging utilities

pub mod math;
pub mod color;
pub mod logging;
